// PENMAN graph notation, as used for UMR sentence and document graphs
//
//   (s1s / sit-01
//       :ARG0 (s1c / cat))
//
// decodes to the triples
//
//   (s1s, :instance, sit-01) (s1s, :ARG0, s1c) (s1c, :instance, cat)

pub mod decoder;
pub mod tokenizer;

pub use decoder::{decode, DecodeError, Graph, Triple, INSTANCE_ROLE};

/// Anything that turns graph notation into triples.
pub trait GraphDecoder {
    fn decode(&self, txt: &str) -> Result<Graph, DecodeError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PenmanDecoder;

impl GraphDecoder for PenmanDecoder {
    fn decode(&self, txt: &str) -> Result<Graph, DecodeError> {
        decoder::decode(txt)
    }
}
