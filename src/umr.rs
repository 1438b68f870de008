// UMR (Uniform Meaning Representation) annotation files
//
// A file is a sequence of blocks separated by a line of at least 80 '#'.
// Each block holds one sentence:
//
//   # meta-info :: sent_id = ...
//   # :: snt1
//   Index: 1 2 3
//   Words: The cat sat
//
//   # sentence level graph:
//   (s1s / sit-01 ...)
//
//   # alignment:
//   s1s: 3-3
//
//   # document level annotation:
//   (s1s0 / sentence)
//
// The layout is loosely followed across languages, so everything here is
// best-effort pattern matching rather than validation.

pub mod block_parser;
pub mod corpus;
pub mod export;
pub mod filter;
pub mod parser;
pub mod sentence_info_parser;
pub mod splitter;
