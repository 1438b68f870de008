use log::warn;

use crate::{
    penman::{GraphDecoder, PenmanDecoder},
    statistics::normalizer::Normalizer,
};

pub const META_INFO_MARKER: &str = "# meta-info";
pub const PARTIAL_CONVERSION_MARKER: &str = "type = partial_conversion";
pub const WORDS_PREFIX: &str = "Words:";
pub const SENTENCE_GRAPH_MARKER: &str = "# sentence level graph:";
pub const DOCUMENT_ANNOTATION_MARKER: &str = "# document level annotation:";

// a document graph this short is only the root node declaration
const MIN_DOCUMENT_GRAPH_LINES: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockStats {
    pub is_partial: bool,
    pub word_count: usize,
    pub has_sentence_graph: bool,
    pub has_doc_graph: bool,
    pub relations_count: usize,
    pub concepts_count: usize,
    pub doc_relations_count: usize,
}

pub struct BlockAnalyzer<D> {
    decoder: D,
    normalizer: Normalizer,
}

impl Default for BlockAnalyzer<PenmanDecoder> {
    fn default() -> Self {
        BlockAnalyzer::new(PenmanDecoder, Normalizer::default())
    }
}

impl<D: GraphDecoder> BlockAnalyzer<D> {
    pub fn new(decoder: D, normalizer: Normalizer) -> Self {
        BlockAnalyzer {
            decoder,
            normalizer,
        }
    }

    pub fn analyze(&self, block: &str) -> BlockStats {
        let lines: Vec<&str> = block.lines().collect();

        let mut stats = BlockStats {
            is_partial: is_partial_conversion(&lines),
            word_count: count_words(&lines),
            ..Default::default()
        };

        if let Some(graph_lines) = section_lines(&lines, SENTENCE_GRAPH_MARKER) {
            let graph = graph_lines.join("\n");
            let graph = graph.trim();

            if !graph.is_empty() {
                stats.has_sentence_graph = true;

                let graph = self.normalizer.normalize(graph);
                match self.decoder.decode(&graph) {
                    Ok(graph) => {
                        stats.concepts_count = graph.instances().count();
                        stats.relations_count = graph.edges().count();
                    }
                    Err(err) => {
                        warn!("Failed to decode sentence level graph ({}):\n{}", err, graph);
                    }
                }
            }
        }

        if let Some(document_lines) = section_lines(&lines, DOCUMENT_ANNOTATION_MARKER) {
            let document_lines: Vec<&str> = document_lines
                .iter()
                .map(|line| line.trim())
                .filter(|line| !line.is_empty())
                .collect();

            if has_document_annotation_by_line_count(&document_lines) {
                stats.has_doc_graph = true;
                // one line per relation after the root node, an approximation
                stats.doc_relations_count = document_lines.len() - 1;
            }
        }

        stats
    }
}

pub fn is_partial_conversion(lines: &[&str]) -> bool {
    lines
        .iter()
        .any(|line| line.starts_with(META_INFO_MARKER) && line.contains(PARTIAL_CONVERSION_MARKER))
}

/// Number of tokens on the first `Words:` line.
pub fn count_words(lines: &[&str]) -> usize {
    lines
        .iter()
        .find_map(|line| line.strip_prefix(WORDS_PREFIX))
        .map_or(0, |words| words.split_whitespace().count())
}

/// Lines after the first `marker` line up to the next line starting with '#'.
pub fn section_lines<'a, 'b>(lines: &'a [&'b str], marker: &str) -> Option<&'a [&'b str]> {
    let start = lines
        .iter()
        .position(|line| line.trim().starts_with(marker))?
        + 1;

    let len = lines[start..]
        .iter()
        .position(|line| line.trim().starts_with('#'))
        .unwrap_or(lines.len() - start);

    Some(&lines[start..start + len])
}

/// Whether the non-empty lines of a document level annotation hold more
/// than the root node.
pub fn has_document_annotation_by_line_count(non_empty_lines: &[&str]) -> bool {
    non_empty_lines.len() >= MIN_DOCUMENT_GRAPH_LINES
}
