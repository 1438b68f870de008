use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::umr::sentence_info_parser::{parse_sentence_info, SentenceInfo};

pub const SENTENCE_GRAPH_PREFIX: &str = "sentence level graph:";
pub const ALIGNMENT_PREFIX: &str = "alignment:";
pub const DOCUMENT_ANNOTATION_PREFIX: &str = "document level annotation:";

pub const PARTIAL_CONVERSION_MARKER: &str = "type = partial_conversion";

// meta info, sentence info and at least one annotation section
const MIN_SECTIONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotationBlock {
    pub meta_info: String,
    pub sentence_info: SentenceInfo,
    pub sentence_annotation: Option<String>,
    pub alignment: Option<String>,
    pub document_annotation: Option<String>,
    pub has_document_annotation: bool,
}

impl AnnotationBlock {
    pub fn is_partial_conversion(&self) -> bool {
        self.meta_info.contains(PARTIAL_CONVERSION_MARKER)
    }
}

/// Parses one block of a UMR file.
///
/// The block is cut at every '#', so a '#' inside a graph also starts a new
/// section. Returns `None` for blocks with fewer than three sections.
pub fn parse_block(block: &str) -> Option<AnnotationBlock> {
    let sections: Vec<&str> = block
        .split('#')
        .map(|section| section.trim())
        .filter(|section| !section.is_empty())
        .collect();

    if sections.len() < MIN_SECTIONS {
        return None;
    }

    let meta_info = sections[0].to_owned();
    let sentence_info = parse_sentence_info(sections[1]);

    let sentence_annotation = find_section(&sections, SENTENCE_GRAPH_PREFIX);
    let alignment = find_section(&sections, ALIGNMENT_PREFIX);
    let document_annotation = find_section(&sections, DOCUMENT_ANNOTATION_PREFIX);

    let has_document_annotation = document_annotation
        .as_deref()
        .map_or(false, has_document_annotation_by_placeholder);

    Some(AnnotationBlock {
        meta_info,
        sentence_info,
        sentence_annotation,
        alignment,
        document_annotation,
        has_document_annotation,
    })
}

fn find_section(sections: &[&str], prefix: &str) -> Option<String> {
    sections
        .iter()
        .find_map(|section| section.strip_prefix(prefix))
        .map(|payload| payload.trim().to_owned())
}

/// Whether a document level annotation says more than `(s1s0 / sentence)`.
pub fn has_document_annotation_by_placeholder(document_annotation: &str) -> bool {
    static REGEX_PLACEHOLDER: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^\s*\(\w+\s*/\s*sentence\)\s*$").unwrap());

    !document_annotation.is_empty() && !REGEX_PLACEHOLDER.is_match(document_annotation)
}
