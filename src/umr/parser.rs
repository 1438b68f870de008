use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::{
    umr::{
        block_parser::{parse_block, AnnotationBlock},
        splitter::{split_blocks, SplitMode},
    },
    utility::text::read_text_file,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedFile {
    pub filename: String,
    pub language: String,
    pub blocks: Vec<AnnotationBlock>,
}

impl ParsedFile {
    pub fn has_partial_conversion(&self) -> bool {
        self.blocks.iter().any(|block| block.is_partial_conversion())
    }

    pub fn has_document_annotation(&self) -> bool {
        self.blocks.iter().any(|block| block.has_document_annotation)
    }
}

pub fn parse_umr_txt(txt: &str) -> Vec<AnnotationBlock> {
    split_blocks(txt, SplitMode::Relaxed)
        .into_iter()
        .filter_map(parse_block)
        .collect()
}

/// Reads and parses `<root>/<language>/<data dir>/<file>.umr`.
pub fn parse_umr_file(path: &Path) -> Result<ParsedFile> {
    let filename = path
        .file_name()
        .context("Path has no file name")?
        .to_string_lossy()
        .into_owned();

    let txt = read_text_file(path)?;
    let blocks = parse_umr_txt(&txt);

    Ok(ParsedFile {
        filename,
        language: language_of(path),
        blocks,
    })
}

/// The language is the name of the directory two levels above the file.
pub fn language_of(path: &Path) -> String {
    path.parent()
        .and_then(|data_dir| data_dir.parent())
        .and_then(|language_dir| language_dir.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
