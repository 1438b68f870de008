use std::path::Path;

use anyhow::Result;
use indicatif::ProgressIterator;
use log::{debug, warn};

use crate::{
    penman::GraphDecoder,
    statistics::{
        aggregator::{FileStats, LanguageStats},
        block_analyzer::{BlockAnalyzer, BlockStats},
    },
    umr::{
        corpus::{list_umr_files, read_dir_paths},
        splitter::{split_blocks, SplitMode},
    },
    utility::{progress::create_progress_bar, text::read_text_file},
};

pub const UMR_DATA_DIRECTORY: &str = "umr_data";

pub fn analyze_umr_txt<D: GraphDecoder>(txt: &str, analyzer: &BlockAnalyzer<D>) -> FileStats {
    let blocks: Vec<BlockStats> = split_blocks(txt, SplitMode::Strict)
        .into_iter()
        .map(|block| analyzer.analyze(block))
        .collect();

    FileStats::from_blocks(&blocks)
}

pub fn analyze_umr_file<D: GraphDecoder>(
    path: &Path,
    analyzer: &BlockAnalyzer<D>,
) -> Result<FileStats> {
    let txt = read_text_file(path)?;
    let stats = analyze_umr_txt(&txt, analyzer);

    debug!(
        "{}: {} partial and {} non-partial blocks",
        path.display(),
        stats.partial.sentences,
        stats.non_partial.sentences
    );

    Ok(stats)
}

/// Non-hidden subdirectories of `root`, by name.
pub fn find_language_dirs(root: &Path) -> Result<Vec<String>> {
    let mut languages: Vec<String> = read_dir_paths(root)?
        .into_iter()
        .filter(|path| path.is_dir())
        .filter_map(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .filter(|name| !name.starts_with('.'))
        .collect();

    languages.sort();

    Ok(languages)
}

/// Sums up `<root>/<language>/umr_data/*.umr`.
///
/// Returns `None` without a `umr_data` folder. Unreadable files are logged
/// and left out.
pub fn analyze_language<D: GraphDecoder>(
    root: &Path,
    language: &str,
    analyzer: &BlockAnalyzer<D>,
) -> Result<Option<LanguageStats>> {
    let umr_data = root.join(language).join(UMR_DATA_DIRECTORY);
    if !umr_data.is_dir() {
        warn!("No {} folder in {}", UMR_DATA_DIRECTORY, root.join(language).display());
        return Ok(None);
    }

    let files = list_umr_files(&umr_data)?;

    let mut stats = LanguageStats::default();
    for path in files.iter().progress_with(create_progress_bar(files.len() as u64)) {
        match analyze_umr_file(path, analyzer) {
            Ok(file) => stats.add_file(&file),
            Err(err) => warn!("Skipping {}: {:#}", path.display(), err),
        }
    }

    Ok(Some(stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_umr_txt() {
        let delimiter = "#".repeat(80);
        let txt = format!(
            "{d}\n# meta-info :: type = partial_conversion\nWords: The cat sat\n\
             {d}\n# meta-info\nWords: It ran\n\n{d}\n\n",
            d = delimiter
        );

        let stats = analyze_umr_txt(&txt, &BlockAnalyzer::default());
        assert_eq!(stats.partial.sentences, 1);
        assert_eq!(stats.partial.words, 3);
        assert_eq!(stats.non_partial.sentences, 1);
        assert_eq!(stats.non_partial.words, 2);
    }
}
