use once_cell::sync::Lazy;
use regex::Regex;

pub const BLOCK_DELIMITER_MIN_LEN: usize = 80;

static BLOCK_DELIMITER: Lazy<String> = Lazy::new(|| "#".repeat(BLOCK_DELIMITER_MIN_LEN));

/// How block delimiters are recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitMode {
    /// A run of at least 80 '#' anywhere in the text.
    #[default]
    Relaxed,
    /// A line whose trimmed text starts with at least 80 '#'.
    /// The rest of that line belongs to the delimiter.
    Strict,
}

/// Splits a UMR file into trimmed, non-empty blocks.
pub fn split_blocks(txt: &str, mode: SplitMode) -> Vec<&str> {
    let blocks = match mode {
        SplitMode::Relaxed => split_relaxed(txt),
        SplitMode::Strict => split_strict(txt),
    };

    blocks
        .into_iter()
        .map(|block| block.trim())
        .filter(|block| !block.is_empty())
        .collect()
}

fn split_relaxed(txt: &str) -> Vec<&str> {
    static REGEX_DELIMITER: Lazy<Regex> = Lazy::new(|| {
        Regex::new(&format!("#{{{},}}", BLOCK_DELIMITER_MIN_LEN)).unwrap()
    });

    REGEX_DELIMITER.split(txt).collect()
}

fn split_strict(txt: &str) -> Vec<&str> {
    let mut blocks = Vec::new();

    let mut block_start = 0;
    let mut line_start = 0;
    for line in txt.split_inclusive('\n') {
        if is_delimiter_line(line) {
            blocks.push(&txt[block_start..line_start]);
            block_start = line_start + line.len();
        }
        line_start += line.len();
    }
    blocks.push(&txt[block_start..]);

    blocks
}

pub fn is_delimiter_line(line: &str) -> bool {
    line.trim().starts_with(BLOCK_DELIMITER.as_str())
}
