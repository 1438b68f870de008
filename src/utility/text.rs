use std::{fs, path::Path};

use anyhow::{ensure, Context, Result};
use encoding_rs::{Encoding, UTF_8};

/// Decodes file contents, honoring a byte order mark if there is one.
///
/// Without a BOM the text must be valid UTF-8.
pub fn decode_text(bytes: &[u8]) -> Result<String> {
    let (encoding, bom_length) = Encoding::for_bom(bytes).unwrap_or((UTF_8, 0));

    let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_length..]);
    ensure!(!had_errors, "Malformed {} text", encoding.name());

    Ok(text.into_owned())
}

pub fn read_text_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    decode_text(&bytes).with_context(|| format!("Failed to decode {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        assert_eq!(decode_text("Words: kočka".as_bytes()).unwrap(), "Words: kočka");
    }

    #[test]
    fn test_decode_strips_bom() {
        assert_eq!(decode_text(b"\xEF\xBB\xBFWords: a").unwrap(), "Words: a");
        assert_eq!(decode_text(b"\xFF\xFEa\x00b\x00").unwrap(), "ab");
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(decode_text(b"Words: \xFF\xFF").is_err());
    }
}
