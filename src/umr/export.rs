use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};

use crate::umr::parser::ParsedFile;

pub fn to_json(files: &[ParsedFile], pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(files)?
    } else {
        serde_json::to_string(files)?
    };
    Ok(json)
}

/// Writes `files` as a JSON array, creating missing parent directories.
pub fn write_json(path: &Path, files: &[ParsedFile], pretty: bool) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    if pretty {
        serde_json::to_writer_pretty(&mut writer, files)?;
    } else {
        serde_json::to_writer(&mut writer, files)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::umr::parser::parse_umr_txt;

    fn files() -> Vec<ParsedFile> {
        let txt = format!(
            "{}\n# meta-info\n# :: snt1\nIndex: 1\nWords: Hi\n# sentence level graph:\n(s1h / hi)\n",
            "#".repeat(80)
        );

        vec![ParsedFile {
            filename: "a.umr".to_owned(),
            language: "english".to_owned(),
            blocks: parse_umr_txt(&txt),
        }]
    }

    #[test]
    fn test_to_json_compact() {
        assert_eq!(
            to_json(&files(), false).unwrap(),
            r#"[{"filename":"a.umr","language":"english","blocks":[{"meta_info":"meta-info","sentence_info":{"Words":"Hi"},"sentence_annotation":"(s1h / hi)","alignment":null,"document_annotation":null,"has_document_annotation":false}]}]"#
        );
    }

    #[test]
    fn test_to_json_pretty_indents_two_spaces() {
        let json = to_json(&files(), true).unwrap();

        assert!(json.starts_with("[\n  {\n    \"filename\": \"a.umr\","));
    }
}
