use crate::umr::parser::ParsedFile;

/// Criteria for selecting parsed files. `None` means "don't care".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileFilter {
    pub language: Option<String>,
    pub has_partial_conversion: Option<bool>,
    pub has_document_annotation: Option<bool>,
}

impl FileFilter {
    pub fn matches(&self, file: &ParsedFile) -> bool {
        if let Some(language) = self.language.as_deref().filter(|l| !l.is_empty()) {
            if file.language != language {
                return false;
            }
        }

        // whether any block is a partial conversion
        if let Some(partial) = self.has_partial_conversion {
            if file.has_partial_conversion() != partial {
                return false;
            }
        }

        // whether any block has a document annotation
        if let Some(document_annotation) = self.has_document_annotation {
            if file.has_document_annotation() != document_annotation {
                return false;
            }
        }

        true
    }

    pub fn apply(&self, files: Vec<ParsedFile>) -> Vec<ParsedFile> {
        files.into_iter().filter(|file| self.matches(file)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::umr::{block_parser::AnnotationBlock, sentence_info_parser::SentenceInfo};

    fn block(partial: bool, document_annotation: bool) -> AnnotationBlock {
        let meta_info = if partial {
            "meta-info :: type = partial_conversion"
        } else {
            "meta-info"
        };

        AnnotationBlock {
            meta_info: meta_info.to_owned(),
            sentence_info: SentenceInfo::new(),
            sentence_annotation: None,
            alignment: None,
            document_annotation: None,
            has_document_annotation: document_annotation,
        }
    }

    fn file(language: &str, blocks: Vec<AnnotationBlock>) -> ParsedFile {
        ParsedFile {
            filename: format!("{}.umr", language),
            language: language.to_owned(),
            blocks,
        }
    }

    fn names(files: &[ParsedFile]) -> Vec<&str> {
        files.iter().map(|f| f.filename.as_str()).collect()
    }

    fn corpus() -> Vec<ParsedFile> {
        vec![
            file("english", vec![block(false, true), block(false, false)]),
            file("czech", vec![block(true, false)]),
            file("arapaho", vec![block(true, true), block(false, false)]),
            file("navajo", vec![]),
        ]
    }

    #[test]
    fn test_no_criteria_keeps_everything() {
        assert_eq!(FileFilter::default().apply(corpus()).len(), 4);
    }

    #[test]
    fn test_language() {
        let filter = FileFilter {
            language: Some("czech".to_owned()),
            ..Default::default()
        };
        assert_eq!(names(&filter.apply(corpus())), vec!["czech.umr"]);

        let filter = FileFilter {
            language: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(filter.apply(corpus()).len(), 4);
    }

    #[test]
    fn test_partial_conversion() {
        let partial = FileFilter {
            has_partial_conversion: Some(true),
            ..Default::default()
        };
        assert_eq!(
            names(&partial.apply(corpus())),
            vec!["czech.umr", "arapaho.umr"]
        );

        let non_partial = FileFilter {
            has_partial_conversion: Some(false),
            ..Default::default()
        };
        assert_eq!(
            names(&non_partial.apply(corpus())),
            vec!["english.umr", "navajo.umr"]
        );
    }

    #[test]
    fn test_document_annotation() {
        let with = FileFilter {
            has_document_annotation: Some(true),
            ..Default::default()
        };
        assert_eq!(
            names(&with.apply(corpus())),
            vec!["english.umr", "arapaho.umr"]
        );

        let without = FileFilter {
            has_document_annotation: Some(false),
            ..Default::default()
        };
        assert_eq!(
            names(&without.apply(corpus())),
            vec!["czech.umr", "navajo.umr"]
        );
    }

    #[test]
    fn test_one_annotated_block_excludes_file_from_without() {
        let files = vec![file("english", vec![block(false, true), block(false, false)])];

        let without = FileFilter {
            has_document_annotation: Some(false),
            ..Default::default()
        };
        assert!(without.apply(files.clone()).is_empty());

        let with = FileFilter {
            has_document_annotation: Some(true),
            ..Default::default()
        };
        assert_eq!(names(&with.apply(files)), vec!["english.umr"]);
    }

    #[test]
    fn test_criteria_combine() {
        let filter = FileFilter {
            language: Some("arapaho".to_owned()),
            has_partial_conversion: Some(true),
            has_document_annotation: Some(true),
        };
        assert_eq!(names(&filter.apply(corpus())), vec!["arapaho.umr"]);

        let filter = FileFilter {
            language: Some("english".to_owned()),
            has_partial_conversion: Some(true),
            has_document_annotation: None,
        };
        assert!(filter.apply(corpus()).is_empty());
    }
}
