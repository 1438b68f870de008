use std::{cell::RefCell, path::Path, rc::Rc};

use anyhow::Result;

use umr_json::statistics::{
    aggregator::{BucketStats, CorpusStats, LanguageStats, SummaryRow},
    block_analyzer::BlockAnalyzer,
    collector::{analyze_language, find_language_dirs},
    report::{language_tables, summary_table, ReportSink, Reporter},
};

static CORPUS: &str = "./tests/corpus";

fn corpus_stats() -> Result<CorpusStats> {
    let root = Path::new(CORPUS);
    let analyzer = BlockAnalyzer::default();

    let mut corpus = CorpusStats::default();
    for language in find_language_dirs(root)? {
        let stats = analyze_language(root, &language, &analyzer)?.unwrap_or_default();
        corpus.add_language(&language, &stats);
    }
    Ok(corpus)
}

#[test]
fn test_find_language_dirs() -> Result<()> {
    assert_eq!(
        find_language_dirs(Path::new(CORPUS))?,
        vec!["arapaho", "czech", "english"]
    );
    Ok(())
}

#[test]
fn test_language_without_umr_data() -> Result<()> {
    let stats = analyze_language(Path::new(CORPUS), "arapaho", &BlockAnalyzer::default())?;
    assert_eq!(stats, None);
    Ok(())
}

#[test]
fn test_analyze_english() -> Result<()> {
    let stats = analyze_language(Path::new(CORPUS), "english", &BlockAnalyzer::default())?
        .unwrap();

    assert_eq!(
        stats,
        LanguageStats {
            documents: 2,
            partial: BucketStats {
                documents: 1,
                sentences: 1,
                words: 3,
                sentence_graphs: 1,
                doc_graphs: 0,
                relations: 2,
                concepts: 2,
                doc_relations: 0,
            },
            // the broken graph of english_2.umr still counts as a graph
            non_partial: BucketStats {
                documents: 2,
                sentences: 3,
                words: 5,
                sentence_graphs: 3,
                doc_graphs: 1,
                relations: 2,
                concepts: 3,
                doc_relations: 3,
            },
        }
    );

    Ok(())
}

#[test]
fn test_analyze_czech_normalizes_graph() -> Result<()> {
    let stats = analyze_language(Path::new(CORPUS), "czech", &BlockAnalyzer::default())?
        .unwrap();

    assert_eq!(stats.documents, 1);
    assert_eq!(stats.non_partial, BucketStats::default());
    assert_eq!(stats.partial.concepts, 3);
    assert_eq!(stats.partial.relations, 3);
    assert_eq!(stats.partial.doc_graphs, 1);
    assert_eq!(stats.partial.doc_relations, 2);

    Ok(())
}

#[test]
fn test_summary_rows() -> Result<()> {
    let rows = corpus_stats()?.summary_rows();

    let labels: Vec<_> = rows.iter().map(|row| row.label.as_str()).collect();
    assert_eq!(labels, vec!["english", "czech", "arapaho", "TOTAL"]);

    assert_eq!(
        rows[3],
        SummaryRow {
            label: "TOTAL".to_owned(),
            documents: 3,
            sentences: 5,
            words: 11,
            sentence_graphs: 5,
            doc_graphs: 2,
            relations: 12,
            concepts: 8,
        }
    );

    Ok(())
}

#[test]
fn test_report_lines() -> Result<()> {
    #[derive(Clone, Default)]
    struct Lines(Rc<RefCell<Vec<String>>>);

    impl ReportSink for Lines {
        fn write_line(&mut self, line: &str) -> Result<()> {
            self.0.borrow_mut().push(line.to_owned());
            Ok(())
        }
    }

    let corpus = corpus_stats()?;
    let lines = Lines::default();

    let mut reporter = Reporter::new();
    reporter.add_sink(lines.clone());
    for (title, table) in language_tables(&corpus.languages["czech"]) {
        reporter.table(title, &table)?;
    }
    reporter.line(&summary_table(&corpus.summary_rows()).render())?;
    reporter.finish()?;

    let lines = lines.0.borrow();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "=== Stats for ALL ===");
    assert!(lines[3].contains("| Concepts (Sentence-level)  |       3 |"));
    assert!(lines[6].contains("| TOTAL      |           3 |"));

    Ok(())
}
