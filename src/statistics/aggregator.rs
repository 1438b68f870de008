use std::{collections::BTreeMap, ops::AddAssign};

use crate::statistics::block_analyzer::BlockStats;

/// Sums over the partial or the non-partial blocks of some files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BucketStats {
    /// Files with at least one block in this bucket.
    pub documents: usize,
    pub sentences: usize,
    pub words: usize,
    pub sentence_graphs: usize,
    pub doc_graphs: usize,
    pub relations: usize,
    pub concepts: usize,
    pub doc_relations: usize,
}

impl BucketStats {
    pub fn add_block(&mut self, block: &BlockStats) {
        self.sentences += 1;
        self.words += block.word_count;
        self.sentence_graphs += block.has_sentence_graph as usize;
        self.doc_graphs += block.has_doc_graph as usize;
        self.relations += block.relations_count;
        self.concepts += block.concepts_count;
        self.doc_relations += block.doc_relations_count;
    }
}

impl AddAssign<&BucketStats> for BucketStats {
    fn add_assign(&mut self, other: &BucketStats) {
        self.documents += other.documents;
        self.sentences += other.sentences;
        self.words += other.words;
        self.sentence_graphs += other.sentence_graphs;
        self.doc_graphs += other.doc_graphs;
        self.relations += other.relations;
        self.concepts += other.concepts;
        self.doc_relations += other.doc_relations;
    }
}

/// Stats of one file. Also the unit that `LanguageStats` is built from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileStats {
    pub partial: BucketStats,
    pub non_partial: BucketStats,
}

impl FileStats {
    pub fn from_blocks<'a>(blocks: impl IntoIterator<Item = &'a BlockStats>) -> Self {
        let mut stats = FileStats::default();

        for block in blocks {
            if block.is_partial {
                stats.partial.add_block(block);
            } else {
                stats.non_partial.add_block(block);
            }
        }

        // a file may count in both buckets
        stats.partial.documents = (stats.partial.sentences > 0) as usize;
        stats.non_partial.documents = (stats.non_partial.sentences > 0) as usize;

        stats
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LanguageStats {
    /// Every file read, whatever its blocks.
    pub documents: usize,
    pub partial: BucketStats,
    pub non_partial: BucketStats,
}

impl LanguageStats {
    pub fn add_file(&mut self, file: &FileStats) {
        self.documents += 1;
        self.partial += &file.partial;
        self.non_partial += &file.non_partial;
    }

    pub fn merge(&mut self, other: &LanguageStats) {
        self.documents += other.documents;
        self.partial += &other.partial;
        self.non_partial += &other.non_partial;
    }

    pub fn summary(&self, label: &str) -> SummaryRow {
        let p = &self.partial;
        let n = &self.non_partial;

        SummaryRow {
            label: label.to_owned(),
            documents: self.documents,
            sentences: p.sentences + n.sentences,
            words: p.words + n.words,
            sentence_graphs: p.sentence_graphs + n.sentence_graphs,
            doc_graphs: p.doc_graphs + n.doc_graphs,
            // sentence and document level together
            relations: p.relations + n.relations + p.doc_relations + n.doc_relations,
            concepts: p.concepts + n.concepts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub label: String,
    pub documents: usize,
    pub sentences: usize,
    pub words: usize,
    pub sentence_graphs: usize,
    pub doc_graphs: usize,
    pub relations: usize,
    pub concepts: usize,
}

pub const TOTAL_LABEL: &str = "TOTAL";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusStats {
    pub languages: BTreeMap<String, LanguageStats>,
}

impl CorpusStats {
    pub fn add_language(&mut self, language: &str, stats: &LanguageStats) {
        self.languages
            .entry(language.to_owned())
            .or_default()
            .merge(stats);
    }

    pub fn total(&self) -> LanguageStats {
        let mut total = LanguageStats::default();
        for stats in self.languages.values() {
            total.merge(stats);
        }
        total
    }

    /// One row per language, most documents first, then a TOTAL row.
    /// Languages with the same number of documents stay in name order.
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        let mut rows: Vec<_> = self
            .languages
            .iter()
            .map(|(language, stats)| stats.summary(language))
            .collect();

        rows.sort_by(|a, b| b.documents.cmp(&a.documents));
        rows.push(self.total().summary(TOTAL_LABEL));

        rows
    }
}
