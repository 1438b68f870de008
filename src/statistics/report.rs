use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};

use crate::statistics::aggregator::{BucketStats, LanguageStats, SummaryRow};

/// Somewhere report lines go to.
pub trait ReportSink {
    fn write_line(&mut self, line: &str) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

pub struct ConsoleSink;

impl ReportSink for ConsoleSink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        println!("{}", line);
        Ok(())
    }
}

pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        WriterSink { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<BufWriter<File>> {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create report file {}", path.display()))?;
        Ok(WriterSink::new(BufWriter::new(file)))
    }
}

impl<W: Write> ReportSink for WriterSink<W> {
    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{}", line).context("Failed to write report")
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush report")
    }
}

/// Sends every line to all of its sinks.
#[derive(Default)]
pub struct Reporter {
    sinks: Vec<Box<dyn ReportSink>>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sink(&mut self, sink: impl ReportSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    pub fn line(&mut self, line: &str) -> Result<()> {
        for sink in &mut self.sinks {
            sink.write_line(line)?;
        }
        Ok(())
    }

    pub fn table(&mut self, title: &str, table: &Table) -> Result<()> {
        self.line(title)?;
        self.line(&table.render())
    }

    pub fn finish(mut self) -> Result<()> {
        for sink in &mut self.sinks {
            sink.flush()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Number(usize),
}

impl Cell {
    fn text(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Number(n) => n.to_string(),
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::Text(text.to_owned())
    }
}

impl From<usize> for Cell {
    fn from(n: usize) -> Self {
        Cell::Number(n)
    }
}

/// A table rendered in the "grid" layout:
///
/// ```text
/// +-----------+---------+
/// | Metric    |   Count |
/// +===========+=========+
/// | Documents |       3 |
/// +-----------+---------+
/// ```
///
/// Columns holding only numbers are right aligned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Table {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let columns = self.headers.len();

        let right_aligned: Vec<bool> = (0..columns)
            .map(|i| {
                !self.rows.is_empty()
                    && self
                        .rows
                        .iter()
                        .all(|row| matches!(row.get(i), Some(Cell::Number(_))))
            })
            .collect();

        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| (0..columns).map(|i| row.get(i).map_or(String::new(), Cell::text)).collect())
            .collect();

        // headers get two extra columns of room
        let widths: Vec<usize> = (0..columns)
            .map(|i| {
                rows.iter()
                    .map(|row| row[i].chars().count())
                    .fold(self.headers[i].chars().count() + 2, usize::max)
            })
            .collect();

        let border = |fill: char| {
            let mut line = String::from("+");
            for width in &widths {
                line.extend(std::iter::repeat(fill).take(width + 2));
                line.push('+');
            }
            line
        };

        let format_row = |cells: &[String]| {
            let mut line = String::from("|");
            for (i, cell) in cells.iter().enumerate() {
                let padding = widths[i] - cell.chars().count();
                let (left, right) = if right_aligned[i] { (padding, 0) } else { (0, padding) };
                line.push(' ');
                line.push_str(&" ".repeat(left));
                line.push_str(cell);
                line.push_str(&" ".repeat(right));
                line.push_str(" |");
            }
            line
        };

        let mut lines = vec![border('-'), format_row(&self.headers[..]), border('=')];
        for row in &rows {
            lines.push(format_row(&row[..]));
            lines.push(border('-'));
        }
        if rows.is_empty() {
            lines.pop();
            lines.push(border('-'));
        }

        lines.join("\n")
    }
}

pub const ALL_TITLE: &str = "=== Stats for ALL ===";
pub const PARTIAL_TITLE: &str = "=== Stats for PARTIAL-CONVERSION ===";
pub const NON_PARTIAL_TITLE: &str = "=== Stats for NON-PARTIAL-CONVERSION Blocks ===";

const METRIC_HEADERS: [&str; 2] = ["Metric", "Count"];

const BUCKET_METRICS: [&str; 8] = [
    "Documents",
    "Sentences (Blocks)",
    "Words",
    "Sentence-level Graphs",
    "Doc-level Graphs",
    "Relations (Sentence-level)",
    "Concepts (Sentence-level)",
    "Relations (Document-level)",
];

fn bucket_table(bucket: &BucketStats) -> Table {
    let values = [
        bucket.documents,
        bucket.sentences,
        bucket.words,
        bucket.sentence_graphs,
        bucket.doc_graphs,
        bucket.relations,
        bucket.concepts,
        bucket.doc_relations,
    ];

    let mut table = Table::new(&METRIC_HEADERS);
    for (metric, value) in BUCKET_METRICS.iter().zip(values) {
        table.push_row(vec![Cell::from(*metric), Cell::from(value)]);
    }
    table
}

/// The ALL, PARTIAL and NON-PARTIAL tables of one language, with titles.
pub fn language_tables(stats: &LanguageStats) -> Vec<(&'static str, Table)> {
    let mut all = Table::new(&METRIC_HEADERS);
    all.push_row(vec!["Documents".into(), stats.documents.into()]);

    vec![
        (ALL_TITLE, all),
        (PARTIAL_TITLE, bucket_table(&stats.partial)),
        (NON_PARTIAL_TITLE, bucket_table(&stats.non_partial)),
    ]
}

pub fn summary_table(rows: &[SummaryRow]) -> Table {
    let mut table = Table::new(&[
        "Language",
        "Documents",
        "Sentences",
        "Words",
        "Sentence Graphs",
        "Doc Graphs",
        "Relations",
        "Concepts",
    ]);

    for row in rows {
        table.push_row(vec![
            row.label.as_str().into(),
            row.documents.into(),
            row.sentences.into(),
            row.words.into(),
            row.sentence_graphs.into(),
            row.doc_graphs.into(),
            row.relations.into(),
            row.concepts.into(),
        ]);
    }

    table
}

/// What every metric of `language_tables` means.
pub fn explanation_tables() -> Vec<(&'static str, Table)> {
    vec![
        (
            ALL_TITLE,
            description_table(&[("Documents", "Total documents of this language")]),
        ),
        (PARTIAL_TITLE, bucket_description_table("partial")),
        (NON_PARTIAL_TITLE, bucket_description_table("non-partial")),
    ]
}

fn description_table(rows: &[(&str, &str)]) -> Table {
    let mut table = Table::new(&METRIC_HEADERS);
    for (metric, description) in rows {
        table.push_row(vec![Cell::from(*metric), Cell::from(*description)]);
    }
    table
}

fn bucket_description_table(kind: &str) -> Table {
    let descriptions = [
        format!("Documents that contain at least one {} annotation", kind),
        format!("Sentences that have {}ly converted annotation", kind),
        format!("Total words of sentences that have {}ly converted annotation", kind),
        format!("{}ly converted sentence level annotations", kind),
        format!("{}ly converted document level annotations", kind),
        format!("Total relations in {}ly converted sentence level annotation", kind),
        format!("Total concepts in {}ly converted annotation", kind),
        format!("Total relations in {}ly converted document level annotation", kind),
    ];

    let rows: Vec<(&str, &str)> = BUCKET_METRICS
        .iter()
        .zip(descriptions.iter())
        .map(|(metric, description)| (*metric, description.as_str()))
        .collect();

    description_table(&rows)
}
