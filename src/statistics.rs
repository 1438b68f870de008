// Corpus statistics over UMR files
//
// Every block is reduced to a `BlockStats`, blocks are summed per file into
// partial / non-partial buckets, files per language, languages into a
// summary. Reading files and printing reports stay at the edges
// (`collector`, `report`).

pub mod aggregator;
pub mod block_analyzer;
pub mod collector;
pub mod normalizer;
pub mod report;
