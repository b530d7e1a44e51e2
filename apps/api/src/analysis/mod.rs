//! Job description analysis: lexicon, keyword extraction, structure heuristics,
//! skill classification, and the analyzer that optionally layers AI enrichment on top.

pub mod analyzer;
pub mod enrichment;
pub mod handlers;
pub mod keywords;
pub mod lexicon;
pub mod models;
pub mod prompts;
pub mod skills;
pub mod structure;
pub mod text;
