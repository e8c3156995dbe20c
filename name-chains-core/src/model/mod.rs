//! Chain model for the name corpus.
//!
//! - Per-key next-letter counts (`FrequencyVector`)
//! - The variable-order table of every window seen (`ChainTable`)
//! - Corpus drivers folding a list of names into one table

/// 26-slot next-letter counts.
pub mod frequency;

/// Window table: name normalization, window accumulation, merging.
pub mod chain_table;

/// Sequential and multi-threaded corpus builds.
pub mod corpus;
