//! Character-level Markov chains for names.
//!
//! This crate turns a list of names into a variable-order chain table:
//! for every substring window of every name, how often each letter
//! `a`..=`z` came next. It provides:
//! - Name normalization and window accumulation
//! - Sequential and multi-threaded corpus builds
//! - Reading name lists and writing the table as JSON
//!
//! Typical use:
//!
//! ```no_run
//! use name_chains_core::io::{build_output_path, read_names, write_chains, ExtensionPolicy};
//! use name_chains_core::model::corpus::build_chains;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let names = read_names("names.txt")?;
//! let table = build_chains(&names);
//! write_chains(build_output_path("names.txt", ExtensionPolicy::FixedWidth)?, &table)?;
//! # Ok(())
//! # }
//! ```

/// Chain table, frequency vectors and corpus drivers.
pub mod model;

/// I/O utilities (name lists, output path, JSON documents).
pub mod io;

/// Error types for reading and writing.
pub mod error;

pub use error::{ChainsError, ReadError};
pub use model::chain_table::{normalize_name, ChainTable, SkippedChar};
pub use model::corpus::{build_chains, build_chains_with, BuildOptions};
pub use model::frequency::{FrequencyVector, ALPHABET_LEN};
