//! # Core building blocks for qshift
//!
//! This crate holds the pieces shared by the scoring and resampling crates: the
//! in-memory representation of FASTQ records and read pairs, a reader that walks
//! two FASTQ files in lockstep, helpers to open plain or gzip'd files, and the
//! error type every qshift crate reports through.
//!
pub mod consts;
pub mod errors;
pub mod models;
pub mod reader;
pub mod utils;

// re-exports
pub use consts::*;
pub use errors::*;
pub use models::*;
pub use reader::*;
