//! # Quality scoring for paired FASTQ files
//!
//! Turns Illumina 1.8 quality strings into a single expected-error score per read
//! pair, and summarizes the distribution of those scores across a pair of files
//! (mean, standard deviation and a rough coverage estimate).
//!
pub mod consts;
pub mod scoring;
pub mod statistics;
pub mod summary;

// re-exports
pub use consts::*;
pub use scoring::*;
pub use statistics::*;
pub use summary::*;
