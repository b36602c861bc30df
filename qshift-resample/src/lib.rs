//! # Distribution-shifting resampler for paired FASTQ files
//!
//! Keeps a subset of read pairs so that the error-probability distribution of the
//! kept pairs follows the input distribution with its mean moved by a number of
//! standard deviations, optionally combined with uniform downsampling.
//!
//! Each pair is scored with [qshift_quality::QualityScorer] and kept with
//! probability `downsample_fraction * shifted.pdf(score) / original.pdf(score)`,
//! where `original` is the normal distribution of the input scores and `shifted`
//! is the same distribution with the mean moved. A read and its mate are always
//! kept or dropped together.
//!
//! ```rust,ignore
//! use qshift_resample::{DistributionParams, ShiftConfig, shift_pair_files};
//!
//! let config = ShiftConfig {
//!     reads: "reads_1.fastq.gz".into(),
//!     mates: "reads_2.fastq.gz".into(),
//!     output_reads: "shifted_1.fastq.gz".into(),
//!     output_mates: "shifted_2.fastq.gz".into(),
//!     params: DistributionParams { mean: 2.4, stdev: 0.8, shift: 1.0 },
//!     downsample_fraction: 0.5,
//!     ..Default::default()
//! };
//!
//! let report = shift_pair_files(&config)?;
//! ```
//!
pub mod consts;
pub mod distribution;
pub mod resample;
pub mod writer;

// re-exports
pub use consts::*;
pub use distribution::*;
pub use resample::*;
pub use writer::*;
