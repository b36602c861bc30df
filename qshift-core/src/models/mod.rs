pub mod fastq;

pub use fastq::{FastqRecord, ReadPair};
