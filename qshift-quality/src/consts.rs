/// Offset of the Illumina 1.8 (Phred+33) encoding.
pub const PHRED_OFFSET: u8 = 33;

/// Highest quality character accepted, `K` (Phred 42).
pub const MAX_QUALITY_CHAR: u8 = 75;

/// Reference genome size used for coverage estimates.
pub const GENOME_SIZE: f64 = 3_200_000_000.0;
