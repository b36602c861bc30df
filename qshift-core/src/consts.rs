/// Number of lines in one FASTQ record.
pub const LINES_PER_RECORD: usize = 4;

/// Separator line written in place of whatever the input carried.
pub const SEPARATOR_LINE: &[u8] = b"+";

pub const GZIP_EXTENSION: &str = "gz";
