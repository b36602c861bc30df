use std::borrow::Cow;
use std::io::{self, Write};

use crate::consts::SEPARATOR_LINE;

///
/// One FASTQ record. Lines are stored without their line terminators, and
/// the separator line is not kept at all: it is always written back as `+`.
///
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct FastqRecord {
    pub name: Vec<u8>,
    pub sequence: Vec<u8>,
    pub quality: Vec<u8>,
}

impl FastqRecord {
    pub fn new(name: &[u8], sequence: &[u8], quality: &[u8]) -> Self {
        FastqRecord {
            name: name.to_vec(),
            sequence: sequence.to_vec(),
            quality: quality.to_vec(),
        }
    }

    ///
    /// Identifier line as text, lossy for non UTF-8 bytes
    ///
    pub fn name_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }

    ///
    /// Quality line as text, lossy for non UTF-8 bytes
    ///
    pub fn quality_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.quality)
    }

    /// Quality line with surrounding ASCII whitespace removed.
    pub fn trimmed_quality(&self) -> &[u8] {
        self.quality.trim_ascii()
    }

    /// Number of bases this record contributes to coverage.
    pub fn base_count(&self) -> usize {
        self.trimmed_quality().len()
    }

    ///
    /// The part of the identifier shared by a read and its mate: everything
    /// up to the first whitespace, minus a trailing `/1` or `/2`.
    ///
    pub fn pair_name(&self) -> &[u8] {
        let name = self.name.trim_ascii();
        let name = name
            .split(|b| b.is_ascii_whitespace())
            .next()
            .unwrap_or(name);

        match name {
            [rest @ .., b'/', b'1' | b'2'] => rest,
            _ => name,
        }
    }

    ///
    /// Write the record as four newline terminated lines.
    ///
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.name)?;
        writer.write_all(b"\n")?;
        writer.write_all(&self.sequence)?;
        writer.write_all(b"\n")?;
        writer.write_all(SEPARATOR_LINE)?;
        writer.write_all(b"\n")?;
        writer.write_all(&self.quality)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// A read and its mate, paired by position in their files.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ReadPair {
    pub read: FastqRecord,
    pub mate: FastqRecord,
}

impl ReadPair {
    pub fn new(read: FastqRecord, mate: FastqRecord) -> Self {
        ReadPair { read, mate }
    }

    pub fn names_match(&self) -> bool {
        self.read.pair_name() == self.mate.pair_name()
    }

    pub fn base_count(&self) -> usize {
        self.read.base_count() + self.mate.base_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case(b"@r1/1", b"@r1")]
    #[case(b"@r1/2", b"@r1")]
    #[case(b"@r1 1:N:0:ACGT", b"@r1")]
    #[case(b"@r1", b"@r1")]
    #[case(b"@r1/3", b"@r1/3")]
    fn test_pair_name(#[case] name: &[u8], #[case] expected: &[u8]) {
        let record = FastqRecord::new(name, b"ACGT", b"IIII");
        assert_eq!(record.pair_name(), expected);
    }

    #[rstest]
    fn test_write_regenerates_separator() {
        let record = FastqRecord::new(b"@read", b"ACGT", b"II#I");
        let mut out = Vec::new();
        record.write_to(&mut out).unwrap();

        assert_eq!(out, b"@read\nACGT\n+\nII#I\n".to_vec());
    }

    #[rstest]
    fn test_base_count_ignores_whitespace() {
        let record = FastqRecord::new(b"@read", b"ACGT", b"IIII  ");
        assert_eq!(record.base_count(), 4);
    }

    #[rstest]
    fn test_names_match() {
        let pair = ReadPair::new(
            FastqRecord::new(b"@frag7/1", b"A", b"I"),
            FastqRecord::new(b"@frag7/2", b"T", b"I"),
        );
        assert!(pair.names_match());

        let pair = ReadPair::new(
            FastqRecord::new(b"@frag7/1", b"A", b"I"),
            FastqRecord::new(b"@frag8/2", b"T", b"I"),
        );
        assert!(!pair.names_match());
    }
}
