use std::io::{self, Write};

use qshift_core::ReadPair;

///
/// Owns the read and mate output streams. A pair is always written to both.
///
pub struct PairWriter<W: Write> {
    reads: W,
    mates: W,
    pairs_written: u64,
}

impl<W: Write> PairWriter<W> {
    pub fn new(reads: W, mates: W) -> Self {
        PairWriter {
            reads,
            mates,
            pairs_written: 0,
        }
    }

    pub fn write_pair(&mut self, pair: &ReadPair) -> io::Result<()> {
        pair.read.write_to(&mut self.reads)?;
        pair.mate.write_to(&mut self.mates)?;
        self.pairs_written += 1;
        Ok(())
    }

    pub fn pairs_written(&self) -> u64 {
        self.pairs_written
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.reads.flush()?;
        self.mates.flush()
    }

    pub fn into_inner(self) -> (W, W) {
        (self.reads, self.mates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use qshift_core::FastqRecord;
    use rstest::*;

    #[rstest]
    fn test_pair_is_written_to_both_streams() {
        let mut writer = PairWriter::new(Vec::new(), Vec::new());
        let pair = ReadPair::new(
            FastqRecord::new(b"@p/1", b"ACGT", b"IIII"),
            FastqRecord::new(b"@p/2", b"TTAA", b"####"),
        );

        writer.write_pair(&pair).unwrap();
        assert_eq!(writer.pairs_written(), 1);

        let (reads, mates) = writer.into_inner();
        assert_eq!(reads, b"@p/1\nACGT\n+\nIIII\n".to_vec());
        assert_eq!(mates, b"@p/2\nTTAA\n+\n####\n".to_vec());
    }
}
