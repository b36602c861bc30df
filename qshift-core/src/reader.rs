use std::io::{self, BufRead};

use crate::consts::LINES_PER_RECORD;
use crate::errors::{QshiftError, Result};
use crate::models::{FastqRecord, ReadPair};

/// Why a [PairedFastqReader] stopped handing out pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// One of the two streams ran out of complete records.
    Exhausted,
    /// The configured maximum number of pairs was reached.
    Limit,
}

///
/// Walks a read file and a mate file in lockstep, one FASTQ record from each
/// per step.
///
/// Iteration ends at the shorter of the two streams. A trailing record with
/// fewer than four lines is dropped. Identifiers are only compared when
/// `check_names` is switched on.
///
pub struct PairedFastqReader<R: BufRead> {
    reads: R,
    mates: R,
    max_pairs: Option<u64>,
    check_names: bool,
    pairs_read: u64,
    stopped: Option<StopReason>,
    unpaired: bool,
    line: Vec<u8>,
}

impl<R: BufRead> PairedFastqReader<R> {
    pub fn new(reads: R, mates: R) -> Self {
        PairedFastqReader {
            reads,
            mates,
            max_pairs: None,
            check_names: false,
            pairs_read: 0,
            stopped: None,
            unpaired: false,
            line: Vec::new(),
        }
    }

    /// Stop after `max_pairs` pairs, if given.
    pub fn with_max_pairs(mut self, max_pairs: Option<u64>) -> Self {
        self.max_pairs = max_pairs;
        self
    }

    /// Fail with [QshiftError::PairNameMismatch] when a read and its mate carry different identifiers.
    pub fn with_name_check(mut self, check_names: bool) -> Self {
        self.check_names = check_names;
        self
    }

    pub fn pairs_read(&self) -> u64 {
        self.pairs_read
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stopped
    }

    ///
    /// Get the next pair, or `None` once either stream is out of records or the
    /// pair limit has been hit.
    ///
    pub fn next_pair(&mut self) -> Result<Option<ReadPair>> {
        if self.stopped.is_some() {
            return Ok(None);
        }

        if let Some(max_pairs) = self.max_pairs {
            if self.pairs_read >= max_pairs {
                self.stopped = Some(StopReason::Limit);
                return Ok(None);
            }
        }

        let Some(read) = read_record(&mut self.reads, &mut self.line)? else {
            self.stopped = Some(StopReason::Exhausted);
            self.unpaired = !self.mates.fill_buf()?.is_empty();
            return Ok(None);
        };

        let Some(mate) = read_record(&mut self.mates, &mut self.line)? else {
            self.stopped = Some(StopReason::Exhausted);
            self.unpaired = true;
            return Ok(None);
        };

        self.pairs_read += 1;
        let pair = ReadPair::new(read, mate);

        if self.check_names && !pair.names_match() {
            return Err(QshiftError::PairNameMismatch {
                pair: self.pairs_read,
                read_name: pair.read.name_str().into_owned(),
                mate_name: pair.mate.name_str().into_owned(),
            });
        }

        Ok(Some(pair))
    }

    ///
    /// Whether the reader ran out of one stream while the other still had data,
    /// meaning the two files did not hold the same number of records.
    ///
    /// Always `false` when the reader stopped on its pair limit or has not stopped yet.
    ///
    pub fn has_unpaired_records(&self) -> bool {
        self.unpaired
    }
}

impl<R: BufRead> Iterator for PairedFastqReader<R> {
    type Item = Result<ReadPair>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_pair().transpose()
    }
}

///
/// Read one 4-line record. Returns `None` on a clean end of stream and on a
/// truncated final record.
///
fn read_record<R: BufRead>(reader: &mut R, line: &mut Vec<u8>) -> io::Result<Option<FastqRecord>> {
    let mut lines: [Vec<u8>; LINES_PER_RECORD] = Default::default();

    for slot in lines.iter_mut() {
        line.clear();
        if reader.read_until(b'\n', line)? == 0 {
            return Ok(None);
        }
        *slot = strip_line_terminator(line).to_vec();
    }

    let [name, sequence, _separator, quality] = lines;

    Ok(Some(FastqRecord {
        name,
        sequence,
        quality,
    }))
}

fn strip_line_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
