use std::fmt::{self, Display};

use qshift_core::{FastqRecord, QshiftError, ReadPair};

use crate::consts::{MAX_QUALITY_CHAR, PHRED_OFFSET};

/// A quality character outside the supported encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidQuality {
    pub value: u8,
    pub position: usize,
}

impl Display for InvalidQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "non-supported quality value {:?} at position {}",
            self.value as char, self.position
        )
    }
}

impl std::error::Error for InvalidQuality {}

///
/// Converts quality strings into an expected number of sequencing errors.
///
/// Each character contributes `10^-((ordinal - 33) / 10)`; the score of a string
/// is the sum over its characters. Only characters `!` (33) through `K` (75)
/// are accepted.
///
#[derive(Debug, Clone)]
pub struct QualityScorer {
    // NaN marks a byte outside the accepted range
    error_probabilities: [f64; 256],
}

impl Default for QualityScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl QualityScorer {
    pub fn new() -> Self {
        let mut error_probabilities = [f64::NAN; 256];
        for value in PHRED_OFFSET..=MAX_QUALITY_CHAR {
            let phred = (value - PHRED_OFFSET) as f64;
            error_probabilities[value as usize] = 10f64.powf(-phred / 10.0);
        }

        QualityScorer {
            error_probabilities,
        }
    }

    /// Error probability of a single quality character.
    pub fn error_probability(&self, value: u8) -> Option<f64> {
        let probability = self.error_probabilities[value as usize];
        if probability.is_nan() {
            None
        } else {
            Some(probability)
        }
    }

    ///
    /// Score one quality line. The line must already be stripped of its
    /// terminator; an empty line scores `0.0`.
    ///
    pub fn score(&self, quality: &[u8]) -> Result<f64, InvalidQuality> {
        let mut total = 0.0;
        for (position, &value) in quality.iter().enumerate() {
            match self.error_probability(value) {
                Some(probability) => total += probability,
                None => return Err(InvalidQuality { value, position }),
            }
        }

        Ok(total)
    }

    ///
    /// Score the quality line of a record, naming the source file and read in
    /// the error when the line holds an unsupported character.
    ///
    pub fn score_record(&self, record: &FastqRecord, file: &str) -> Result<f64, QshiftError> {
        self.score(record.trimmed_quality())
            .map_err(|invalid| QshiftError::InvalidQualityValue {
                character: invalid.value as char,
                file: file.to_string(),
                read_name: record.name_str().into_owned(),
                quality: record.quality_str().into_owned(),
            })
    }

    ///
    /// Combined score of a pair: read score plus mate score.
    ///
    /// # Arguments
    /// - pair: the read and mate to score
    /// - read_file: name of the read file, for error messages
    /// - mate_file: name of the mate file, for error messages
    ///
    pub fn score_pair(
        &self,
        pair: &ReadPair,
        read_file: &str,
        mate_file: &str,
    ) -> Result<f64, QshiftError> {
        let read_score = self.score_record(&pair.read, read_file)?;
        let mate_score = self.score_record(&pair.mate, mate_file)?;

        Ok(read_score + mate_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn scorer() -> QualityScorer {
        QualityScorer::new()
    }

    #[rstest]
    fn test_empty_string_scores_zero(scorer: QualityScorer) {
        assert_eq!(scorer.score(b"").unwrap(), 0.0);
    }

    #[rstest]
    #[case(b'!', 1.0)]
    #[case(b'+', 0.1)]
    #[case(b'5', 0.01)]
    #[case(b'?', 0.001)]
    #[case(b'I', 0.0001)]
    fn test_single_character(scorer: QualityScorer, #[case] value: u8, #[case] expected: f64) {
        let score = scorer.score(&[value]).unwrap();
        assert!((score - expected).abs() < 1e-12, "{score} != {expected}");
    }

    #[rstest]
    fn test_monotonically_decreasing(scorer: QualityScorer) {
        let scores: Vec<f64> = (33u8..=75)
            .map(|value| scorer.score(&[value]).unwrap())
            .collect();

        for window in scores.windows(2) {
            assert!(window[1] < window[0]);
        }
    }

    #[rstest]
    #[case(32)]
    #[case(76)]
    #[case(b'h')]
    #[case(0xff)]
    fn test_out_of_range_is_rejected(scorer: QualityScorer, #[case] value: u8) {
        let res = scorer.score(&[b'I', value, b'I']);
        assert_eq!(res, Err(InvalidQuality { value, position: 1 }));
    }

    #[rstest]
    fn test_sum_over_string(scorer: QualityScorer) {
        let score = scorer.score(b"!!+").unwrap();
        assert!((score - 2.1).abs() < 1e-12);
    }

    #[rstest]
    fn test_pair_score_is_additive(scorer: QualityScorer) {
        let read = FastqRecord::new(b"@p/1", b"ACGTA", b"II5+!");
        let mate = FastqRecord::new(b"@p/2", b"TTGC", b"?#AK");
        let pair = ReadPair::new(read.clone(), mate.clone());

        let expected = scorer.score_record(&read, "r").unwrap() + scorer.score_record(&mate, "m").unwrap();
        assert_eq!(scorer.score_pair(&pair, "r", "m").unwrap(), expected);
    }

    #[rstest]
    fn test_score_record_names_file_and_read(scorer: QualityScorer) {
        let pair = ReadPair::new(
            FastqRecord::new(b"@p/1", b"ACGT", b"IIII"),
            FastqRecord::new(b"@p/2", b"ACGT", b"II I"),
        );

        match scorer.score_pair(&pair, "reads.fq", "mates.fq") {
            Err(QshiftError::InvalidQualityValue {
                character,
                file,
                read_name,
                quality,
            }) => {
                assert_eq!(character, ' ');
                assert_eq!(file, "mates.fq");
                assert_eq!(read_name, "@p/2");
                assert_eq!(quality, "II I");
            }
            other => panic!("expected an invalid quality error, got {other:?}"),
        }
    }

    #[rstest]
    fn test_trailing_whitespace_is_not_scored(scorer: QualityScorer) {
        let record = FastqRecord::new(b"@p/1", b"ACGT", b"IIII \t");
        let score = scorer.score_record(&record, "r").unwrap();
        assert!((score - 0.0004).abs() < 1e-12);
    }
}
