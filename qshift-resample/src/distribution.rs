use statrs::distribution::{Continuous, Normal};

use qshift_core::QshiftError;

use crate::consts::MAX_ERROR_PROBABILITY;

///
/// Parameters of the input pair-score distribution and how far to move it.
///
/// `shift` is measured in standard deviations; the target keeps `stdev`.
///
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DistributionParams {
    pub mean: f64,
    pub stdev: f64,
    pub shift: f64,
}

impl DistributionParams {
    pub fn shifted_mean(&self) -> f64 {
        self.mean + self.shift * self.stdev
    }
}

///
/// The input score distribution and its shifted counterpart, both normal with
/// the same standard deviation.
///
#[derive(Debug, Clone)]
pub struct TargetDistribution {
    original: Normal,
    shifted: Normal,
}

impl TargetDistribution {
    pub fn new(params: &DistributionParams) -> Result<Self, QshiftError> {
        if !params.mean.is_finite() {
            return Err(QshiftError::InvalidDistribution(format!(
                "mean must be finite, got {}",
                params.mean
            )));
        }
        if !params.stdev.is_finite() || params.stdev <= 0.0 {
            return Err(QshiftError::InvalidDistribution(format!(
                "standard deviation must be positive and finite, got {}",
                params.stdev
            )));
        }
        if !params.shift.is_finite() {
            return Err(QshiftError::InvalidDistribution(format!(
                "shift must be finite, got {}",
                params.shift
            )));
        }

        let original = Normal::new(params.mean, params.stdev)
            .map_err(|e| QshiftError::InvalidDistribution(e.to_string()))?;
        let shifted = Normal::new(params.shifted_mean(), params.stdev)
            .map_err(|e| QshiftError::InvalidDistribution(e.to_string()))?;

        Ok(TargetDistribution { original, shifted })
    }

    ///
    /// `shifted.pdf(score) / original.pdf(score)` for a pair score, with the score
    /// capped at [MAX_ERROR_PROBABILITY].
    ///
    /// Computed from the log densities so that scores far out in the tails do not
    /// turn into `0 / 0`.
    ///
    pub fn density_ratio(&self, score: f64) -> f64 {
        let score = score.min(MAX_ERROR_PROBABILITY);
        (self.shifted.ln_pdf(score) - self.original.ln_pdf(score)).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn params(mean: f64, stdev: f64, shift: f64) -> DistributionParams {
        DistributionParams { mean, stdev, shift }
    }

    #[rstest]
    #[case(0.0)]
    #[case(1.3)]
    #[case(49.0)]
    #[case(500.0)]
    fn test_no_shift_gives_unit_ratio(#[case] score: f64) {
        let target = TargetDistribution::new(&params(1.5, 0.5, 0.0)).unwrap();
        assert_eq!(target.density_ratio(score), 1.0);
    }

    #[rstest]
    fn test_ratio_matches_pdf_quotient() {
        let p = params(2.0, 0.75, 1.0);
        let target = TargetDistribution::new(&p).unwrap();
        let original = Normal::new(p.mean, p.stdev).unwrap();
        let shifted = Normal::new(p.shifted_mean(), p.stdev).unwrap();

        for score in [0.5, 1.0, 2.0, 2.75, 4.0] {
            let expected = shifted.pdf(score) / original.pdf(score);
            let ratio = target.density_ratio(score);
            assert!(
                ((ratio - expected) / expected).abs() < 1e-9,
                "{ratio} != {expected} at {score}"
            );
        }
    }

    #[rstest]
    fn test_positive_shift_favours_high_scores() {
        let target = TargetDistribution::new(&params(2.0, 0.5, 1.0)).unwrap();

        assert!(target.density_ratio(1.0) < 1.0);
        assert!(target.density_ratio(3.0) > 1.0);
        // halfway between the two means both densities agree
        assert!((target.density_ratio(2.25) - 1.0).abs() < 1e-12);
    }

    #[rstest]
    fn test_scores_are_capped() {
        let target = TargetDistribution::new(&params(1.0, 0.5, -2.0)).unwrap();
        assert_eq!(target.density_ratio(80.0), target.density_ratio(MAX_ERROR_PROBABILITY));
    }

    #[rstest]
    fn test_far_tail_stays_finite() {
        // both densities underflow to zero at the cap
        let target = TargetDistribution::new(&params(1.0, 0.01, 0.5)).unwrap();
        let ratio = target.density_ratio(1_000.0);
        assert!(!ratio.is_nan());
    }

    #[rstest]
    #[case(params(1.0, 0.0, 1.0))]
    #[case(params(1.0, -1.0, 1.0))]
    #[case(params(f64::NAN, 1.0, 1.0))]
    #[case(params(1.0, f64::INFINITY, 1.0))]
    #[case(params(1.0, 1.0, f64::NAN))]
    fn test_invalid_params(#[case] p: DistributionParams) {
        assert!(matches!(
            TargetDistribution::new(&p),
            Err(QshiftError::InvalidDistribution(_))
        ));
    }
}
