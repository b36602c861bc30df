use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use qshift_quality::DistributionSummary;
use qshift_resample::DistributionParams;

///
/// Parameters of a `shift` run that can live in a TOML file:
///
/// ```toml
/// starting_mean = 2.41
/// starting_stdev = 0.83
/// stdev_shift = -1.0
/// downsample_fraction = 0.5
/// seed = 7
/// ```
///
/// Every field is optional; command line flags take precedence.
///
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShiftParams {
    pub starting_mean: Option<f64>,
    pub starting_stdev: Option<f64>,
    pub stdev_shift: Option<f64>,
    pub downsample_fraction: Option<f64>,
    pub maximum_reads: Option<u64>,
    pub seed: Option<u64>,
}

impl ShiftParams {
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read parameter file: {:?}", path))?;
        let params = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse parameter file: {:?}", path))?;

        Ok(params)
    }

    /// Mean and standard deviation taken from a `summarize --output-json` file.
    pub fn from_summary(summary: &DistributionSummary) -> Self {
        ShiftParams {
            starting_mean: Some(summary.mean),
            starting_stdev: Some(summary.stdev),
            ..Default::default()
        }
    }

    /// Fields set in `other` win over the ones in `self`.
    pub fn merge(self, other: ShiftParams) -> ShiftParams {
        ShiftParams {
            starting_mean: other.starting_mean.or(self.starting_mean),
            starting_stdev: other.starting_stdev.or(self.starting_stdev),
            stdev_shift: other.stdev_shift.or(self.stdev_shift),
            downsample_fraction: other.downsample_fraction.or(self.downsample_fraction),
            maximum_reads: other.maximum_reads.or(self.maximum_reads),
            seed: other.seed.or(self.seed),
        }
    }

    pub fn distribution(&self) -> Result<DistributionParams> {
        let mean = self
            .starting_mean
            .context("A starting mean is required (--starting-mean, --params or --summary).")?;
        let stdev = self
            .starting_stdev
            .context("A starting standard deviation is required (--starting-stdev, --params or --summary).")?;
        let shift = self
            .stdev_shift
            .context("A standard deviation shift is required (--stdev-shift or --params).")?;

        Ok(DistributionParams { mean, stdev, shift })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use tempfile::tempdir;

    #[rstest]
    fn test_read_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("params.toml");
        fs::write(
            &path,
            "starting_mean = 2.5\nstarting_stdev = 0.5\nstdev_shift = -1.0\nseed = 3\n",
        )
        .unwrap();

        let params = ShiftParams::from_toml_file(&path).unwrap();
        assert_eq!(
            params,
            ShiftParams {
                starting_mean: Some(2.5),
                starting_stdev: Some(0.5),
                stdev_shift: Some(-1.0),
                seed: Some(3),
                ..Default::default()
            }
        );
    }

    #[rstest]
    fn test_unknown_field_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("params.toml");
        fs::write(&path, "mean = 2.5\n").unwrap();

        assert!(ShiftParams::from_toml_file(&path).is_err());
    }

    #[rstest]
    fn test_merge_prefers_other() {
        let file = ShiftParams {
            starting_mean: Some(1.0),
            starting_stdev: Some(0.2),
            stdev_shift: Some(1.0),
            ..Default::default()
        };
        let flags = ShiftParams {
            stdev_shift: Some(-2.0),
            downsample_fraction: Some(0.5),
            ..Default::default()
        };

        let merged = file.merge(flags);
        assert_eq!(merged.starting_mean, Some(1.0));
        assert_eq!(merged.stdev_shift, Some(-2.0));
        assert_eq!(merged.downsample_fraction, Some(0.5));

        assert_eq!(
            merged.distribution().unwrap(),
            DistributionParams {
                mean: 1.0,
                stdev: 0.2,
                shift: -2.0
            }
        );
    }

    #[rstest]
    fn test_missing_shift_is_an_error() {
        let summary = DistributionSummary {
            pairs: 1,
            bases: 100,
            mean: 1.0,
            stdev: 0.1,
            coverage: 0.0,
        };

        let params = ShiftParams::from_summary(&summary);
        assert!(params.distribution().is_err());
    }
}
