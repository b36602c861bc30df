use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::ArgMatches;

use qshift_quality::DistributionSummary;
use qshift_resample::{DEFAULT_DOWNSAMPLE_FRACTION, ShiftConfig, shift_pair_files};

use crate::config::ShiftParams;

///
/// Collect the numeric parameters: summary file first, then the TOML file,
/// then the command line.
///
fn collect_params(matches: &ArgMatches) -> Result<ShiftParams> {
    let mut params = ShiftParams::default();

    if let Some(summary) = matches.get_one::<String>("summary") {
        let summary = DistributionSummary::from_json(Path::new(summary))?;
        params = params.merge(ShiftParams::from_summary(&summary));
    }

    if let Some(file) = matches.get_one::<String>("params") {
        params = params.merge(ShiftParams::from_toml_file(Path::new(file))?);
    }

    let flags = ShiftParams {
        starting_mean: matches.get_one::<f64>("starting_mean").copied(),
        starting_stdev: matches.get_one::<f64>("starting_stdev").copied(),
        stdev_shift: matches.get_one::<f64>("stdev_shift").copied(),
        downsample_fraction: matches.get_one::<f64>("downsample_fraction").copied(),
        maximum_reads: matches.get_one::<u64>("maximum_reads").copied(),
        seed: matches.get_one::<u64>("seed").copied(),
    };

    Ok(params.merge(flags))
}

pub fn run_shift(matches: &ArgMatches) -> Result<()> {
    let reads = matches
        .get_one::<String>("reads")
        .expect("A path to the read file is required.");
    let mates = matches
        .get_one::<String>("mates")
        .expect("A path to the mate file is required.");
    let output_reads = matches
        .get_one::<String>("output_reads")
        .expect("A path for the extracted reads is required.");
    let output_mates = matches
        .get_one::<String>("output_mates")
        .expect("A path for the extracted mates is required.");

    let params = collect_params(matches)?;

    let config = ShiftConfig {
        reads: PathBuf::from(reads),
        mates: PathBuf::from(mates),
        output_reads: PathBuf::from(output_reads),
        output_mates: PathBuf::from(output_mates),
        params: params.distribution()?,
        downsample_fraction: params
            .downsample_fraction
            .unwrap_or(DEFAULT_DOWNSAMPLE_FRACTION),
        maximum_pairs: params.maximum_reads,
        seed: params.seed,
        check_names: matches.get_flag("check_names"),
    };

    let report = shift_pair_files(&config)?;

    eprintln!(
        "Extracted {} of {} read pairs ({:.2}%)",
        report.pairs_extracted,
        report.pairs_processed,
        100.0 * report.extracted_fraction()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shift::cli::create_shift_cli;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    #[fixture]
    fn inputs() -> TempDir {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("r1.fastq"),
            "@a/1\nACGT\n+\nII55\n@b/1\nACGT\n+\n5555\n@c/1\nACGT\n+\nIIII\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("r2.fastq"),
            "@a/2\nACGT\n+\nIIII\n@b/2\nACGT\n+\nII++\n@c/2\nACGT\n+\n+III\n",
        )
        .unwrap();
        dir
    }

    fn args(dir: &Path, extra: &[&str]) -> Vec<String> {
        let path = |name: &str| dir.join(name).to_string_lossy().into_owned();
        let mut args = vec![
            "shift".to_string(),
            "--reads".to_string(),
            path("r1.fastq"),
            "--mates".to_string(),
            path("r2.fastq"),
            "--output-reads".to_string(),
            path("out1.fastq"),
            "--output-mates".to_string(),
            path("out2.fastq"),
        ];
        args.extend(extra.iter().map(|s| s.to_string()));
        args
    }

    #[rstest]
    fn test_flags_and_negative_shift(inputs: TempDir) {
        let matches = create_shift_cli()
            .try_get_matches_from(args(
                inputs.path(),
                &["--starting-mean", "0.1", "--starting-stdev", "0.05", "--stdev-shift", "-1.5", "--seed", "9"],
            ))
            .unwrap();

        let params = collect_params(&matches).unwrap();
        assert_eq!(params.stdev_shift, Some(-1.5));
        assert_eq!(params.seed, Some(9));

        run_shift(&matches).unwrap();
        assert!(inputs.path().join("out1.fastq").exists());
        assert!(inputs.path().join("out2.fastq").exists());
    }

    #[rstest]
    fn test_params_file_with_flag_override(inputs: TempDir) {
        let params_file = inputs.path().join("params.toml");
        fs::write(
            &params_file,
            "starting_mean = 0.1\nstarting_stdev = 0.05\nstdev_shift = 2.0\ndownsample_fraction = 0.25\n",
        )
        .unwrap();

        let matches = create_shift_cli()
            .try_get_matches_from(args(
                inputs.path(),
                &["--params", params_file.to_str().unwrap(), "--stdev-shift", "0"],
            ))
            .unwrap();

        let params = collect_params(&matches).unwrap();
        assert_eq!(params.stdev_shift, Some(0.0));
        assert_eq!(params.downsample_fraction, Some(0.25));
        assert_eq!(params.starting_mean, Some(0.1));
    }

    #[rstest]
    fn test_no_shift_keeps_all_pairs(inputs: TempDir) {
        let matches = create_shift_cli()
            .try_get_matches_from(args(
                inputs.path(),
                &["--starting-mean", "0.1", "--starting-stdev", "0.05", "--stdev-shift", "0"],
            ))
            .unwrap();

        run_shift(&matches).unwrap();

        let out = fs::read_to_string(inputs.path().join("out1.fastq")).unwrap();
        assert_eq!(out.lines().count(), 12);
    }

    #[rstest]
    fn test_missing_distribution_is_an_error(inputs: TempDir) {
        let matches = create_shift_cli()
            .try_get_matches_from(args(inputs.path(), &["--stdev-shift", "1.0"]))
            .unwrap();

        assert!(run_shift(&matches).is_err());
    }
}
