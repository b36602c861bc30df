use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use qshift_core::utils::{get_dynamic_writer, open_paired_reader};
use qshift_core::{PairedFastqReader, QshiftError};

use crate::consts::GENOME_SIZE;
use crate::scoring::QualityScorer;
use crate::statistics::RunningStatistics;

/// Summary of the pair-score distribution of a pair of FASTQ files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    pub pairs: u64,
    pub bases: u64,
    pub mean: f64,
    pub stdev: f64,
    pub coverage: f64,
}

impl DistributionSummary {
    pub fn from_json(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
        let summary = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse distribution summary: {:?}", path))?;

        Ok(summary)
    }

    pub fn to_json(&self, path: &Path) -> Result<()> {
        let file =
            File::create(path).with_context(|| format!("Failed to create file: {:?}", path))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        Ok(())
    }
}

///
/// Score every pair the reader hands out and summarize the scores.
///
/// # Arguments
/// - reader: paired reader over the read and mate files
/// - scorer: quality scorer
/// - read_file: name of the read file, used in error messages
/// - mate_file: name of the mate file, used in error messages
/// - scores_out: optional sink receiving one `score<TAB>bases` line per pair
/// - progress: progress bar ticked once per pair
///
pub fn summarize_pairs<R: BufRead>(
    reader: &mut PairedFastqReader<R>,
    scorer: &QualityScorer,
    read_file: &str,
    mate_file: &str,
    mut scores_out: Option<&mut dyn Write>,
    progress: &ProgressBar,
) -> std::result::Result<DistributionSummary, QshiftError> {
    let mut stats = RunningStatistics::new();
    let mut bases: u64 = 0;

    while let Some(pair) = reader.next_pair()? {
        let score = scorer.score_pair(&pair, read_file, mate_file)?;
        let pair_bases = pair.base_count() as u64;

        stats.push(score);
        bases += pair_bases;

        if let Some(out) = scores_out.as_mut() {
            writeln!(out, "{score}\t{pair_bases}")?;
        }

        if stats.count() % 10_000 == 0 {
            progress.set_message(format!("Scored {} pairs", stats.count()));
        }
        progress.inc(1);
    }

    let moments = stats
        .mean_stdev()
        .ok_or_else(|| QshiftError::EmptyInput(read_file.to_string()))?;

    Ok(DistributionSummary {
        pairs: stats.count(),
        bases,
        mean: moments.mean,
        stdev: moments.stdev,
        coverage: bases as f64 / GENOME_SIZE,
    })
}

/// Inputs of a summary run.
#[derive(Debug, Clone, Default)]
pub struct SummaryConfig {
    pub reads: PathBuf,
    pub mates: PathBuf,
    pub maximum_pairs: Option<u64>,
    pub check_names: bool,
    pub scores_output: Option<PathBuf>,
}

///
/// Summarize the pair-score distribution of a read file and its mate file.
///
pub fn summarize_pair_files(config: &SummaryConfig) -> Result<DistributionSummary> {
    let mut reader = open_paired_reader(&config.reads, &config.mates)?
        .with_max_pairs(config.maximum_pairs)
        .with_name_check(config.check_names);

    let mut scores_out = match &config.scores_output {
        Some(path) => Some(get_dynamic_writer(path)?),
        None => None,
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed}] {msg} ({per_sec})")?
            .tick_strings(&["-", "\\", "|", "/"]),
    );
    spinner.set_message("Scoring read pairs...");

    let read_file = config.reads.display().to_string();
    let mate_file = config.mates.display().to_string();

    let summary = summarize_pairs(
        &mut reader,
        &QualityScorer::new(),
        &read_file,
        &mate_file,
        scores_out.as_mut().map(|w| w as &mut dyn Write),
        &spinner,
    )
    .with_context(|| format!("Failed to summarize {} and {}", read_file, mate_file))?;

    if let Some(out) = scores_out.as_mut() {
        out.flush()?;
    }

    spinner.finish_with_message(format!("Scored {} pairs", summary.pairs));

    Ok(summary)
}

/// Where the values of a [DistributionSummary] should go.
#[derive(Debug, Clone, Default)]
pub struct SummaryOutputs {
    pub mean: Option<PathBuf>,
    pub stdev: Option<PathBuf>,
    pub coverage: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

impl SummaryOutputs {
    ///
    /// Write each value to its file, or print it to `stdout` when no file was
    /// given for it.
    ///
    pub fn write(&self, summary: &DistributionSummary, stdout: &mut dyn Write) -> Result<()> {
        let values = [
            (&self.mean, "Mean Quality", summary.mean),
            (&self.stdev, "Standard Deviation", summary.stdev),
            (&self.coverage, "Coverage", summary.coverage),
        ];

        for (path, label, value) in values {
            match path {
                Some(path) => write_value_file(path, value)?,
                None => writeln!(stdout, "{label}: {value:.6}")?,
            }
        }

        if let Some(path) = &self.json {
            summary.to_json(path)?;
        }

        Ok(())
    }
}

/// Write a single value with six decimals and no trailing newline.
pub fn write_value_file(path: &Path, value: f64) -> Result<()> {
    fs::write(path, format!("{value:.6}"))
        .with_context(|| format!("Failed to write file: {:?}", path))
}
