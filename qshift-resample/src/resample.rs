use std::fmt::{self, Display};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use qshift_core::utils::{get_dynamic_writer, open_paired_reader};
use qshift_core::{PairedFastqReader, QshiftError, ReadPair};
use qshift_quality::{BatchStatistics, QualityScorer};

use crate::consts::*;
use crate::distribution::{DistributionParams, TargetDistribution};
use crate::writer::PairWriter;

///
/// Decides whether a pair with a given score is kept.
///
/// The acceptance probability is `downsample_fraction * density_ratio(score)`
/// and is compared as is against a uniform draw in `[0, 1)`: anything above 1
/// is always kept.
///
pub struct PairResampler<G: Rng> {
    target: TargetDistribution,
    downsample_fraction: f64,
    rng: G,
}

impl PairResampler<StdRng> {
    /// Resampler drawing from a `StdRng`, seeded from the OS unless a seed is given.
    pub fn with_seed(
        target: TargetDistribution,
        downsample_fraction: f64,
        seed: Option<u64>,
    ) -> Result<Self, QshiftError> {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };

        PairResampler::new(target, downsample_fraction, rng)
    }
}

impl<G: Rng> PairResampler<G> {
    pub fn new(
        target: TargetDistribution,
        downsample_fraction: f64,
        rng: G,
    ) -> Result<Self, QshiftError> {
        if !downsample_fraction.is_finite() || downsample_fraction < 0.0 {
            return Err(QshiftError::InvalidDownsampleFraction(downsample_fraction));
        }

        Ok(PairResampler {
            target,
            downsample_fraction,
            rng,
        })
    }

    pub fn acceptance_probability(&self, score: f64) -> f64 {
        self.downsample_fraction * self.target.density_ratio(score)
    }

    pub fn should_accept(&mut self, score: f64) -> bool {
        let draw: f64 = self.rng.random();
        self.acceptance_probability(score) > draw
    }
}

/// Progress report emitted every [CHECKPOINT_INTERVAL] accepted pairs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Checkpoint {
    pub total_pairs: u64,
    pub total_extracted: u64,
    pub mean: f64,
    pub stdev: f64,
}

impl Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Processed {} reads, Extracted {} reads, Mean quality this 100K: {:.2} +- {:.2}",
            self.total_pairs, self.total_extracted, self.mean, self.stdev
        )
    }
}

///
/// Keeps or drops pairs and writes the kept ones.
///
/// Counts every pair it is offered, and collects the scores of accepted pairs
/// into a batch that is summarized and cleared every `checkpoint_interval`
/// accepted pairs. The batch is only for reporting.
///
pub struct QualityShifter<W: Write, G: Rng> {
    resampler: PairResampler<G>,
    writer: PairWriter<W>,
    checkpoint_interval: u64,
    total_pairs: u64,
    total_extracted: u64,
    batch: BatchStatistics,
    checkpoints: Vec<Checkpoint>,
    pending: Option<Checkpoint>,
}

impl<W: Write, G: Rng> QualityShifter<W, G> {
    pub fn new(resampler: PairResampler<G>, writer: PairWriter<W>) -> Self {
        Self::with_checkpoint_interval(resampler, writer, CHECKPOINT_INTERVAL)
    }

    pub fn with_checkpoint_interval(
        resampler: PairResampler<G>,
        writer: PairWriter<W>,
        checkpoint_interval: u64,
    ) -> Self {
        let checkpoint_interval = checkpoint_interval.max(1);
        QualityShifter {
            resampler,
            writer,
            checkpoint_interval,
            total_pairs: 0,
            total_extracted: 0,
            batch: BatchStatistics::with_capacity(checkpoint_interval.min(CHECKPOINT_INTERVAL) as usize),
            checkpoints: Vec::new(),
            pending: None,
        }
    }

    ///
    /// Offer a scored pair. Writes both records and returns `true` if the pair
    /// is kept; writes nothing and returns `false` otherwise.
    ///
    pub fn accept(&mut self, pair: &ReadPair, score: f64) -> io::Result<bool> {
        self.pending = None;

        let accepted = self.resampler.should_accept(score);
        if accepted {
            self.writer.write_pair(pair)?;
        }

        self.total_pairs += 1;

        if accepted {
            self.total_extracted += 1;
            self.batch.push(score);

            if self.total_extracted % self.checkpoint_interval == 0 {
                if let Some(moments) = self.batch.flush() {
                    let checkpoint = Checkpoint {
                        total_pairs: self.total_pairs,
                        total_extracted: self.total_extracted,
                        mean: moments.mean,
                        stdev: moments.stdev,
                    };
                    self.checkpoints.push(checkpoint);
                    self.pending = Some(checkpoint);
                }
            }
        }

        Ok(accepted)
    }

    /// The checkpoint produced by the last call to [QualityShifter::accept], if any.
    pub fn take_checkpoint(&mut self) -> Option<Checkpoint> {
        self.pending.take()
    }

    pub fn total_pairs(&self) -> u64 {
        self.total_pairs
    }

    pub fn total_extracted(&self) -> u64 {
        self.total_extracted
    }

    /// Flush the outputs and hand back the writer and the checkpoints seen so far.
    pub fn finish(mut self) -> io::Result<(PairWriter<W>, Vec<Checkpoint>)> {
        self.writer.flush()?;
        Ok((self.writer, self.checkpoints))
    }
}

/// What a resampling run did.
#[derive(Debug, Clone, PartialEq)]
pub struct ResampleReport {
    pub pairs_processed: u64,
    pub pairs_extracted: u64,
    pub checkpoints: Vec<Checkpoint>,
    /// One input ran out of records before the other.
    pub unpaired_records: bool,
}

impl ResampleReport {
    pub fn extracted_fraction(&self) -> f64 {
        if self.pairs_processed == 0 {
            0.0
        } else {
            self.pairs_extracted as f64 / self.pairs_processed as f64
        }
    }
}

///
/// Stream every pair from `reader` through `shifter`.
///
/// Stops at the shorter input or at the reader's pair limit. Any unsupported
/// quality character aborts the run; whatever was written before stays written.
///
/// # Arguments
/// - reader: paired reader over the read and mate files
/// - scorer: quality scorer
/// - read_file: name of the read file, used in error messages
/// - mate_file: name of the mate file, used in error messages
/// - shifter: resampler plus output streams
/// - progress: progress bar ticked once per pair; checkpoints are printed to
///   stderr with the bar suspended
///
pub fn resample_pairs<R: BufRead, W: Write, G: Rng>(
    reader: &mut PairedFastqReader<R>,
    scorer: &QualityScorer,
    read_file: &str,
    mate_file: &str,
    mut shifter: QualityShifter<W, G>,
    progress: &ProgressBar,
) -> std::result::Result<(ResampleReport, PairWriter<W>), QshiftError> {
    while let Some(pair) = reader.next_pair()? {
        let score = scorer.score_pair(&pair, read_file, mate_file)?;
        shifter.accept(&pair, score)?;

        if let Some(checkpoint) = shifter.take_checkpoint() {
            progress.suspend(|| eprintln!("{checkpoint}"));
        }

        if shifter.total_pairs() % PROGRESS_INTERVAL == 0 {
            progress.set_message(format!(
                "Processed {} pairs, extracted {}",
                shifter.total_pairs(),
                shifter.total_extracted()
            ));
        }
        progress.inc(1);
    }

    let unpaired_records = reader.has_unpaired_records();
    let pairs_processed = shifter.total_pairs();
    let pairs_extracted = shifter.total_extracted();
    let (writer, checkpoints) = shifter.finish()?;

    let report = ResampleReport {
        pairs_processed,
        pairs_extracted,
        checkpoints,
        unpaired_records,
    };

    Ok((report, writer))
}

/// Inputs, outputs and parameters of a resampling run.
#[derive(Debug, Clone)]
pub struct ShiftConfig {
    pub reads: PathBuf,
    pub mates: PathBuf,
    pub output_reads: PathBuf,
    pub output_mates: PathBuf,
    pub params: DistributionParams,
    pub downsample_fraction: f64,
    pub maximum_pairs: Option<u64>,
    pub seed: Option<u64>,
    pub check_names: bool,
}

impl Default for ShiftConfig {
    fn default() -> Self {
        ShiftConfig {
            reads: PathBuf::new(),
            mates: PathBuf::new(),
            output_reads: PathBuf::new(),
            output_mates: PathBuf::new(),
            params: DistributionParams::default(),
            downsample_fraction: DEFAULT_DOWNSAMPLE_FRACTION,
            maximum_pairs: None,
            seed: None,
            check_names: false,
        }
    }
}

///
/// Resample a read file and its mate file into a new pair of files whose
/// pair-score distribution follows the shifted target.
///
/// Outputs ending in `.gz` are gzip-compressed.
///
pub fn shift_pair_files(config: &ShiftConfig) -> Result<ResampleReport> {
    let target = TargetDistribution::new(&config.params)?;
    let resampler = PairResampler::with_seed(target, config.downsample_fraction, config.seed)?;

    let mut reader = open_paired_reader(&config.reads, &config.mates)?
        .with_max_pairs(config.maximum_pairs)
        .with_name_check(config.check_names);

    let writer = PairWriter::new(
        get_dynamic_writer(&config.output_reads)?,
        get_dynamic_writer(&config.output_mates)?,
    );
    let shifter = QualityShifter::new(resampler, writer);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed}] {msg} ({per_sec})")?
            .tick_strings(&["-", "\\", "|", "/"]),
    );
    spinner.set_message("Resampling read pairs...");

    let read_file = config.reads.display().to_string();
    let mate_file = config.mates.display().to_string();

    let (report, writer) = resample_pairs(
        &mut reader,
        &QualityScorer::new(),
        &read_file,
        &mate_file,
        shifter,
        &spinner,
    )
    .with_context(|| format!("Failed to resample {} and {}", read_file, mate_file))?;

    // dropping the writers finishes any gzip streams
    drop(writer);

    spinner.finish_with_message(format!(
        "Processed {} pairs, extracted {}",
        report.pairs_processed, report.pairs_extracted
    ));

    if report.unpaired_records {
        eprintln!(
            "WARNING: {} and {} hold a different number of records; pairs were read up to the end of the shorter file",
            read_file, mate_file
        );
    }

    Ok(report)
}
