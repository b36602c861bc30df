use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::ArgMatches;

use qshift_quality::{SummaryConfig, SummaryOutputs, summarize_pair_files};

fn path_arg(matches: &ArgMatches, id: &str) -> Option<PathBuf> {
    matches.get_one::<String>(id).map(PathBuf::from)
}

pub fn run_summarize(matches: &ArgMatches) -> Result<()> {
    let reads = matches
        .get_one::<String>("reads")
        .expect("A path to the read file is required.");

    let mates = matches
        .get_one::<String>("mates")
        .expect("A path to the mate file is required.");

    let config = SummaryConfig {
        reads: PathBuf::from(reads),
        mates: PathBuf::from(mates),
        maximum_pairs: matches.get_one::<u64>("maximum_reads").copied(),
        check_names: matches.get_flag("check_names"),
        scores_output: path_arg(matches, "output_scores"),
    };

    let outputs = SummaryOutputs {
        mean: path_arg(matches, "output_mean_file"),
        stdev: path_arg(matches, "output_stdev_file"),
        coverage: path_arg(matches, "output_coverage_file"),
        json: path_arg(matches, "output_json"),
    };

    let summary = summarize_pair_files(&config)?;

    let mut stdout = io::stdout().lock();
    outputs.write(&summary, &mut stdout)?;
    stdout.flush()?;

    Ok(())
}
