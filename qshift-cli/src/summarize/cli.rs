use clap::{Arg, ArgAction, Command};

pub const SUMMARIZE_CMD: &str = "summarize";

pub fn create_summarize_cli() -> Command {
    Command::new(SUMMARIZE_CMD)
        .about("Compute the mean, standard deviation and coverage of the pair error-probability distribution.")
        .arg(
            Arg::new("reads")
                .long("reads")
                .value_name("FASTQ")
                .help("Read (R1) FASTQ file, plain or .gz")
                .required(true),
        )
        .arg(
            Arg::new("mates")
                .long("mates")
                .value_name("FASTQ")
                .help("Mate (R2) FASTQ file, plain or .gz")
                .required(true),
        )
        .arg(
            Arg::new("maximum_reads")
                .long("maximum-reads")
                .value_name("PAIRS")
                .help("Compute statistics on at most this many read pairs")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("output_mean_file")
                .long("output-mean-file")
                .value_name("FILE")
                .help("Write the mean to this file instead of stdout"),
        )
        .arg(
            Arg::new("output_stdev_file")
                .long("output-stdev-file")
                .value_name("FILE")
                .help("Write the standard deviation to this file instead of stdout"),
        )
        .arg(
            Arg::new("output_coverage_file")
                .long("output-coverage-file")
                .value_name("FILE")
                .help("Write the coverage to this file instead of stdout"),
        )
        .arg(
            Arg::new("output_scores")
                .long("output-scores")
                .value_name("FILE")
                .help("Write one 'score<TAB>bases' line per read pair"),
        )
        .arg(
            Arg::new("output_json")
                .long("output-json")
                .value_name("FILE")
                .help("Write the full summary as JSON (usable with `shift --summary`)"),
        )
        .arg(
            Arg::new("check_names")
                .long("check-names")
                .help("Fail when a read and its mate have different identifiers")
                .action(ArgAction::SetTrue),
        )
}
