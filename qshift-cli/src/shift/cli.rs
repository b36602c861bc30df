use clap::{Arg, ArgAction, Command};

pub const SHIFT_CMD: &str = "shift";

pub fn create_shift_cli() -> Command {
    Command::new(SHIFT_CMD)
        .about("Extract read pairs so that their error-probability distribution is shifted by a number of standard deviations.")
        .long_about(
            "Extract read pairs so that their error-probability distribution is shifted by a number of standard deviations.\n\n\
            The starting mean and standard deviation come from `qshift summarize`, either given as flags, \
            in a TOML parameter file (--params) or as the JSON summary itself (--summary). Flags win over files.",
        )
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
            Arg::new("output_reads")
                .long("output-reads")
                .value_name("FASTQ")
                .help("Where to write the extracted reads (.gz to compress)")
                .required(true),
        )
        .arg(
            Arg::new("output_mates")
                .long("output-mates")
                .value_name("FASTQ")
                .help("Where to write the extracted mates (.gz to compress)")
                .required(true),
        )
        .arg(
            Arg::new("downsample_fraction")
                .long("downsample-fraction")
                .value_name("FRACTION")
                .help("Overall fraction of pairs to keep on top of the shift (default: 1.0)")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("starting_mean")
                .long("starting-mean")
                .value_name("MEAN")
                .help("Mean pair error probability of the input")
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("starting_stdev")
                .long("starting-stdev")
                .value_name("STDEV")
                .help("Standard deviation of the pair error probability of the input")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("stdev_shift")
                .long("stdev-shift")
                .value_name("SHIFT")
                .help("Number of standard deviations to move the mean by (negative for fewer errors)")
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("params")
                .long("params")
                .value_name("TOML")
                .help("TOML file with any of the numeric parameters"),
        )
        .arg(
            Arg::new("summary")
                .long("summary")
                .value_name("JSON")
                .help("Summary written by `qshift summarize --output-json`"),
        )
        .arg(
            Arg::new("maximum_reads")
                .long("maximum-reads")
                .value_name("PAIRS")
                .help("Stop after this many read pairs")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("SEED")
                .help("Seed for the random number generator, for reproducible output")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("check_names")
                .long("check-names")
                .help("Fail when a read and its mate have different identifiers")
                .action(ArgAction::SetTrue),
        )
}
