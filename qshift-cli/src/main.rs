mod config;
mod shift;
mod summarize;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "qshift";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Summarize the error-probability distribution of paired-end FASTQ files, and resample read pairs to shift it.")
        .subcommand_required(true)
        .subcommand(summarize::cli::create_summarize_cli())
        .subcommand(shift::cli::create_shift_cli())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // SUMMARIZE
        //
        Some((summarize::cli::SUMMARIZE_CMD, matches)) => {
            summarize::handlers::run_summarize(matches)?;
        }

        //
        // SHIFT
        //
        Some((shift::cli::SHIFT_CMD, matches)) => {
            shift::handlers::run_shift(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
