use thiserror::Error;

#[derive(Error, Debug)]
pub enum QshiftError {
    #[error(
        "Encountered a non-supported quality value - {character:?}. Only Illumina1.8 format quality values are supported. Found in the {file} input file in read {read_name} - {quality}"
    )]
    InvalidQualityValue {
        character: char,
        file: String,
        read_name: String,
        quality: String,
    },

    #[error("Read and mate identifiers differ at pair {pair}: {read_name} vs {mate_name}")]
    PairNameMismatch {
        pair: u64,
        read_name: String,
        mate_name: String,
    },

    #[error("Invalid distribution parameters: {0}")]
    InvalidDistribution(String),

    #[error("Downsample fraction must be a finite, non-negative number, got {0}")]
    InvalidDownsampleFraction(f64),

    #[error("No read pairs found in input: {0}")]
    EmptyInput(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, QshiftError>;
