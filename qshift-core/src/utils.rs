use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;

use crate::consts::GZIP_EXTENSION;
use crate::reader::PairedFastqReader;

pub fn is_gzipped(path: &Path) -> bool {
    path.extension() == Some(OsStr::new(GZIP_EXTENSION))
}

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped(path) {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

///
/// Get a writer that gzip-compresses when the path ends in `.gz`.
///
/// # Arguments
///
/// - path: path to the file to create (truncated if it exists)
///
pub fn get_dynamic_writer(path: &Path) -> Result<BufWriter<Box<dyn Write>>> {
    let file =
        File::create(path).with_context(|| format!("Failed to create file: {:?}", path))?;
    let file: Box<dyn Write> = match is_gzipped(path) {
        true => Box::new(GzEncoder::new(file, Compression::default())),
        false => Box::new(file),
    };

    Ok(BufWriter::new(file))
}

///
/// Open a read file and a mate file for lockstep iteration.
///
pub fn open_paired_reader(
    reads: &Path,
    mates: &Path,
) -> Result<PairedFastqReader<BufReader<Box<dyn Read>>>> {
    let reads = get_dynamic_reader(reads)?;
    let mates = get_dynamic_reader(mates)?;

    Ok(PairedFastqReader::new(reads, mates))
}

/// Lines of a (possibly gzip'd) file, mostly useful for checking outputs.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let reader = get_dynamic_reader(path)?;
    let lines = reader
        .lines()
        .collect::<std::io::Result<Vec<String>>>()
        .with_context(|| format!("Failed to read lines from: {:?}", path))?;

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use tempfile::tempdir;

    #[rstest]
    #[case("reads.fastq", false)]
    #[case("reads.fastq.gz", true)]
    #[case("reads.gz.fastq", false)]
    fn test_is_gzipped(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(is_gzipped(Path::new(path)), expected);
    }

    #[rstest]
    #[case("out.fastq")]
    #[case("out.fastq.gz")]
    fn test_writer_reader_agree(#[case] file_name: &str) {
        let dir = tempdir().unwrap();
        let path = dir.path().join(file_name);

        {
            let mut writer = get_dynamic_writer(&path).unwrap();
            writer.write_all(b"@r\nACGT\n+\nIIII\n").unwrap();
            writer.flush().unwrap();
        }

        let lines = read_lines(&path).unwrap();
        assert_eq!(lines, vec!["@r", "ACGT", "+", "IIII"]);
    }

    #[rstest]
    fn test_missing_file_is_an_error() {
        let res = get_dynamic_reader(Path::new("does/not/exist.fastq"));
        assert!(res.is_err());
    }
}
