use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    let reader = BufReader::new(file);

    Ok(reader)
}

/// Read all non-empty lines of a (possibly gzipped) text file.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let reader = get_dynamic_reader(path)?;

    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line.with_context(|| format!("Failed to read line from {:?}", path))?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use flate2::Compression;
    use flate2::write::GzEncoder;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dynamic_reader_handles_gzip() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("table.tsv.gz");

        let file = File::create(&path).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        writeln!(encoder, "a\tb").unwrap();
        writeln!(encoder, "c\td").unwrap();
        encoder.finish().unwrap();

        let lines = read_lines(&path).unwrap();
        assert_eq!(lines, vec!["a\tb", "c\td"]);
    }

    #[test]
    fn test_dynamic_reader_handles_plain_text() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("table.tsv");
        std::fs::write(&path, "a\tb\n\nc\td\n").unwrap();

        let lines = read_lines(&path).unwrap();
        assert_eq!(lines, vec!["a\tb", "c\td"]);
    }
}
