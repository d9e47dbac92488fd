use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;

use gwash_core::models::VariantTable;

use crate::schema::CANONICAL_HEADER;

///
/// Write a table to disk in the canonical nine-column schema, tab
/// separated. The output is gzipped when the path ends with `.gz`.
///
/// # Arguments
/// - table: the table to write
/// - path: the path to the file to dump to
///
pub fn write_table<P: AsRef<Path>>(table: &VariantTable, path: P) -> std::io::Result<()> {
    write_table_annotated(table, path, &[])
}

///
/// Write a table with extra named columns appended after the canonical
/// nine, one value per record.
///
/// # Arguments
/// - table: the table to write
/// - path: the path to the file to dump to
/// - extra: (column name, per-record values) pairs; each value vector
///   must be as long as the table
///
pub fn write_table_annotated<P: AsRef<Path>>(
    table: &VariantTable,
    path: P,
    extra: &[(String, Vec<String>)],
) -> std::io::Result<()> {
    let path = path.as_ref();

    for (name, values) in extra {
        assert_eq!(
            values.len(),
            table.len(),
            "annotation column '{}' does not match table length",
            name
        );
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    if path.extension() == Some(OsStr::new("gz")) {
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
        write_rows(&mut encoder, table, extra)?;
        encoder.finish()?;
    } else {
        let mut writer = BufWriter::new(file);
        write_rows(&mut writer, table, extra)?;
    }

    Ok(())
}

fn write_rows<W: Write>(
    writer: &mut W,
    table: &VariantTable,
    extra: &[(String, Vec<String>)],
) -> std::io::Result<()> {
    let mut header = CANONICAL_HEADER.join("\t");
    for (name, _) in extra {
        header.push('\t');
        header.push_str(name);
    }
    writeln!(writer, "{}", header)?;

    for (i, record) in table.iter().enumerate() {
        let mut row = record.as_string();
        for (_, values) in extra {
            row.push('\t');
            row.push_str(&values[i]);
        }
        writeln!(writer, "{}", row)?;
    }

    Ok(())
}
