use anyhow::{Context, Result, bail};

use gwash_core::models::VariantTable;
use gwash_io::{CoercionPolicy, ColumnMap};
use gwash_refdb::{AnnotationIndex, AnnotationSource, BedSource};
#[cfg(feature = "bigbed")]
use gwash_refdb::BigBedSource;

/// Accept both literal separators and the spelled-out names.
pub fn parse_separator(value: &str) -> Result<char> {
    match value {
        "\t" | "tab" => Ok('\t'),
        "," | "comma" => Ok(','),
        " " | "space" => Ok(' '),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => bail!("separator must be a single character, 'tab', 'comma' or 'space'"),
            }
        }
    }
}

pub fn parse_coercion_policy(value: &str) -> Result<CoercionPolicy> {
    match value {
        "abort" => Ok(CoercionPolicy::Abort),
        "skip" => Ok(CoercionPolicy::SkipRow),
        other => bail!("unknown coercion policy '{}', use 'abort' or 'skip'", other),
    }
}

/// Load the nine-field column binding from a JSON file.
pub fn load_column_map(path: &str) -> Result<ColumnMap> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open column binding file: {}", path))?;
    let columns: ColumnMap = serde_json::from_reader(file)
        .with_context(|| format!("Failed to parse column binding file: {}", path))?;
    Ok(columns)
}

/// Open a positional annotation database, picking the backend from the
/// file extension.
pub fn open_annotation_source(path: &str) -> Result<Box<dyn AnnotationSource>> {
    let lower = path.to_lowercase();
    if lower.ends_with(".bb") || lower.ends_with(".bigbed") {
        #[cfg(feature = "bigbed")]
        {
            return Ok(Box::new(BigBedSource::open(path)?));
        }
        #[cfg(not(feature = "bigbed"))]
        bail!("bigBed support is not compiled in; rebuild with the 'bigbed' feature");
    }
    Ok(Box::new(BedSource::open(path)?))
}

/// Get the annotation index for a table: from a snapshot when one is
/// given, otherwise built fresh against the database.
pub fn load_or_build_index(
    table: &VariantTable,
    database: Option<&str>,
    snapshot: Option<&str>,
) -> Result<AnnotationIndex> {
    match (snapshot, database) {
        (Some(snapshot), _) => Ok(AnnotationIndex::load(snapshot)?),
        (None, Some(database)) => {
            let mut source = open_annotation_source(database)?;
            Ok(AnnotationIndex::build(table, source.as_mut())?)
        }
        (None, None) => bail!("either a database or an index snapshot is required"),
    }
}
