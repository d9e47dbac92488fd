use serde::{Deserialize, Serialize};

/// The canonical column names, in output order.
pub const CANONICAL_HEADER: [&str; 9] =
    ["Chr", "BP", "SNP", "A1", "A2", "EAF", "Beta", "Se", "P"];

///
/// Binding of the nine canonical fields to the column headers of one
/// source dialect. Every binding is validated against the header row
/// before any data row is read; there is no positional or fuzzy
/// inference.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    pub chr: String,
    pub bp: String,
    pub snp: String,
    pub a1: String,
    pub a2: String,
    pub eaf: String,
    pub beta: String,
    pub se: String,
    pub p: String,
}

impl ColumnMap {
    /// Binding for a table that already carries the canonical header,
    /// e.g. the output of an earlier run.
    pub fn canonical() -> Self {
        ColumnMap {
            chr: CANONICAL_HEADER[0].to_string(),
            bp: CANONICAL_HEADER[1].to_string(),
            snp: CANONICAL_HEADER[2].to_string(),
            a1: CANONICAL_HEADER[3].to_string(),
            a2: CANONICAL_HEADER[4].to_string(),
            eaf: CANONICAL_HEADER[5].to_string(),
            beta: CANONICAL_HEADER[6].to_string(),
            se: CANONICAL_HEADER[7].to_string(),
            p: CANONICAL_HEADER[8].to_string(),
        }
    }

    pub(crate) fn bindings(&self) -> [&str; 9] {
        [
            &self.chr, &self.bp, &self.snp, &self.a1, &self.a2, &self.eaf, &self.beta, &self.se,
            &self.p,
        ]
    }
}

/// What to do with a row whose numeric cells fail coercion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoercionPolicy {
    /// Abort the whole load. A malformed cell usually means a wrong
    /// column binding, so this is the default.
    #[default]
    Abort,
    /// Drop the row and keep loading. Skipped rows are counted and
    /// logged.
    SkipRow,
}

///
/// Loading options: field separator, the numeric chromosome codes some
/// dialects use for X/Y, and the coercion failure policy.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReformatOptions {
    #[serde(default = "default_separator")]
    pub separator: char,
    #[serde(default = "default_x_code")]
    pub x_code: Option<String>,
    #[serde(default = "default_y_code")]
    pub y_code: Option<String>,
    #[serde(default)]
    pub coercion: CoercionPolicy,
}

fn default_separator() -> char {
    '\t'
}

fn default_x_code() -> Option<String> {
    Some(String::from("23"))
}

fn default_y_code() -> Option<String> {
    Some(String::from("24"))
}

impl Default for ReformatOptions {
    fn default() -> Self {
        ReformatOptions {
            separator: default_separator(),
            x_code: default_x_code(),
            y_code: default_y_code(),
            coercion: CoercionPolicy::default(),
        }
    }
}
