pub mod error;
pub mod reader;
pub mod schema;
pub mod writer;

// re-exports
pub use self::error::{LoadError, Result};
pub use self::reader::{read_formatted_data, read_table};
pub use self::schema::{ColumnMap, CoercionPolicy, ReformatOptions};
pub use self::writer::{write_table, write_table_annotated};
