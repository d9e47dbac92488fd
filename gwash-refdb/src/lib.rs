pub mod error;
pub mod index;
pub mod source;

// re-exports
pub use self::error::{RefDbError, Result};
pub use self::index::{AnnotationIndex, AnnotationRecord};
#[cfg(feature = "bigbed")]
pub use self::source::BigBedSource;
pub use self::source::{AnnotationSource, BedSource, SourceEntry};
