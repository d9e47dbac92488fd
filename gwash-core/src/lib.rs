pub mod models;
pub mod ops;
pub mod utils;

// re-export for cleaner imports
pub use models::{VariantRecord, VariantTable};
