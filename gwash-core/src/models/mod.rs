pub mod chrom;
pub mod table;
pub mod variant;

// re-export for cleaner imports
pub use self::chrom::ChromOrder;
pub use self::table::VariantTable;
pub use self::variant::VariantRecord;
