pub mod chain;
pub mod error;
pub mod lift;
pub mod mapper;

// re-exports
pub use self::chain::ChainMapper;
pub use self::error::{ChainError, Result};
pub use self::lift::{LiftOptions, LiftedTable, lift_over};
pub use self::mapper::{CoordinateMapper, MappedPosition};
