#[cfg(feature = "core")]
#[doc(inline)]
pub use gwash_core as core;

#[cfg(feature = "io")]
#[doc(inline)]
pub use gwash_io as io;

#[cfg(feature = "lift")]
#[doc(inline)]
pub use gwash_lift as lift;

#[cfg(feature = "refdb")]
#[doc(inline)]
pub use gwash_refdb as refdb;

#[cfg(feature = "harmonize")]
#[doc(inline)]
pub use gwash_harmonize as harmonize;
