pub mod align;
pub mod rsid;
pub mod strand;

// re-exports
pub use self::align::{AlignOutcome, AlignReport, align_effect_allele, swap_effect_allele};
pub use self::rsid::{RsidOptions, RsidOutcome, RsidReport, RsidStatus, add_rsid};
pub use self::strand::{
    MISSING_ALLELE, StrandOptions, StrandOutcome, StrandReport, StrandStatus, complement,
    flip_strand,
};
