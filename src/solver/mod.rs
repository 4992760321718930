pub mod boundary;
pub mod contacts;
pub mod forces;
pub mod integrate;

pub use boundary::Vessel;
pub use contacts::resolve_overlaps;
pub use forces::{PointerField, accumulate_accelerations};
pub use integrate::advance;
