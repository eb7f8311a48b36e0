/// Prevents downstream crates from implementing crate-only traits.
pub trait Sealed {}
