use crate::types::id::{marker::Marker, Id};

pub mod posts;

/// Ids come straight from path segments; anything that is not a
/// positive decimal integer is treated as an unknown id.
fn parse_id<T: Marker>(raw: &str) -> Option<Id<T>> {
    raw.parse().ok()
}
