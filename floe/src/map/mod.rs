//! The immutable keyed map.

mod iter;
mod keyed;

pub use self::iter::Entries;
pub use self::keyed::KeyedMap;
