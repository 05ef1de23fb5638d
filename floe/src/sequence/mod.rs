//! The ordered immutable sequence, its deduplicated variant and the
//! flattening capability.

mod core;
mod flatten;
mod iter;
mod unique;

pub use self::core::Sequence;
pub use self::flatten::{Flatten, Nested};
pub use self::iter::Iter;
pub use self::unique::UniqueSequence;
