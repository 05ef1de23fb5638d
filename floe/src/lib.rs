//! Immutable, functional-style data containers.
//!
//! Three containers cover the model: [`Sequence`], an ordered immutable
//! list; [`UniqueSequence`], a sequence deduplicated at construction; and
//! [`KeyedMap`], an ordered association built from key/value pairs. Every
//! operation returns a new container, never altering the original, and
//! cloning shares storage, so values can be handed around freely.
//!
//! Map keys are constrained by the [`Key`] capability: scalars compare by
//! value, [`Ident`] references by identity, and container types are
//! rejected at runtime with [`Error::InvalidKeyType`].

pub mod error;
pub mod key;
pub mod map;
pub mod sequence;
mod serialize;

pub use error::{Error, Result};
pub use floe_ident::Ident;
pub use key::{Key, KeyHash};
pub use map::{Entries, KeyedMap};
pub use sequence::{Flatten, Iter, Nested, Sequence, UniqueSequence};
