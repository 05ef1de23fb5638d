use thiserror::Error;

/// Errors raised by container operations.
///
/// Search-style operations (`find`, `first`, `find_key`, ...) report absence
/// with `Option` instead; an `Error` always means a contract was broken at
/// the call site. Nothing is recovered internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A map lookup for a key that is not present.
    #[error("key does not exist")]
    KeyNotFound,
    /// A composite value (sequence, map, nested structure) was used where a
    /// map key is required.
    #[error("keys of map entries must be scalar or identity values")]
    InvalidKeyType,
    /// Positional access beyond the end of a sequence.
    #[error("index out of range")]
    IndexOutOfRange,
}

pub type Result<T> = std::result::Result<T, Error>;
