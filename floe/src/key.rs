use std::rc::Rc;

use floe_ident::Ident;
use ordered_float::OrderedFloat;

use crate::error;
use crate::map::KeyedMap;
use crate::sequence::{Nested, Sequence, UniqueSequence};

// A map stores and compares keys under their computed hash form. The rules:
// scalars by value, references by identity, containers rejected. Whole
// floats are stored as integers so `1.0` and `1` address the same slot, and
// NaN and the infinities get dedicated variants so every float has a
// well-defined slot.

/// The computed hash form of a map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyHash {
    Boolean(bool),
    Integer(i64),
    /// A float with a fractional part; whole floats normalize to `Integer`.
    Float(OrderedFloat<f64>),
    NaN,
    PositiveInfinity,
    NegativeInfinity,
    Char(char),
    String(Rc<String>),
    /// Allocation address of an identity-keyed reference.
    Identity(usize),
}

// a static assertion to ensure that KeyHash never grows in size
#[cfg(target_arch = "x86_64")]
static_assertions::assert_eq_size!(KeyHash, [u8; 16]);

/// Capability of values that can serve as map keys.
///
/// Scalar implementations never fail. Container types implement this only
/// to fail with [`error::Error::InvalidKeyType`], which keeps key rejection
/// a runtime contract of map construction rather than a compile-time wall:
/// a dynamic element type can mix eligible and ineligible values and find
/// out when it is used as a key.
pub trait Key {
    /// Compute the hash form under which this key is stored and compared.
    fn key_hash(&self) -> error::Result<KeyHash>;
}

impl Key for bool {
    fn key_hash(&self) -> error::Result<KeyHash> {
        Ok(KeyHash::Boolean(*self))
    }
}

impl Key for char {
    fn key_hash(&self) -> error::Result<KeyHash> {
        Ok(KeyHash::Char(*self))
    }
}

macro_rules! integer_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Key for $ty {
                fn key_hash(&self) -> error::Result<KeyHash> {
                    Ok(KeyHash::Integer(i64::from(*self)))
                }
            }
        )*
    };
}

integer_key!(i8, i16, i32, i64, u8, u16, u32);

fn float_key(value: f64) -> KeyHash {
    if value.is_nan() {
        KeyHash::NaN
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            KeyHash::PositiveInfinity
        } else {
            KeyHash::NegativeInfinity
        }
    } else if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
        // whole floats hash like the matching integer
        KeyHash::Integer(value as i64)
    } else {
        KeyHash::Float(OrderedFloat(value))
    }
}

impl Key for f64 {
    fn key_hash(&self) -> error::Result<KeyHash> {
        Ok(float_key(*self))
    }
}

impl Key for f32 {
    fn key_hash(&self) -> error::Result<KeyHash> {
        Ok(float_key(f64::from(*self)))
    }
}

impl Key for String {
    fn key_hash(&self) -> error::Result<KeyHash> {
        Ok(KeyHash::String(Rc::new(self.clone())))
    }
}

impl Key for &str {
    fn key_hash(&self) -> error::Result<KeyHash> {
        Ok(KeyHash::String(Rc::new((*self).to_string())))
    }
}

// reference keys hash by identity, never by content
impl<T> Key for Ident<T> {
    fn key_hash(&self) -> error::Result<KeyHash> {
        Ok(KeyHash::Identity(self.address()))
    }
}

// containers are not key-eligible

impl<T> Key for Sequence<T> {
    fn key_hash(&self) -> error::Result<KeyHash> {
        Err(error::Error::InvalidKeyType)
    }
}

impl<T> Key for UniqueSequence<T> {
    fn key_hash(&self) -> error::Result<KeyHash> {
        Err(error::Error::InvalidKeyType)
    }
}

impl<K, V> Key for KeyedMap<K, V> {
    fn key_hash(&self) -> error::Result<KeyHash> {
        Err(error::Error::InvalidKeyType)
    }
}

impl<T> Key for Vec<T> {
    fn key_hash(&self) -> error::Result<KeyHash> {
        Err(error::Error::InvalidKeyType)
    }
}

// a nested value is eligible exactly when it is a leaf whose content is
impl<T: Key> Key for Nested<T> {
    fn key_hash(&self) -> error::Result<KeyHash> {
        match self {
            Nested::Leaf(value) => value.key_hash(),
            Nested::Many(_) => Err(error::Error::InvalidKeyType),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_float_and_integer() {
        assert_eq!(1.0f64.key_hash().unwrap(), 1i64.key_hash().unwrap());
        assert_eq!(2.0f32.key_hash().unwrap(), 2u8.key_hash().unwrap());
    }

    #[test]
    fn test_fractional_float_is_its_own_key() {
        assert_ne!(1.5f64.key_hash().unwrap(), 1i64.key_hash().unwrap());
        assert_eq!(1.5f64.key_hash().unwrap(), 1.5f64.key_hash().unwrap());
    }

    #[test]
    fn test_nan_and_infinities() {
        assert_eq!(f64::NAN.key_hash().unwrap(), KeyHash::NaN);
        assert_eq!(
            f64::INFINITY.key_hash().unwrap(),
            KeyHash::PositiveInfinity
        );
        assert_eq!(
            f64::NEG_INFINITY.key_hash().unwrap(),
            KeyHash::NegativeInfinity
        );
    }

    #[test]
    fn test_integer_and_bool_differ() {
        assert_ne!(1i64.key_hash().unwrap(), true.key_hash().unwrap());
    }

    #[test]
    fn test_string_keys_by_value() {
        assert_eq!(
            "foo".key_hash().unwrap(),
            "foo".to_string().key_hash().unwrap()
        );
        assert_ne!("foo".key_hash().unwrap(), "bar".key_hash().unwrap());
    }

    #[test]
    fn test_identity_keys_by_allocation() {
        let a = Ident::new(100);
        let b = Ident::new(100);
        assert_ne!(a.key_hash().unwrap(), b.key_hash().unwrap());
        assert_eq!(a.key_hash().unwrap(), a.clone().key_hash().unwrap());
    }

    #[test]
    fn test_containers_rejected() {
        let sequence: Sequence<i64> = vec![1, 2].into();
        assert_eq!(
            sequence.key_hash(),
            Err(error::Error::InvalidKeyType)
        );
        assert_eq!(
            vec![1, 2].key_hash(),
            Err(error::Error::InvalidKeyType)
        );
    }

    #[test]
    fn test_nested_leaf_delegates() {
        assert_eq!(
            Nested::Leaf(7i64).key_hash().unwrap(),
            7i64.key_hash().unwrap()
        );
        let many: Nested<i64> = Nested::many(vec![Nested::Leaf(1)]);
        assert_eq!(many.key_hash(), Err(error::Error::InvalidKeyType));
    }
}
