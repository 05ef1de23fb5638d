//! The serialization projection: containers serialize to plain nested
//! structures. A sequence becomes a list of its elements, a keyed map
//! becomes its deduplicated view in first-occurrence order, and nested or
//! identity-wrapped elements unwrap transparently. Elements that already
//! serialize pass through their own implementation, which is what makes the
//! projection recursive.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::map::KeyedMap;
use crate::sequence::{Nested, Sequence, UniqueSequence};

impl<T: Serialize> Serialize for Sequence<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for item in self.items() {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

impl<T: Serialize> Serialize for UniqueSequence<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_sequence().serialize(serializer)
    }
}

impl<K: Serialize, V: Serialize> Serialize for KeyedMap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<T: Serialize> Serialize for Nested<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Nested::Leaf(value) => value.serialize(serializer),
            Nested::Many(sequence) => sequence.serialize(serializer),
        }
    }
}
