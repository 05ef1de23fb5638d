use super::core::Sequence;
use super::unique::UniqueSequence;

/// Capability for recursive flattening.
///
/// A flattenable container unfolds into the leaves of its elements; a leaf
/// type yields itself as a singleton. [`Sequence::flatten`] walks this
/// capability to expand arbitrarily deep nesting into one flat sequence.
///
/// The recursion follows the nesting depth and performs no cycle detection,
/// so pathologically deep values can exhaust the stack.
pub trait Flatten {
    /// The non-flattenable element type this value bottoms out in.
    type Leaf;

    /// Append the leaves of `self`, in order, to `out`.
    fn flatten_into(self, out: &mut Vec<Self::Leaf>);
}

macro_rules! leaf {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Flatten for $ty {
                type Leaf = $ty;

                fn flatten_into(self, out: &mut Vec<$ty>) {
                    out.push(self);
                }
            }
        )*
    };
}

leaf!(
    bool, char, i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64, String, &'static str,
);

impl<T: Flatten + Clone> Flatten for Sequence<T> {
    type Leaf = T::Leaf;

    fn flatten_into(self, out: &mut Vec<T::Leaf>) {
        for item in self.items() {
            item.clone().flatten_into(out);
        }
    }
}

impl<T: Flatten + Clone> Flatten for UniqueSequence<T> {
    type Leaf = T::Leaf;

    fn flatten_into(self, out: &mut Vec<T::Leaf>) {
        self.into_sequence().flatten_into(out);
    }
}

impl<T: Flatten> Flatten for Vec<T> {
    type Leaf = T::Leaf;

    fn flatten_into(self, out: &mut Vec<T::Leaf>) {
        for item in self {
            item.flatten_into(out);
        }
    }
}

/// An element that is either a leaf or a nested sequence, for levels that
/// mix both.
///
/// ```
/// use floe::{Nested, Sequence};
///
/// let mixed: Sequence<Nested<i64>> = vec![
///     Nested::many(vec![Nested::Leaf(1), Nested::Leaf(2)]),
///     Nested::many(vec![]),
///     Nested::many(vec![
///         Nested::Leaf(3),
///         Nested::many(vec![Nested::Leaf(4), Nested::Leaf(5)]),
///     ]),
/// ]
/// .into();
/// assert_eq!(mixed.flatten(), vec![1, 2, 3, 4, 5].into());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nested<T> {
    Leaf(T),
    Many(Sequence<Nested<T>>),
}

impl<T> Nested<T> {
    /// A nested level built from its elements.
    pub fn many(items: Vec<Nested<T>>) -> Self {
        Nested::Many(items.into())
    }
}

impl<T: Clone> Flatten for Nested<T> {
    type Leaf = T;

    fn flatten_into(self, out: &mut Vec<T>) {
        match self {
            Nested::Leaf(value) => out.push(value),
            Nested::Many(sequence) => sequence.flatten_into(out),
        }
    }
}
