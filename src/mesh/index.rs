//! Index types for arena records.
//!
//! Adjacency edges, face records, per-vertex normal slots and smoothing
//! groups all live in contiguous `Vec` arenas and refer to one another by
//! integer index. The wrappers here keep those indices from being mixed up
//! and use a reserved sentinel for "no record" instead of `-1`.
//!
//! [`MeshIndex`] is also the element type accepted for caller index
//! buffers, so callers can pass `u16`, `u32`, `u64` or `usize` slices.

use std::fmt::{self, Debug};
use std::hash::Hash;

/// Trait for integer types that can be used as mesh indices.
pub trait MeshIndex:
    Copy + Clone + Eq + PartialEq + Ord + PartialOrd + Hash + Debug + Send + Sync + 'static
{
    /// The maximum valid index value.
    const MAX: Self;

    /// A sentinel value representing an invalid/null index.
    const INVALID: Self;

    /// Convert from usize to this index type.
    ///
    /// # Panics
    /// Panics in debug builds if the value is too large for this index type.
    fn from_usize(v: usize) -> Self;

    /// Convert to usize.
    fn to_usize(self) -> usize;

    /// Check if this is a valid (non-sentinel) index.
    fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

macro_rules! impl_mesh_index {
    ($ty:ty) => {
        impl MeshIndex for $ty {
            const MAX: Self = <$ty>::MAX - 1;
            const INVALID: Self = <$ty>::MAX;

            #[inline]
            fn from_usize(v: usize) -> Self {
                debug_assert!(
                    v <= Self::MAX as usize,
                    "index {} too large for {}",
                    v,
                    stringify!($ty)
                );
                v as $ty
            }

            #[inline]
            fn to_usize(self) -> usize {
                self as usize
            }
        }
    };
}

impl_mesh_index!(u16);
impl_mesh_index!(u32);
impl_mesh_index!(u64);
impl_mesh_index!(usize);

/// Declare a typed arena index with a reserved "no record" value.
macro_rules! typed_index {
    ($(#[$meta:meta])* $name:ident => $tag:literal) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[repr(transparent)]
        pub struct $name<I: MeshIndex = u32>(I);

        impl<I: MeshIndex> $name<I> {
            /// Wrap an arena position.
            #[inline]
            pub fn new(index: usize) -> Self {
                Self(I::from_usize(index))
            }

            /// The "no record" value.
            #[inline]
            pub fn invalid() -> Self {
                Self(I::INVALID)
            }

            /// Arena position.
            #[inline]
            pub fn index(self) -> usize {
                self.0.to_usize()
            }

            /// `false` for the "no record" value.
            #[inline]
            pub fn is_valid(self) -> bool {
                self.0.is_valid()
            }
        }

        impl<I: MeshIndex> Default for $name<I> {
            fn default() -> Self {
                Self::invalid()
            }
        }

        impl<I: MeshIndex> Debug for $name<I> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, concat!($tag, "({})"), self.index())
                } else {
                    f.write_str(concat!($tag, "(INVALID)"))
                }
            }
        }
    };
}

typed_index! {
    /// Index of an edge record in an [`AdjacencyGraph`](super::AdjacencyGraph).
    EdgeId => "E"
}

typed_index! {
    /// Index of a triangle in the caller's index buffer (buffer offset / 3).
    FaceId => "F"
}

typed_index! {
    /// Index of a vertex normal slot (an original vertex or one of its duplicates).
    SlotId => "S"
}

typed_index! {
    /// Smoothing group identifier.
    ///
    /// Every face starts in the group carrying its own index; merging keeps the
    /// smaller id, so group ids are always face indices.
    GroupId => "G"
}
