//! Strongly typed, zero-cost identifier wrappers and their allocator.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  IDs are dense: the registry that
//! builds an entity kind owns an [`IdAllocator`] and hands out 0, 1, 2, …,
//! which makes every ID a direct index into that registry's `Vec`.

use std::fmt;
use std::marker::PhantomData;

/// An identifier that is a dense `u32` index.
pub trait DenseId: Copy {
    /// Wrap a raw index.
    fn from_raw(raw: u32) -> Self;

    /// The raw index.
    fn raw(self) -> u32;
}

/// Generate a typed ID wrapper around a `u32`.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub u32);

        impl $name {
            /// Sentinel meaning "no valid ID"; equal to `u32::MAX`.
            pub const INVALID: $name = $name(u32::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl DenseId for $name {
            #[inline(always)]
            fn from_raw(raw: u32) -> Self {
                $name(raw)
            }

            #[inline(always)]
            fn raw(self) -> u32 {
                self.0
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                u32::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Position of a station in line order.  Station 0 is the line entry.
    pub struct StationId;
}

typed_id! {
    /// Manipulator identifier.  Identifier order is rail order.
    pub struct ManipulatorId;
}

typed_id! {
    /// Carrier (work-piece) identifier, issued in work-order order.
    pub struct CarrierId;
}

typed_id! {
    /// Index of a recipe template in the template library.
    pub struct TemplateId;
}

// ── IdAllocator ───────────────────────────────────────────────────────────────

/// Issues dense identifiers of one kind, starting at 0.
///
/// Each registry owns exactly one allocator, so IDs of one kind never collide
/// and always index into that registry's storage.
#[derive(Debug)]
pub struct IdAllocator<I> {
    next:    u32,
    _marker: PhantomData<fn() -> I>,
}

impl<I: DenseId> IdAllocator<I> {
    pub fn new() -> Self {
        Self {
            next:    0,
            _marker: PhantomData,
        }
    }

    /// Issue the next identifier.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX - 1` identifiers are requested, since
    /// the last value is reserved for the `INVALID` sentinel.
    pub fn allocate(&mut self) -> I {
        assert!(self.next < u32::MAX, "identifier space exhausted");
        let id = I::from_raw(self.next);
        self.next += 1;
        id
    }

    /// Number of identifiers issued so far.
    #[inline]
    pub fn issued(&self) -> usize {
        self.next as usize
    }
}

impl<I: DenseId> Default for IdAllocator<I> {
    fn default() -> Self {
        Self::new()
    }
}
