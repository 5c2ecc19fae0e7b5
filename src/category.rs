//! High-level operation category (C3 sibling field): an opaque 22-bit bitmask.

use core::ops::{BitOr, BitOrAssign};

use crate::consts::CATEGORY_BITS;

/// A 22-bit set of operation-category flags.
///
/// An instruction may belong to more than one category at once (e.g. a SIMD load),
/// so this is a bitmask rather than a single enum variant. Unlike [`crate::ArithFlags`],
/// the named categories below do not exhaust the 22-bit width: future categories may
/// set bits this crate does not yet name, and those bits must still round-trip through
/// encode/decode untouched. That rules out a conventional `bitflags!` type, whose
/// `from_bits`/`bits()` pair is defined in terms of a closed set of named flags — this
/// is a thin hand-rolled newtype instead, still built from the same shift/mask
/// constants a `bitflags!` type would use internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Category(u32);

impl Category {
    /// Bits outside this mask are not part of the 22-bit category field.
    pub const MASK: u32 = (1u32 << CATEGORY_BITS) - 1;

    /// No category bits set.
    pub const UNCATEGORIZED: Category = Category(0x0);
    /// Integer arithmetic operations.
    pub const INT_MATH: Category = Category(0x1);
    /// Floating-point arithmetic operations.
    pub const FP_MATH: Category = Category(0x2);
    /// Loads.
    pub const LOAD: Category = Category(0x4);
    /// Stores.
    pub const STORE: Category = Category(0x8);
    /// Branches.
    pub const BRANCH: Category = Category(0x10);
    /// Operations on vector registers (SIMD).
    pub const SIMD: Category = Category(0x20);
    /// Any other kind of instruction.
    pub const OTHER: Category = Category(0x40);

    /// Builds a category bitmask from its raw 22-bit representation, discarding any
    /// bits outside [`Category::MASK`].
    pub const fn from_bits(bits: u32) -> Self {
        Category(bits & Self::MASK)
    }

    /// The raw 22-bit representation of this bitmask.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether every bit set in `other` is also set here.
    pub const fn contains(self, other: Category) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no bits are set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Category {
    type Output = Category;

    fn bitor(self, rhs: Category) -> Category {
        Category::from_bits(self.0 | rhs.0)
    }
}

impl BitOrAssign for Category {
    fn bitor_assign(&mut self, rhs: Category) {
        *self = *self | rhs;
    }
}
