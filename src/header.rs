//! The typed 4-byte little-endian header word shared by encoder and decoder.

use crate::category::Category;
use crate::consts::{
    CATEGORY_MASK, CATEGORY_SHIFT, DST_OPND_MASK, FLAGS_MASK, FLAGS_SHIFT, SRC_OPND_MASK,
    SRC_OPND_SHIFT,
};

/// The 4-byte header every encoded instruction begins with:
///
/// ```text
/// bits  0..3   : num_dsts
/// bits  4..7   : num_srcs
/// bits  8..9   : flags
/// bits 10..31  : category
/// ```
///
/// Replaces the original's `*((uint *)ptr)` cast with an explicit
/// `u32::from_le_bytes`/`to_le_bytes` pair, so the on-disk little-endian layout holds
/// independent of host endianness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct Header(u32);

impl Header {
    /// Assembles a header word from its four fields.
    ///
    /// `num_dsts` and `num_srcs` are truncated to 4 bits each; callers are expected to
    /// have already checked `num_dsts + num_srcs <= 8` (the encoder does, and rejects
    /// the instruction before calling this).
    pub fn assemble(num_dsts: u8, num_srcs: u8, flags: u8, category: Category) -> Self {
        let word = (num_dsts as u32 & DST_OPND_MASK)
            | ((num_srcs as u32) << SRC_OPND_SHIFT) & SRC_OPND_MASK
            | ((flags as u32) << FLAGS_SHIFT) & FLAGS_MASK
            | (category.bits() << CATEGORY_SHIFT) & CATEGORY_MASK;
        Header(word)
    }

    /// Reads a header from its little-endian wire bytes.
    pub fn from_le_bytes(bytes: [u8; 4]) -> Self {
        Header(u32::from_le_bytes(bytes))
    }

    /// Writes this header to its little-endian wire bytes.
    pub fn to_le_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    /// Number of destination register operands.
    pub const fn num_dsts(self) -> u8 {
        (self.0 & DST_OPND_MASK) as u8
    }

    /// Number of source register operands.
    pub const fn num_srcs(self) -> u8 {
        ((self.0 & SRC_OPND_MASK) >> SRC_OPND_SHIFT) as u8
    }

    /// The 2-bit arithmetic-flags summary.
    pub const fn flags(self) -> u8 {
        ((self.0 & FLAGS_MASK) >> FLAGS_SHIFT) as u8
    }

    /// The 22-bit operation category.
    pub const fn category(self) -> Category {
        Category::from_bits((self.0 & CATEGORY_MASK) >> CATEGORY_SHIFT)
    }
}
