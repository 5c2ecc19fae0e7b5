//! The operand-size enumeration (C2): a closed, byte-valued set of operation sizes.

use core::convert::TryFrom;

/// The size of an instruction's widest operand (source, destination, or immediate).
///
/// This is a representative, closed subset of the much larger native-ISA operand-size
/// zoo (memory reference sizes, FPU environment sizes, vector-length-scalable sizes,
/// ...), which is out of scope for this crate. An encoder chooses the widest operand's
/// size; a decoder reproduces the byte verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum OperandSize {
    /// Sentinel: no meaningful size (used internally; instructions with zero
    /// operands omit the operand-size byte entirely rather than encoding this).
    Zero = 0,
    /// 1 byte.
    Bytes1 = 1,
    /// 2 bytes.
    Bytes2 = 2,
    /// 3 bytes.
    Bytes3 = 3,
    /// 4 bytes.
    Bytes4 = 4,
    /// 6 bytes.
    Bytes6 = 5,
    /// 8 bytes.
    Bytes8 = 6,
    /// 10 bytes.
    Bytes10 = 7,
    /// 12 bytes.
    Bytes12 = 8,
    /// 16 bytes.
    Bytes16 = 9,
    /// 20 bytes.
    Bytes20 = 10,
    /// 24 bytes.
    Bytes24 = 11,
    /// 28 bytes.
    Bytes28 = 12,
    /// 32 bytes.
    Bytes32 = 13,
    /// 64 bytes.
    Bytes64 = 14,
    /// 128 bytes.
    Bytes128 = 15,
    /// 512 bytes.
    Bytes512 = 16,
    /// 1 bit.
    Bits1 = 17,
    /// 2 bits.
    Bits2 = 18,
    /// 3 bits.
    Bits3 = 19,
    /// 4 bits.
    Bits4 = 20,
    /// 5 bits.
    Bits5 = 21,
    /// 6 bits.
    Bits6 = 22,
    /// 7 bits.
    Bits7 = 23,
    /// 9 bits.
    Bits9 = 24,
    /// 10 bits.
    Bits10 = 25,
    /// 11 bits.
    Bits11 = 26,
    /// 12 bits.
    Bits12 = 27,
    /// 20 bits.
    Bits20 = 28,
    /// 25 bits.
    Bits25 = 29,
    /// Full register size, no variation by prefix or processor mode.
    VarFull = 30,
    /// Varies by 32-bit versus 64-bit processor mode.
    VarByMode = 31,
    /// Varies by operand-size prefix.
    VarByPrefix = 32,
}

/// A byte does not correspond to any [`OperandSize`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidOperandSize(pub u8);

impl TryFrom<u8> for OperandSize {
    type Error = InvalidOperandSize;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        use OperandSize::*;
        Ok(match byte {
            0 => Zero,
            1 => Bytes1,
            2 => Bytes2,
            3 => Bytes3,
            4 => Bytes4,
            5 => Bytes6,
            6 => Bytes8,
            7 => Bytes10,
            8 => Bytes12,
            9 => Bytes16,
            10 => Bytes20,
            11 => Bytes24,
            12 => Bytes28,
            13 => Bytes32,
            14 => Bytes64,
            15 => Bytes128,
            16 => Bytes512,
            17 => Bits1,
            18 => Bits2,
            19 => Bits3,
            20 => Bits4,
            21 => Bits5,
            22 => Bits6,
            23 => Bits7,
            24 => Bits9,
            25 => Bits10,
            26 => Bits11,
            27 => Bits12,
            28 => Bits20,
            29 => Bits25,
            30 => VarFull,
            31 => VarByMode,
            32 => VarByPrefix,
            other => return Err(InvalidOperandSize(other)),
        })
    }
}

impl From<OperandSize> for u8 {
    fn from(size: OperandSize) -> Self {
        size as u8
    }
}

impl OperandSize {
    /// Returns the larger of two sizes, ordered by the width each variant names (not
    /// by its wire-byte discriminant, which has no width ordering across the
    /// bytes/bits/architecture-varying groups).
    ///
    /// Architecture-varying sizes ([`OperandSize::VarFull`], [`OperandSize::VarByMode`],
    /// [`OperandSize::VarByPrefix`]) are treated as wider than every fixed size, since
    /// the concrete width they resolve to at runtime is, by construction, unknown here.
    pub fn max(self, other: Self) -> Self {
        if self.rank() >= other.rank() {
            self
        } else {
            other
        }
    }

    fn rank(self) -> u32 {
        use OperandSize::*;
        match self {
            Zero => 0,
            Bits1 => 1,
            Bits2 => 2,
            Bits3 => 3,
            Bits4 => 4,
            Bits5 => 5,
            Bits6 => 6,
            Bits7 => 7,
            Bits9 => 9,
            Bits10 => 10,
            Bits11 => 11,
            Bits12 => 12,
            Bits20 => 20,
            Bits25 => 25,
            Bytes1 => 8,
            Bytes2 => 16,
            Bytes3 => 24,
            Bytes4 => 32,
            Bytes6 => 48,
            Bytes8 => 64,
            Bytes10 => 80,
            Bytes12 => 96,
            Bytes16 => 128,
            Bytes20 => 160,
            Bytes24 => 192,
            Bytes28 => 224,
            Bytes32 => 256,
            Bytes64 => 512,
            Bytes128 => 1024,
            Bytes512 => 4096,
            VarFull | VarByMode | VarByPrefix => u32::MAX,
        }
    }
}
