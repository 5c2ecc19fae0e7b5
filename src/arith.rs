//! Arithmetic-flag usage summary (C3 sibling field): a closed 2-bit set.

use crate::consts::{INSTR_READS_ARITH, INSTR_WRITES_ARITH};

bitflags::bitflags! {
    /// Summarizes whether an instruction reads and/or writes any arithmetic
    /// (condition-code/NZCV-style) flag.
    ///
    /// Specific flag identities (carry, zero, negative, overflow, ...) are not
    /// preserved, only these two aggregate predicates. Unlike [`crate::Category`],
    /// every bit here is named and every combination of the two bits is meaningful, so
    /// this is a conventional closed `bitflags!` type rather than an opaque passthrough.
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
    pub struct ArithFlags: u8 {
        /// The instruction writes at least one arithmetic flag.
        const WRITES = INSTR_WRITES_ARITH;
        /// The instruction reads at least one arithmetic flag.
        const READS = INSTR_READS_ARITH;
    }
}

impl ArithFlags {
    /// Builds the flag summary from the two source predicates.
    pub fn from_predicates(writes_arith: bool, reads_arith: bool) -> Self {
        let mut flags = ArithFlags::empty();
        flags.set(ArithFlags::WRITES, writes_arith);
        flags.set(ArithFlags::READS, reads_arith);
        flags
    }

    /// The instruction writes at least one arithmetic flag.
    pub fn writes_arith(self) -> bool {
        self.contains(ArithFlags::WRITES)
    }

    /// The instruction reads at least one arithmetic flag.
    pub fn reads_arith(self) -> bool {
        self.contains(ArithFlags::READS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_predicates_round_trips() {
        for writes in [false, true] {
            for reads in [false, true] {
                let flags = ArithFlags::from_predicates(writes, reads);
                assert_eq!(flags.writes_arith(), writes);
                assert_eq!(flags.reads_arith(), reads);
            }
        }
    }

    #[test]
    fn bits_match_wire_layout() {
        assert_eq!(ArithFlags::WRITES.bits(), 0b01);
        assert_eq!(ArithFlags::READS.bits(), 0b10);
    }
}
