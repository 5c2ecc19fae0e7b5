//! The in-memory instruction record (C4): the type the encoder consumes and the
//! decoder produces.

use alloc::vec::Vec;

use crate::arith::ArithFlags;
use crate::category::Category;
use crate::consts::MAX_NUM_OPNDS;
use crate::reg::RegId;
use crate::size::OperandSize;

/// A register-dependency view of a single instruction: which registers it reads and
/// writes, which arithmetic flags it reads and writes, its operation category, and its
/// dominant operand size.
///
/// Opcodes, immediates, displacements and exact native operand ordering are not
/// represented here; see the crate-level docs for what this record deliberately does
/// not preserve.
///
/// Built once (via [`Instruction::new`] or the canonicalizing [`crate::codec::build`]) and
/// treated as immutable afterwards — there is no setter API. Mutated only by its
/// producer until emitted, immutable to every downstream consumer.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Instruction {
    category: Category,
    arith: ArithFlags,
    op_size: Option<OperandSize>,
    dsts: Vec<RegId>,
    srcs: Vec<RegId>,
    /// Cached wire encoding, populated by the decoder and consulted by the encoder's
    /// fast path. `None` for instructions built directly rather than decoded.
    ///
    /// Excluded from [`PartialEq`]: two instructions with the same logical fields are
    /// equal whether or not either carries a cached encoding.
    raw: Option<alloc::boxed::Box<[u8]>>,
}

impl PartialEq for Instruction {
    fn eq(&self, other: &Self) -> bool {
        self.category == other.category
            && self.arith == other.arith
            && self.op_size == other.op_size
            && self.dsts == other.dsts
            && self.srcs == other.srcs
    }
}

impl Eq for Instruction {}

/// Too many operands were supplied to build an [`Instruction`].
///
/// Carries the same information as [`crate::EncodeError::TooManyOperands`]; building an
/// over-full instruction is rejected at construction time rather than deferred to
/// encode time, so the invariant holds for the lifetime of every `Instruction` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooManyOperands {
    /// Number of destination operands supplied.
    pub num_dsts: usize,
    /// Number of source operands supplied.
    pub num_srcs: usize,
}

impl Instruction {
    /// Builds an instruction record from its already-canonical fields.
    ///
    /// `dsts` and `srcs` must already be canonicalized (deduplicated, sub-registers
    /// folded to their enclosing register) by the caller — this constructor only
    /// enforces the operand-count invariant; richer canonicalization from native
    /// operand descriptions is [`crate::builder::build`]'s job.
    ///
    /// `op_size` must be `Some` whenever there is at least one operand; this is not
    /// itself checked here (a record with a missing size for a populated operand list
    /// is still representable, just not valid wire input — the encoder does not
    /// special-case it beyond writing `0` for [`OperandSize::Zero`] when `None`).
    pub fn new(
        category: Category,
        arith: ArithFlags,
        op_size: Option<OperandSize>,
        dsts: Vec<RegId>,
        srcs: Vec<RegId>,
    ) -> Result<Self, TooManyOperands> {
        if dsts.len() + srcs.len() > MAX_NUM_OPNDS {
            return Err(TooManyOperands {
                num_dsts: dsts.len(),
                num_srcs: srcs.len(),
            });
        }
        Ok(Self {
            category,
            arith,
            op_size: if dsts.is_empty() && srcs.is_empty() {
                None
            } else {
                op_size
            },
            dsts,
            srcs,
            raw: None,
        })
    }

    pub(crate) fn with_raw(mut self, raw: alloc::boxed::Box<[u8]>) -> Self {
        self.raw = Some(raw);
        self
    }

    /// The instruction's operation category.
    pub fn category(&self) -> Category {
        self.category
    }

    /// The instruction's arithmetic-flag usage summary.
    pub fn arith_flags(&self) -> ArithFlags {
        self.arith
    }

    /// The instruction's operand size, if it has any operands.
    pub fn operand_size(&self) -> Option<OperandSize> {
        self.op_size
    }

    /// The destination (written) register operands, in encoded order.
    pub fn dsts(&self) -> &[RegId] {
        &self.dsts
    }

    /// The source (read) register operands, in encoded order.
    pub fn srcs(&self) -> &[RegId] {
        &self.srcs
    }

    /// Number of destination register operands.
    pub fn num_dsts(&self) -> usize {
        self.dsts.len()
    }

    /// Number of source register operands.
    pub fn num_srcs(&self) -> usize {
        self.srcs.len()
    }

    /// Total register operand count (`num_dsts + num_srcs`).
    pub fn num_opnds(&self) -> usize {
        self.dsts.len() + self.srcs.len()
    }

    /// The wire length this instruction encodes to.
    pub fn encoded_len(&self) -> usize {
        crate::consts::encoded_len(self.num_opnds())
    }

    /// The cached raw wire bytes, if this instruction was produced by [`crate::decode`]
    /// or previously encoded and the cache was retained.
    pub fn raw_bytes(&self) -> Option<&[u8]> {
        self.raw.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_more_than_eight_operands() {
        let dsts = Vec::from_iter((0..5).map(RegId::new));
        let srcs = Vec::from_iter((5..9).map(RegId::new));
        let err = Instruction::new(
            Category::UNCATEGORIZED,
            ArithFlags::empty(),
            Some(OperandSize::Bytes4),
            dsts,
            srcs,
        )
        .unwrap_err();
        assert_eq!(
            err,
            TooManyOperands {
                num_dsts: 5,
                num_srcs: 4
            }
        );
    }

    #[test]
    fn zero_operand_instruction_has_no_size() {
        let ins = Instruction::new(
            Category::BRANCH,
            ArithFlags::empty(),
            Some(OperandSize::Bytes4),
            Vec::new(),
            Vec::new(),
        )
        .unwrap();
        assert_eq!(ins.operand_size(), None);
    }
}
