//! The canonicalizing builder (C8): turns richer, pre-canonical native operand
//! descriptions into a well-formed [`Instruction`].
//!
//! Sits between a (hypothetical, out-of-scope) native decoder and the encoder: a native
//! decoder hands over destinations and sources that may still be memory references or
//! sub-register widths, and [`build`] folds them down to the deduplicated, sorted
//! `RegId` sequences [`Instruction`] expects.

use alloc::vec::Vec;

use crate::arith::ArithFlags;
use crate::category::Category;
use crate::consts::MAX_NUM_REGS;
use crate::instruction::{Instruction, TooManyOperands};
use crate::reg::RegId;
use crate::size::OperandSize;

/// A native register reference: a (possibly sub-register) id and the width the native
/// decoder observed it accessed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeReg {
    /// The register id as the native decoder named it — not yet folded to its
    /// canonical enclosing register.
    pub id: RegId,
    /// The width this particular reference accessed.
    pub size: OperandSize,
}

impl NativeReg {
    /// Builds a native register reference.
    pub fn new(id: RegId, size: OperandSize) -> Self {
        Self { id, size }
    }
}

/// A native memory reference: up to a base and an index register, both of which are
/// reads regardless of whether the memory reference itself is a destination or source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryOperand {
    /// The base address register, if any.
    pub base: Option<NativeReg>,
    /// The index address register, if any.
    pub index: Option<NativeReg>,
}

/// A single native operand: either a plain register reference or a memory reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeOperand {
    /// A direct register read or write.
    Register(NativeReg),
    /// A memory reference. Its address registers are always reads, never writes, even
    /// when the memory reference itself is a destination.
    Memory(MemoryOperand),
}

/// Maps sub-register ids to their pointer-sized enclosing register.
///
/// Folding memory-operand address registers into the source set is unconditional (part
/// of the wire format's meaning, not a runtime choice); this mapping is the other half
/// of canonicalization, and is architecture-specific, so callers provide it.
#[derive(Debug, Clone)]
pub struct CanonicalMap([RegId; MAX_NUM_REGS]);

impl CanonicalMap {
    /// The identity mapping: every register is already its own canonical form.
    pub fn identity() -> Self {
        CanonicalMap(core::array::from_fn(|i| RegId::new(i as u8)))
    }

    /// Builds a mapping from an explicit 256-entry table.
    pub fn from_table(table: [RegId; MAX_NUM_REGS]) -> Self {
        CanonicalMap(table)
    }

    /// Resolves a (possibly sub-register) id to its canonical enclosing register.
    pub fn resolve(&self, id: RegId) -> RegId {
        self.0[id.index()]
    }
}

impl Default for CanonicalMap {
    fn default() -> Self {
        Self::identity()
    }
}

/// Accumulates canonical registers observed for one side (destinations or sources),
/// deduplicating and tracking each canonical register's widest observed size.
struct CanonicalSet {
    sizes: alloc::boxed::Box<[Option<OperandSize>; MAX_NUM_REGS]>,
    order: Vec<RegId>,
}

impl CanonicalSet {
    fn new() -> Self {
        CanonicalSet {
            sizes: alloc::boxed::Box::new([None; MAX_NUM_REGS]),
            order: Vec::new(),
        }
    }

    /// Folds in one canonical register observation. Only the first observation of a
    /// given canonical register inserts it into `order`; every observation refines the
    /// running max size.
    fn observe(&mut self, reg: RegId, size: OperandSize) {
        let slot = &mut self.sizes[reg.index()];
        match slot {
            None => {
                *slot = Some(size);
                self.order.push(reg);
            }
            Some(existing) => *existing = existing.max(size),
        }
    }

    fn max_size(&self) -> Option<OperandSize> {
        self.order.iter().fold(None, |acc, &reg| {
            let size = self.sizes[reg.index()];
            match (acc, size) {
                (None, s) => s,
                (a, None) => a,
                (Some(a), Some(s)) => Some(a.max(s)),
            }
        })
    }

    fn into_sorted_vec(mut self) -> Vec<RegId> {
        self.order.sort_unstable();
        self.order
    }
}

fn fold_operand(op: &NativeOperand, map: &CanonicalMap, dsts: &mut CanonicalSet, srcs: &mut CanonicalSet, is_dst: bool) {
    match op {
        NativeOperand::Register(reg) => {
            let canonical = map.resolve(reg.id);
            if is_dst {
                dsts.observe(canonical, reg.size);
            } else {
                srcs.observe(canonical, reg.size);
            }
        }
        NativeOperand::Memory(mem) => {
            // Address registers are reads regardless of which side the memory
            // reference itself sits on.
            for addr_reg in [mem.base, mem.index].into_iter().flatten() {
                let canonical = map.resolve(addr_reg.id);
                srcs.observe(canonical, addr_reg.size);
            }
        }
    }
}

/// Canonicalizes native destination and source operands into a well-formed
/// [`Instruction`].
///
/// `immediate_size`, if given, is folded into the instruction-level operand size
/// alongside the widest register operand, covering instructions whose widest operand is
/// a non-register immediate the native decoder surfaces separately.
pub fn build(
    category: Category,
    arith: ArithFlags,
    map: &CanonicalMap,
    dst_operands: &[NativeOperand],
    src_operands: &[NativeOperand],
    immediate_size: Option<OperandSize>,
) -> Result<Instruction, TooManyOperands> {
    let mut dsts = CanonicalSet::new();
    let mut srcs = CanonicalSet::new();

    for op in dst_operands {
        fold_operand(op, map, &mut dsts, &mut srcs, true);
    }
    for op in src_operands {
        fold_operand(op, map, &mut dsts, &mut srcs, false);
    }

    let op_size = [dsts.max_size(), srcs.max_size(), immediate_size]
        .into_iter()
        .fold(None, |acc, s| match (acc, s) {
            (None, s) => s,
            (a, None) => a,
            (Some(a), Some(s)) => Some(a.max(s)),
        });

    Instruction::new(
        category,
        arith,
        op_size,
        dsts.into_sorted_vec(),
        srcs.into_sorted_vec(),
    )
}
