//! The encoder (C5): turns an [`Instruction`] into wire bytes.

use crate::consts::{encoded_len, MAX_NUM_OPNDS, OPND_INDEX, OP_SIZE_INDEX};
use crate::error::EncodeError;
use crate::header::Header;
use crate::instruction::Instruction;
use crate::size::OperandSize;

/// Encodes `instr` into `out`, returning the number of bytes written.
///
/// `out` must be at least [`Instruction::encoded_len`] bytes long and should start on a
/// 4-byte boundary for the caller's own alignment invariants to hold across a stream of
/// instructions; this function does not itself require or check alignment of `out`.
///
/// Re-emits the cached raw bytes verbatim when `instr` carries one (the common case for
/// instructions obtained from [`crate::decode`] and re-encoded unchanged), otherwise
/// assembles the header and operand bytes from the instruction's fields.
///
/// [`Instruction::new`] already enforces `num_dsts + num_srcs <= MAX_NUM_OPNDS`, so the
/// only way `instr` can violate it here is by being handed a record that was somehow
/// constructed around that check; the condition is retained as a defensive check rather
/// than an `unreachable!`, matching the decoder's analogous
/// [`crate::error::DecodeError::OperandCountOverflow`].
pub fn encode(instr: &Instruction, out: &mut [u8]) -> Result<usize, EncodeError> {
    let num_dsts = instr.num_dsts();
    let num_srcs = instr.num_srcs();
    if num_dsts + num_srcs > MAX_NUM_OPNDS {
        tracing::warn!(num_dsts, num_srcs, "rejecting instruction with too many operands");
        return Err(EncodeError::TooManyOperands {
            num_dsts: num_dsts as u8,
            num_srcs: num_srcs as u8,
        });
    }
    let length = encoded_len(num_dsts + num_srcs);

    if let Some(raw) = instr.raw_bytes() {
        if raw.len() == length {
            out[..length].copy_from_slice(raw);
            return Ok(length);
        }
    }

    let header = Header::assemble(
        num_dsts as u8,
        num_srcs as u8,
        instr.arith_flags().bits(),
        instr.category(),
    );
    out[..4].copy_from_slice(&header.to_le_bytes());

    if num_dsts + num_srcs > 0 {
        let size: u8 = instr.operand_size().unwrap_or(OperandSize::Zero).into();
        out[OP_SIZE_INDEX] = size;
        for (i, reg) in instr.dsts().iter().enumerate() {
            out[OPND_INDEX + i] = reg.as_u8();
        }
        for (i, reg) in instr.srcs().iter().enumerate() {
            out[OPND_INDEX + num_dsts + i] = reg.as_u8();
        }
        for pad in out.iter_mut().take(length).skip(OPND_INDEX + num_dsts + num_srcs) {
            *pad = 0;
        }
    }

    tracing::trace!(
        num_dsts,
        num_srcs,
        category = instr.category().bits(),
        length,
        "encoded instruction"
    );
    Ok(length)
}
