//! The decoder (C6): turns wire bytes back into an [`Instruction`].

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::arith::ArithFlags;
use crate::consts::{encoded_len, ALIGN_BYTES, HEADER_BYTES, MAX_NUM_OPNDS, OPND_INDEX, OP_SIZE_INDEX};
use crate::error::DecodeError;
use crate::header::Header;
use crate::instruction::Instruction;
use crate::reg::RegId;
use crate::size::OperandSize;

/// Decodes one instruction from the front of `input`, returning it alongside the number
/// of bytes consumed.
///
/// `input` is expected to start on a 4-byte boundary, the same invariant the original
/// asserts on its encoded-instruction cursor; debug builds check this, release builds
/// trust the caller. Unlike the original, this never reads past `input`'s bounds: a
/// slice too short for the header, or too short for the operand count the header
/// claims, is reported as [`DecodeError::Truncated`] rather than read out of bounds.
pub fn decode(input: &[u8]) -> Result<(Instruction, usize), DecodeError> {
    debug_assert_eq!(
        input.as_ptr() as usize % ALIGN_BYTES,
        0,
        "decode input must start on a 4-byte boundary"
    );

    if input.len() < HEADER_BYTES {
        return Err(DecodeError::Truncated {
            expected: HEADER_BYTES,
            available: input.len(),
        });
    }
    let header = Header::from_le_bytes([input[0], input[1], input[2], input[3]]);
    let num_dsts = header.num_dsts() as usize;
    let num_srcs = header.num_srcs() as usize;
    let num_opnds = num_dsts + num_srcs;

    if num_opnds > MAX_NUM_OPNDS {
        return Err(DecodeError::OperandCountOverflow {
            num_dsts: header.num_dsts(),
            num_srcs: header.num_srcs(),
        });
    }

    let length = encoded_len(num_opnds);
    if input.len() < length {
        return Err(DecodeError::Truncated {
            expected: length,
            available: input.len(),
        });
    }

    let arith = ArithFlags::from_bits_truncate(header.flags());
    let category = header.category();

    let op_size = if num_opnds > 0 {
        Some(OperandSize::try_from(input[OP_SIZE_INDEX]).unwrap_or(OperandSize::Zero))
    } else {
        None
    };

    let mut dsts = Vec::with_capacity(num_dsts);
    for i in 0..num_dsts {
        dsts.push(RegId::new(input[OPND_INDEX + i]));
    }
    let mut srcs = Vec::with_capacity(num_srcs);
    for i in 0..num_srcs {
        srcs.push(RegId::new(input[OPND_INDEX + num_dsts + i]));
    }

    let instr = Instruction::new(category, arith, op_size, dsts, srcs)
        .expect("operand count was already checked against MAX_NUM_OPNDS above");
    let raw: Box<[u8]> = input[..length].to_vec().into_boxed_slice();

    Ok((instr.with_raw(raw), length))
}
