//! Typed errors for the encoder and decoder (C9).

use core::fmt;

/// The encoder rejected an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum EncodeError {
    /// `num_dsts + num_srcs` exceeded [`crate::consts::MAX_NUM_OPNDS`].
    #[cfg_attr(
        feature = "std",
        error("instruction has {} operands (num_dsts={num_dsts}, num_srcs={num_srcs}), \
               only {} are supported", *num_dsts as u32 + *num_srcs as u32, crate::consts::MAX_NUM_OPNDS)
    )]
    TooManyOperands {
        /// Number of destination operands the caller supplied.
        num_dsts: u8,
        /// Number of source operands the caller supplied.
        num_srcs: u8,
    },
}

#[cfg(not(feature = "std"))]
impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::TooManyOperands { num_dsts, num_srcs } => write!(
                f,
                "instruction has {} operands (num_dsts={num_dsts}, num_srcs={num_srcs}), \
                 only {} are supported",
                *num_dsts as u32 + *num_srcs as u32,
                crate::consts::MAX_NUM_OPNDS
            ),
        }
    }
}

/// The decoder could not reconstruct an instruction from its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum DecodeError {
    /// The input slice was shorter than the wire length implied by the header.
    #[cfg_attr(
        feature = "std",
        error("truncated input: need {expected} bytes, only {available} available")
    )]
    Truncated {
        /// Wire length implied by the decoded header.
        expected: usize,
        /// Bytes actually available in the input slice.
        available: usize,
    },

    /// The header's `num_dsts + num_srcs` exceeded [`crate::consts::MAX_NUM_OPNDS`].
    ///
    /// A conforming encoder never produces such a header (it rejects the instruction
    /// at encode time instead), so this only fires on malformed or adversarial input —
    /// the decoder does not trust the header's operand counts blindly the way the
    /// original does, since nothing here prevents an out-of-band byte stream from
    /// claiming an operand count the rest of the format cannot actually hold.
    #[cfg_attr(
        feature = "std",
        error("decoded header claims {} operands (num_dsts={num_dsts}, num_srcs={num_srcs}), \
               only {} are supported", *num_dsts as u32 + *num_srcs as u32, crate::consts::MAX_NUM_OPNDS)
    )]
    OperandCountOverflow {
        /// Destination-operand count read from the header.
        num_dsts: u8,
        /// Source-operand count read from the header.
        num_srcs: u8,
    },
}

#[cfg(not(feature = "std"))]
impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Truncated { expected, available } => write!(
                f,
                "truncated input: need {expected} bytes, only {available} available"
            ),
            DecodeError::OperandCountOverflow { num_dsts, num_srcs } => write!(
                f,
                "decoded header claims {} operands (num_dsts={num_dsts}, num_srcs={num_srcs}), \
                 only {} are supported",
                *num_dsts as u32 + *num_srcs as u32,
                crate::consts::MAX_NUM_OPNDS
            ),
        }
    }
}
