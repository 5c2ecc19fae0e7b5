//! The disassembler (C7): a two-line hex dump of an encoded instruction's raw bytes.
//!
//! This layer does no structural decoding — no categories, flags, or register names are
//! emitted, only the bytes themselves split into 4-byte words. A higher-level
//! pretty-printer built on [`crate::decode`] is responsible for anything structural.

use core::fmt;

use crate::decode;
use crate::error::DecodeError;

const BYTES_PER_LINE: usize = 8;
const BYTES_PER_WORD: usize = 4;

/// Writes the first hex-dump line for one encoded instruction's bytes, returning the
/// number of bytes still unprinted (0, 4, or 8) for [`write_second_line`].
///
/// `bytes` is the whole instruction's wire encoding (4, 8, 12 or 16 bytes). Writes one
/// 4-byte word if `bytes` is exactly a bare header, two if longer, followed by a
/// trailing space.
pub fn write_first_line(bytes: &[u8], out: &mut dyn fmt::Write) -> Result<usize, fmt::Error> {
    let len = bytes.len();
    if len == 0 {
        return Ok(0);
    }
    let extra = len.saturating_sub(BYTES_PER_LINE);

    write!(out, " {:08x}", word(bytes, 0))?;
    if len > BYTES_PER_WORD {
        write!(out, " {:08x}", word(bytes, BYTES_PER_WORD))?;
    }
    write!(out, " ")?;
    Ok(extra)
}

/// Writes the second hex-dump line, if `extra` (as returned by [`write_first_line`]) is
/// greater than zero.
pub fn write_second_line(bytes: &[u8], extra: usize, out: &mut dyn fmt::Write) -> fmt::Result {
    if extra == 0 {
        return Ok(());
    }
    write!(out, " {:08x}", word(bytes, BYTES_PER_LINE))?;
    if extra > BYTES_PER_WORD {
        write!(out, " {:08x}", word(bytes, BYTES_PER_LINE + BYTES_PER_WORD))?;
    }
    write!(out, "\n")
}

/// Writes both hex-dump lines for one instruction's bytes.
pub fn write_instruction(bytes: &[u8], out: &mut dyn fmt::Write) -> fmt::Result {
    let extra = write_first_line(bytes, out)?;
    write_second_line(bytes, extra, out)
}

fn word(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Walks a whole byte stream instruction-by-instruction, writing a hex-dump line pair
/// per instruction.
///
/// A thin composition of [`crate::decode`] (for each instruction's length) and
/// [`write_instruction`] (for its hex dump) — not a new decoding capability, just
/// iteration convenience over a stream of back-to-back encoded instructions.
pub struct Disassembly<'a> {
    remaining: &'a [u8],
}

impl<'a> Disassembly<'a> {
    /// Begins iterating over `stream`, a sequence of back-to-back encoded instructions.
    pub fn new(stream: &'a [u8]) -> Self {
        Disassembly { remaining: stream }
    }

    /// Writes every instruction's two-line hex dump to `out`, in stream order.
    pub fn write_all(mut self, out: &mut dyn fmt::Write) -> Result<(), DecodeError> {
        while !self.remaining.is_empty() {
            let (_, len) = decode(self.remaining)?;
            write_instruction(&self.remaining[..len], out).map_err(|_| DecodeError::Truncated {
                expected: len,
                available: self.remaining.len(),
            })?;
            self.remaining = &self.remaining[len..];
        }
        Ok(())
    }
}
