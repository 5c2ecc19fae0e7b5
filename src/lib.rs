//! A register-dependency instruction model and fixed-width binary codec.
//!
//! This crate answers three questions for every instruction in an offline trace,
//! uniformly across source architectures: which registers flow in, which flow out, and
//! what kind of work does the instruction do? It does not model opcodes, immediates,
//! displacements, or exact native operand ordering — see [`Instruction`]'s docs for what
//! is deliberately dropped.
//!
//! Three layers do the work:
//!
//! - [`Instruction`] (and the [`codec::build`] canonicalizing builder that produces one
//!   from richer native operand descriptions) is the in-memory record.
//! - [`encode`]/[`decode`] convert an `Instruction` to and from its 4-byte-aligned wire
//!   form.
//! - [`codec::write_instruction`] and [`codec::Disassembly`] pretty-print the wire bytes
//!   as a two-line hex dump, with no structural decoding of their own.
//!
//! Builds `no_std` with `alloc` by default when the `std` feature is disabled; enable
//! `std` (the crate default) for `thiserror`-backed error types and a `tracing`
//! subscriber that writes to stdio-attached layers.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod arith;
pub mod category;
pub mod codec;
pub mod consts;
pub mod error;
pub mod header;
pub mod instruction;
pub mod reg;
pub mod size;

pub use arith::ArithFlags;
pub use category::Category;
pub use codec::{decode, encode};
pub use error::{DecodeError, EncodeError};
pub use header::Header;
pub use instruction::{Instruction, TooManyOperands};
pub use reg::RegId;
pub use size::{InvalidOperandSize, OperandSize};
