//! # 6502 Emulator Core
//!
//! An emulator for the MOS Technology 6502 processor, paired with a two-pass
//! assembler and a disassembler that all share one instruction-descriptor
//! registry, so that compiled bytes and executed semantics always agree.
//!
//! ## Quick Start
//!
//! ```rust
//! use sim6502::{compile, Emulator};
//!
//! // Assemble a tiny program.
//! let program = compile("* = $0600\nLDA #$7F\nSTA $0200").unwrap();
//! assert_eq!(program.bytes_emitted, 5);
//!
//! // Load it and run it.
//! let mut emulator = Emulator::new();
//! emulator.load(&program);
//! emulator.start();
//! emulator.run(2);
//!
//! assert_eq!(emulator.state().a(), 0x7F);
//! assert_eq!(emulator.state().peek(0x0200), 0x7F);
//! ```
//!
//! ## Architecture
//!
//! - **Table-driven**: every opcode is described once, in the [`Registry`],
//!   and dispatched from there by the execution engine, the assembler, and
//!   the disassembler.
//! - **Value-semantics state**: [`ProcessorState`] is a plain cloneable
//!   value; a snapshot taken before a transition stays valid afterwards.
//! - **Errors as state**: execution faults (invalid opcode, stack overflow
//!   or underflow, PC rollover) halt the machine and are surfaced through
//!   the run-control state rather than unwinding through the run loop.
//!
//! ## Modules
//!
//! - `arith` - byte arithmetic and flag derivation helpers
//! - `addressing` - the twelve addressing modes
//! - `state` - registers, memory, stack, operand resolution
//! - `opcodes` - instruction descriptors and the registry
//! - `engine` - fetch/decode/execute and the run-control state machine
//! - `assembler` - two-pass source-to-bytes compiler
//! - `disassembler` - bytes back to mnemonic text

pub mod addressing;
pub mod arith;
pub mod assembler;
pub mod disassembler;
pub mod engine;
pub mod opcodes;
pub mod state;

// Per-instruction behavior functions (not part of the public API).
mod instructions;

// Re-export public API
pub use addressing::AddressingMode;
pub use assembler::{compile, AssembleError, CompilationResult, CompiledLine, Label};
pub use disassembler::{decompile_many, decompile_one};
pub use engine::Emulator;
pub use opcodes::{Descriptor, Registry};
pub use state::{ExecStats, ProcessorState, Status, DEFAULT_PC, STACK_PAGE};

use thiserror::Error;

/// Errors that can occur while executing instructions.
///
/// The run-control state machine catches these during `step`/`run` and
/// converts them into a halted state carrying the error message; they only
/// surface directly from the low-level fetch/stack primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// The opcode byte at PC is not mapped to any instruction.
    #[error("invalid opcode 0x{0:02X}")]
    InvalidOpcode(u8),

    /// A push would move the stack pointer below the bottom of the stack page.
    #[error("stack overflow: push past the bottom of the stack page")]
    StackOverflow,

    /// A pop was attempted while the stack was empty.
    #[error("stack underflow: pop from an empty stack")]
    StackUnderflow,

    /// An operand or opcode fetch carried the program counter past 0xFFFF.
    #[error("program counter rolled past the end of memory")]
    PcRolledOver,
}
