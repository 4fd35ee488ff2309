//! # Disassembler
//!
//! Renders instructions from processor memory back to mnemonic text using
//! the same descriptor registry the engine and the assembler use. The
//! disassembler only reads state; it never mutates anything.
//!
//! Relative operands are rendered as their resolved target address rather
//! than the raw offset byte, so a disassembled branch reads the way the
//! source was written.

use crate::addressing::AddressingMode;
use crate::arith;
use crate::opcodes::Registry;
use crate::state::ProcessorState;

/// Renders the single instruction at `address` as
/// `"$ADDR: MNEMONIC operand"`.
///
/// Unmapped opcode bytes render as the bare `???` sentinel.
///
/// # Examples
///
/// ```rust
/// use sim6502::{decompile_one, ProcessorState, Registry};
///
/// let mut state = ProcessorState::new();
/// state.poke(0x0600, &[0xA9, 0x7F]); // LDA #$7F
/// let registry = Registry::new();
/// assert_eq!(decompile_one(&state, &registry, 0x0600), "$0600: LDA #$7F");
/// ```
pub fn decompile_one(state: &ProcessorState, registry: &Registry, address: u16) -> String {
    let descriptor = registry.opcode(state.peek(address));
    let operand = format_operand(state, address, descriptor.mode);
    if operand.is_empty() {
        format!("${address:04X}: {}", descriptor.mnemonic)
    } else {
        format!("${address:04X}: {} {operand}", descriptor.mnemonic)
    }
}

/// Renders up to `count` consecutive instructions starting at `address`.
///
/// The returned iterator is lazy and restartable (it is `Clone`); it stops
/// early if the next instruction would read past the end of memory.
pub fn decompile_many<'a>(
    state: &'a ProcessorState,
    registry: &'a Registry,
    address: u16,
    count: usize,
) -> Decompile<'a> {
    Decompile {
        state,
        registry,
        address: Some(address),
        remaining: count,
    }
}

/// Iterator over disassembled lines. See [`decompile_many`].
#[derive(Clone)]
pub struct Decompile<'a> {
    state: &'a ProcessorState,
    registry: &'a Registry,
    address: Option<u16>,
    remaining: usize,
}

impl Iterator for Decompile<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.remaining == 0 {
            return None;
        }
        let address = self.address?;

        let size = self.registry.opcode(self.state.peek(address)).size;
        // The whole instruction must fit below the end of memory.
        address.checked_add(u16::from(size) - 1)?;

        let line = decompile_one(self.state, self.registry, address);
        self.remaining -= 1;
        self.address = address.checked_add(u16::from(size));
        Some(line)
    }
}

fn format_operand(state: &ProcessorState, address: u16, mode: AddressingMode) -> String {
    use AddressingMode::*;

    let byte = |offset: u16| state.peek(address.wrapping_add(offset));
    let word = || u16::from_le_bytes([byte(1), byte(2)]);

    match mode {
        Single => String::new(),
        Immediate => format!("#${:02X}", byte(1)),
        ZeroPage => format!("${:02X}", byte(1)),
        ZeroPageX => format!("${:02X},X", byte(1)),
        ZeroPageY => format!("${:02X},Y", byte(1)),
        Absolute => format!("${:04X}", word()),
        AbsoluteX => format!("${:04X},X", word()),
        AbsoluteY => format!("${:04X},Y", word()),
        Indirect => format!("(${:04X})", word()),
        IndexedIndirectX => format!("(${:02X},X)", byte(1)),
        IndirectIndexedY => format!("(${:02X}),Y", byte(1)),
        Relative => {
            let target = arith::compute_branch(address.wrapping_add(2), byte(1));
            format!("${target:04X}")
        }
    }
}
