//! # Control Flow Instructions
//!
//! JMP assigns the program counter directly, including the indirect form
//! with its famous page-boundary quirk. JSR pushes the address of its own
//! last byte so that RTS can pop it and step one past. NOP fetches nothing.

use crate::addressing::AddressingMode::{self, Absolute, Indirect, Single};
use crate::opcodes::Family;
use crate::state::ProcessorState;
use crate::ExecutionError;

pub(crate) const FAMILIES: &[Family] = &[
    Family {
        mnemonic: "JMP",
        exec: jmp,
        opcodes: &[(0x4C, Absolute), (0x6C, Indirect)],
    },
    Family { mnemonic: "JSR", exec: jsr, opcodes: &[(0x20, Absolute)] },
    Family { mnemonic: "RTS", exec: rts, opcodes: &[(0x60, Single)] },
    Family { mnemonic: "NOP", exec: nop, opcodes: &[(0xEA, Single)] },
];

fn jmp(state: &mut ProcessorState, mode: AddressingMode) -> Result<(), ExecutionError> {
    state.pc = state.operand_address(mode)?;
    Ok(())
}

fn jsr(state: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    let target = state.operand_address(Absolute)?;
    // The return address is the last byte of this instruction; RTS adds one.
    let return_address = state.pc.wrapping_sub(1);
    state.push((return_address >> 8) as u8)?;
    state.push(return_address as u8)?;
    state.pc = target;
    Ok(())
}

fn rts(state: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    let lo = state.pop()?;
    let hi = state.pop()?;
    state.pc = u16::from_le_bytes([lo, hi]).wrapping_add(1);
    Ok(())
}

fn nop(_: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    Ok(())
}
