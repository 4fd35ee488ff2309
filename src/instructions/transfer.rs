//! # Register Transfer Instructions
//!
//! Transfers between A, X, Y, and the stack pointer. Every transfer
//! except TXS derives the zero/negative flags from the moved value.

use crate::addressing::AddressingMode::{self, Single};
use crate::opcodes::Family;
use crate::state::ProcessorState;
use crate::ExecutionError;

pub(crate) const FAMILIES: &[Family] = &[
    Family { mnemonic: "TAX", exec: tax, opcodes: &[(0xAA, Single)] },
    Family { mnemonic: "TAY", exec: tay, opcodes: &[(0xA8, Single)] },
    Family { mnemonic: "TXA", exec: txa, opcodes: &[(0x8A, Single)] },
    Family { mnemonic: "TYA", exec: tya, opcodes: &[(0x98, Single)] },
    Family { mnemonic: "TSX", exec: tsx, opcodes: &[(0xBA, Single)] },
    Family { mnemonic: "TXS", exec: txs, opcodes: &[(0x9A, Single)] },
];

fn tax(state: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    let value = state.a;
    state.x = value;
    state.set_nz(value);
    Ok(())
}

fn tay(state: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    let value = state.a;
    state.y = value;
    state.set_nz(value);
    Ok(())
}

fn txa(state: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    let value = state.x;
    state.a = value;
    state.set_nz(value);
    Ok(())
}

fn tya(state: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    let value = state.y;
    state.a = value;
    state.set_nz(value);
    Ok(())
}

fn tsx(state: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    let value = state.sp as u8;
    state.x = value;
    state.set_nz(value);
    Ok(())
}

fn txs(state: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    state.sp = u16::from(state.x);
    Ok(())
}
