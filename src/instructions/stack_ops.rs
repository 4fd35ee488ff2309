//! # Stack Instructions
//!
//! PHA/PLA move the accumulator through the stack; PLA also derives the
//! zero/negative flags. PHP/PLP move the status register as a raw byte
//! with no bit ghosting in either direction.

use crate::addressing::AddressingMode::{self, Single};
use crate::opcodes::Family;
use crate::state::{ProcessorState, Status};
use crate::ExecutionError;

pub(crate) const FAMILIES: &[Family] = &[
    Family { mnemonic: "PHA", exec: pha, opcodes: &[(0x48, Single)] },
    Family { mnemonic: "PLA", exec: pla, opcodes: &[(0x68, Single)] },
    Family { mnemonic: "PHP", exec: php, opcodes: &[(0x08, Single)] },
    Family { mnemonic: "PLP", exec: plp, opcodes: &[(0x28, Single)] },
];

fn pha(state: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    let value = state.a;
    state.push(value)
}

fn pla(state: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    let value = state.pop()?;
    state.a = value;
    state.set_nz(value);
    Ok(())
}

fn php(state: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    let value = state.status().bits();
    state.push(value)
}

fn plp(state: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    let value = state.pop()?;
    state.set_status(Status::from_bits_truncate(value));
    Ok(())
}
