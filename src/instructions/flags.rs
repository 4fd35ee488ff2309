//! # Flag Instructions
//!
//! Each one sets or clears a single status bit. There is no CLV
//! counterpart that sets overflow; only arithmetic can do that.

use crate::addressing::AddressingMode::{self, Single};
use crate::opcodes::Family;
use crate::state::{ProcessorState, Status};
use crate::ExecutionError;

pub(crate) const FAMILIES: &[Family] = &[
    Family { mnemonic: "CLC", exec: clc, opcodes: &[(0x18, Single)] },
    Family { mnemonic: "SEC", exec: sec, opcodes: &[(0x38, Single)] },
    Family { mnemonic: "CLI", exec: cli, opcodes: &[(0x58, Single)] },
    Family { mnemonic: "SEI", exec: sei, opcodes: &[(0x78, Single)] },
    Family { mnemonic: "CLV", exec: clv, opcodes: &[(0xB8, Single)] },
    Family { mnemonic: "CLD", exec: cld, opcodes: &[(0xD8, Single)] },
    Family { mnemonic: "SED", exec: sed, opcodes: &[(0xF8, Single)] },
];

fn set_flag(state: &mut ProcessorState, flag: Status, value: bool) {
    let mut p = state.status();
    p.set(flag, value);
    state.set_status(p);
}

fn clc(state: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    set_flag(state, Status::CARRY, false);
    Ok(())
}

fn sec(state: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    set_flag(state, Status::CARRY, true);
    Ok(())
}

fn cli(state: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    set_flag(state, Status::INTERRUPT, false);
    Ok(())
}

fn sei(state: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    set_flag(state, Status::INTERRUPT, true);
    Ok(())
}

fn clv(state: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    set_flag(state, Status::OVERFLOW, false);
    Ok(())
}

fn cld(state: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    set_flag(state, Status::DECIMAL, false);
    Ok(())
}

fn sed(state: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    set_flag(state, Status::DECIMAL, true);
    Ok(())
}
