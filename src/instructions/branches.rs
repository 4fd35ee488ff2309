//! # Branch Instructions
//!
//! All eight conditional branches use relative addressing with a single
//! raw offset byte. When the branch is taken, the target is computed from
//! the program counter as it stands after consuming the offset byte; the
//! assembler's pass-2 offset math is the exact inverse of this choice, so
//! a taken branch always lands on its label.

use crate::addressing::AddressingMode::{self, Relative};
use crate::arith;
use crate::opcodes::Family;
use crate::state::{ProcessorState, Status};
use crate::ExecutionError;

pub(crate) const FAMILIES: &[Family] = &[
    Family { mnemonic: "BPL", exec: bpl, opcodes: &[(0x10, Relative)] },
    Family { mnemonic: "BMI", exec: bmi, opcodes: &[(0x30, Relative)] },
    Family { mnemonic: "BVC", exec: bvc, opcodes: &[(0x50, Relative)] },
    Family { mnemonic: "BVS", exec: bvs, opcodes: &[(0x70, Relative)] },
    Family { mnemonic: "BCC", exec: bcc, opcodes: &[(0x90, Relative)] },
    Family { mnemonic: "BCS", exec: bcs, opcodes: &[(0xB0, Relative)] },
    Family { mnemonic: "BNE", exec: bne, opcodes: &[(0xD0, Relative)] },
    Family { mnemonic: "BEQ", exec: beq, opcodes: &[(0xF0, Relative)] },
];

/// Consumes the offset byte and branches when `flag` matches `expected`.
fn branch_on(
    state: &mut ProcessorState,
    flag: Status,
    expected: bool,
) -> Result<(), ExecutionError> {
    let offset = state.fetch_byte()?;
    if state.status().contains(flag) == expected {
        state.pc = arith::compute_branch(state.pc, offset);
    }
    Ok(())
}

fn bpl(state: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    branch_on(state, Status::NEGATIVE, false)
}

fn bmi(state: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    branch_on(state, Status::NEGATIVE, true)
}

fn bvc(state: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    branch_on(state, Status::OVERFLOW, false)
}

fn bvs(state: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    branch_on(state, Status::OVERFLOW, true)
}

fn bcc(state: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    branch_on(state, Status::CARRY, false)
}

fn bcs(state: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    branch_on(state, Status::CARRY, true)
}

fn bne(state: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    branch_on(state, Status::ZERO, false)
}

fn beq(state: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    branch_on(state, Status::ZERO, true)
}
