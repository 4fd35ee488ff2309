//! # Shift and Rotate Instructions
//!
//! ASL, LSR, ROL, and ROR operate either on the accumulator (Single mode)
//! or on a memory location via read-modify-write. The shifted-out bit
//! lands in carry; the rotates shift the old carry in at the other end.

use crate::addressing::AddressingMode::{self, *};
use crate::opcodes::Family;
use crate::state::{ProcessorState, Status};
use crate::ExecutionError;

pub(crate) const FAMILIES: &[Family] = &[
    Family {
        mnemonic: "ASL",
        exec: asl,
        opcodes: &[
            (0x0A, Single),
            (0x06, ZeroPage),
            (0x16, ZeroPageX),
            (0x0E, Absolute),
            (0x1E, AbsoluteX),
        ],
    },
    Family {
        mnemonic: "LSR",
        exec: lsr,
        opcodes: &[
            (0x4A, Single),
            (0x46, ZeroPage),
            (0x56, ZeroPageX),
            (0x4E, Absolute),
            (0x5E, AbsoluteX),
        ],
    },
    Family {
        mnemonic: "ROL",
        exec: rol,
        opcodes: &[
            (0x2A, Single),
            (0x26, ZeroPage),
            (0x36, ZeroPageX),
            (0x2E, Absolute),
            (0x3E, AbsoluteX),
        ],
    },
    Family {
        mnemonic: "ROR",
        exec: ror,
        opcodes: &[
            (0x6A, Single),
            (0x66, ZeroPage),
            (0x76, ZeroPageX),
            (0x6E, Absolute),
            (0x7E, AbsoluteX),
        ],
    },
];

/// Shared shift/rotate body: `op(value, carry_in) -> (result, carry_out)`.
fn shift(
    state: &mut ProcessorState,
    mode: AddressingMode,
    op: fn(u8, bool) -> (u8, bool),
) -> Result<(), ExecutionError> {
    let carry_in = state.status().contains(Status::CARRY);

    let result = if mode == Single {
        let (result, carry_out) = op(state.a, carry_in);
        state.a = result;
        set_carry(state, carry_out);
        result
    } else {
        let address = state.operand_address(mode)?;
        let (result, carry_out) = op(state.peek(address), carry_in);
        state.poke(address, &[result]);
        set_carry(state, carry_out);
        result
    };

    state.set_nz(result);
    Ok(())
}

fn set_carry(state: &mut ProcessorState, carry: bool) {
    let mut p = state.status();
    p.set(Status::CARRY, carry);
    state.set_status(p);
}

fn asl(state: &mut ProcessorState, mode: AddressingMode) -> Result<(), ExecutionError> {
    shift(state, mode, |value, _| (value << 1, value & 0x80 != 0))
}

fn lsr(state: &mut ProcessorState, mode: AddressingMode) -> Result<(), ExecutionError> {
    shift(state, mode, |value, _| (value >> 1, value & 0x01 != 0))
}

fn rol(state: &mut ProcessorState, mode: AddressingMode) -> Result<(), ExecutionError> {
    shift(state, mode, |value, carry| {
        ((value << 1) | carry as u8, value & 0x80 != 0)
    })
}

fn ror(state: &mut ProcessorState, mode: AddressingMode) -> Result<(), ExecutionError> {
    shift(state, mode, |value, carry| {
        ((value >> 1) | ((carry as u8) << 7), value & 0x01 != 0)
    })
}
