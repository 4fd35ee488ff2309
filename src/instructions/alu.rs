//! # Arithmetic and Logic Instructions
//!
//! ADC and SBC delegate to the carry-aware helpers in [`crate::arith`],
//! which also cover the decimal-mode variants. The logical operations
//! derive zero/negative from their result; the compares additionally set
//! carry when the register is at least the operand. BIT is the odd one
//! out: it copies bits 7 and 6 of the operand into negative and overflow.

use crate::addressing::AddressingMode::{self, *};
use crate::arith;
use crate::opcodes::Family;
use crate::state::{ProcessorState, Status};
use crate::ExecutionError;

pub(crate) const FAMILIES: &[Family] = &[
    Family {
        mnemonic: "ADC",
        exec: adc,
        opcodes: &[
            (0x69, Immediate),
            (0x65, ZeroPage),
            (0x75, ZeroPageX),
            (0x6D, Absolute),
            (0x7D, AbsoluteX),
            (0x79, AbsoluteY),
            (0x61, IndexedIndirectX),
            (0x71, IndirectIndexedY),
        ],
    },
    Family {
        mnemonic: "SBC",
        exec: sbc,
        opcodes: &[
            (0xE9, Immediate),
            (0xE5, ZeroPage),
            (0xF5, ZeroPageX),
            (0xED, Absolute),
            (0xFD, AbsoluteX),
            (0xF9, AbsoluteY),
            (0xE1, IndexedIndirectX),
            (0xF1, IndirectIndexedY),
        ],
    },
    Family {
        mnemonic: "AND",
        exec: and,
        opcodes: &[
            (0x29, Immediate),
            (0x25, ZeroPage),
            (0x35, ZeroPageX),
            (0x2D, Absolute),
            (0x3D, AbsoluteX),
            (0x39, AbsoluteY),
            (0x21, IndexedIndirectX),
            (0x31, IndirectIndexedY),
        ],
    },
    Family {
        mnemonic: "ORA",
        exec: ora,
        opcodes: &[
            (0x09, Immediate),
            (0x05, ZeroPage),
            (0x15, ZeroPageX),
            (0x0D, Absolute),
            (0x1D, AbsoluteX),
            (0x19, AbsoluteY),
            (0x01, IndexedIndirectX),
            (0x11, IndirectIndexedY),
        ],
    },
    Family {
        mnemonic: "EOR",
        exec: eor,
        opcodes: &[
            (0x49, Immediate),
            (0x45, ZeroPage),
            (0x55, ZeroPageX),
            (0x4D, Absolute),
            (0x5D, AbsoluteX),
            (0x59, AbsoluteY),
            (0x41, IndexedIndirectX),
            (0x51, IndirectIndexedY),
        ],
    },
    Family {
        mnemonic: "CMP",
        exec: cmp,
        opcodes: &[
            (0xC9, Immediate),
            (0xC5, ZeroPage),
            (0xD5, ZeroPageX),
            (0xCD, Absolute),
            (0xDD, AbsoluteX),
            (0xD9, AbsoluteY),
            (0xC1, IndexedIndirectX),
            (0xD1, IndirectIndexedY),
        ],
    },
    Family {
        mnemonic: "CPX",
        exec: cpx,
        opcodes: &[(0xE0, Immediate), (0xE4, ZeroPage), (0xEC, Absolute)],
    },
    Family {
        mnemonic: "CPY",
        exec: cpy,
        opcodes: &[(0xC0, Immediate), (0xC4, ZeroPage), (0xCC, Absolute)],
    },
    Family {
        mnemonic: "BIT",
        exec: bit,
        opcodes: &[(0x24, ZeroPage), (0x2C, Absolute)],
    },
];

fn adc(state: &mut ProcessorState, mode: AddressingMode) -> Result<(), ExecutionError> {
    let value = state.operand_value(mode)?;
    let (result, p) = arith::add_with_carry(state.status(), state.a, value);
    state.a = result;
    state.set_status(p);
    Ok(())
}

fn sbc(state: &mut ProcessorState, mode: AddressingMode) -> Result<(), ExecutionError> {
    let value = state.operand_value(mode)?;
    let (result, p) = arith::subtract_with_carry(state.status(), state.a, value);
    state.a = result;
    state.set_status(p);
    Ok(())
}

fn and(state: &mut ProcessorState, mode: AddressingMode) -> Result<(), ExecutionError> {
    let value = state.operand_value(mode)?;
    state.a &= value;
    let result = state.a;
    state.set_nz(result);
    Ok(())
}

fn ora(state: &mut ProcessorState, mode: AddressingMode) -> Result<(), ExecutionError> {
    let value = state.operand_value(mode)?;
    state.a |= value;
    let result = state.a;
    state.set_nz(result);
    Ok(())
}

fn eor(state: &mut ProcessorState, mode: AddressingMode) -> Result<(), ExecutionError> {
    let value = state.operand_value(mode)?;
    state.a ^= value;
    let result = state.a;
    state.set_nz(result);
    Ok(())
}

/// Shared body of CMP/CPX/CPY: carry when `register >= value`, zero and
/// negative from the wrapped difference.
fn compare(
    state: &mut ProcessorState,
    mode: AddressingMode,
    register: u8,
) -> Result<(), ExecutionError> {
    let value = state.operand_value(mode)?;
    let mut p = state.status();
    p.set(Status::CARRY, register >= value);
    state.set_status(p);
    state.set_nz(register.wrapping_sub(value));
    Ok(())
}

fn cmp(state: &mut ProcessorState, mode: AddressingMode) -> Result<(), ExecutionError> {
    let register = state.a;
    compare(state, mode, register)
}

fn cpx(state: &mut ProcessorState, mode: AddressingMode) -> Result<(), ExecutionError> {
    let register = state.x;
    compare(state, mode, register)
}

fn cpy(state: &mut ProcessorState, mode: AddressingMode) -> Result<(), ExecutionError> {
    let register = state.y;
    compare(state, mode, register)
}

fn bit(state: &mut ProcessorState, mode: AddressingMode) -> Result<(), ExecutionError> {
    let value = state.operand_value(mode)?;
    let mut p = state.status();
    p.set(Status::ZERO, state.a & value == 0);
    p.set(Status::NEGATIVE, value & 0x80 != 0);
    p.set(Status::OVERFLOW, value & 0x40 != 0);
    state.set_status(p);
    Ok(())
}
