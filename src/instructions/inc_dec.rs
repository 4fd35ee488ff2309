//! # Increment and Decrement Instructions
//!
//! INC and DEC are read-modify-write on memory; INX/INY/DEX/DEY adjust the
//! index registers. All of them derive zero/negative from the result.

use crate::addressing::AddressingMode::{self, *};
use crate::opcodes::Family;
use crate::state::ProcessorState;
use crate::ExecutionError;

pub(crate) const FAMILIES: &[Family] = &[
    Family {
        mnemonic: "INC",
        exec: inc,
        opcodes: &[
            (0xE6, ZeroPage),
            (0xF6, ZeroPageX),
            (0xEE, Absolute),
            (0xFE, AbsoluteX),
        ],
    },
    Family {
        mnemonic: "DEC",
        exec: dec,
        opcodes: &[
            (0xC6, ZeroPage),
            (0xD6, ZeroPageX),
            (0xCE, Absolute),
            (0xDE, AbsoluteX),
        ],
    },
    Family { mnemonic: "INX", exec: inx, opcodes: &[(0xE8, Single)] },
    Family { mnemonic: "INY", exec: iny, opcodes: &[(0xC8, Single)] },
    Family { mnemonic: "DEX", exec: dex, opcodes: &[(0xCA, Single)] },
    Family { mnemonic: "DEY", exec: dey, opcodes: &[(0x88, Single)] },
];

fn inc(state: &mut ProcessorState, mode: AddressingMode) -> Result<(), ExecutionError> {
    let address = state.operand_address(mode)?;
    let result = state.peek(address).wrapping_add(1);
    state.poke(address, &[result]);
    state.set_nz(result);
    Ok(())
}

fn dec(state: &mut ProcessorState, mode: AddressingMode) -> Result<(), ExecutionError> {
    let address = state.operand_address(mode)?;
    let result = state.peek(address).wrapping_sub(1);
    state.poke(address, &[result]);
    state.set_nz(result);
    Ok(())
}

fn inx(state: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    state.x = state.x.wrapping_add(1);
    let result = state.x;
    state.set_nz(result);
    Ok(())
}

fn iny(state: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    state.y = state.y.wrapping_add(1);
    let result = state.y;
    state.set_nz(result);
    Ok(())
}

fn dex(state: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    state.x = state.x.wrapping_sub(1);
    let result = state.x;
    state.set_nz(result);
    Ok(())
}

fn dey(state: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    state.y = state.y.wrapping_sub(1);
    let result = state.y;
    state.set_nz(result);
    Ok(())
}
