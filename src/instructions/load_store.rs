//! # Load and Store Instructions
//!
//! LDA, LDX, and LDY load a register and derive the zero/negative flags
//! from the loaded value. STA, STX, and STY store a register without
//! touching any flags.

use crate::addressing::AddressingMode::{self, *};
use crate::opcodes::Family;
use crate::state::ProcessorState;
use crate::ExecutionError;

pub(crate) const FAMILIES: &[Family] = &[
    Family {
        mnemonic: "LDA",
        exec: lda,
        opcodes: &[
            (0xA9, Immediate),
            (0xA5, ZeroPage),
            (0xB5, ZeroPageX),
            (0xAD, Absolute),
            (0xBD, AbsoluteX),
            (0xB9, AbsoluteY),
            (0xA1, IndexedIndirectX),
            (0xB1, IndirectIndexedY),
        ],
    },
    Family {
        mnemonic: "LDX",
        exec: ldx,
        opcodes: &[
            (0xA2, Immediate),
            (0xA6, ZeroPage),
            (0xB6, ZeroPageY),
            (0xAE, Absolute),
            (0xBE, AbsoluteY),
        ],
    },
    Family {
        mnemonic: "LDY",
        exec: ldy,
        opcodes: &[
            (0xA0, Immediate),
            (0xA4, ZeroPage),
            (0xB4, ZeroPageX),
            (0xAC, Absolute),
            (0xBC, AbsoluteX),
        ],
    },
    Family {
        mnemonic: "STA",
        exec: sta,
        opcodes: &[
            (0x85, ZeroPage),
            (0x95, ZeroPageX),
            (0x8D, Absolute),
            (0x9D, AbsoluteX),
            (0x99, AbsoluteY),
            (0x81, IndexedIndirectX),
            (0x91, IndirectIndexedY),
        ],
    },
    Family {
        mnemonic: "STX",
        exec: stx,
        opcodes: &[(0x86, ZeroPage), (0x96, ZeroPageY), (0x8E, Absolute)],
    },
    Family {
        mnemonic: "STY",
        exec: sty,
        opcodes: &[(0x84, ZeroPage), (0x94, ZeroPageX), (0x8C, Absolute)],
    },
];

fn lda(state: &mut ProcessorState, mode: AddressingMode) -> Result<(), ExecutionError> {
    let value = state.operand_value(mode)?;
    state.a = value;
    state.set_nz(value);
    Ok(())
}

fn ldx(state: &mut ProcessorState, mode: AddressingMode) -> Result<(), ExecutionError> {
    let value = state.operand_value(mode)?;
    state.x = value;
    state.set_nz(value);
    Ok(())
}

fn ldy(state: &mut ProcessorState, mode: AddressingMode) -> Result<(), ExecutionError> {
    let value = state.operand_value(mode)?;
    state.y = value;
    state.set_nz(value);
    Ok(())
}

fn sta(state: &mut ProcessorState, mode: AddressingMode) -> Result<(), ExecutionError> {
    let address = state.operand_address(mode)?;
    let value = state.a;
    state.poke(address, &[value]);
    Ok(())
}

fn stx(state: &mut ProcessorState, mode: AddressingMode) -> Result<(), ExecutionError> {
    let address = state.operand_address(mode)?;
    let value = state.x;
    state.poke(address, &[value]);
    Ok(())
}

fn sty(state: &mut ProcessorState, mode: AddressingMode) -> Result<(), ExecutionError> {
    let address = state.operand_address(mode)?;
    let value = state.y;
    state.poke(address, &[value]);
    Ok(())
}
