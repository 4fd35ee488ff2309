//! # Instruction Implementations
//!
//! Behavior functions for every instruction family, organized by category
//! the way the opcode map groups them:
//!
//! - **alu**: ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT
//! - **branches**: BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS
//! - **shifts**: ASL, LSR, ROL, ROR
//! - **load_store**: LDA, LDX, LDY, STA, STX, STY
//! - **inc_dec**: INC, DEC, INX, INY, DEX, DEY
//! - **control**: JMP, JSR, RTS, NOP
//! - **stack_ops**: PHA, PLA, PHP, PLP
//! - **flags**: CLC, SEC, CLI, SEI, CLV, CLD, SED
//! - **transfer**: TAX, TAY, TXA, TYA, TSX, TXS
//!
//! Each module exports a `FAMILIES` table naming its mnemonics, behavior
//! functions, and opcode/mode pairs; [`families`] concatenates them for the
//! registry constructor.

pub(crate) mod alu;
pub(crate) mod branches;
pub(crate) mod control;
pub(crate) mod flags;
pub(crate) mod inc_dec;
pub(crate) mod load_store;
pub(crate) mod shifts;
pub(crate) mod stack_ops;
pub(crate) mod transfer;

use crate::opcodes::Family;

/// Collects every instruction family for registry construction.
pub(crate) fn families() -> Vec<Family> {
    let mut all = Vec::new();
    all.extend_from_slice(load_store::FAMILIES);
    all.extend_from_slice(alu::FAMILIES);
    all.extend_from_slice(shifts::FAMILIES);
    all.extend_from_slice(inc_dec::FAMILIES);
    all.extend_from_slice(branches::FAMILIES);
    all.extend_from_slice(control::FAMILIES);
    all.extend_from_slice(stack_ops::FAMILIES);
    all.extend_from_slice(flags::FAMILIES);
    all.extend_from_slice(transfer::FAMILIES);
    all
}
