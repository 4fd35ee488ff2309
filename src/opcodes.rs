//! # Instruction Descriptors and Registry
//!
//! The registry is the single source of truth for instruction metadata: the
//! execution engine dispatches by opcode byte, the assembler encodes by
//! (mnemonic, addressing mode), and the disassembler formats from the same
//! descriptors, so the three can never disagree.
//!
//! The registry is built statically by [`Registry::new`], a pure function
//! with no global side tables: each instruction family in
//! [`crate::instructions`] contributes a mnemonic, a behavior function, and
//! its opcode/mode pairs.

use std::collections::HashMap;

use crate::addressing::AddressingMode;
use crate::state::ProcessorState;
use crate::ExecutionError;

/// The mnemonic of the Invalid Instruction sentinel.
pub const INVALID_MNEMONIC: &str = "???";

/// Behavior function for one instruction family.
///
/// The function consumes its own operand bytes through the state's fetch
/// helpers and mutates registers, memory, and flags directly; jumps,
/// branches, and calls assign PC themselves.
pub type ExecFn = fn(&mut ProcessorState, AddressingMode) -> Result<(), ExecutionError>;

/// Static metadata for a single opcode.
#[derive(Debug, Clone, Copy)]
pub struct Descriptor {
    /// Three-letter instruction mnemonic, or `"???"` for the sentinel.
    pub mnemonic: &'static str,

    /// The opcode byte value.
    pub opcode: u8,

    /// Addressing mode for this encoding.
    pub mode: AddressingMode,

    /// Total encoded size in bytes (1-3), opcode included.
    pub size: u8,

    /// The family behavior function.
    pub exec: ExecFn,
}

impl Descriptor {
    /// Returns true for the Invalid Instruction sentinel.
    pub fn is_invalid(&self) -> bool {
        self.mnemonic == INVALID_MNEMONIC
    }
}

/// One instruction family: a mnemonic, its behavior, and the opcode byte
/// assigned to each addressing mode it supports.
#[derive(Debug, Clone, Copy)]
pub struct Family {
    pub mnemonic: &'static str,
    pub exec: ExecFn,
    pub opcodes: &'static [(u8, AddressingMode)],
}

fn invalid_exec(_: &mut ProcessorState, _: AddressingMode) -> Result<(), ExecutionError> {
    // The engine reports the failing byte itself; this path only exists so
    // the sentinel is a complete descriptor.
    Err(ExecutionError::InvalidOpcode(0))
}

/// Descriptor returned for unmapped opcode bytes.
static INVALID: Descriptor = Descriptor {
    mnemonic: INVALID_MNEMONIC,
    opcode: 0,
    mode: AddressingMode::Single,
    size: 1,
    exec: invalid_exec,
};

/// The instruction-descriptor registry.
///
/// Keyed both by opcode byte (execution dispatch, disassembly) and by
/// mnemonic (assembler encoding lookups).
pub struct Registry {
    by_opcode: [Option<Descriptor>; 256],
    by_name: HashMap<&'static str, Vec<Descriptor>>,
}

impl Registry {
    /// Builds the full registry from the instruction family tables.
    ///
    /// Every opcode byte maps to at most one descriptor across all
    /// families; a duplicate registration is a programming error caught in
    /// debug builds.
    pub fn new() -> Self {
        let mut by_opcode = [None; 256];
        let mut by_name: HashMap<&'static str, Vec<Descriptor>> = HashMap::new();

        for family in crate::instructions::families() {
            let mut group = Vec::with_capacity(family.opcodes.len());
            for &(opcode, mode) in family.opcodes {
                let descriptor = Descriptor {
                    mnemonic: family.mnemonic,
                    opcode,
                    mode,
                    size: mode.instruction_len(),
                    exec: family.exec,
                };
                debug_assert!(
                    by_opcode[opcode as usize].is_none(),
                    "opcode 0x{opcode:02X} registered twice"
                );
                by_opcode[opcode as usize] = Some(descriptor);
                group.push(descriptor);
            }
            by_name.insert(family.mnemonic, group);
        }

        Self { by_opcode, by_name }
    }

    /// Looks up a descriptor by opcode byte.
    ///
    /// Unmapped bytes yield the Invalid Instruction sentinel; executing it
    /// fails with an invalid-opcode error.
    pub fn opcode(&self, byte: u8) -> &Descriptor {
        self.by_opcode[byte as usize].as_ref().unwrap_or(&INVALID)
    }

    /// Looks up the descriptor for a (mnemonic, addressing mode) pair.
    pub fn lookup(&self, mnemonic: &str, mode: AddressingMode) -> Option<&Descriptor> {
        self.by_name
            .get(mnemonic)?
            .iter()
            .find(|d| d.mode == mode)
    }

    /// Returns true if `name` is a registered mnemonic.
    pub fn is_mnemonic(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Returns true if `mnemonic` has an encoding for `mode`.
    pub fn supports(&self, mnemonic: &str, mode: AddressingMode) -> bool {
        self.lookup(mnemonic, mode).is_some()
    }

    /// Iterates over every registered descriptor.
    pub fn descriptors(&self) -> impl Iterator<Item = &Descriptor> {
        self.by_opcode.iter().flatten()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_the_documented_instruction_set() {
        let registry = Registry::new();
        // 54 mnemonics (no BRK/RTI), 149 opcodes.
        assert_eq!(registry.by_name.len(), 54);
        assert_eq!(registry.descriptors().count(), 149);
    }

    #[test]
    fn test_well_known_encodings() {
        let registry = Registry::new();

        let lda = registry.lookup("LDA", AddressingMode::Immediate).unwrap();
        assert_eq!(lda.opcode, 0xA9);
        assert_eq!(lda.size, 2);

        let jmp = registry.lookup("JMP", AddressingMode::Indirect).unwrap();
        assert_eq!(jmp.opcode, 0x6C);
        assert_eq!(jmp.size, 3);

        let asl = registry.lookup("ASL", AddressingMode::Single).unwrap();
        assert_eq!(asl.opcode, 0x0A);
        assert_eq!(asl.size, 1);
    }

    #[test]
    fn test_unmapped_opcode_yields_sentinel() {
        let registry = Registry::new();
        // 0x00 (BRK) and 0x40 (RTI) are deliberately unmapped.
        assert!(registry.opcode(0x00).is_invalid());
        assert!(registry.opcode(0x40).is_invalid());
        assert_eq!(registry.opcode(0x02).mnemonic, INVALID_MNEMONIC);
        assert_eq!(registry.opcode(0x02).size, 1);
    }

    #[test]
    fn test_every_descriptor_size_matches_its_mode() {
        let registry = Registry::new();
        for descriptor in registry.descriptors() {
            assert_eq!(descriptor.size, descriptor.mode.instruction_len());
        }
    }

    #[test]
    fn test_branches_are_relative_only() {
        let registry = Registry::new();
        for name in ["BCC", "BCS", "BEQ", "BNE", "BMI", "BPL", "BVC", "BVS"] {
            let group = registry.by_name.get(name).unwrap();
            assert_eq!(group.len(), 1);
            assert_eq!(group[0].mode, AddressingMode::Relative);
        }
    }
}
