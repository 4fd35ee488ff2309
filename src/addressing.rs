//! # Addressing Modes
//!
//! This module defines the twelve addressing modes supported by the emulator.
//! Each mode determines how an instruction locates its operand and how many
//! bytes the encoded instruction occupies.

/// 6502 addressing mode enumeration.
///
/// The addressing mode determines how the processor interprets the operand
/// bytes that follow an opcode and how it calculates the effective memory
/// address for the operation.
///
/// # Instruction Sizes
///
/// - **1 byte**: Single (implied or accumulator, no operand)
/// - **2 bytes**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative,
///   IndexedIndirectX, IndirectIndexedY
/// - **3 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// 8-bit constant operand in the instruction itself.
    ///
    /// Example: `LDA #$10`
    Immediate,

    /// 8-bit address in the zero page (0x00-0xFF).
    ///
    /// Example: `LDA $80`
    ZeroPage,

    /// Zero page address indexed by X, wrapping within the zero page.
    ///
    /// Example: `LDA $80,X`
    ZeroPageX,

    /// Zero page address indexed by Y, wrapping within the zero page.
    ///
    /// Example: `LDX $80,Y`
    ZeroPageY,

    /// Full 16-bit address.
    ///
    /// Example: `JMP $1234`
    Absolute,

    /// 16-bit address indexed by X.
    ///
    /// Example: `LDA $1234,X`
    AbsoluteX,

    /// 16-bit address indexed by Y.
    ///
    /// Example: `LDA $1234,Y`
    AbsoluteY,

    /// Jump through a 16-bit pointer.
    ///
    /// Example: `JMP ($FFFC)`. The pointer fetch reproduces the historical
    /// page-boundary bug: a pointer whose low byte is 0xFF reads its high
    /// byte from the start of the same page.
    Indirect,

    /// Indexed indirect: (ZP + X) locates a little-endian pointer.
    ///
    /// Example: `LDA ($40,X)`
    IndexedIndirectX,

    /// Indirect indexed: ZP locates a pointer, Y is added to it.
    ///
    /// Example: `LDA ($40),Y`
    IndirectIndexedY,

    /// No operand; the instruction is implied or acts on the accumulator.
    ///
    /// Examples: `CLC`, `RTS`, `ASL`
    Single,

    /// Signed 8-bit branch offset.
    ///
    /// Example: `BEQ label`
    Relative,
}

impl AddressingMode {
    /// Total encoded instruction size in bytes, opcode included.
    pub fn instruction_len(self) -> u8 {
        use AddressingMode::*;
        match self {
            Single => 1,
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | Relative | IndexedIndirectX
            | IndirectIndexedY => 2,
            Absolute | AbsoluteX | AbsoluteY | Indirect => 3,
        }
    }
}
