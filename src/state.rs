//! # Processor State and Addressing-Mode Resolution
//!
//! This module contains the [`ProcessorState`] value: registers, flags, the
//! flat 64KB memory array, the stack, execution statistics, and the
//! run-control flags. It also implements operand resolution for each
//! addressing mode, which is where the historical indirect-jump
//! page-boundary bug lives.
//!
//! Every register and memory mutation masks values to their bit width:
//! 8-bit values wrap modulo 256 and addresses wrap modulo 65536.

use std::time::{Duration, Instant};

use bitflags::bitflags;

use crate::addressing::AddressingMode;
use crate::ExecutionError;

/// Size of the flat memory array.
pub const MEMORY_SIZE: usize = 0x10000;

/// Default program counter after a reset.
pub const DEFAULT_PC: u16 = 0x0600;

/// Base address of the fixed stack page.
pub const STACK_PAGE: u16 = 0x0100;

/// Stack pointer offset at reset: the top of the stack page.
pub const SP_TOP: u16 = 0x00FF;

bitflags! {
    /// The packed processor status register (P).
    ///
    /// Bit layout (NV-BDIZC): negative, overflow, unused, break, decimal,
    /// interrupt disable, zero, carry. The break/interrupt/unused bits are
    /// carried for completeness but no instruction in this core sets them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Status: u8 {
        const CARRY     = 0b0000_0001;
        const ZERO      = 0b0000_0010;
        const INTERRUPT = 0b0000_0100;
        const DECIMAL   = 0b0000_1000;
        const BREAK     = 0b0001_0000;
        const UNUSED    = 0b0010_0000;
        const OVERFLOW  = 0b0100_0000;
        const NEGATIVE  = 0b1000_0000;
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::empty()
    }
}

/// Execution statistics maintained by the run-control state machine.
#[derive(Debug, Clone, Default)]
pub struct ExecStats {
    /// Instructions executed since the last `start`.
    pub instructions: u64,

    /// Wall-clock time since the last `start`.
    pub elapsed: Duration,

    /// Instructions per second over `elapsed`.
    pub per_second: f64,

    /// When the current run began; `None` before the first `start`.
    pub started_at: Option<Instant>,
}

/// Complete 6502 processor state.
///
/// Created in a canonical reset state (`A = X = Y = 0`, `P` empty,
/// `PC = DEFAULT_PC`, `SP` at the top of the stack page, memory zeroed) and
/// mutated exclusively through instruction behaviors and the run-control
/// transitions in [`crate::engine`]. The state is a plain value: cloning it
/// yields an independent snapshot.
#[derive(Debug, Clone)]
pub struct ProcessorState {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Packed status register
    pub(crate) p: Status,

    /// Program counter
    pub(crate) pc: u16,

    /// Stack pointer: an offset into the stack page. Held as 16 bits so the
    /// one-below-bottom position of a full stack is representable.
    pub(crate) sp: u16,

    /// 64KB flat memory
    memory: Box<[u8; MEMORY_SIZE]>,

    /// Execution statistics
    pub(crate) stats: ExecStats,

    /// Whether the machine is currently running
    pub(crate) running: bool,

    /// Whether the machine halted on an error
    pub(crate) error_state: bool,

    /// The message for the halting error, if any
    pub(crate) error_message: Option<String>,

    /// When set, each executed instruction is traced through `log`
    pub debug: bool,
}

impl ProcessorState {
    /// Creates a processor in the canonical reset state.
    pub fn new() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            p: Status::empty(),
            pc: DEFAULT_PC,
            sp: SP_TOP,
            memory: Box::new([0; MEMORY_SIZE]),
            stats: ExecStats::default(),
            running: false,
            error_state: false,
            error_message: None,
            debug: false,
        }
    }

    // ========== Register and control accessors ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the packed status register.
    pub fn status(&self) -> Status {
        self.p
    }

    /// Replaces the packed status register.
    pub fn set_status(&mut self, p: Status) {
        self.p = p;
    }

    /// Returns the program counter.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer offset into the stack page.
    pub fn sp(&self) -> u16 {
        self.sp
    }

    /// Returns true while the run-control state machine is in `Running`.
    pub fn running(&self) -> bool {
        self.running
    }

    /// Returns true once the machine has halted on an error.
    pub fn error_state(&self) -> bool {
        self.error_state
    }

    /// Returns the halting error message, if the machine has halted.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Returns the execution statistics for the current run.
    pub fn stats(&self) -> &ExecStats {
        &self.stats
    }

    /// Returns the full memory array.
    pub fn memory(&self) -> &[u8; MEMORY_SIZE] {
        &self.memory
    }

    // ========== Memory access ==========

    /// Reads the byte at `address`.
    ///
    /// The 16-bit address type is the masking: all address arithmetic
    /// performed by callers wraps modulo 65536 before landing here.
    pub fn peek(&self, address: u16) -> u8 {
        self.memory[address as usize]
    }

    /// Writes `bytes` starting at `address`, wrapping past 0xFFFF per byte.
    pub fn poke(&mut self, address: u16, bytes: &[u8]) {
        let mut at = address;
        for &byte in bytes {
            self.memory[at as usize] = byte;
            at = at.wrapping_add(1);
        }
    }

    /// Fetches the byte at PC and advances PC.
    ///
    /// A fetch that would carry PC past the end of memory is an execution
    /// error rather than a silent wrap.
    pub(crate) fn fetch_byte(&mut self) -> Result<u8, ExecutionError> {
        let value = self.peek(self.pc);
        self.pc = self
            .pc
            .checked_add(1)
            .ok_or(ExecutionError::PcRolledOver)?;
        Ok(value)
    }

    /// Fetches a little-endian 16-bit word at PC and advances PC by two.
    pub(crate) fn fetch_word(&mut self) -> Result<u16, ExecutionError> {
        let lo = self.fetch_byte()? as u16;
        let hi = self.fetch_byte()? as u16;
        Ok((hi << 8) | lo)
    }

    /// Reads the little-endian word at `address`.
    fn peek_word(&self, address: u16) -> u16 {
        let lo = self.peek(address) as u16;
        let hi = self.peek(address.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    // ========== Stack ==========

    /// Pushes a byte onto the stack.
    ///
    /// The byte is stored at `STACK_PAGE + SP` and SP moves down. Once all
    /// 256 slots are filled SP sits one below the page bottom; a further
    /// push is a stack-overflow error.
    pub(crate) fn push(&mut self, value: u8) -> Result<(), ExecutionError> {
        if self.sp > SP_TOP {
            return Err(ExecutionError::StackOverflow);
        }
        self.poke(STACK_PAGE + self.sp, &[value]);
        self.sp = self.sp.wrapping_sub(1);
        Ok(())
    }

    /// Pops a byte off the stack.
    ///
    /// SP moves back up toward the top of the page and the byte at
    /// `STACK_PAGE + SP` is returned. Popping an empty stack is a
    /// stack-underflow error.
    pub(crate) fn pop(&mut self) -> Result<u8, ExecutionError> {
        if self.sp == SP_TOP {
            return Err(ExecutionError::StackUnderflow);
        }
        self.sp = self.sp.wrapping_add(1);
        Ok(self.peek(STACK_PAGE + self.sp))
    }

    // ========== Flag helpers ==========

    /// Sets the zero and negative flags from `value`.
    pub(crate) fn set_nz(&mut self, value: u8) {
        self.p = crate::arith::derive_flags(self.p, value);
    }

    // ========== Addressing-mode resolution ==========

    /// Resolves the effective address for a memory-addressed mode,
    /// consuming the operand bytes at PC.
    ///
    /// All address arithmetic wraps modulo 65536; zero-page indexing wraps
    /// modulo 256. The `Indirect` pointer fetch reproduces the historical
    /// page-boundary bug: when the pointer's low byte is 0xFF the high byte
    /// of the target is read from the start of the same page.
    pub(crate) fn operand_address(
        &mut self,
        mode: AddressingMode,
    ) -> Result<u16, ExecutionError> {
        use AddressingMode::*;
        match mode {
            ZeroPage => Ok(self.fetch_byte()? as u16),
            ZeroPageX => Ok(self.fetch_byte()?.wrapping_add(self.x) as u16),
            ZeroPageY => Ok(self.fetch_byte()?.wrapping_add(self.y) as u16),
            Absolute => self.fetch_word(),
            AbsoluteX => Ok(self.fetch_word()?.wrapping_add(self.x as u16)),
            AbsoluteY => Ok(self.fetch_word()?.wrapping_add(self.y as u16)),
            Indirect => {
                let pointer = self.fetch_word()?;
                let lo = self.peek(pointer) as u16;
                let hi_at = if pointer & 0x00FF == 0x00FF {
                    pointer & 0xFF00
                } else {
                    pointer.wrapping_add(1)
                };
                let hi = self.peek(hi_at) as u16;
                Ok((hi << 8) | lo)
            }
            IndexedIndirectX => {
                let zp = self.fetch_byte()?.wrapping_add(self.x) as u16;
                Ok(self.peek_word(zp))
            }
            IndirectIndexedY => {
                let zp = self.fetch_byte()? as u16;
                Ok(self.peek_word(zp).wrapping_add(self.y as u16))
            }
            Immediate | Single | Relative => {
                unreachable!("no effective address for {mode:?}")
            }
        }
    }

    /// Fetches the operand value for a value-consuming instruction.
    ///
    /// Immediate mode yields the operand byte itself; every other mode
    /// resolves an effective address and reads through it.
    pub(crate) fn operand_value(&mut self, mode: AddressingMode) -> Result<u8, ExecutionError> {
        if mode == AddressingMode::Immediate {
            self.fetch_byte()
        } else {
            let address = self.operand_address(mode)?;
            Ok(self.peek(address))
        }
    }
}

impl Default for ProcessorState {
    fn default() -> Self {
        Self::new()
    }
}
