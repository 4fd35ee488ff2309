//! # Execution Engine
//!
//! The fetch/decode/execute loop and the run-control state machine. An
//! [`Emulator`] owns a [`Registry`] and a [`ProcessorState`]; every
//! transition returns a borrow of the state so callers can inspect the
//! machine after each operation.
//!
//! Execution faults do not unwind out of `step` or `run`. They halt the
//! machine: `running` drops, `error_state` is set, and the error message is
//! kept on the state for inspection.

use std::time::Instant;

use crate::assembler::CompilationResult;
use crate::opcodes::Registry;
use crate::state::{ExecStats, ProcessorState};
use crate::ExecutionError;

/// A 6502 machine: the descriptor registry plus one processor state.
///
/// # Examples
///
/// ```rust
/// use sim6502::Emulator;
///
/// let mut emulator = Emulator::new();
/// emulator.poke(0x0600, &[0xA9, 0x7F]); // LDA #$7F
/// emulator.start();
/// emulator.step();
/// assert_eq!(emulator.state().a(), 0x7F);
/// ```
pub struct Emulator {
    registry: Registry,
    state: ProcessorState,
}

impl Emulator {
    /// Creates a machine in the canonical reset state.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            state: ProcessorState::new(),
        }
    }

    /// Returns the current processor state.
    pub fn state(&self) -> &ProcessorState {
        &self.state
    }

    /// Returns the instruction-descriptor registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Enables or disables per-instruction trace logging.
    pub fn set_debug(&mut self, debug: bool) {
        self.state.debug = debug;
    }

    // ========== Run-control transitions ==========

    /// Starts the machine: resets the execution statistics and marks the
    /// machine running.
    ///
    /// A machine that is already running, or that halted on an error, does
    /// not move; a halted machine must be [`reset`](Self::reset) first.
    pub fn start(&mut self) -> &ProcessorState {
        if !self.state.running && !self.state.error_state {
            self.state.running = true;
            self.state.stats = ExecStats {
                started_at: Some(Instant::now()),
                ..ExecStats::default()
            };
        }
        &self.state
    }

    /// Stops the machine without recording an error.
    pub fn stop(&mut self) -> &ProcessorState {
        self.state.running = false;
        self.refresh_stats();
        &self.state
    }

    /// Halts the machine at the user's request.
    ///
    /// Unlike [`stop`](Self::stop), a halt lands in the error state with a
    /// fixed "halted" message, the same terminal state an execution fault
    /// reaches.
    pub fn halt(&mut self) -> &ProcessorState {
        self.state.running = false;
        self.state.error_state = true;
        self.state.error_message = Some("halted".to_string());
        self.refresh_stats();
        &self.state
    }

    /// Returns the machine to the canonical reset state.
    ///
    /// Registers and flags clear, PC returns to the default origin, the
    /// stack empties, and all of memory zeroes. The debug flag survives.
    pub fn reset(&mut self) -> &ProcessorState {
        let debug = self.state.debug;
        self.state = ProcessorState::new();
        self.state.debug = debug;
        &self.state
    }

    // ========== Loading ==========

    /// Writes `bytes` into memory starting at `address`.
    pub fn poke(&mut self, address: u16, bytes: &[u8]) -> &ProcessorState {
        self.state.poke(address, bytes);
        &self.state
    }

    /// Moves the program counter.
    pub fn set_program_counter(&mut self, pc: u16) -> &ProcessorState {
        self.state.pc = pc;
        &self.state
    }

    /// Loads an assembled program: every compiled line's bytes land at that
    /// line's address, and PC moves to the first line.
    pub fn load(&mut self, program: &CompilationResult) -> &ProcessorState {
        for line in &program.lines {
            self.state.poke(line.address, &line.bytes);
        }
        if let Some(first) = program.lines.first() {
            self.state.pc = first.address;
        }
        &self.state
    }

    // ========== Execution ==========

    /// Executes one instruction if the machine is running.
    ///
    /// A stopped or halted machine does not move. An execution fault halts
    /// the machine instead of returning an error.
    pub fn step(&mut self) -> &ProcessorState {
        if self.state.running {
            match self.execute_one() {
                Ok(()) => {
                    self.state.stats.instructions += 1;
                    self.refresh_stats();
                }
                Err(error) => self.halt_on(error),
            }
        }
        &self.state
    }

    /// Executes up to `count` instructions, stopping early if the machine
    /// halts. Statistics are refreshed once per batch.
    pub fn run(&mut self, count: u64) -> &ProcessorState {
        for _ in 0..count {
            if !self.state.running {
                break;
            }
            match self.execute_one() {
                Ok(()) => self.state.stats.instructions += 1,
                Err(error) => {
                    self.halt_on(error);
                    break;
                }
            }
        }
        self.refresh_stats();
        &self.state
    }

    /// Fetches, decodes, and executes the instruction at PC.
    fn execute_one(&mut self) -> Result<(), ExecutionError> {
        let at = self.state.pc;
        let opcode = self.state.fetch_byte()?;
        let descriptor = *self.registry.opcode(opcode);
        if descriptor.is_invalid() {
            return Err(ExecutionError::InvalidOpcode(opcode));
        }
        if self.state.debug {
            log::trace!("${:04X}: {} (0x{:02X})", at, descriptor.mnemonic, opcode);
        }
        (descriptor.exec)(&mut self.state, descriptor.mode)
    }

    fn halt_on(&mut self, error: ExecutionError) {
        log::warn!("halted at ${:04X}: {error}", self.state.pc);
        self.state.running = false;
        self.state.error_state = true;
        self.state.error_message = Some(error.to_string());
        self.refresh_stats();
    }

    fn refresh_stats(&mut self) {
        if let Some(started) = self.state.stats.started_at {
            let elapsed = started.elapsed();
            self.state.stats.elapsed = elapsed;
            let seconds = elapsed.as_secs_f64();
            self.state.stats.per_second = if seconds > 0.0 {
                self.state.stats.instructions as f64 / seconds
            } else {
                0.0
            };
        }
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}
