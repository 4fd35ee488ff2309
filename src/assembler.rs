//! # Two-Pass Assembler
//!
//! [`compile`] turns mnemonic source text into the exact byte encoding the
//! execution engine runs, using the same descriptor registry for the
//! (mnemonic, addressing mode) lookups.
//!
//! Pass 1 ([`encoder`]) walks the source line by line, building the label
//! table and emitting bytes at a running emission address; operands that
//! reference a label not yet defined are encoded with placeholder bytes and
//! marked unresolved. Pass 2 ([`patcher`]) revisits every unresolved line
//! and patches the operand bytes from the now-complete label table.
//!
//! ## Source syntax
//!
//! One instruction or directive per line; `;` starts a comment. Case does
//! not matter.
//!
//! ```text
//! * = $0600        ; origin directive
//! START: LDA #$01  ; label definition, immediate operand
//! $0700: ASL       ; explicit memory-location tag
//! AFTER = START + 2 ; label math
//! DCB 1, 2, $FF    ; literal byte list
//! BNE START        ; branch to a label
//! ```
//!
//! Any parse error is fatal to the whole `compile` call; the assembler does
//! not attempt partial recovery.

pub(crate) mod encoder;
pub(crate) mod patcher;

use std::time::{Duration, Instant};

use thiserror::Error;

use crate::addressing::AddressingMode;
use crate::opcodes::Registry;

/// Errors raised during compilation. Each message is tagged with its
/// category and names the offending token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssembleError {
    /// A line that matches no directive or instruction shape.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// An origin directive pointing outside addressable memory.
    #[error("origin out of range: {0}")]
    OriginOutOfRange(String),

    /// Label math referencing a name not defined earlier in the source.
    #[error("bad label reference: {0}")]
    BadLabelReference(String),

    /// A label name bound twice.
    #[error("duplicate label: {0}")]
    DuplicateLabel(String),

    /// An operand label that is still missing after pass 1.
    #[error("label not defined: {0}")]
    UndefinedLabel(String),

    /// A memory-location tag pointing outside addressable memory.
    #[error("memory tag out of range: {0}")]
    MemoryTagOutOfRange(String),

    /// An operand value too large for its encoding.
    #[error("value out of range: {0}")]
    ValueOutOfRange(String),

    /// A first token that is neither a directive nor a known mnemonic.
    #[error("unknown mnemonic: {0}")]
    UnknownMnemonic(String),

    /// An operand shape this mnemonic has no encoding for.
    #[error("unsupported addressing mode: {0}")]
    UnsupportedMode(String),

    /// Trailing text after a recognized operand.
    #[error("extraneous text: {0}")]
    ExtraneousText(String),

    /// A branch target further than a signed byte can reach.
    #[error("branch out of range: {0}")]
    BranchOutOfRange(String),

    /// A byte-list pseudo-op with nothing to emit.
    #[error("empty byte list")]
    EmptyByteList,

    /// A malformed line slipped through pass 1. Should not occur.
    #[error("not implemented: {0}")]
    Internal(String),
}

/// One source line's worth of emitted bytes.
///
/// Built during pass 1; an unresolved line carries the label name its
/// operand references and is patched in place by pass 2, after which it is
/// never mutated again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledLine {
    /// Target address of the first byte.
    pub address: u16,

    /// The opcode byte (or the first data byte for a byte list).
    pub opcode: u8,

    /// Addressing mode the operand was encoded for.
    pub mode: AddressingMode,

    /// The emitted bytes, opcode included.
    pub bytes: Vec<u8>,

    /// False until every operand byte holds its final value.
    pub resolved: bool,

    /// The referenced label name, when unresolved.
    pub label: Option<String>,

    /// For split immediate-label references: take the address high byte
    /// instead of the low byte.
    pub high_byte: bool,
}

/// A named address in the label table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub name: String,

    pub address: u16,

    /// The constant applied by label math, zero for plain definitions.
    pub offset: i32,

    /// The base label this one was derived from, for label-math entries.
    /// A dependent label never matches a direct name lookup during pass 1.
    pub depends_on: Option<String>,
}

/// Everything one [`compile`] call produced.
#[derive(Debug, Clone)]
pub struct CompilationResult {
    /// Emitted lines in source order.
    pub lines: Vec<CompiledLine>,

    /// Every label defined, in definition order.
    pub labels: Vec<Label>,

    /// Source lines examined, comments and blanks included.
    pub lines_parsed: usize,

    /// Total bytes across all emitted lines.
    pub bytes_emitted: usize,

    /// Count of explicit memory-location tags (`$HHHH:` forms). Origin
    /// directives do not count.
    pub memory_tags: usize,

    /// Wall-clock time the compilation took.
    pub elapsed: Duration,
}

/// The label table built during pass 1.
#[derive(Debug, Default)]
pub(crate) struct LabelTable {
    labels: Vec<Label>,
}

impl LabelTable {
    /// Binds `name` to `address`. Rebinding any name is an error.
    fn insert(&mut self, label: Label) -> Result<(), AssembleError> {
        if self.labels.iter().any(|l| l.name == label.name) {
            return Err(AssembleError::DuplicateLabel(label.name));
        }
        self.labels.push(label);
        Ok(())
    }

    pub(crate) fn define(&mut self, name: &str, address: u16) -> Result<(), AssembleError> {
        self.insert(Label {
            name: name.to_string(),
            address,
            offset: 0,
            depends_on: None,
        })
    }

    pub(crate) fn define_dependent(
        &mut self,
        name: &str,
        address: u16,
        offset: i32,
        depends_on: &str,
    ) -> Result<(), AssembleError> {
        self.insert(Label {
            name: name.to_string(),
            address,
            offset,
            depends_on: Some(depends_on.to_string()),
        })
    }

    /// Pass-1 operand lookup. Dependent labels are excluded so operands
    /// that reference them take the unresolved path and are patched by
    /// pass 2.
    pub(crate) fn lookup_direct(&self, name: &str) -> Option<&Label> {
        self.labels
            .iter()
            .find(|l| l.name == name && l.depends_on.is_none())
    }

    /// Full lookup over every label, dependent or not.
    pub(crate) fn find(&self, name: &str) -> Option<&Label> {
        self.labels.iter().find(|l| l.name == name)
    }

    pub(crate) fn into_vec(self) -> Vec<Label> {
        self.labels
    }
}

/// Computes the branch-offset byte that carries execution from the branch
/// instruction at `line_address` to `target`.
///
/// The engine adds the offset to PC after it has consumed both instruction
/// bytes, so a backward branch encodes `255 - ((line + 1) - target)` and a
/// forward branch `(target - line) - 2`. A target outside the reach of one
/// signed byte is an error.
pub(crate) fn relative_offset(line_address: u16, target: u16) -> Result<u8, AssembleError> {
    let line = i64::from(line_address);
    let target_address = i64::from(target);
    let offset = if target_address < line + 1 {
        255 - ((line + 1) - target_address)
    } else {
        (target_address - line) - 2
    };
    if !(0..=255).contains(&offset) {
        return Err(AssembleError::BranchOutOfRange(format!(
            "${target:04X} is not reachable from ${line_address:04X}"
        )));
    }
    Ok(offset as u8)
}

/// Compiles assembler source text into bytes.
///
/// Runs pass 1 and pass 2 over the whole source and times the operation.
/// The first error aborts the call.
///
/// # Examples
///
/// ```rust
/// use sim6502::compile;
///
/// let program = compile("* = $0600\nLDA #$01\nSTA $0200").unwrap();
/// assert_eq!(program.bytes_emitted, 5);
/// assert_eq!(program.lines[0].bytes, vec![0xA9, 0x01]);
/// ```
pub fn compile(source: &str) -> Result<CompilationResult, AssembleError> {
    let started = Instant::now();
    let registry = Registry::new();

    let mut pass1 = encoder::Pass1::new(&registry);
    for line in source.lines() {
        pass1.line(line)?;
    }
    let (mut lines, table, lines_parsed, memory_tags) = pass1.finish();

    let labels = table.into_vec();
    patcher::patch_labels(&mut lines, &labels)?;

    let bytes_emitted = lines.iter().map(|l| l.bytes.len()).sum();
    log::debug!(
        "assembled {lines_parsed} lines into {bytes_emitted} bytes ({} labels)",
        labels.len()
    );

    Ok(CompilationResult {
        lines,
        labels,
        lines_parsed,
        bytes_emitted,
        memory_tags,
        elapsed: started.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_offset_backward() {
        // Branch at $C002 back to $C000.
        assert_eq!(relative_offset(0xC002, 0xC000).unwrap(), 0xFC);
    }

    #[test]
    fn test_relative_offset_forward() {
        // Branch at $C004 forward to $C006 lands exactly past itself.
        assert_eq!(relative_offset(0xC004, 0xC006).unwrap(), 0x00);
        assert_eq!(relative_offset(0xC000, 0xC010).unwrap(), 0x0E);
    }

    #[test]
    fn test_relative_offset_round_trips_through_compute_branch() {
        for (line, target) in [(0xC002, 0xC000), (0xC004, 0xC006), (0x0600, 0x0610)] {
            let offset = relative_offset(line, target).unwrap();
            assert_eq!(crate::arith::compute_branch(line + 2, offset), target);
        }
    }

    #[test]
    fn test_relative_offset_out_of_range() {
        assert!(matches!(
            relative_offset(0xC000, 0xC200),
            Err(AssembleError::BranchOutOfRange(_))
        ));
        assert!(matches!(
            relative_offset(0xC200, 0xC000),
            Err(AssembleError::BranchOutOfRange(_))
        ));
    }

    #[test]
    fn test_label_table_rejects_duplicates() {
        let mut table = LabelTable::default();
        table.define("LOOP", 0x0600).unwrap();
        assert_eq!(
            table.define("LOOP", 0x0700),
            Err(AssembleError::DuplicateLabel("LOOP".to_string()))
        );
    }

    #[test]
    fn test_dependent_labels_hide_from_direct_lookup() {
        let mut table = LabelTable::default();
        table.define("BASE", 0x0600).unwrap();
        table.define_dependent("AFTER", 0x0606, 6, "BASE").unwrap();
        assert!(table.lookup_direct("BASE").is_some());
        assert!(table.lookup_direct("AFTER").is_none());
        assert_eq!(table.find("AFTER").unwrap().address, 0x0606);
    }
}
