//! Integration tests for the two-pass assembler.
//!
//! Tests cover:
//! - Origin directives, memory tags, and label definitions
//! - Label math and its dependent-label resolution path
//! - Forward references patched in pass 2
//! - Compilation counts and idempotence
//! - Fatal parse errors

use sim6502::{compile, AssembleError};

// ========== Directives and labels ==========

#[test]
fn test_origin_repositions_the_emission_address() {
    let result = compile("* = $C000\nASL").unwrap();
    assert_eq!(result.lines[0].address, 0xC000);
}

#[test]
fn test_memory_tag_overrides_one_line_address() {
    let result = compile("* = $0600\nASL\n$0700: ASL\nASL").unwrap();
    assert_eq!(result.lines[0].address, 0x0600);
    assert_eq!(result.lines[1].address, 0x0700);
    assert_eq!(result.lines[2].address, 0x0701);
    assert_eq!(result.memory_tags, 1);
}

#[test]
fn test_origin_directives_are_not_memory_tags() {
    let result = compile("* = $0600\nASL\n* = $0700\nASL").unwrap();
    assert_eq!(result.memory_tags, 0);
}

#[test]
fn test_label_binds_the_current_address() {
    let result = compile("* = $0600\nLDA #$01\nLOOP: ASL\nJMP LOOP").unwrap();
    let label = result.labels.iter().find(|l| l.name == "LOOP").unwrap();
    assert_eq!(label.address, 0x0602);
    // JMP LOOP encodes the label's absolute address.
    assert_eq!(result.lines[2].bytes, vec![0x4C, 0x02, 0x06]);
}

#[test]
fn test_label_math_creates_a_dependent_label() {
    let result = compile("* = $0600\nBASE: ASL\nAFTER = BASE + 6").unwrap();
    let after = result.labels.iter().find(|l| l.name == "AFTER").unwrap();
    assert_eq!(after.address, 0x0606);
    assert_eq!(after.offset, 6);
    assert_eq!(after.depends_on.as_deref(), Some("BASE"));
}

#[test]
fn test_label_math_subtraction() {
    let result = compile("* = $0600\nBASE: ASL\nBEFORE = BASE - 2").unwrap();
    let before = result.labels.iter().find(|l| l.name == "BEFORE").unwrap();
    assert_eq!(before.address, 0x05FE);
}

#[test]
fn test_byte_list_pseudo_op() {
    let result = compile("* = $0600\nDCB 1, 2, $FF").unwrap();
    assert_eq!(result.lines[0].bytes, vec![0x01, 0x02, 0xFF]);
    assert_eq!(result.bytes_emitted, 3);
}

// ========== Forward references ==========

#[test]
fn test_forward_branch_reference_lands_on_the_label() {
    let result = compile("* = $0600\nBMI LABEL\nLDA #$01\nLABEL: ASL").unwrap();
    // BMI at $0600, LABEL at $0604: offset (target - line) - 2 = 2.
    assert_eq!(result.lines[0].bytes, vec![0x30, 0x02]);
    assert!(result.lines[0].resolved);
}

#[test]
fn test_forward_absolute_reference() {
    let result = compile("* = $0600\nJMP DONE\nLDA #$01\nDONE: ASL").unwrap();
    assert_eq!(result.lines[0].bytes, vec![0x4C, 0x05, 0x06]);
}

#[test]
fn test_immediate_label_halves() {
    let result = compile("* = $0600\nLDA #<TARGET\nLDX #>TARGET\n$C05F: TARGET: ASL").unwrap();
    assert_eq!(result.lines[0].bytes, vec![0xA9, 0x5F]);
    assert_eq!(result.lines[1].bytes, vec![0xA2, 0xC0]);
}

#[test]
fn test_backward_reference_resolves_in_pass_one() {
    let result = compile("* = $0600\nSTART: LDA #<START\nJMP START").unwrap();
    assert!(result.lines.iter().all(|l| l.resolved));
    assert_eq!(result.lines[0].bytes, vec![0xA9, 0x00]);
}

// ========== Counts and determinism ==========

#[test]
fn test_end_to_end_compilation_counts() {
    let source = "* = $C000\nLABEL: asl\nLABEL2 = LABEL + 6\n$C001: ASL\nBMI LABEL\nBPL LABEL2";
    let result = compile(source).unwrap();

    assert_eq!(result.bytes_emitted, 6);
    assert_eq!(result.lines.len(), 4);
    assert_eq!(result.labels.len(), 2);
    assert_eq!(result.memory_tags, 1);

    // The back branch reaches LABEL and the forward branch reaches LABEL2.
    assert_eq!(result.lines[2].bytes, vec![0x30, 0xFC]);
    assert_eq!(result.lines[3].bytes, vec![0x10, 0x00]);
}

#[test]
fn test_compilation_is_idempotent() {
    let source = "* = $0600\nSTART: LDX #$08\nLOOP: DEX\nBNE LOOP\nJMP START";
    let first = compile(source).unwrap();
    let second = compile(source).unwrap();
    assert_eq!(first.lines, second.lines);
    assert_eq!(first.labels, second.labels);
    assert_eq!(first.bytes_emitted, second.bytes_emitted);
}

#[test]
fn test_comment_only_lines_emit_nothing() {
    let result = compile("; just a comment\n\nASL ; trailing comment").unwrap();
    assert_eq!(result.lines.len(), 1);
    assert_eq!(result.lines_parsed, 3);
}

// ========== Fatal errors ==========

#[test]
fn test_duplicate_label_is_fatal() {
    assert_eq!(
        compile("LOOP: ASL\nLOOP: ASL").unwrap_err(),
        AssembleError::DuplicateLabel("LOOP".to_string())
    );
}

#[test]
fn test_undefined_label_is_fatal() {
    assert_eq!(
        compile("JMP NOWHERE").unwrap_err(),
        AssembleError::UndefinedLabel("NOWHERE".to_string())
    );
}

#[test]
fn test_label_math_requires_an_earlier_definition() {
    assert_eq!(
        compile("AFTER = MISSING + 6").unwrap_err(),
        AssembleError::BadLabelReference("MISSING".to_string())
    );
}

#[test]
fn test_branch_out_of_range_is_fatal() {
    let source = "* = $0600\nBMI FAR\n* = $0800\nFAR: ASL";
    assert!(matches!(
        compile(source),
        Err(AssembleError::BranchOutOfRange(_))
    ));
}

#[test]
fn test_unsupported_mode_is_fatal() {
    assert!(matches!(
        compile("STA #$10"),
        Err(AssembleError::UnsupportedMode(_))
    ));
}

#[test]
fn test_error_messages_are_category_tagged() {
    let error = compile("JMP NOWHERE").unwrap_err();
    assert_eq!(error.to_string(), "label not defined: NOWHERE");

    let error = compile("* = $10000").unwrap_err();
    assert_eq!(error.to_string(), "origin out of range: $10000");
}
