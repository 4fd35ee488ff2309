//! End-to-end execution tests: programs are assembled with `compile`,
//! loaded into an emulator, and run.
//!
//! Tests cover:
//! - Load/store and flag derivation
//! - Branch loops driven by the status register
//! - Subroutine call and return through the stack
//! - The indirect-jump page-boundary quirk
//! - Decimal-mode arithmetic
//! - Equivalence of `run(n)` and `n` single steps

use sim6502::{compile, Emulator, Status};

fn load(source: &str) -> Emulator {
    let program = compile(source).unwrap();
    let mut emulator = Emulator::new();
    emulator.load(&program);
    emulator.start();
    emulator
}

// ========== Straight-line programs ==========

#[test]
fn test_load_and_store() {
    let mut emulator = load("* = $0600\nLDA #$7F\nSTA $0200");
    let state = emulator.run(2);
    assert_eq!(state.a(), 0x7F);
    assert_eq!(state.peek(0x0200), 0x7F);
    assert!(!state.status().contains(Status::ZERO));
    assert!(!state.status().contains(Status::NEGATIVE));
}

#[test]
fn test_loading_zero_sets_the_zero_flag() {
    let mut emulator = load("LDA #$00");
    let state = emulator.run(1);
    assert!(state.status().contains(Status::ZERO));
    assert!(!state.status().contains(Status::NEGATIVE));
}

#[test]
fn test_loading_a_high_bit_sets_negative() {
    let mut emulator = load("LDA #$80");
    let state = emulator.run(1);
    assert!(state.status().contains(Status::NEGATIVE));
}

// ========== Branch loops ==========

#[test]
fn test_countdown_loop() {
    let mut emulator = load("* = $0600\nLDX #$08\nLOOP: DEX\nBNE LOOP");
    // LDX plus eight DEX/BNE pairs.
    let state = emulator.run(17);
    assert_eq!(state.x(), 0);
    assert!(state.status().contains(Status::ZERO));
    assert_eq!(state.pc(), 0x0605);
    assert!(state.running());
}

#[test]
fn test_taken_branch_lands_on_its_label() {
    let mut emulator = load("* = $0600\nLDA #$80\nBMI DONE\nLDA #$00\nDONE: LDX #$01");
    emulator.run(2);
    assert_eq!(emulator.state().pc(), 0x0606);
    let state = emulator.run(1);
    assert_eq!(state.a(), 0x80);
    assert_eq!(state.x(), 0x01);
}

#[test]
fn test_untaken_branch_falls_through() {
    let mut emulator = load("* = $0600\nLDA #$01\nBMI SKIP\nLDA #$42\nSKIP: ASL");
    let state = emulator.run(3);
    assert_eq!(state.a(), 0x42);
}

// ========== Subroutines and the stack ==========

#[test]
fn test_jsr_and_rts() {
    let source = "* = $0600\nJSR INIT\nLDA #$AA\nINIT: LDA #$42\nRTS";
    let mut emulator = load(source);

    emulator.run(1); // JSR
    assert_eq!(emulator.state().pc(), 0x0605);

    emulator.run(2); // LDA #$42, RTS
    assert_eq!(emulator.state().pc(), 0x0603);

    let state = emulator.run(1); // LDA #$AA
    assert_eq!(state.a(), 0xAA);
    assert_eq!(state.sp(), 0xFF);
}

#[test]
fn test_push_and_pull_through_the_stack() {
    let source = "LDA #$11\nPHA\nLDA #$22\nPHA\nPLA\nTAX\nPLA\nTAY";
    let mut emulator = load(source);
    let state = emulator.run(8);
    assert_eq!(state.x(), 0x22);
    assert_eq!(state.y(), 0x11);
    assert_eq!(state.sp(), 0xFF);
}

// ========== Indirect jump quirk ==========

#[test]
fn test_indirect_jump_page_boundary_quirk() {
    let mut emulator = load("* = $0600\nJMP ($30FF)");
    // Pointer low byte at $30FF, high byte read from $3000, not $3100.
    emulator.poke(0x30FF, &[0x00]);
    emulator.poke(0x3000, &[0x07]);
    emulator.poke(0x3100, &[0x09]);
    emulator.poke(0x0700, &[0xA9, 0x55]); // LDA #$55

    let state = emulator.run(2);
    assert_eq!(state.a(), 0x55);
}

// ========== Decimal mode ==========

#[test]
fn test_decimal_mode_addition() {
    let mut emulator = load("SED\nCLC\nLDA #$19\nADC #$27");
    let state = emulator.run(4);
    assert_eq!(state.a(), 0x46);
    assert!(!state.status().contains(Status::CARRY));
}

#[test]
fn test_decimal_mode_carry_out() {
    let mut emulator = load("SED\nCLC\nLDA #$99\nADC #$01");
    let state = emulator.run(4);
    assert_eq!(state.a(), 0x00);
    assert!(state.status().contains(Status::CARRY));
}

// ========== Run/step equivalence ==========

#[test]
fn test_run_matches_repeated_steps() {
    let source = "* = $0600\nLDX #$08\nLOOP: DEX\nSTX $0200\nBNE LOOP";
    let mut batched = load(source);
    let mut stepped = load(source);

    batched.run(25);
    for _ in 0..25 {
        stepped.step();
    }

    let (b, s) = (batched.state(), stepped.state());
    assert_eq!(b.a(), s.a());
    assert_eq!(b.x(), s.x());
    assert_eq!(b.y(), s.y());
    assert_eq!(b.pc(), s.pc());
    assert_eq!(b.sp(), s.sp());
    assert_eq!(b.status(), s.status());
    assert_eq!(b.peek(0x0200), s.peek(0x0200));
    assert_eq!(b.stats().instructions, s.stats().instructions);
}
