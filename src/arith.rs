//! # Numeric and Flag Primitives
//!
//! Byte arithmetic helpers shared by the instruction behaviors: add and
//! subtract with carry (binary and packed-decimal), branch-target
//! computation, and zero/negative flag derivation.
//!
//! The binary-mode semantics here are the verified contract. The
//! decimal-mode (BCD) paths reproduce the nibble-propagation scheme of the
//! classic simulators and are best-effort; see the tests for what is pinned.

use crate::state::Status;

/// Updates the zero and negative flags from `value`, leaving all other
/// flags untouched.
///
/// Zero is set iff `value == 0`; negative is set iff bit 7 of `value` is set.
pub fn derive_flags(p: Status, value: u8) -> Status {
    let mut p = p;
    p.set(Status::ZERO, value == 0);
    p.set(Status::NEGATIVE, value & 0x80 != 0);
    p
}

/// Computes a branch target from a base address and a raw offset byte.
///
/// Offsets 0x00-0x7F are added to `base`; 0x80-0xFF are interpreted as
/// negative (`base - (0x100 - offset)`). Arithmetic wraps modulo 65536.
///
/// # Examples
///
/// ```
/// use sim6502::arith::compute_branch;
///
/// assert_eq!(compute_branch(0xC000, 0x20), 0xC020);
/// assert_eq!(compute_branch(0xC000, 0x82), 0xBF82);
/// ```
pub fn compute_branch(base: u16, offset: u8) -> u16 {
    if offset < 0x80 {
        base.wrapping_add(offset as u16)
    } else {
        base.wrapping_sub(0x100 - offset as u16)
    }
}

/// Adds `a + b + carry`, returning the masked 8-bit result and updated flags.
///
/// In binary mode (decimal flag clear) the carry flag is set when the 9-bit
/// sum exceeds 255, and overflow is set when both operands share a sign the
/// result does not. In decimal mode the operands are treated as packed BCD:
/// a low-nibble sum of ten or more carries into the high nibble, and carry
/// out is set when the byte sum reaches one hundred.
pub fn add_with_carry(p: Status, a: u8, b: u8) -> (u8, Status) {
    let carry_in = p.contains(Status::CARRY) as u16;

    if p.contains(Status::DECIMAL) {
        let mut lo = (a & 0x0F) as u16 + (b & 0x0F) as u16 + carry_in;
        let mut hi = (a >> 4) as u16 + (b >> 4) as u16;
        if lo >= 10 {
            lo -= 10;
            hi += 1;
        }
        let carry_out = hi >= 10;
        if carry_out {
            hi -= 10;
        }
        let result = (((hi & 0x0F) << 4) | (lo & 0x0F)) as u8;

        let mut p = derive_flags(p, result);
        p.set(Status::CARRY, carry_out);
        p.set(Status::OVERFLOW, (a ^ result) & (b ^ result) & 0x80 != 0);
        (result, p)
    } else {
        let sum = a as u16 + b as u16 + carry_in;
        let result = sum as u8;

        let mut p = derive_flags(p, result);
        p.set(Status::CARRY, sum > 0xFF);
        p.set(Status::OVERFLOW, (a ^ result) & (b ^ result) & 0x80 != 0);
        (result, p)
    }
}

/// Subtracts `a - b - (1 - carry)`, 6502-style: the carry flag means
/// "no borrow".
///
/// Carry is set on return when no borrow was needed. Overflow is set when
/// the operands differ in sign and the result's sign differs from `a`. The
/// decimal-mode path applies the analogous nibble-wise borrow propagation.
pub fn subtract_with_carry(p: Status, a: u8, b: u8) -> (u8, Status) {
    let borrow_in = i16::from(!p.contains(Status::CARRY));

    if p.contains(Status::DECIMAL) {
        let mut lo = (a & 0x0F) as i16 - (b & 0x0F) as i16 - borrow_in;
        let mut hi = (a >> 4) as i16 - (b >> 4) as i16;
        if lo < 0 {
            lo += 10;
            hi -= 1;
        }
        let borrow_out = hi < 0;
        if borrow_out {
            hi += 10;
        }
        let result = ((((hi as u16) & 0x0F) << 4) | ((lo as u16) & 0x0F)) as u8;

        let mut p = derive_flags(p, result);
        p.set(Status::CARRY, !borrow_out);
        p.set(Status::OVERFLOW, (a ^ b) & (a ^ result) & 0x80 != 0);
        (result, p)
    } else {
        let diff = a as i16 - b as i16 - borrow_in;
        let result = (diff & 0xFF) as u8;

        let mut p = derive_flags(p, result);
        p.set(Status::CARRY, diff >= 0);
        p.set(Status::OVERFLOW, (a ^ b) & (a ^ result) & 0x80 != 0);
        (result, p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_flags_zero() {
        let p = derive_flags(Status::empty(), 0);
        assert!(p.contains(Status::ZERO));
        assert!(!p.contains(Status::NEGATIVE));
    }

    #[test]
    fn test_derive_flags_negative() {
        let p = derive_flags(Status::empty(), 0x80);
        assert!(!p.contains(Status::ZERO));
        assert!(p.contains(Status::NEGATIVE));
    }

    #[test]
    fn test_derive_flags_leaves_other_flags_alone() {
        let p = derive_flags(Status::CARRY | Status::DECIMAL, 0x01);
        assert!(p.contains(Status::CARRY));
        assert!(p.contains(Status::DECIMAL));
        assert!(!p.contains(Status::ZERO));
    }

    #[test]
    fn test_compute_branch_boundary() {
        // 0x7F is the largest forward offset; 0x80 flips to backward.
        assert_eq!(compute_branch(0xC000, 0x7F), 0xC07F);
        assert_eq!(compute_branch(0xC000, 0x80), 0xBF80);
        assert_eq!(compute_branch(0xC000, 0xFF), 0xBFFF);
    }

    #[test]
    fn test_add_binary_no_carry_in() {
        let (result, p) = add_with_carry(Status::empty(), 0x10, 0x20);
        assert_eq!(result, 0x30);
        assert!(!p.contains(Status::CARRY));
        assert!(!p.contains(Status::OVERFLOW));
    }

    #[test]
    fn test_add_binary_carry_out() {
        let (result, p) = add_with_carry(Status::empty(), 0xFF, 0x01);
        assert_eq!(result, 0x00);
        assert!(p.contains(Status::CARRY));
        assert!(p.contains(Status::ZERO));
    }

    #[test]
    fn test_add_binary_signed_overflow() {
        // 0x7F + 0x01 = 0x80: two positives yielding a negative.
        let (result, p) = add_with_carry(Status::empty(), 0x7F, 0x01);
        assert_eq!(result, 0x80);
        assert!(p.contains(Status::OVERFLOW));
        assert!(p.contains(Status::NEGATIVE));
    }

    #[test]
    fn test_add_carry_in() {
        let (result, _) = add_with_carry(Status::CARRY, 0x10, 0x20);
        assert_eq!(result, 0x31);
    }

    #[test]
    fn test_add_decimal() {
        // 0x19 + 0x01 = 0x20 in packed BCD (19 + 1 = 20).
        let (result, p) = add_with_carry(Status::DECIMAL, 0x19, 0x01);
        assert_eq!(result, 0x20);
        assert!(!p.contains(Status::CARRY));

        // 0x99 + 0x01 = 100: carry out, result 0x00.
        let (result, p) = add_with_carry(Status::DECIMAL, 0x99, 0x01);
        assert_eq!(result, 0x00);
        assert!(p.contains(Status::CARRY));
    }

    #[test]
    fn test_subtract_binary_no_borrow() {
        // Carry set means no borrow pending.
        let (result, p) = subtract_with_carry(Status::CARRY, 0x30, 0x10);
        assert_eq!(result, 0x20);
        assert!(p.contains(Status::CARRY));
    }

    #[test]
    fn test_subtract_binary_borrow() {
        let (result, p) = subtract_with_carry(Status::CARRY, 0x10, 0x20);
        assert_eq!(result, 0xF0);
        assert!(!p.contains(Status::CARRY));
        assert!(p.contains(Status::NEGATIVE));
    }

    #[test]
    fn test_subtract_with_pending_borrow() {
        // Carry clear: subtract one extra.
        let (result, _) = subtract_with_carry(Status::empty(), 0x30, 0x10);
        assert_eq!(result, 0x1F);
    }

    #[test]
    fn test_subtract_decimal() {
        // 0x20 - 0x01 = 0x19 in packed BCD.
        let (result, p) = subtract_with_carry(Status::CARRY | Status::DECIMAL, 0x20, 0x01);
        assert_eq!(result, 0x19);
        assert!(p.contains(Status::CARRY));
    }
}
