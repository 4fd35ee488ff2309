//! # Assembler Pass 1
//!
//! Walks the source a line at a time, recognizing directives, building the
//! label table, and encoding instructions at a running emission address.
//! Operand text is matched against addressing-mode shapes in a fixed
//! precedence order; the first shape that matches and that the registry has
//! a descriptor for wins.
//!
//! A forward label reference cannot be encoded yet, so the line is emitted
//! at its final length with placeholder operand bytes and left for pass 2.

use crate::addressing::AddressingMode;
use crate::opcodes::Registry;
use crate::state::DEFAULT_PC;

use super::{relative_offset, AssembleError, CompiledLine, LabelTable};

/// The byte-list pseudo-op mnemonic.
const BYTE_LIST: &str = "DCB";

/// Placeholder byte encoded for each unresolved operand byte.
const PLACEHOLDER: u8 = 0xFF;

pub(crate) struct Pass1<'r> {
    registry: &'r Registry,
    address: u16,
    lines: Vec<CompiledLine>,
    labels: LabelTable,
    lines_parsed: usize,
    memory_tags: usize,
}

impl<'r> Pass1<'r> {
    pub(crate) fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            address: DEFAULT_PC,
            lines: Vec::new(),
            labels: LabelTable::default(),
            lines_parsed: 0,
            memory_tags: 0,
        }
    }

    pub(crate) fn finish(self) -> (Vec<CompiledLine>, LabelTable, usize, usize) {
        (self.lines, self.labels, self.lines_parsed, self.memory_tags)
    }

    /// Processes one source line.
    pub(crate) fn line(&mut self, raw: &str) -> Result<(), AssembleError> {
        self.lines_parsed += 1;

        let stripped = raw.split(';').next().unwrap_or("");
        let mut text = stripped.trim().to_ascii_uppercase();
        if text.is_empty() {
            return Ok(());
        }

        if let Some(rest) = text.strip_prefix('*') {
            return self.origin(rest);
        }
        if text.contains('=') {
            return self.label_math(&text);
        }

        // Leading memory tags and label definitions, possibly several.
        while let Some(colon) = text.find(':') {
            let head = text[..colon].to_string();
            if head.is_empty() || head.contains(char::is_whitespace) {
                return Err(AssembleError::Syntax(text));
            }
            if let Some(value) = parse_number(&head) {
                if !(0..=0xFFFF).contains(&value) {
                    return Err(AssembleError::MemoryTagOutOfRange(head));
                }
                self.address = value as u16;
                self.memory_tags += 1;
            } else if is_identifier(&head) {
                self.labels.define(&head, self.address)?;
            } else {
                return Err(AssembleError::Syntax(head));
            }
            text = text[colon + 1..].trim().to_string();
            if text.is_empty() {
                return Ok(());
            }
        }

        self.instruction(&text)
    }

    /// `* = <address>`: repositions the emission address.
    fn origin(&mut self, rest: &str) -> Result<(), AssembleError> {
        let value_text = rest
            .trim()
            .strip_prefix('=')
            .ok_or_else(|| AssembleError::Syntax(format!("*{rest}")))?
            .trim();
        let value =
            parse_number(value_text).ok_or_else(|| AssembleError::Syntax(value_text.to_string()))?;
        if !(0..=0xFFFF).contains(&value) {
            return Err(AssembleError::OriginOutOfRange(value_text.to_string()));
        }
        self.address = value as u16;
        Ok(())
    }

    /// `NAME = OTHER +/- N`: defines a label relative to an earlier one.
    ///
    /// The new label is flagged as dependent on its base, which keeps it out
    /// of pass-1 operand lookups; operands referencing it resolve in pass 2.
    fn label_math(&mut self, text: &str) -> Result<(), AssembleError> {
        let (name, rhs) = text
            .split_once('=')
            .ok_or_else(|| AssembleError::Syntax(text.to_string()))?;
        let name = name.trim();
        if !is_identifier(name) {
            return Err(AssembleError::Syntax(text.to_string()));
        }

        let rhs = rhs.trim();
        let (base, sign, amount_text) = if let Some((base, amount)) = rhs.split_once('+') {
            (base, 1i64, amount)
        } else if let Some((base, amount)) = rhs.split_once('-') {
            (base, -1i64, amount)
        } else {
            return Err(AssembleError::Syntax(text.to_string()));
        };

        let base = base.trim();
        if !is_identifier(base) {
            return Err(AssembleError::Syntax(text.to_string()));
        }
        let amount = parse_number(amount_text.trim())
            .ok_or_else(|| AssembleError::Syntax(text.to_string()))?;

        let base_address = self
            .labels
            .find(base)
            .ok_or_else(|| AssembleError::BadLabelReference(base.to_string()))?
            .address;

        let offset = sign * amount;
        let address = i64::from(base_address) + offset;
        if !(0..=0xFFFF).contains(&address) {
            return Err(AssembleError::ValueOutOfRange(rhs.to_string()));
        }

        self.labels
            .define_dependent(name, address as u16, offset as i32, base)
    }

    /// Mnemonic + operand text.
    fn instruction(&mut self, text: &str) -> Result<(), AssembleError> {
        let (mnemonic, remainder) = match text.split_once(char::is_whitespace) {
            Some((mnemonic, remainder)) => (mnemonic, remainder.trim()),
            None => (text, ""),
        };

        if mnemonic == BYTE_LIST {
            return self.byte_list(remainder);
        }
        if !self.registry.is_mnemonic(mnemonic) {
            return Err(AssembleError::UnknownMnemonic(mnemonic.to_string()));
        }

        let mut parts = remainder.split_whitespace();
        let operand = parts.next().unwrap_or("");
        if let Some(extra) = parts.next() {
            return Err(AssembleError::ExtraneousText(extra.to_string()));
        }

        let line = self.encode(mnemonic, operand)?;
        self.emit(line);
        Ok(())
    }

    /// `DCB v1, v2, ...`: emits the literal byte values.
    fn byte_list(&mut self, remainder: &str) -> Result<(), AssembleError> {
        if remainder.is_empty() {
            return Err(AssembleError::EmptyByteList);
        }

        let mut bytes = Vec::new();
        for piece in remainder.split(',') {
            let piece = piece.trim();
            let value =
                parse_number(piece).ok_or_else(|| AssembleError::Syntax(piece.to_string()))?;
            if !(0..=0xFF).contains(&value) {
                return Err(AssembleError::ValueOutOfRange(piece.to_string()));
            }
            bytes.push(value as u8);
        }

        self.emit(CompiledLine {
            address: self.address,
            opcode: bytes[0],
            mode: AddressingMode::Single,
            bytes,
            resolved: true,
            label: None,
            high_byte: false,
        });
        Ok(())
    }

    // ========== Operand shape matching ==========

    fn encode(&self, mnemonic: &str, operand: &str) -> Result<CompiledLine, AssembleError> {
        use AddressingMode::*;

        if operand.is_empty() {
            return self.build(mnemonic, operand, Single, vec![], true, None, false);
        }
        if self.registry.supports(mnemonic, Relative) {
            return self.encode_branch(mnemonic, operand);
        }
        if let Some(rest) = operand.strip_prefix('#') {
            return self.encode_immediate(mnemonic, operand, rest);
        }
        if operand.starts_with('(') {
            return self.encode_indirect(mnemonic, operand);
        }
        self.encode_direct(mnemonic, operand)
    }

    /// Branch operand: a label, or a literal target address.
    fn encode_branch(&self, mnemonic: &str, operand: &str) -> Result<CompiledLine, AssembleError> {
        use AddressingMode::Relative;

        if let Some(value) = parse_number(operand) {
            if !(0..=0xFFFF).contains(&value) {
                return Err(AssembleError::ValueOutOfRange(operand.to_string()));
            }
            let offset = relative_offset(self.address, value as u16)?;
            return self.build(mnemonic, operand, Relative, vec![offset], true, None, false);
        }

        if !is_identifier(operand) {
            return Err(AssembleError::Syntax(operand.to_string()));
        }
        if let Some(label) = self.labels.lookup_direct(operand) {
            let offset = relative_offset(self.address, label.address)?;
            return self.build(mnemonic, operand, Relative, vec![offset], true, None, false);
        }

        self.build(
            mnemonic,
            operand,
            Relative,
            vec![PLACEHOLDER],
            false,
            Some(operand.to_string()),
            false,
        )
    }

    /// `#$HH`, `#DD`, `#<LABEL` (low byte), `#>LABEL` (high byte).
    fn encode_immediate(
        &self,
        mnemonic: &str,
        operand: &str,
        rest: &str,
    ) -> Result<CompiledLine, AssembleError> {
        use AddressingMode::Immediate;

        if let Some(value) = parse_number(rest) {
            if !(0..=0xFF).contains(&value) {
                return Err(AssembleError::ValueOutOfRange(operand.to_string()));
            }
            return self.build(mnemonic, operand, Immediate, vec![value as u8], true, None, false);
        }

        let (high_byte, name) = match rest.strip_prefix('<') {
            Some(name) => (false, name),
            None => match rest.strip_prefix('>') {
                Some(name) => (true, name),
                None => (false, rest),
            },
        };
        if !is_identifier(name) {
            return Err(AssembleError::Syntax(operand.to_string()));
        }

        if let Some(label) = self.labels.lookup_direct(name) {
            let byte = if high_byte {
                (label.address >> 8) as u8
            } else {
                label.address as u8
            };
            return self.build(mnemonic, operand, Immediate, vec![byte], true, None, high_byte);
        }

        self.build(
            mnemonic,
            operand,
            Immediate,
            vec![PLACEHOLDER],
            false,
            Some(name.to_string()),
            high_byte,
        )
    }

    /// `($ZZ,X)`, `($ZZ),Y`, and `($HHHH)`.
    fn encode_indirect(&self, mnemonic: &str, operand: &str) -> Result<CompiledLine, AssembleError> {
        use AddressingMode::*;

        let inner = &operand[1..];

        if let Some(body) = inner.strip_suffix(",X)") {
            let value = self.byte_value(operand, body)?;
            return self.build(mnemonic, operand, IndexedIndirectX, vec![value], true, None, false);
        }
        if let Some(body) = inner.strip_suffix("),Y") {
            let value = self.byte_value(operand, body)?;
            return self.build(mnemonic, operand, IndirectIndexedY, vec![value], true, None, false);
        }
        if let Some(body) = inner.strip_suffix(')') {
            let value =
                parse_number(body).ok_or_else(|| AssembleError::Syntax(operand.to_string()))?;
            if !(0..=0xFFFF).contains(&value) {
                return Err(AssembleError::ValueOutOfRange(operand.to_string()));
            }
            let address = value as u16;
            return self.build(
                mnemonic,
                operand,
                Indirect,
                vec![address as u8, (address >> 8) as u8],
                true,
                None,
                false,
            );
        }

        Err(AssembleError::Syntax(operand.to_string()))
    }

    /// Bare numbers and labels, with an optional `,X` or `,Y` index suffix.
    ///
    /// A numeric operand that fits in one byte prefers the zero-page
    /// encoding when the mnemonic has one; labels always take the absolute
    /// form so their length does not depend on where the label lands.
    fn encode_direct(&self, mnemonic: &str, operand: &str) -> Result<CompiledLine, AssembleError> {
        use AddressingMode::*;

        let (body, zp_mode, abs_mode) = if let Some(body) = operand.strip_suffix(",X") {
            (body, ZeroPageX, AbsoluteX)
        } else if let Some(body) = operand.strip_suffix(",Y") {
            (body, ZeroPageY, AbsoluteY)
        } else {
            (operand, ZeroPage, Absolute)
        };

        if let Some(value) = parse_number(body) {
            if !(0..=0xFFFF).contains(&value) {
                return Err(AssembleError::ValueOutOfRange(operand.to_string()));
            }
            if value <= 0xFF && self.registry.supports(mnemonic, zp_mode) {
                return self.build(mnemonic, operand, zp_mode, vec![value as u8], true, None, false);
            }
            let address = value as u16;
            return self.build(
                mnemonic,
                operand,
                abs_mode,
                vec![address as u8, (address >> 8) as u8],
                true,
                None,
                false,
            );
        }

        if !is_identifier(body) {
            return Err(AssembleError::Syntax(operand.to_string()));
        }
        if let Some(label) = self.labels.lookup_direct(body) {
            let address = label.address;
            return self.build(
                mnemonic,
                operand,
                abs_mode,
                vec![address as u8, (address >> 8) as u8],
                true,
                None,
                false,
            );
        }

        self.build(
            mnemonic,
            operand,
            abs_mode,
            vec![PLACEHOLDER, PLACEHOLDER],
            false,
            Some(body.to_string()),
            false,
        )
    }

    fn byte_value(&self, operand: &str, body: &str) -> Result<u8, AssembleError> {
        let value = parse_number(body).ok_or_else(|| AssembleError::Syntax(operand.to_string()))?;
        if !(0..=0xFF).contains(&value) {
            return Err(AssembleError::ValueOutOfRange(operand.to_string()));
        }
        Ok(value as u8)
    }

    /// Finishes a line: the registry must have a descriptor for the matched
    /// (mnemonic, mode) pair, or the shape is unsupported for this mnemonic.
    fn build(
        &self,
        mnemonic: &str,
        operand: &str,
        mode: AddressingMode,
        operand_bytes: Vec<u8>,
        resolved: bool,
        label: Option<String>,
        high_byte: bool,
    ) -> Result<CompiledLine, AssembleError> {
        let descriptor = self.registry.lookup(mnemonic, mode).ok_or_else(|| {
            AssembleError::UnsupportedMode(format!("{mnemonic} {operand}").trim().to_string())
        })?;

        let mut bytes = vec![descriptor.opcode];
        bytes.extend(operand_bytes);
        debug_assert_eq!(bytes.len(), descriptor.size as usize);

        Ok(CompiledLine {
            address: self.address,
            opcode: descriptor.opcode,
            mode,
            bytes,
            resolved,
            label,
            high_byte,
        })
    }

    fn emit(&mut self, line: CompiledLine) {
        self.address = line.address.wrapping_add(line.bytes.len() as u16);
        self.lines.push(line);
    }
}

/// Parses `$HEX` or decimal text. Anything else is not a number.
fn parse_number(text: &str) -> Option<i64> {
    if let Some(hex) = text.strip_prefix('$') {
        i64::from_str_radix(hex, 16).ok()
    } else if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        text.parse().ok()
    } else {
        None
    }
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assemble_line(line: &str) -> Result<Vec<CompiledLine>, AssembleError> {
        let registry = Registry::new();
        let mut pass1 = Pass1::new(&registry);
        pass1.line(line)?;
        Ok(pass1.finish().0)
    }

    #[test]
    fn test_parse_number_hex_and_decimal() {
        assert_eq!(parse_number("$C000"), Some(0xC000));
        assert_eq!(parse_number("255"), Some(255));
        assert_eq!(parse_number("$"), None);
        assert_eq!(parse_number("12AB"), None);
        assert_eq!(parse_number("LABEL"), None);
    }

    #[test]
    fn test_small_number_prefers_zero_page() {
        let lines = assemble_line("LDA $10").unwrap();
        assert_eq!(lines[0].bytes, vec![0xA5, 0x10]);
        assert_eq!(lines[0].mode, AddressingMode::ZeroPage);
    }

    #[test]
    fn test_large_number_takes_absolute() {
        let lines = assemble_line("LDA $0200").unwrap();
        assert_eq!(lines[0].bytes, vec![0xAD, 0x00, 0x02]);
        assert_eq!(lines[0].mode, AddressingMode::Absolute);
    }

    #[test]
    fn test_indexed_indirect_forms() {
        let lines = assemble_line("LDA ($30,X)").unwrap();
        assert_eq!(lines[0].bytes, vec![0xA1, 0x30]);

        let lines = assemble_line("LDA ($30),Y").unwrap();
        assert_eq!(lines[0].bytes, vec![0xB1, 0x30]);
    }

    #[test]
    fn test_indirect_jump() {
        let lines = assemble_line("JMP ($C05F)").unwrap();
        assert_eq!(lines[0].bytes, vec![0x6C, 0x5F, 0xC0]);
    }

    #[test]
    fn test_byte_list_emits_literal_bytes() {
        let lines = assemble_line("DCB 1, 2, $FF").unwrap();
        assert_eq!(lines[0].bytes, vec![0x01, 0x02, 0xFF]);
        assert!(lines[0].resolved);
    }

    #[test]
    fn test_byte_list_rejects_empty_and_oversized() {
        assert_eq!(assemble_line("DCB"), Err(AssembleError::EmptyByteList));
        assert!(matches!(
            assemble_line("DCB 256"),
            Err(AssembleError::ValueOutOfRange(_))
        ));
    }

    #[test]
    fn test_immediate_value_must_fit_a_byte() {
        assert!(matches!(
            assemble_line("LDA #$100"),
            Err(AssembleError::ValueOutOfRange(_))
        ));
    }

    #[test]
    fn test_store_rejects_immediate_shape() {
        assert!(matches!(
            assemble_line("STA #$10"),
            Err(AssembleError::UnsupportedMode(_))
        ));
    }

    #[test]
    fn test_trailing_text_is_extraneous() {
        assert_eq!(
            assemble_line("LDA #$10 garbage"),
            Err(AssembleError::ExtraneousText("GARBAGE".to_string()))
        );
    }

    #[test]
    fn test_comments_and_case_are_ignored() {
        let lines = assemble_line("  lda #$10  ; load it").unwrap();
        assert_eq!(lines[0].bytes, vec![0xA9, 0x10]);
    }

    #[test]
    fn test_unknown_mnemonic() {
        assert_eq!(
            assemble_line("XYZ"),
            Err(AssembleError::UnknownMnemonic("XYZ".to_string()))
        );
    }

    #[test]
    fn test_origin_out_of_range() {
        assert!(matches!(
            assemble_line("* = $10000"),
            Err(AssembleError::OriginOutOfRange(_))
        ));
    }

    #[test]
    fn test_memory_tag_out_of_range() {
        assert!(matches!(
            assemble_line("$10000: ASL"),
            Err(AssembleError::MemoryTagOutOfRange(_))
        ));
    }

    #[test]
    fn test_forward_reference_emits_placeholders() {
        let lines = assemble_line("LDA TARGET").unwrap();
        assert!(!lines[0].resolved);
        assert_eq!(lines[0].label.as_deref(), Some("TARGET"));
        assert_eq!(lines[0].bytes, vec![0xAD, 0xFF, 0xFF]);
    }
}
