//! # Assembler Pass 2
//!
//! Revisits every line pass 1 left unresolved and patches its operand
//! bytes from the completed label table. By this point every referenced
//! label must exist; a miss is a fatal undefined-label error.

use crate::addressing::AddressingMode;

use super::{relative_offset, AssembleError, CompiledLine, Label};

/// Patches all unresolved lines in place.
///
/// The patch shape follows the line's byte length: a 2-byte relative line
/// gets a branch offset, a 2-byte immediate line gets the label's low or
/// high address byte, and a 3-byte line gets the full little-endian
/// address.
pub(crate) fn patch_labels(
    lines: &mut [CompiledLine],
    labels: &[Label],
) -> Result<(), AssembleError> {
    for line in lines.iter_mut().filter(|line| !line.resolved) {
        let name = line
            .label
            .as_deref()
            .ok_or_else(|| AssembleError::Internal("unresolved line with no label".to_string()))?;
        let label = labels
            .iter()
            .find(|label| label.name == name)
            .ok_or_else(|| AssembleError::UndefinedLabel(name.to_string()))?;

        match (line.bytes.len(), line.mode) {
            (2, AddressingMode::Relative) => {
                line.bytes[1] = relative_offset(line.address, label.address)?;
            }
            (2, _) => {
                line.bytes[1] = if line.high_byte {
                    (label.address >> 8) as u8
                } else {
                    label.address as u8
                };
            }
            (3, _) => {
                line.bytes[1] = label.address as u8;
                line.bytes[2] = (label.address >> 8) as u8;
            }
            (length, _) => {
                return Err(AssembleError::Internal(format!(
                    "cannot patch a {length}-byte line"
                )));
            }
        }
        line.resolved = true;
    }
    Ok(())
}
