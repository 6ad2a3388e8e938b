use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AsmError, Result};
use crate::isa::{AddressingMode, Register};
use crate::number;

/// A classified operand. `literal` is present exactly when the mode needs an
/// extension word; `register` is `None` for absolute and immediate operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operand {
    pub mode: AddressingMode,
    pub register: Option<Register>,
    pub literal: Option<u16>,
}

impl Operand {
    pub fn register(mode: AddressingMode, register: Register) -> Self {
        Self {
            mode,
            register: Some(register),
            literal: None,
        }
    }

    pub fn index(offset: u16, register: Register) -> Self {
        Self {
            mode: AddressingMode::Index,
            register: Some(register),
            literal: Some(offset),
        }
    }

    pub fn absolute(address: u16) -> Self {
        Self {
            mode: AddressingMode::Absolute,
            register: None,
            literal: Some(address),
        }
    }

    pub fn immediate(value: u16) -> Self {
        Self {
            mode: AddressingMode::Immediate,
            register: None,
            literal: Some(value),
        }
    }

    /// The extension word, if this operand carries one.
    pub fn extension(&self) -> Option<u16> {
        if self.mode.needs_extension() {
            Some(self.literal.unwrap_or(0))
        } else {
            None
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reg = self.register.unwrap_or(Register::R0);
        let lit = self.literal.unwrap_or(0);
        match self.mode {
            AddressingMode::Register => write!(f, "{reg}"),
            AddressingMode::RegisterIndirect => write!(f, "({reg})"),
            AddressingMode::AutoIncrement => write!(f, "({reg})+"),
            AddressingMode::AutoDecrement => write!(f, "-({reg})"),
            AddressingMode::Index => write!(f, "{lit:#x}({reg})"),
            AddressingMode::Absolute => write!(f, "{lit:#x}"),
            AddressingMode::Immediate => write!(f, "#{lit:#x}"),
        }
    }
}

/// Classify one operand word. First match wins:
/// `r`, `(r)`, `(r)+`, `-(r)`, `n(r)`, `n`, `#n`.
pub fn classify(word: &str, line: usize) -> Result<Operand> {
    if let Some(reg) = Register::from_name(word) {
        return Ok(Operand::register(AddressingMode::Register, reg));
    }

    let reg_mode = if let Some(name) = parenthesized(word) {
        Some((AddressingMode::RegisterIndirect, name))
    } else if let Some(name) = word.strip_suffix('+').and_then(parenthesized) {
        Some((AddressingMode::AutoIncrement, name))
    } else if let Some(name) = word.strip_prefix('-').and_then(parenthesized) {
        Some((AddressingMode::AutoDecrement, name))
    } else {
        None
    };
    if let Some((mode, name)) = reg_mode {
        let reg = resolve(name, word, line)?;
        return Ok(Operand::register(mode, reg));
    }

    if let Some(open) = word.find('(') {
        let (offset, rest) = word.split_at(open);
        if let (Some(value), Some(name)) = (number::parse_number(offset), parenthesized(rest)) {
            let reg = resolve(name, word, line)?;
            return Ok(Operand::index(number::to_word(value, word, line)?, reg));
        }
    }

    if let Some(value) = number::parse_number(word) {
        return Ok(Operand::absolute(number::to_word(value, word, line)?));
    }

    if let Some(value) = word.strip_prefix('#').and_then(number::parse_number) {
        return Ok(Operand::immediate(number::to_word(value, word, line)?));
    }

    Err(AsmError::OperandClassification {
        operand: word.to_string(),
        line,
    })
}

// `(name)` with a word-character name; returns the name.
fn parenthesized(s: &str) -> Option<&str> {
    let name = s.strip_prefix('(')?.strip_suffix(')')?;
    let is_word = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    is_word.then_some(name)
}

fn resolve(name: &str, operand: &str, line: usize) -> Result<Register> {
    Register::from_name(name).ok_or_else(|| AsmError::RegisterResolution {
        operand: operand.to_string(),
        line,
    })
}
