use std::str::SplitWhitespace;

use tracing::{debug, trace};

use crate::encode::{Instruction, BRANCH_LEN};
use crate::error::{AsmError, Result};
use crate::isa::{BranchOp, Opcode};
use crate::number;
use crate::operand::{self, Operand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Moves the address cursor; emits nothing.
    Origin(u16),
    /// Takes the cursor value in pass 1; emits nothing.
    Label(String),
    Instr(Instruction),
    /// Displacement is resolved in pass 2.
    Branch { op: BranchOp, target: String },
    /// Bare literal outside any instruction.
    Word(u16),
}

impl TokenKind {
    /// Bytes this token advances the cursor by.
    pub fn size(&self) -> u32 {
        match self {
            TokenKind::Origin(_) | TokenKind::Label(_) => 0,
            TokenKind::Instr(i) => i.size(),
            TokenKind::Branch { .. } => BRANCH_LEN,
            TokenKind::Word(_) => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// 1-based source line.
    pub line: usize,
}

/// Split source into tokens. `//` starts a comment running to end of line.
pub fn tokenize(src: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    for (i, raw) in src.lines().enumerate() {
        let line = i + 1;
        let code = raw.find("//").map_or(raw, |p| &raw[..p]);
        let mut words = code.split_whitespace();
        while let Some(word) = words.next() {
            let kind = lex_word(word, &mut words, line)?;
            trace!(line, ?kind, "token");
            tokens.push(Token { kind, line });
        }
    }
    debug!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}

fn lex_word<'a>(word: &'a str, rest: &mut SplitWhitespace<'a>, line: usize) -> Result<TokenKind> {
    if word.eq_ignore_ascii_case("origin") {
        let arg = next_word(rest, word, 1, line)?;
        let value = number::find_number(arg).ok_or_else(|| AsmError::Lex {
            word: arg.to_string(),
            line,
        })?;
        return Ok(TokenKind::Origin(number::to_word(value, arg, line)?));
    }

    if let Some(name) = word.strip_suffix(':') {
        if name.is_empty() {
            return Err(AsmError::Lex { word: word.to_string(), line });
        }
        return Ok(TokenKind::Label(name.to_string()));
    }

    if let Some(op) = Opcode::from_mnemonic(word) {
        return instruction(op, word, rest, line);
    }

    if let Some(value) = number::parse_number(word) {
        return Ok(TokenKind::Word(number::to_word(value, word, line)?));
    }

    Err(AsmError::Lex { word: word.to_string(), line })
}

fn instruction(
    op: Opcode,
    mnemonic: &str,
    rest: &mut SplitWhitespace<'_>,
    line: usize,
) -> Result<TokenKind> {
    let expected = op.operand_count();
    let kind = match op {
        Opcode::Single(op) => {
            let dst = next_operand(rest, mnemonic, expected, line)?;
            TokenKind::Instr(Instruction::Single { op, dst })
        }
        Opcode::Double(op) => {
            let src = next_operand(rest, mnemonic, expected, line)?;
            let dst = next_operand(rest, mnemonic, expected, line)?;
            TokenKind::Instr(Instruction::Double { op, src, dst })
        }
        Opcode::Branch(op) => {
            let target = next_word(rest, mnemonic, expected, line)?;
            TokenKind::Branch { op, target: target.to_string() }
        }
        Opcode::Halt => TokenKind::Instr(Instruction::Halt),
    };
    Ok(kind)
}

fn next_word<'a>(
    rest: &mut SplitWhitespace<'a>,
    word: &str,
    expected: usize,
    line: usize,
) -> Result<&'a str> {
    rest.next().ok_or_else(|| AsmError::MissingOperand {
        word: word.to_string(),
        expected,
        line,
    })
}

// A trailing comma between operands is tolerated.
fn next_operand(
    rest: &mut SplitWhitespace<'_>,
    mnemonic: &str,
    expected: usize,
    line: usize,
) -> Result<Operand> {
    let word = next_word(rest, mnemonic, expected, line)?;
    operand::classify(word.trim_end_matches(','), line)
}
