use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, trace};

use crate::config::{AsmConfig, RawWordPolicy};
use crate::encode::Instruction;
use crate::error::{AsmError, Result};
use crate::image::MemoryImage;
use crate::lexer::{tokenize, Token, TokenKind};
use crate::listing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Symbol {
    pub address: u16,
    /// Line of the defining label.
    pub line: usize,
}

/// Label name -> address. Filled once in pass 1, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    table: HashMap<String, Symbol>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SymbolOut<'a> {
    pub name: &'a str,
    pub address: u16,
    pub line: usize,
}

impl SymbolTable {
    pub fn define(&mut self, name: &str, address: u16, line: usize) -> Result<()> {
        if let Some(prev) = self.table.get(name) {
            return Err(AsmError::DuplicateLabel {
                label: name.to_string(),
                first: prev.address,
                line,
            });
        }
        self.table.insert(name.to_string(), Symbol { address, line });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<u16> {
        self.table.get(name).map(|s| s.address)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Symbols ordered by address, then name.
    pub fn sorted(&self) -> Vec<SymbolOut<'_>> {
        let mut out: Vec<SymbolOut<'_>> = self
            .table
            .iter()
            .map(|(name, s)| SymbolOut { name, address: s.address, line: s.line })
            .collect();
        out.sort_by(|a, b| (a.address, a.name).cmp(&(b.address, b.name)));
        out
    }
}

/// One emitted item, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placed {
    pub address: u16,
    pub bytes: Vec<u8>,
    pub line: usize,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct Assembly {
    pub image: MemoryImage,
    pub symbols: SymbolTable,
    pub placed: Vec<Placed>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Assembler {
    cfg: AsmConfig,
}

impl Assembler {
    pub fn new(cfg: AsmConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &AsmConfig {
        &self.cfg
    }

    pub fn assemble_source(&self, src: &str) -> Result<Assembly> {
        let tokens = tokenize(src)?;
        self.assemble(&tokens)
    }

    pub fn assemble(&self, tokens: &[Token]) -> Result<Assembly> {
        let symbols = assign_addresses(tokens)?;
        let (image, placed) = self.emit(tokens, &symbols)?;
        Ok(Assembly { image, symbols, placed })
    }

    /// Pass 2: resolve branch displacements and write every emitting token.
    fn emit(&self, tokens: &[Token], symbols: &SymbolTable) -> Result<(MemoryImage, Vec<Placed>)> {
        let mut image = MemoryImage::new();
        let mut placed = Vec::new();
        let mut cursor: u32 = 0;
        for tok in tokens {
            let start = cursor;
            let (bytes, text) = match &tok.kind {
                TokenKind::Origin(addr) => {
                    cursor = u32::from(*addr);
                    continue;
                }
                TokenKind::Label(_) => continue,
                TokenKind::Word(value) => {
                    let bytes = match self.cfg.raw_words {
                        RawWordPolicy::FullWord => value.to_be_bytes().to_vec(),
                        RawWordPolicy::LowByte => vec![(*value & 0xFF) as u8],
                    };
                    (bytes, format!("{value:#06x}"))
                }
                TokenKind::Instr(instr) => (instr.encode(), listing::fmt_instruction(instr)),
                TokenKind::Branch { op, target } => {
                    let label = symbols.get(target).ok_or_else(|| AsmError::UndefinedLabel {
                        label: target.clone(),
                        line: tok.line,
                    })?;
                    let after = start + tok.kind.size();
                    let displacement = branch_displacement(label, after);
                    trace!(line = tok.line, %target, label, displacement, "branch resolved");
                    let instr = Instruction::Branch { op: *op, displacement };
                    (instr.encode(), listing::fmt_branch(*op, target, displacement))
                }
            };
            image.write_bytes(start, &bytes, tok.line)?;
            cursor = start + tok.kind.size();
            placed.push(Placed {
                address: start as u16,
                bytes,
                line: tok.line,
                text,
            });
        }
        debug!(items = placed.len(), "pass 2 emitted");
        Ok((image, placed))
    }
}

/// Pass 1: give every label the cursor value at its position.
pub fn assign_addresses(tokens: &[Token]) -> Result<SymbolTable> {
    let mut symbols = SymbolTable::default();
    let mut cursor: u32 = 0;
    for tok in tokens {
        match &tok.kind {
            TokenKind::Origin(addr) => cursor = u32::from(*addr),
            TokenKind::Label(name) => {
                let address = u16::try_from(cursor).map_err(|_| AsmError::ImageOverflow {
                    address: cursor,
                    len: 0,
                    line: tok.line,
                })?;
                trace!(%name, address, "label");
                symbols.define(name, address, tok.line)?;
            }
            kind => cursor += kind.size(),
        }
    }
    debug!(labels = symbols.len(), end = cursor, "pass 1 assigned addresses");
    Ok(symbols)
}

/// Displacement from the address after the branch, minus the fixed 2-byte
/// correction. Wraps to 16 bits like all address arithmetic here.
pub fn branch_displacement(label: u16, after: u32) -> i16 {
    (i64::from(label) - i64::from(after) - 2) as i16
}

/// Assemble with the default configuration.
pub fn assemble(src: &str) -> Result<Assembly> {
    Assembler::default().assemble_source(src)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_label_keeps_first_address() {
        let err = assemble("a: halt\na: halt").unwrap_err();
        assert_eq!(
            err,
            AsmError::DuplicateLabel { label: "a".into(), first: 0, line: 2 }
        );
    }

    #[test]
    fn displacement_wraps_to_sixteen_bits() {
        assert_eq!(branch_displacement(0, 6), -8);
        assert_eq!(branch_displacement(0xFFF0, 4), 0xFFEA_u16 as i16);
    }
}
