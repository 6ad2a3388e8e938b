//! Instruction encoding. All multi-byte fields are big-endian.

use serde::{Deserialize, Serialize};

use crate::isa::{register_field, BranchOp, DoubleOp, Opcode, SingleOp};
use crate::operand::Operand;

/// A fully classified, encodable instruction. Branches carry their resolved
/// displacement; unresolved branches live in the token stream only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    Single { op: SingleOp, dst: Operand },
    Double { op: DoubleOp, src: Operand, dst: Operand },
    Branch { op: BranchOp, displacement: i16 },
    Halt,
}

pub const BRANCH_LEN: u32 = 4;
pub const HALT_LEN: u32 = 1;

impl Instruction {
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Single { op, .. } => Opcode::Single(*op),
            Instruction::Double { op, .. } => Opcode::Double(*op),
            Instruction::Branch { op, .. } => Opcode::Branch(*op),
            Instruction::Halt => Opcode::Halt,
        }
    }

    /// Encoded length in bytes; never depends on any address.
    pub fn size(&self) -> u32 {
        match self {
            Instruction::Single { dst, .. } => 2 + ext_len(dst),
            Instruction::Double { src, dst, .. } => 2 + ext_len(src) + ext_len(dst),
            Instruction::Branch { .. } => BRANCH_LEN,
            Instruction::Halt => HALT_LEN,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size() as usize);
        self.encode_into(&mut out);
        out
    }

    pub fn encode_into(&self, out: &mut Vec<u8>) {
        match self {
            Instruction::Single { op, dst } => {
                out.push(op.value());
                out.push((dst.mode.value() << 4) | register_field(dst.register));
                push_extension(out, dst);
            }
            Instruction::Double { op, src, dst } => {
                out.push((op.value() << 4) | src.mode.value());
                out.push(
                    (dst.mode.value() << 4)
                        | (register_field(src.register) << 2)
                        | register_field(dst.register),
                );
                push_extension(out, src);
                push_extension(out, dst);
            }
            Instruction::Branch { op, displacement } => {
                out.push(0x00);
                out.push(op.value());
                out.extend_from_slice(&displacement.to_be_bytes());
            }
            Instruction::Halt => out.push(0x00),
        }
    }
}

fn ext_len(operand: &Operand) -> u32 {
    if operand.mode.needs_extension() {
        2
    } else {
        0
    }
}

fn push_extension(out: &mut Vec<u8>, operand: &Operand) {
    if let Some(word) = operand.extension() {
        out.extend_from_slice(&word.to_be_bytes());
    }
}
