use std::fmt;

use serde::{Deserialize, Serialize};

/// General purpose registers. `ac`, `x`, `sp` and `pc` are aliases for r0..r3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Register {
    R0 = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
}

const REGISTER_NAMES: &[(&str, Register)] = &[
    ("r0", Register::R0),
    ("r1", Register::R1),
    ("r2", Register::R2),
    ("r3", Register::R3),
    ("ac", Register::R0),
    ("x", Register::R1),
    ("sp", Register::R2),
    ("pc", Register::R3),
];

impl Register {
    /// Whole-name lookup, case-insensitive. `"pcx"` is not `pc`.
    pub fn from_name(name: &str) -> Option<Register> {
        REGISTER_NAMES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, r)| r)
    }

    pub fn value(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.value())
    }
}

/// Register field of an encoded operand; absolute and immediate operands carry none.
pub fn register_field(reg: Option<Register>) -> u8 {
    reg.map_or(0, Register::value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressingMode {
    /// `r1`
    Register = 0,
    /// `(r1)`
    RegisterIndirect = 1,
    /// `(r1)+`
    AutoIncrement = 2,
    /// `-(r1)`
    AutoDecrement = 3,
    /// `4(r1)`
    Index = 4,
    /// `0x10`
    Absolute = 5,
    /// `#0x10`
    Immediate = 6,
}

impl AddressingMode {
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Index, absolute and immediate operands append a 16-bit extension word.
    pub fn needs_extension(self) -> bool {
        matches!(
            self,
            AddressingMode::Index | AddressingMode::Absolute | AddressingMode::Immediate
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SingleOp {
    Clr = 0x01,
    Inc = 0x02,
    Dec = 0x03,
    Neg = 0x04,
    Comp = 0x05,
    Jmp = 0x06,
    Jsr = 0x07,
    Tst = 0x08,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoubleOp {
    Add = 0x1,
    Sub = 0x2,
    Move = 0x3,
    Exg = 0x4,
    Or = 0x5,
    And = 0x6,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BranchOp {
    Beq = 0b01_0010,
    Bne = 0b00_0010,
    Bmi = 0b01_0001,
    Bpl = 0b00_0001,
    Bls = 0b01_1010,
    Bhi = 0b11_1010,
}

impl SingleOp {
    pub fn value(self) -> u8 {
        self as u8
    }
}

impl DoubleOp {
    pub fn value(self) -> u8 {
        self as u8
    }
}

impl BranchOp {
    pub fn value(self) -> u8 {
        self as u8
    }
}

/// The whole opcode catalog as one sum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    Single(SingleOp),
    Double(DoubleOp),
    Branch(BranchOp),
    Halt,
}

impl Opcode {
    /// Case-insensitive mnemonic lookup.
    pub fn from_mnemonic(word: &str) -> Option<Opcode> {
        TABLE
            .iter()
            .find(|d| d.mnemonic.eq_ignore_ascii_case(word))
            .map(|d| d.op)
    }

    pub fn mnemonic(self) -> &'static str {
        TABLE
            .iter()
            .find(|d| d.op == self)
            .map_or("???", |d| d.mnemonic)
    }

    /// Number of operand words the parser consumes after the mnemonic.
    pub fn operand_count(self) -> usize {
        match self {
            Opcode::Single(_) | Opcode::Branch(_) => 1,
            Opcode::Double(_) => 2,
            Opcode::Halt => 0,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub op: Opcode,
    pub mnemonic: &'static str,
}

pub const TABLE: &[InstrDesc] = &[
    InstrDesc {
        op: Opcode::Single(SingleOp::Clr),
        mnemonic: "clr",
    },
    InstrDesc {
        op: Opcode::Single(SingleOp::Inc),
        mnemonic: "inc",
    },
    InstrDesc {
        op: Opcode::Single(SingleOp::Dec),
        mnemonic: "dec",
    },
    InstrDesc {
        op: Opcode::Single(SingleOp::Neg),
        mnemonic: "neg",
    },
    InstrDesc {
        op: Opcode::Single(SingleOp::Comp),
        mnemonic: "comp",
    },
    InstrDesc {
        op: Opcode::Single(SingleOp::Jmp),
        mnemonic: "jmp",
    },
    InstrDesc {
        op: Opcode::Single(SingleOp::Jsr),
        mnemonic: "jsr",
    },
    InstrDesc {
        op: Opcode::Single(SingleOp::Tst),
        mnemonic: "tst",
    },
    InstrDesc {
        op: Opcode::Double(DoubleOp::Add),
        mnemonic: "add",
    },
    InstrDesc {
        op: Opcode::Double(DoubleOp::Sub),
        mnemonic: "sub",
    },
    InstrDesc {
        op: Opcode::Double(DoubleOp::Move),
        mnemonic: "move",
    },
    InstrDesc {
        op: Opcode::Double(DoubleOp::Exg),
        mnemonic: "exg",
    },
    InstrDesc {
        op: Opcode::Double(DoubleOp::Or),
        mnemonic: "or",
    },
    InstrDesc {
        op: Opcode::Double(DoubleOp::And),
        mnemonic: "and",
    },
    InstrDesc {
        op: Opcode::Branch(BranchOp::Beq),
        mnemonic: "beq",
    },
    InstrDesc {
        op: Opcode::Branch(BranchOp::Bne),
        mnemonic: "bne",
    },
    InstrDesc {
        op: Opcode::Branch(BranchOp::Bmi),
        mnemonic: "bmi",
    },
    InstrDesc {
        op: Opcode::Branch(BranchOp::Bpl),
        mnemonic: "bpl",
    },
    InstrDesc {
        op: Opcode::Branch(BranchOp::Bls),
        mnemonic: "bls",
    },
    InstrDesc {
        op: Opcode::Branch(BranchOp::Bhi),
        mnemonic: "bhi",
    },
    InstrDesc {
        op: Opcode::Halt,
        mnemonic: "halt",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_aliases_resolve_by_whole_name() {
        assert_eq!(Register::from_name("PC"), Some(Register::R3));
        assert_eq!(Register::from_name("x"), Some(Register::R1));
        assert_eq!(Register::from_name("pcx"), None);
        assert_eq!(Register::from_name("r4"), None);
    }

    #[test]
    fn mnemonics_round_trip_through_table() {
        for d in TABLE {
            assert_eq!(Opcode::from_mnemonic(&d.mnemonic.to_uppercase()), Some(d.op));
            assert_eq!(d.op.mnemonic(), d.mnemonic);
        }
        assert_eq!(Opcode::from_mnemonic("rts"), None);
    }
}
