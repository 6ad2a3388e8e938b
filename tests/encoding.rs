use pretty_assertions::assert_eq;

use asm16::isa::{AddressingMode, BranchOp, DoubleOp, Register, SingleOp};
use asm16::operand::Operand;
use asm16::Instruction;

fn all_operands() -> Vec<Operand> {
    vec![
        Operand::register(AddressingMode::Register, Register::R1),
        Operand::register(AddressingMode::RegisterIndirect, Register::R2),
        Operand::register(AddressingMode::AutoIncrement, Register::R3),
        Operand::register(AddressingMode::AutoDecrement, Register::R0),
        Operand::index(0x20, Register::R1),
        Operand::absolute(0x1234),
        Operand::immediate(0xBEEF),
    ]
}

fn ext(o: &Operand) -> usize {
    if o.mode.needs_extension() { 2 } else { 0 }
}

#[test]
fn single_operand_lengths() {
    for dst in all_operands() {
        let i = Instruction::Single { op: SingleOp::Tst, dst };
        let bytes = i.encode();
        assert_eq!(bytes.len(), 2 + ext(&dst));
        assert_eq!(bytes.len() as u32, i.size());
    }
}

#[test]
fn double_operand_lengths() {
    for src in all_operands() {
        for dst in all_operands() {
            let i = Instruction::Double { op: DoubleOp::Sub, src, dst };
            assert_eq!(i.encode().len(), 2 + ext(&src) + ext(&dst));
            assert_eq!(i.encode().len() as u32, i.size());
        }
    }
}

#[test]
fn single_operand_fields() {
    // jmp 0x1234
    let jmp = Instruction::Single { op: SingleOp::Jmp, dst: Operand::absolute(0x1234) };
    assert_eq!(jmp.encode(), vec![0x06, 0x50, 0x12, 0x34]);

    // tst 0b1010(x)
    let tst = Instruction::Single { op: SingleOp::Tst, dst: Operand::index(0b1010, Register::R1) };
    assert_eq!(tst.encode(), vec![0x08, 0x41, 0x00, 0x0A]);

    // neg -(pc)
    let neg = Instruction::Single {
        op: SingleOp::Neg,
        dst: Operand::register(AddressingMode::AutoDecrement, Register::R3),
    };
    assert_eq!(neg.encode(), vec![0x04, 0x33]);
}

#[test]
fn double_operand_fields() {
    // add r1 r3
    let add = Instruction::Double {
        op: DoubleOp::Add,
        src: Operand::register(AddressingMode::Register, Register::R1),
        dst: Operand::register(AddressingMode::Register, Register::R3),
    };
    assert_eq!(add.encode(), vec![0x10, 0x07]);

    // exg (sp)+ -(pc)
    let exg = Instruction::Double {
        op: DoubleOp::Exg,
        src: Operand::register(AddressingMode::AutoIncrement, Register::R2),
        dst: Operand::register(AddressingMode::AutoDecrement, Register::R3),
    };
    assert_eq!(exg.encode(), vec![0x42, 0x3B]);

    // move #0x10 4(r2): source extension word first
    let mv = Instruction::Double {
        op: DoubleOp::Move,
        src: Operand::immediate(0x10),
        dst: Operand::index(4, Register::R2),
    };
    assert_eq!(mv.encode(), vec![0x36, 0x42, 0x00, 0x10, 0x00, 0x04]);
}

#[test]
fn branches_are_four_bytes_with_zero_prefix() {
    let ops = [BranchOp::Beq, BranchOp::Bne, BranchOp::Bmi, BranchOp::Bpl, BranchOp::Bls, BranchOp::Bhi];
    let values = [0x12, 0x02, 0x11, 0x01, 0x1A, 0x3A];
    for (op, value) in ops.into_iter().zip(values) {
        let bytes = Instruction::Branch { op, displacement: -8 }.encode();
        assert_eq!(bytes, vec![0x00, value, 0xFF, 0xF8]);
    }
}

#[test]
fn halt_is_one_zero_byte() {
    assert_eq!(Instruction::Halt.encode(), vec![0x00]);
    assert_eq!(Instruction::Halt.size(), 1);
}

#[test]
fn instruction_reports_its_opcode() {
    use asm16::isa::Opcode;
    let tst = Instruction::Single { op: SingleOp::Tst, dst: Operand::absolute(0) };
    assert_eq!(tst.opcode(), Opcode::Single(SingleOp::Tst));
    assert_eq!(Instruction::Branch { op: BranchOp::Bls, displacement: 0 }.opcode().mnemonic(), "bls");
    assert_eq!(asm16::listing::fmt_instruction(&Instruction::Halt), "halt");
}
