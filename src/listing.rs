use crate::assembler::Placed;
use crate::encode::Instruction;
use crate::isa::{BranchOp, Opcode};

pub fn fmt_instruction(i: &Instruction) -> String {
    let mn = i.opcode();
    match i {
        Instruction::Single { dst, .. } => format!("{mn} {dst}"),
        Instruction::Double { src, dst, .. } => format!("{mn} {src}, {dst}"),
        Instruction::Branch { displacement, .. } => format!("{mn} {}", signed_hex(*displacement)),
        Instruction::Halt => mn.to_string(),
    }
}

pub fn fmt_branch(op: BranchOp, target: &str, displacement: i16) -> String {
    format!("{} {} ({})", Opcode::Branch(op), target, signed_hex(displacement))
}

fn signed_hex(v: i16) -> String {
    if v < 0 {
        format!("-{:#x}", v.unsigned_abs())
    } else {
        format!("+{v:#x}")
    }
}

/// `AAAA: BB BB ..  text`, one line per emitted item.
pub fn render(placed: &[Placed]) -> String {
    let mut out = String::new();
    for p in placed {
        let bytes = p
            .bytes
            .iter()
            .map(|b| format!("{b:02X}"))
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&format!("{:04X}: {:<12}  {}\n", p.address, bytes, p.text));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::{AddressingMode, DoubleOp, Register};
    use crate::operand::Operand;

    #[test]
    fn double_operand_text_uses_source_syntax() {
        let i = Instruction::Double {
            op: DoubleOp::Move,
            src: Operand::immediate(0x10),
            dst: Operand::register(AddressingMode::AutoDecrement, Register::R2),
        };
        assert_eq!(fmt_instruction(&i), "move #0x10, -(r2)");
    }

    #[test]
    fn negative_displacement_is_signed() {
        assert_eq!(fmt_branch(BranchOp::Beq, "start", -8), "beq start (-0x8)");
    }
}
