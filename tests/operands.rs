use asm16::isa::{AddressingMode, Register};
use asm16::number::{find_number, parse_number};
use asm16::operand::{classify, Operand};
use asm16::AsmError;

#[test]
fn literal_forms() {
    assert_eq!(parse_number("42"), Some(42));
    assert_eq!(parse_number("0x2A"), Some(42));
    assert_eq!(parse_number("0b101010"), Some(42));
    assert_eq!(parse_number("label"), None);
    // Whole-word parse rejects trailing junk; find does not.
    assert_eq!(parse_number("12ab"), None);
    assert_eq!(find_number("12ab"), Some(12));
    assert_eq!(find_number("#0x10"), Some(0x10));
}

#[test]
fn every_addressing_mode() {
    let cases = [
        ("r1", Operand::register(AddressingMode::Register, Register::R1)),
        ("AC", Operand::register(AddressingMode::Register, Register::R0)),
        ("(r2)", Operand::register(AddressingMode::RegisterIndirect, Register::R2)),
        ("(sp)+", Operand::register(AddressingMode::AutoIncrement, Register::R2)),
        ("-(r3)", Operand::register(AddressingMode::AutoDecrement, Register::R3)),
        ("4(r1)", Operand::index(4, Register::R1)),
        ("0x10(pc)", Operand::index(0x10, Register::R3)),
        ("0x10", Operand::absolute(0x10)),
        ("#0b11", Operand::immediate(3)),
    ];
    for (text, want) in cases {
        assert_eq!(classify(text, 1).unwrap(), want, "operand {text}");
    }
}

#[test]
fn absolute_and_immediate_have_no_register() {
    assert_eq!(classify("0x10", 1).unwrap().register, None);
    assert_eq!(classify("#5", 1).unwrap().register, None);
}

#[test]
fn register_names_are_not_matched_by_substring() {
    let err = classify("(pcx)", 4).unwrap_err();
    assert_eq!(
        err,
        AsmError::RegisterResolution { operand: "(pcx)".into(), line: 4 }
    );
    assert!(matches!(
        classify("8(foo)", 5),
        Err(AsmError::RegisterResolution { line: 5, .. })
    ));
}

#[test]
fn unclassifiable_operand() {
    for text in ["@r1", "#", "(r1", "r1+", "#label"] {
        assert!(
            matches!(classify(text, 2), Err(AsmError::OperandClassification { line: 2, .. })),
            "operand {text}"
        );
    }
}

#[test]
fn literal_wider_than_a_word() {
    assert_eq!(
        classify("#0x10000", 9).unwrap_err(),
        AsmError::LiteralOutOfRange { text: "#0x10000".into(), line: 9 }
    );
}
