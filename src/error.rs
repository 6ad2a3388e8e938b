/// Every way an assembly run can fail. All of them abort the run.
///
/// `line` is the 1-based source line of the offending word.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    #[error("line {line}: unable to parse `{word}`")]
    Lex { word: String, line: usize },
    #[error("line {line}: operand `{operand}` matches no addressing mode")]
    OperandClassification { operand: String, line: usize },
    #[error("line {line}: no register named in operand `{operand}`")]
    RegisterResolution { operand: String, line: usize },
    #[error("line {line}: undefined label `{label}`")]
    UndefinedLabel { label: String, line: usize },
    #[error("line {line}: `{word}` expects {expected} operand(s)")]
    MissingOperand {
        word: String,
        expected: usize,
        line: usize,
    },
    #[error("line {line}: label `{label}` already defined at {first:#06x}")]
    DuplicateLabel {
        label: String,
        first: u16,
        line: usize,
    },
    #[error("line {line}: literal `{text}` does not fit in 16 bits")]
    LiteralOutOfRange { text: String, line: usize },
    #[error("line {line}: {len} byte(s) at {address:#x} run past the end of memory")]
    ImageOverflow {
        address: u32,
        len: usize,
        line: usize,
    },
}

impl AsmError {
    pub fn line(&self) -> usize {
        match self {
            AsmError::Lex { line, .. }
            | AsmError::OperandClassification { line, .. }
            | AsmError::RegisterResolution { line, .. }
            | AsmError::UndefinedLabel { line, .. }
            | AsmError::MissingOperand { line, .. }
            | AsmError::DuplicateLabel { line, .. }
            | AsmError::LiteralOutOfRange { line, .. }
            | AsmError::ImageOverflow { line, .. } => *line,
        }
    }
}

pub type Result<T, E = AsmError> = std::result::Result<T, E>;
