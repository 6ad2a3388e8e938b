use serde::{Deserialize, Serialize};

/// How a bare numeric literal is stored. The cursor always advances by 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawWordPolicy {
    /// Full 16-bit word, high byte first.
    #[default]
    FullWord,
    /// Low byte only at the cursor; the following byte is left untouched.
    LowByte,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HexStyle {
    /// Words up to the last non-zero one, then a single `0000` line.
    #[default]
    Sentinel,
    /// Every word of the 64 KiB image.
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AsmConfig {
    pub raw_words: RawWordPolicy,
    pub hex: HexStyle,
}
