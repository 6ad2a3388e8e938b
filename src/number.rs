//! Numeric literals: `0x1F` hex, `0b101` binary and plain decimal.
//!
//! Classes are tried in a fixed order (hex, binary, decimal) and the first
//! occurrence of the first class that matches wins. Prefixes and hex digits
//! are case-insensitive.

use crate::error::{AsmError, Result};

/// A literal found inside a word, with the byte range it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal {
    pub value: u32,
    pub start: usize,
    pub end: usize,
}

pub fn scan(text: &str) -> Option<Literal> {
    let lower = text.to_ascii_lowercase();
    let b = lower.as_bytes();
    scan_prefixed(b, b'x', 16)
        .or_else(|| scan_prefixed(b, b'b', 2))
        .or_else(|| scan_decimal(b))
}

/// Value of the first literal anywhere in `text`.
pub fn find_number(text: &str) -> Option<u32> {
    scan(text).map(|l| l.value)
}

/// Value of `text` only if the whole word is one literal.
pub fn parse_number(text: &str) -> Option<u32> {
    scan(text)
        .filter(|l| l.start == 0 && l.end == text.len())
        .map(|l| l.value)
}

/// Narrow a scanned value to a 16-bit word.
pub fn to_word(value: u32, text: &str, line: usize) -> Result<u16> {
    u16::try_from(value).map_err(|_| AsmError::LiteralOutOfRange {
        text: text.to_string(),
        line,
    })
}

fn scan_prefixed(b: &[u8], marker: u8, radix: u32) -> Option<Literal> {
    (0..b.len().saturating_sub(2)).find_map(|i| {
        if b[i] != b'0' || b[i + 1] != marker {
            return None;
        }
        let digits = digit_run(&b[i + 2..], radix);
        (digits > 0).then(|| Literal {
            value: fold(&b[i + 2..i + 2 + digits], radix),
            start: i,
            end: i + 2 + digits,
        })
    })
}

fn scan_decimal(b: &[u8]) -> Option<Literal> {
    let start = b.iter().position(u8::is_ascii_digit)?;
    let digits = digit_run(&b[start..], 10);
    Some(Literal {
        value: fold(&b[start..start + digits], 10),
        start,
        end: start + digits,
    })
}

fn digit_run(b: &[u8], radix: u32) -> usize {
    b.iter()
        .take_while(|&&c| (c as char).is_digit(radix))
        .count()
}

// Saturates so oversized literals still fail the 16-bit range check.
fn fold(digits: &[u8], radix: u32) -> u32 {
    digits.iter().fold(0u32, |acc, &c| {
        let d = (c as char).to_digit(radix).unwrap_or(0);
        acc.saturating_mul(radix).saturating_add(d)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_wins_over_embedded_binary_prefix() {
        assert_eq!(find_number("0x0b1"), Some(0xB1));
        assert_eq!(find_number("0B101"), Some(5));
        assert_eq!(find_number("0X1f"), Some(0x1F));
    }

    #[test]
    fn scan_reports_span() {
        let lit = scan("#0x10").unwrap();
        assert_eq!((lit.start, lit.end, lit.value), (1, 5, 0x10));
    }

    #[test]
    fn oversized_literal_saturates() {
        assert_eq!(find_number("99999999999"), Some(u32::MAX));
        assert!(to_word(u32::MAX, "99999999999", 3).is_err());
    }
}
