use std::io::{self, Write};

use crate::config::HexStyle;
use crate::error::{AsmError, Result};

/// Size of the addressable memory in bytes.
pub const MEMORY_SIZE: usize = 0x1_0000;

/// Flat, zero-initialized 64 KiB memory image.
#[derive(Clone, PartialEq, Eq)]
pub struct MemoryImage {
    mem: Vec<u8>,
}

impl Default for MemoryImage {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryImage")
            .field("used_words", &self.used_words())
            .finish()
    }
}

impl MemoryImage {
    pub fn new() -> Self {
        Self {
            mem: vec![0; MEMORY_SIZE],
        }
    }

    /// Copy `bytes` to `addr`. Fails without writing if the range leaves memory.
    pub fn write_bytes(&mut self, addr: u32, bytes: &[u8], line: usize) -> Result<()> {
        let start = addr as usize;
        let end = start + bytes.len();
        if end > MEMORY_SIZE {
            return Err(AsmError::ImageOverflow {
                address: addr,
                len: bytes.len(),
                line,
            });
        }
        self.mem[start..end].copy_from_slice(bytes);
        Ok(())
    }

    pub fn read_u8(&self, addr: u16) -> u8 {
        self.mem[addr as usize]
    }

    /// Big-endian word at `addr`; the byte after 0xFFFF reads as zero.
    pub fn read_u16(&self, addr: u16) -> u16 {
        let hi = self.mem[addr as usize];
        let lo = self.mem.get(addr as usize + 1).copied().unwrap_or(0);
        u16::from_be_bytes([hi, lo])
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.mem
    }

    /// Words 0..=last non-zero word; at least one.
    pub fn used_words(&self) -> usize {
        self.mem
            .iter()
            .rposition(|&b| b != 0)
            .map_or(1, |last| last / 2 + 1)
    }

    /// Words in output order, including the trailing `0000` of `Sentinel`.
    fn hex_words(&self, style: HexStyle) -> impl Iterator<Item = u16> + '_ {
        let (words, sentinel) = match style {
            HexStyle::Sentinel => (self.used_words(), Some(0)),
            HexStyle::Full => (MEMORY_SIZE / 2, None),
        };
        self.mem
            .chunks_exact(2)
            .take(words)
            .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
            .chain(sentinel)
    }

    /// One `{:04X}` line per big-endian word at even addresses.
    pub fn write_hex<W: Write>(&self, style: HexStyle, mut out: W) -> io::Result<()> {
        for word in self.hex_words(style) {
            writeln!(out, "{word:04X}")?;
        }
        Ok(())
    }

    pub fn to_hex_string(&self, style: HexStyle) -> String {
        self.hex_words(style)
            .map(|word| format!("{word:04X}\n"))
            .collect()
    }
}
