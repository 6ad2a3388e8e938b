use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use asm16::listing::render;
use asm16::{AsmConfig, Assembler, HexStyle, RawWordPolicy};

#[derive(Parser, Debug)]
#[command(author, version, about = "Assemble source into a hex-per-line memory image", long_about = None)]
struct Opts {
    /// Assembly source file
    #[arg(value_name = "SOURCE")]
    input: PathBuf,
    /// Output file, one 4-digit hex word per line
    #[arg(value_name = "OUTFILE")]
    output: PathBuf,
    /// Load settings from JSON ({ "raw_words": ..., "hex": ... })
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Store bare literals as their low byte only
    #[arg(long)]
    legacy_raw_words: bool,
    /// Write all 32768 words instead of stopping after the last non-zero one
    #[arg(long)]
    full_image: bool,
    /// Print an address/bytes/source listing to stdout
    #[arg(long)]
    listing: bool,
    /// Export the symbol table as JSON (Vec<{ name, address, line }>)
    #[arg(long, value_name = "FILE")]
    symbols: Option<PathBuf>,
}

fn load_config(opts: &Opts) -> Result<AsmConfig> {
    let mut cfg = match &opts.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => AsmConfig::default(),
    };
    if opts.legacy_raw_words {
        cfg.raw_words = RawWordPolicy::LowByte;
    }
    if opts.full_image {
        cfg.hex = HexStyle::Full;
    }
    Ok(cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();

    let src = fs::read_to_string(&opts.input)
        .with_context(|| format!("reading {}", opts.input.display()))?;
    let assembler = Assembler::new(load_config(&opts)?);
    let asm = assembler
        .assemble_source(&src)
        .with_context(|| format!("assembling {}", opts.input.display()))?;
    info!(labels = asm.symbols.len(), items = asm.placed.len(), "assembled");

    // Only touch the output once assembly succeeded.
    let text = asm.image.to_hex_string(assembler.config().hex);
    fs::write(&opts.output, text)
        .with_context(|| format!("writing {}", opts.output.display()))?;

    if let Some(path) = &opts.symbols {
        let json = serde_json::to_string_pretty(&asm.symbols.sorted())?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    }
    if opts.listing {
        print!("{}", render(&asm.placed));
    }
    Ok(())
}
