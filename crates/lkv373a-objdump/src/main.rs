use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use lkv373a_dis::{Disassembler, DisasmConfig, SymbolMap};
use lkv373a_objdump::{load_labels, load_raw_bin, render_range, RangeOpts};

#[derive(Parser, Debug)]
#[command(author, version, about = "LKV373A disassembler CLI", long_about=None)]
struct Cli {
    /// Load address for the binary in target address space
    #[arg(long, default_value_t = 0u64)]
    base: u64,
    /// Skip N bytes at start of file before loading
    #[arg(long, default_value_t = 0usize)]
    skip: usize,
    /// Input binary path
    #[arg(value_name = "BINFILE")]
    input: PathBuf,
    /// Limit bytes loaded (default: to EOF after --skip)
    #[arg(long)]
    len: Option<usize>,
    /// Decoder settings as JSON ({ "big_endian": bool, "track_registers": bool })
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Fetch words little-endian
    #[arg(long)]
    little_endian: bool,
    /// Do not track register values for load-address annotations
    #[arg(long)]
    no_track: bool,
    /// Import labels from JSON (Vec<{ addr, name }>)
    #[arg(long, value_name = "FILE")]
    labels: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List loaded segments (simple single-segment for raw .bin)
    Sections,
    /// Disassemble a range [start, end) in bytes
    Range {
        /// Start address (hex or dec)
        start: String,
        /// End address (hex or dec, exclusive)
        end: String,
        /// Show instruction bytes
        #[arg(long)]
        show_bytes: bool,
        /// Dump raw words instead of decoding
        #[arg(long)]
        data: bool,
        /// Write output to file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

fn parse_u64(s: &str) -> Result<u64> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Ok(u64::from_str_radix(hex, 16)?)
    } else {
        Ok(s.parse::<u64>()?)
    }
}

fn load_config(cli: &Cli) -> Result<DisasmConfig> {
    let mut cfg = match &cli.config {
        Some(path) => DisasmConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => DisasmConfig::default(),
    };
    if cli.little_endian {
        cfg.big_endian = false;
    }
    if cli.no_track {
        cfg.track_registers = false;
    }
    Ok(cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let cfg = load_config(&cli)?;
    let mut img = load_raw_bin(Path::new(&cli.input), cli.base, cli.skip, cli.len)?;
    let syms = match &cli.labels {
        Some(path) => load_labels(path)?,
        None => SymbolMap::new(),
    };
    info!(segments = img.segments.len(), labels = syms.len(), ?cfg, "image loaded");

    match cli.cmd {
        Command::Sections => {
            println!("{:<10} {:<12} {:<12} {:<6} {:<6}", "name", "start", "end", "perms", "kind");
            for s in &img.segments {
                println!("{:<10} {:#010x}   {:#010x}   {:<6} {:<6}", s.name, s.base, s.end(), s.perms, s.kind);
            }
        }
        Command::Range { start, end, show_bytes, data, out } => {
            let start = parse_u64(&start)?;
            let end = parse_u64(&end)?;
            anyhow::ensure!(end >= start, "end must be >= start");

            let mut dis = Disassembler::new(cfg);
            let buf = render_range(&mut img, &mut dis, &syms, start, end, RangeOpts { show_bytes, data });
            if let Some(path) = out { std::fs::write(path, buf)?; } else { print!("{}", buf); }
        }
    }

    Ok(())
}
