use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use rublosc::{CodecId, ShuffleMode};

// ── CLI definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "rublosc",
    about = "Blosc v2 compressor — shuffle-accelerated compression for typed binary data",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file into a Blosc v2 frame
    Compress {
        /// Source file
        input: PathBuf,
        /// Destination frame file
        output: PathBuf,
        /// Codec: lz4 | lz4hc | snappy | zlib | zstd
        #[arg(short, long, default_value = "lz4")]
        codec: String,
        /// Compression level (1–9)
        #[arg(short, long, default_value_t = 5)]
        level: i32,
        /// Shuffle mode: none | shuffle | bitshuffle
        #[arg(short, long, default_value = "shuffle")]
        shuffle: String,
        /// Element size in bytes for the shuffle (e.g. 4 for float32)
        #[arg(short = 't', long, default_value_t = 4)]
        typesize: usize,
    },
    /// Decompress a Blosc v2 frame back to raw bytes
    Decompress {
        /// Source frame file
        input: PathBuf,
        /// Destination file
        output: PathBuf,
        /// Override the header's type size for the inverse shuffle (0 = use header)
        #[arg(short = 't', long, default_value_t = 0)]
        typesize: usize,
    },
    /// Print a frame's header fields and compression ratio
    Inspect {
        /// Frame file to inspect
        file: PathBuf,
    },
}

// ── Helpers ────────────────────────────────────────────────────────────────

fn codec_from_name(name: &str) -> anyhow::Result<CodecId> {
    match name {
        "lz4" => Ok(CodecId::LZ4),
        "lz4hc" => Ok(CodecId::LZ4HC),
        "snappy" => Ok(CodecId::SNAPPY),
        "zlib" => Ok(CodecId::ZLIB),
        "zstd" => Ok(CodecId::ZSTD),
        other => anyhow::bail!(
            "unknown codec '{}'. Valid options: lz4, lz4hc, snappy, zlib, zstd",
            other
        ),
    }
}

fn shuffle_from_name(name: &str) -> anyhow::Result<ShuffleMode> {
    match name {
        "none" | "noshuffle" => Ok(ShuffleMode::None),
        "shuffle" | "byte" => Ok(ShuffleMode::Byte),
        "bitshuffle" | "bit" => Ok(ShuffleMode::Bit),
        other => anyhow::bail!(
            "unknown shuffle mode '{}'. Valid options: none, shuffle, bitshuffle",
            other
        ),
    }
}

fn human_bytes(n: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut v = n as f64;
    let mut unit = 0;
    while v >= 1024.0 && unit < UNITS.len() - 1 {
        v /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", n)
    } else {
        format!("{:.2} {}", v, UNITS[unit])
    }
}

fn throughput(bytes: usize, elapsed: std::time::Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return "-".to_string();
    }
    format!("{}/s", human_bytes((bytes as f64 / secs) as u64))
}

// ── Subcommand implementations ─────────────────────────────────────────────

fn run_compress(
    input: PathBuf,
    output: PathBuf,
    codec_name: &str,
    level: i32,
    shuffle_name: &str,
    typesize: usize,
) -> anyhow::Result<()> {
    let codec = codec_from_name(codec_name)?;
    let shuffle = shuffle_from_name(shuffle_name)?;

    let data = fs::read(&input).with_context(|| format!("reading {}", input.display()))?;

    let start = Instant::now();
    let frame = rublosc::compress(&data, codec, level, shuffle, typesize)
        .with_context(|| format!("compressing {}", input.display()))?;
    let elapsed = start.elapsed();

    fs::write(&output, &frame).with_context(|| format!("writing {}", output.display()))?;

    println!(
        "{} -> {}  ({} -> {}, ratio {:.2}x, {} in {:.1?})",
        input.display(),
        output.display(),
        human_bytes(data.len() as u64),
        human_bytes(frame.len() as u64),
        data.len() as f64 / frame.len() as f64,
        throughput(data.len(), elapsed),
        elapsed
    );
    Ok(())
}

fn run_decompress(input: PathBuf, output: PathBuf, typesize: usize) -> anyhow::Result<()> {
    let frame = fs::read(&input).with_context(|| format!("reading {}", input.display()))?;

    let start = Instant::now();
    let data = rublosc::decompress_with_size(&frame, typesize)
        .with_context(|| format!("decompressing {}", input.display()))?;
    let elapsed = start.elapsed();

    fs::write(&output, &data).with_context(|| format!("writing {}", output.display()))?;

    println!(
        "{} -> {}  ({} -> {}, {} in {:.1?})",
        input.display(),
        output.display(),
        human_bytes(frame.len() as u64),
        human_bytes(data.len() as u64),
        throughput(data.len(), elapsed),
        elapsed
    );
    Ok(())
}

fn run_inspect(file: PathBuf) -> anyhow::Result<()> {
    let frame = fs::read(&file).with_context(|| format!("reading {}", file.display()))?;
    let header = rublosc::info(&frame)
        .with_context(|| format!("parsing header of {}", file.display()))?;

    println!("{}", file.display());
    println!("  format version : {}", header.version);
    println!("  codec          : {}", header.codec);
    println!("  shuffle        : {}", header.shuffle_mode());
    println!("  memcpy         : {}", header.is_memcpy());
    println!("  typesize       : {}", header.typesize);
    println!(
        "  original size  : {} ({})",
        header.nbytes_orig,
        human_bytes(header.nbytes_orig as u64)
    );
    println!("  block size     : {}", header.block_size);
    println!(
        "  frame size     : {} ({})",
        header.nbytes_comp,
        human_bytes(header.nbytes_comp as u64)
    );
    if header.nbytes_comp > 0 {
        println!(
            "  ratio          : {:.2}x",
            header.nbytes_orig as f64 / header.nbytes_comp as f64
        );
    }
    if frame.len() as u64 != header.nbytes_comp as u64 {
        println!(
            "  note           : file holds {} bytes, header declares {}",
            frame.len(),
            header.nbytes_comp
        );
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Compress {
            input,
            output,
            codec,
            level,
            shuffle,
            typesize,
        } => run_compress(input, output, &codec, level, &shuffle, typesize),
        Commands::Decompress {
            input,
            output,
            typesize,
        } => run_decompress(input, output, typesize),
        Commands::Inspect { file } => run_inspect(file),
    }
}
