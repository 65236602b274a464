use std::fs::File;
use std::io::{self, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use huffarc::{verify, Codec, CodecConfig, CodecStats, HuffmanCodec};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Compress the input
    #[value(name = "c", alias = "compress")]
    Compress,
    /// Decompress the input
    #[value(name = "d", alias = "decompress")]
    Decompress,
}

#[derive(Parser, Debug)]
#[command(name = "huffarc")]
#[command(about = "Compress and decompress files with static Huffman coding")]
#[command(version)]
struct Args {
    /// Operation: c (compress) or d (decompress)
    mode: Mode,

    /// Input file (use - for stdin)
    input: PathBuf,

    /// Output file (use - for stdout)
    output: PathBuf,

    /// Show verbose statistics
    #[arg(short, long)]
    verbose: bool,

    /// Decode the compressed output again and compare CRC32 (compress only)
    #[arg(long)]
    verify: bool,

    /// Buffer size for I/O operations
    #[arg(long, default_value = "131072")]
    buffer_size: usize,
}

const EXIT_ERROR: u8 = 1;

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "huffarc=debug" } else { "huffarc=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn is_stdio(path: &Path) -> bool {
    path.to_str() == Some("-")
}

fn create_output(path: &Path) -> io::Result<Box<dyn Write>> {
    if is_stdio(path) {
        Ok(Box::new(io::stdout().lock()))
    } else {
        Ok(Box::new(File::create(path)?))
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = CodecConfig { buffer_size: args.buffer_size };
    let mut codec = HuffmanCodec::new(config.clone());

    let start = Instant::now();
    let stats = match args.mode {
        Mode::Compress => run_compress(&mut codec, args)?,
        Mode::Decompress => run_decompress(&mut codec, args)?,
    };
    let elapsed = start.elapsed();

    if args.verify {
        match args.mode {
            Mode::Compress if !is_stdio(&args.output) => {
                let checked = verify(File::open(&args.output)?, &stats, &config)?;
                debug!(crc32 = checked.crc32, "output verified");
                if args.verbose {
                    eprintln!("Verified: CRC32 0x{:08x} over {} bytes", checked.crc32, checked.output_bytes);
                }
            }
            Mode::Compress => warn!("--verify needs a file output, skipping"),
            Mode::Decompress => warn!("--verify only applies to compression, skipping"),
        }
    }

    if args.verbose {
        print_summary(args.mode, &stats, elapsed);
    }

    Ok(())
}

fn run_compress(codec: &mut HuffmanCodec, args: &Args) -> huffarc::Result<CodecStats> {
    // Compression reads its input twice, so stdin is buffered in memory
    if is_stdio(&args.input) {
        let mut data = Vec::new();
        io::stdin().lock().read_to_end(&mut data)?;
        let output = create_output(&args.output)?;
        codec.compress(Cursor::new(data), output)
    } else {
        let input = File::open(&args.input)?;
        let output = create_output(&args.output)?;
        codec.compress(input, output)
    }
}

fn run_decompress(codec: &mut HuffmanCodec, args: &Args) -> huffarc::Result<CodecStats> {
    let input: Box<dyn Read> = if is_stdio(&args.input) {
        Box::new(io::stdin().lock())
    } else {
        Box::new(File::open(&args.input)?)
    };
    let output = create_output(&args.output)?;
    codec.decompress(input, output)
}

fn print_summary(mode: Mode, stats: &CodecStats, elapsed: Duration) {
    let (label, uncompressed, compressed) = match mode {
        Mode::Compress => ("Compression", stats.input_bytes, stats.output_bytes),
        Mode::Decompress => ("Decompression", stats.output_bytes, stats.input_bytes),
    };

    eprintln!("{} complete:", label);
    eprintln!("  Input bytes:      {}", stats.input_bytes);
    eprintln!("  Output bytes:     {}", stats.output_bytes);
    eprintln!("  Symbols:          {}", stats.distinct_symbols);
    eprintln!("  Header bits:      {}", stats.header_bits);
    eprintln!("  Payload bits:     {}", stats.payload_bits);
    if uncompressed > 0 {
        eprintln!("  Ratio:            {:.3}", compressed as f64 / uncompressed as f64);
    }
    eprintln!("  CRC32:            0x{:08x}", stats.crc32);
    eprintln!("  Time:             {:.2?}", elapsed);
    eprintln!(
        "  Throughput:       {:.1} MB/s",
        uncompressed as f64 / elapsed.as_secs_f64() / 1_000_000.0
    );
}
