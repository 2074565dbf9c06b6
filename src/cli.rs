// Command-line interface for NanoZip.
//
// Explicit subcommands with long-form options: compress, decompress, info,
// bench (the built-in benchmark and self-check driver) and config.

use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::codec::decoder;
use crate::codec::encoder::{CompressOptions, TokenCounts, max_compressed_len};
use crate::format::checksum::crc32;
use crate::format::header::{HEADER_LEN, Header, MAGIC};
use crate::format::token::TokenReader;
use crate::hash::compare;
use crate::hash::config::{
    self, DEFAULT_WINDOW, HASH_BITS, MATCH_SEARCH_LIMIT, MAX_MATCH, MAX_WINDOW, MIN_MATCH,
    MIN_WINDOW,
};
use crate::io::{self as nzio, CompressStats, DecompressStats};

const BUF_SIZE: usize = 64 * 1024;

// ---------------------------------------------------------------------------
// Byte size parsing (supports K, M suffixes)
// ---------------------------------------------------------------------------

fn parse_byte_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty size string".into());
    }
    let (num_part, multiplier) = match s.as_bytes().last() {
        Some(b'k' | b'K') => (&s[..s.len() - 1], 1024u64),
        Some(b'm' | b'M') => (&s[..s.len() - 1], 1024 * 1024),
        _ => (s, 1u64),
    };
    let num: u64 = num_part
        .trim()
        .parse()
        .map_err(|e| format!("invalid size '{s}': {e}"))?;
    num.checked_mul(multiplier)
        .ok_or_else(|| format!("size overflow: '{s}'"))
}

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// LZ77 byte-stream compressor.
#[derive(Parser, Debug)]
#[command(
    name = "nanozip",
    version,
    about = "NanoZip LZ77 compressor",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Force overwrite existing output files.
    #[arg(short = 'f', long, global = true)]
    force: bool,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Output stats as JSON.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Compress an input stream.
    Compress(CompressArgs),
    /// Decompress and verify an input stream.
    Decompress(DecompressArgs),
    /// Print the header and token statistics of a compressed file.
    Info(InfoArgs),
    /// Benchmark and self-check on built-in corpora or given files.
    Bench(BenchArgs),
    /// Print build/configuration details.
    Config,
}

#[derive(Args, Debug)]
struct CompressArgs {
    /// Match window in bytes (supports K/M suffix; clamped to 1K..65535).
    #[arg(long = "window-size", short = 'w', value_parser = parse_byte_size, default_value_t = DEFAULT_WINDOW as u64)]
    window_size: u64,

    /// Input file (default: stdin).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "input_pos")]
    input: Option<PathBuf>,

    /// Output file (default: stdout).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "output_pos")]
    output: Option<PathBuf>,

    /// Write output to stdout.
    #[arg(short = 'c', long)]
    stdout: bool,

    /// Input file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    input_pos: Option<PathBuf>,

    /// Output file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    output_pos: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct DecompressArgs {
    /// Input file (default: stdin).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "input_pos")]
    input: Option<PathBuf>,

    /// Output file (default: stdout).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "output_pos")]
    output: Option<PathBuf>,

    /// Write output to stdout.
    #[arg(short = 'c', long)]
    stdout: bool,

    /// Verify only (do not write output).
    #[arg(long = "check-only")]
    no_output: bool,

    /// Input file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    input_pos: Option<PathBuf>,

    /// Output file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    output_pos: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InfoArgs {
    /// Compressed input file.
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,
}

#[derive(Args, Debug)]
struct BenchArgs {
    /// Match window in bytes (supports K/M suffix; 0 selects the default).
    #[arg(long = "window-size", short = 'w', value_parser = parse_byte_size, default_value_t = 0)]
    window_size: u64,

    /// Compress/decompress repetitions per corpus.
    #[arg(long, short = 'n', value_parser = clap::value_parser!(u32).range(1..), default_value_t = 1)]
    iterations: u32,

    /// Files to benchmark instead of the built-in corpora.
    #[arg(value_hint = ValueHint::FilePath)]
    files: Vec<PathBuf>,
}

// ---------------------------------------------------------------------------
// Resolved command + options (flattened from Cli)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Compress,
    Decompress,
    Info,
    Bench,
    Config,
}

struct Options {
    command: Command,
    use_stdout: bool,
    force: bool,
    quiet: bool,
    verbose: u8,
    no_output: bool,
    window_size: usize,
    iterations: u32,
    input_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
    bench_files: Vec<PathBuf>,
    json_output: bool,
}

impl Options {
    fn base(command: Command, cli: &Cli) -> Self {
        Self {
            command,
            use_stdout: false,
            force: cli.force,
            quiet: cli.quiet,
            verbose: cli.verbose.min(2),
            no_output: false,
            window_size: DEFAULT_WINDOW,
            iterations: 1,
            input_file: None,
            output_file: None,
            bench_files: Vec::new(),
            json_output: cli.json_output,
        }
    }
}

fn resolve_options(mut cli: Cli) -> Options {
    let command = std::mem::replace(&mut cli.command, Cmd::Config);
    match command {
        Cmd::Compress(args) => Options {
            use_stdout: args.stdout,
            window_size: usize::try_from(args.window_size).unwrap_or(usize::MAX),
            input_file: args.input.or(args.input_pos),
            output_file: args.output.or(args.output_pos),
            ..Options::base(Command::Compress, &cli)
        },
        Cmd::Decompress(args) => Options {
            use_stdout: args.stdout,
            no_output: args.no_output,
            input_file: args.input.or(args.input_pos),
            output_file: args.output.or(args.output_pos),
            ..Options::base(Command::Decompress, &cli)
        },
        Cmd::Info(args) => Options {
            input_file: Some(args.input),
            ..Options::base(Command::Info, &cli)
        },
        Cmd::Bench(args) => Options {
            window_size: usize::try_from(args.window_size).unwrap_or(usize::MAX),
            iterations: args.iterations,
            bench_files: args.files,
            ..Options::base(Command::Bench, &cli)
        },
        Cmd::Config => Options::base(Command::Config, &cli),
    }
}

fn log_filter(opts: &Options) -> &'static str {
    if opts.quiet {
        return "error";
    }
    match opts.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

// ---------------------------------------------------------------------------
// Shared I/O plumbing
// ---------------------------------------------------------------------------

/// Open the output destination, refusing to clobber an existing file
/// without `--force`.
fn open_output(opts: &Options) -> Result<Box<dyn Write>, String> {
    match (opts.use_stdout, &opts.output_file) {
        (true, _) | (_, None) => Ok(Box::new(io::stdout().lock())),
        (false, Some(path)) => {
            check_overwrite(opts, path)?;
            File::create(path)
                .map(|f| Box::new(f) as Box<dyn Write>)
                .map_err(|e| format!("output file: {}: {e}", path.display()))
        }
    }
}

fn check_overwrite(opts: &Options, path: &Path) -> Result<(), String> {
    if path.exists() && !opts.force {
        return Err(format!(
            "output file exists, use -f to overwrite: {}",
            path.display()
        ));
    }
    Ok(())
}

fn open_input(opts: &Options) -> Result<Box<dyn Read>, String> {
    match &opts.input_file {
        Some(path) => File::open(path)
            .map(|f| Box::new(BufReader::with_capacity(BUF_SIZE, f)) as Box<dyn Read>)
            .map_err(|e| format!("input file: {}: {e}", path.display())),
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn digest_hex(d: Option<[u8; 32]>) -> serde_json::Value {
    match d {
        Some(d) => serde_json::Value::String(nzio::to_hex(&d)),
        None => serde_json::Value::Null,
    }
}

fn tokens_json(t: &TokenCounts) -> serde_json::Value {
    serde_json::json!({
        "literals": t.literals,
        "escaped": t.escaped,
        "matches": t.matches,
        "matched_bytes": t.matched_bytes,
    })
}

// ---------------------------------------------------------------------------
// Config command
// ---------------------------------------------------------------------------

fn cmd_config() -> i32 {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!("nanozip version {version} (Rust)");
    eprintln!("Licensed under the MIT License");

    let file_io = cfg!(feature = "file-io") as u8;
    let cmp = compare::comparator();
    let ptr_size = std::mem::size_of::<*const ()>();

    eprintln!("FILE_IO={file_io}");
    eprintln!("MAGIC=0x{MAGIC:08X}");
    eprintln!("HEADER_LEN={HEADER_LEN}");
    eprintln!("MIN_MATCH={MIN_MATCH}");
    eprintln!("MAX_MATCH={MAX_MATCH}");
    eprintln!("HASH_BITS={HASH_BITS}");
    eprintln!("MATCH_SEARCH_LIMIT={MATCH_SEARCH_LIMIT}");
    eprintln!("MIN_WINDOW={MIN_WINDOW}");
    eprintln!("MAX_WINDOW={MAX_WINDOW}");
    eprintln!("DEFAULT_WINDOW={DEFAULT_WINDOW}");
    eprintln!("COMPARATOR={} ({} bytes/step)", cmp.name, cmp.width);
    eprintln!("sizeof(usize)={ptr_size}");

    0
}

// ---------------------------------------------------------------------------
// Compress command
// ---------------------------------------------------------------------------

fn cmd_compress(opts: &Options) -> i32 {
    let effective = config::clamp_window(opts.window_size);
    if opts.window_size != 0 && opts.window_size != effective as usize && !opts.quiet {
        eprintln!(
            "nanozip: warning: window size {} clamped to {effective}",
            opts.window_size
        );
    }
    let copts = CompressOptions::with_window(opts.window_size);

    let result = match (&opts.input_file, &opts.output_file, opts.use_stdout) {
        (Some(input), Some(output), false) => {
            if let Err(e) = check_overwrite(opts, output) {
                eprintln!("nanozip: {e}");
                return 1;
            }
            nzio::compress_file(input, output, copts)
        }
        _ => {
            let reader = match open_input(opts) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("nanozip: {e}");
                    return 1;
                }
            };
            let writer = match open_output(opts) {
                Ok(w) => w,
                Err(e) => {
                    eprintln!("nanozip: {e}");
                    return 1;
                }
            };
            nzio::compress_stream(reader, writer, &copts)
        }
    };

    let stats = match result {
        Ok(s) => s,
        Err(e) => {
            eprintln!("nanozip: {e}");
            return 1;
        }
    };

    report_compress(opts, &stats);
    0
}

fn report_compress(opts: &Options, stats: &CompressStats) {
    if opts.verbose > 0 && !opts.quiet {
        let t = &stats.tokens;
        eprintln!(
            "nanozip: compressed {} -> {} bytes, window {}, literals {}, escaped {}, matches {}",
            stats.input_size, stats.output_size, stats.window_size, t.literals, t.escaped, t.matches
        );
    }

    if opts.json_output {
        let json = serde_json::json!({
            "command": "compress",
            "input_size": stats.input_size,
            "output_size": stats.output_size,
            "window_size": stats.window_size,
            "tokens": tokens_json(&stats.tokens),
            "input_sha256": digest_hex(stats.input_sha256),
        });
        eprintln!("{json:#}");
    }
}

// ---------------------------------------------------------------------------
// Decompress command
// ---------------------------------------------------------------------------

fn cmd_decompress(opts: &Options) -> i32 {
    let result = if opts.no_output {
        match open_input(opts) {
            Ok(reader) => nzio::decompress_stream(reader, io::sink()),
            Err(e) => {
                eprintln!("nanozip: {e}");
                return 1;
            }
        }
    } else {
        match (&opts.input_file, &opts.output_file, opts.use_stdout) {
            (Some(input), Some(output), false) => {
                if let Err(e) = check_overwrite(opts, output) {
                    eprintln!("nanozip: {e}");
                    return 1;
                }
                nzio::decompress_file(input, output)
            }
            _ => {
                let reader = match open_input(opts) {
                    Ok(r) => r,
                    Err(e) => {
                        eprintln!("nanozip: {e}");
                        return 1;
                    }
                };
                let writer = match open_output(opts) {
                    Ok(w) => w,
                    Err(e) => {
                        eprintln!("nanozip: {e}");
                        return 1;
                    }
                };
                nzio::decompress_stream(reader, writer)
            }
        }
    };

    let stats = match result {
        Ok(s) => s,
        Err(e) => {
            eprintln!("nanozip: {e}");
            return 1;
        }
    };

    report_decompress(opts, &stats);
    0
}

fn report_decompress(opts: &Options, stats: &DecompressStats) {
    if (opts.verbose > 0 || opts.no_output) && !opts.quiet {
        eprintln!(
            "nanozip: decompressed {} -> {} bytes, window {}{}",
            stats.input_size,
            stats.output_size,
            stats.window_size,
            if opts.no_output { " (check only)" } else { "" }
        );
    }

    if opts.json_output {
        let json = serde_json::json!({
            "command": "decompress",
            "input_size": stats.input_size,
            "output_size": stats.output_size,
            "window_size": stats.window_size,
            "check_only": opts.no_output,
            "output_sha256": digest_hex(stats.output_sha256),
        });
        eprintln!("{json:#}");
    }
}

// ---------------------------------------------------------------------------
// Info command
// ---------------------------------------------------------------------------

fn cmd_info(opts: &Options) -> i32 {
    let Some(path) = &opts.input_file else {
        eprintln!("nanozip: info requires an input file");
        return 1;
    };
    let data = match std::fs::read(path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("nanozip: {}: {e}", path.display());
            return 1;
        }
    };

    let header = match Header::decode(&data) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("nanozip: invalid header: {e}");
            return 1;
        }
    };

    let payload = &data[HEADER_LEN..];
    let declared = header.original_len();
    let mut counts = TokenCounts::default();
    let mut covered = 0usize;
    let mut scan_error = None;
    for item in TokenReader::new(payload) {
        if covered >= declared {
            break;
        }
        match item {
            Ok((_, token)) => {
                counts.record(&token);
                covered += token.decoded_len();
            }
            Err(e) => {
                scan_error = Some(e.to_string());
                break;
            }
        }
    }

    let validation = match decoder::decode_all(&data) {
        Ok(_) => Ok(()),
        Err(e) => Err(e.to_string()),
    };

    if opts.json_output {
        let json = serde_json::json!({
            "command": "info",
            "file": path.display().to_string(),
            "magic": format!("0x{MAGIC:08X}"),
            "original_size": header.original_size,
            "checksum": format!("0x{:08X}", header.checksum),
            "window_size": header.window_size,
            "stream_size": data.len(),
            "payload_size": payload.len(),
            "tokens": tokens_json(&counts),
            "scan_error": scan_error,
            "valid": validation.is_ok(),
            "error": validation.as_ref().err(),
        });
        println!("{json:#}");
    } else {
        println!("NanoZip magic:        0x{MAGIC:08X}");
        println!("Original size:        {}", header.original_size);
        println!("Checksum:             0x{:08X}", header.checksum);
        println!("Window size:          {}", header.window_size);
        println!("Stream size:          {}", data.len());
        println!("Payload size:         {}", payload.len());
        if declared > 0 {
            println!(
                "Ratio:                {:.2}%",
                100.0 * data.len() as f64 / declared as f64
            );
        }
        println!(
            "Tokens:               {} (literals {}, escaped {}, matches {})",
            counts.total(),
            counts.literals,
            counts.escaped,
            counts.matches
        );
        println!("Matched bytes:        {}", counts.matched_bytes);
        if let Some(e) = &scan_error {
            println!("Token scan:           stopped: {e}");
        }
        match &validation {
            Ok(()) => println!("Validation:           PASS"),
            Err(e) => println!("Validation:           FAIL ({e})"),
        }
    }

    if validation.is_ok() { 0 } else { 1 }
}

// ---------------------------------------------------------------------------
// Bench command
// ---------------------------------------------------------------------------

const LOREM_IPSUM: &[u8] = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do \
eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis \
nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat. Duis aute irure \
dolor in reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur. \
Excepteur sint occaecat cupidatat non proident, sunt in culpa qui officia deserunt mollit anim \
id est laborum.";

const MINI_BINARY: [u8; 64] = [
    0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54, 0x32, 0x10,
    0xCA, 0xFE, 0xBA, 0xBE, 0xDE, 0xAD, 0xBE, 0xEF, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88,
    0x99, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF, 0x00, 0xA5, 0x5A, 0xA5, 0x5A, 0x0F, 0xF0, 0x0F, 0xF0,
    0xBC, 0xDA, 0xEF, 0xCD, 0x87, 0x65, 0x43, 0x21, 0xED, 0xCB, 0xA9, 0x87, 0x65, 0x43, 0x21, 0x0F,
];

/// The built-in benchmark inputs.
fn builtin_corpora() -> Vec<(String, Vec<u8>)> {
    const MIB: usize = 1 << 20;
    vec![
        (
            "SMALL_REPEATING_TEXT".into(),
            (0..100).map(|i| b'A' + (i % 5) as u8).collect(),
        ),
        (
            "LOREM_IPSUM".into(),
            LOREM_IPSUM.iter().copied().cycle().take(500).collect(),
        ),
        (
            "TEXT".into(),
            (0..MIB).map(|i| b'A' + (i % 26) as u8).collect(),
        ),
        ("BINARY".into(), (0..MIB).map(|i| i as u8).collect()),
        ("MINI_BINARY".into(), MINI_BINARY.to_vec()),
    ]
}

/// One corpus' benchmark outcome.
#[derive(Debug, Clone)]
struct BenchReport {
    name: String,
    original_size: usize,
    compressed_size: usize,
    compress_secs: f64,
    decompress_secs: f64,
    original_crc: u32,
    stored_crc: Option<u32>,
    decompressed_crc: Option<u32>,
    decompressed_size: usize,
    first_diff: Option<usize>,
}

impl BenchReport {
    fn passed(&self) -> bool {
        self.compressed_size > 0
            && self.decompressed_size == self.original_size
            && self.first_diff.is_none()
    }

    fn compress_mbps(&self) -> f64 {
        mbps(self.original_size, self.compress_secs)
    }

    fn decompress_mbps(&self) -> f64 {
        mbps(self.original_size, self.decompress_secs)
    }

    fn ratio_percent(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        100.0 * self.compressed_size as f64 / self.original_size as f64
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "original_size": self.original_size,
            "compressed_size": self.compressed_size,
            "ratio_percent": self.ratio_percent(),
            "compress_mbps": self.compress_mbps(),
            "decompress_mbps": self.decompress_mbps(),
            "original_crc": format!("0x{:08X}", self.original_crc),
            "stored_crc": self.stored_crc.map(|c| format!("0x{c:08X}")),
            "decompressed_crc": self.decompressed_crc.map(|c| format!("0x{c:08X}")),
            "passed": self.passed(),
        })
    }

    fn print(&self) {
        println!();
        println!("=== {} BENCHMARK ===", self.name);
        println!("Original:    {} bytes", self.original_size);
        if self.compressed_size == 0 {
            println!("Compression: FAILED (output size 0)");
        } else {
            println!(
                "Compressed:  {} bytes ({:.2}% ratio)",
                self.compressed_size,
                self.ratio_percent()
            );
            println!("Comp Speed:  {:.2} MB/s", self.compress_mbps());
        }
        println!("Original Data CRC:     0x{:08X}", self.original_crc);
        match self.stored_crc {
            Some(c) => println!("Stored Header CRC:     0x{c:08X}"),
            None => println!("Stored Header CRC:     N/A"),
        }
        match self.decompressed_crc {
            Some(c) => println!("Decompressed Data CRC: 0x{c:08X}"),
            None => println!("Decompressed Data CRC: N/A (decompression failed)"),
        }
        if self.compressed_size > 0 {
            println!("Decomp Speed:{:.2} MB/s", self.decompress_mbps());
        }
        if self.passed() {
            println!("Validation:  PASS");
        } else if self.decompressed_size == 0 && self.original_size > 0 {
            println!("Validation:  FAIL (decompression failed or returned 0)");
        } else {
            println!("Validation:  FAIL (data mismatch or size mismatch)");
            if let Some(i) = self.first_diff {
                println!("First diff at byte {i}");
            }
        }
    }
}

fn mbps(bytes: usize, secs: f64) -> f64 {
    bytes as f64 / secs.max(1e-9) / 1e6
}

/// Compress and decompress `data` through the boundary API `iterations`
/// times and check the result.
fn bench_one(name: String, data: &[u8], window: usize, iterations: u32) -> BenchReport {
    let mut packed = vec![0u8; max_compressed_len(data.len())];
    let mut unpacked = vec![0u8; data.len()];

    let start = Instant::now();
    let mut compressed_size = 0;
    for _ in 0..iterations {
        compressed_size = crate::compress(data, &mut packed, window);
    }
    let compress_secs = start.elapsed().as_secs_f64() / iterations as f64;

    let stored_crc = Header::decode(&packed[..compressed_size])
        .ok()
        .map(|h| h.checksum);

    let start = Instant::now();
    let mut decompressed_size = 0;
    if compressed_size > 0 {
        for _ in 0..iterations {
            decompressed_size = crate::decompress(&packed[..compressed_size], &mut unpacked);
        }
    }
    let decompress_secs = start.elapsed().as_secs_f64() / iterations as f64;

    let decoded = &unpacked[..decompressed_size];
    let first_diff = data
        .iter()
        .zip(decoded)
        .position(|(a, b)| a != b)
        .or_else(|| (decoded.len() != data.len()).then_some(decoded.len()));

    BenchReport {
        name,
        original_size: data.len(),
        compressed_size,
        compress_secs,
        decompress_secs,
        original_crc: crc32(data),
        stored_crc,
        decompressed_crc: (decompressed_size > 0 || data.is_empty()).then(|| crc32(decoded)),
        decompressed_size,
        first_diff,
    }
}

fn cmd_bench(opts: &Options) -> i32 {
    let corpora = if opts.bench_files.is_empty() {
        builtin_corpora()
    } else {
        let mut out = Vec::with_capacity(opts.bench_files.len());
        for path in &opts.bench_files {
            match std::fs::read(path) {
                Ok(d) => out.push((path.display().to_string(), d)),
                Err(e) => {
                    eprintln!("nanozip: {}: {e}", path.display());
                    return 1;
                }
            }
        }
        out
    };

    let reports: Vec<BenchReport> = corpora
        .into_iter()
        .map(|(name, data)| {
            log::info!("benchmarking {name} ({} bytes)", data.len());
            bench_one(name, &data, opts.window_size, opts.iterations)
        })
        .collect();

    if opts.json_output {
        let json = serde_json::json!({
            "command": "bench",
            "window_size": config::clamp_window(opts.window_size),
            "iterations": opts.iterations,
            "comparator": compare::comparator().name,
            "results": reports.iter().map(BenchReport::to_json).collect::<Vec<_>>(),
        });
        println!("{json:#}");
    } else if !opts.quiet {
        for r in &reports {
            r.print();
        }
    }

    if reports.iter().all(BenchReport::passed) {
        0
    } else {
        1
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    let cli = Cli::parse();
    let mut opts = resolve_options(cli);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_filter(&opts)))
        .format_timestamp(None)
        .format_target(false)
        .init();

    // Warn if -c overrides output filename.
    if opts.use_stdout
        && let Some(path) = opts.output_file.take()
        && !opts.quiet
    {
        eprintln!(
            "nanozip: warning: -c option overrides output filename: {}",
            path.display()
        );
    }

    let exit_code = match opts.command {
        Command::Compress => cmd_compress(&opts),
        Command::Decompress => cmd_decompress(&opts),
        Command::Info => cmd_info(&opts),
        Command::Bench => cmd_bench(&opts),
        Command::Config => cmd_config(),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
