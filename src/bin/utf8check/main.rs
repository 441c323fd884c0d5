//! utf8check CLI tool for structural UTF-8 validation.

use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;

mod check;
mod generators;
mod text_validate;

/// Exit codes shared by the validating subcommands.
pub mod exit_codes {
    /// Every input is valid.
    pub const SUCCESS: i32 = 0;
    /// At least one input is invalid.
    pub const INVALID: i32 = 1;
    /// I/O error (file not found, permission denied, etc.).
    pub const IO_ERROR: i32 = 2;
    /// Interrupted by Ctrl+C.
    pub const INTERRUPTED: i32 = 130;
}

#[derive(Debug, Parser)]
#[command(name = "utf8check")]
#[command(about = "Structural UTF-8 validation toolkit", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate the raw bytes of files (or stdin)
    Validate(text_validate::ValidateUtf8Args),
    /// Check integer lists such as "[197, 130, 1]"
    Check(check::CheckArgs),
    /// Generate byte sequences for benchmarking and testing
    Generate(GenerateArgs),
}

/// Generate byte sequences for benchmarking and testing
#[derive(Debug, Parser)]
struct GenerateArgs {
    /// Approximate size to generate (supports b, kb, mb, gb - case insensitive)
    /// Examples: 64, 1kb, 16MB
    #[arg(value_parser = parse_size)]
    size: usize,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Character mix to generate
    #[arg(short, long, default_value = "mixed")]
    pattern: PatternArg,

    /// Random seed for reproducible generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Cut the final multi-byte character short so the output is invalid
    #[arg(long)]
    truncate: bool,

    /// Output format
    #[arg(short, long, default_value = "raw")]
    format: FormatArg,

    /// Verify the output validates (or, with --truncate, fails) as expected
    #[arg(long)]
    verify: bool,
}

#[derive(Debug, Clone, ValueEnum)]
enum PatternArg {
    /// Pure ASCII (single-byte characters)
    Ascii,
    /// Latin Extended (2-byte characters)
    Latin,
    /// CJK ideographs (3-byte characters)
    Cjk,
    /// Emoji (4-byte characters)
    Emoji,
    /// Uniform mix of all character lengths (default)
    Mixed,
    /// Random payload bits, including overlong and surrogate shapes
    Structural,
}

impl From<PatternArg> for generators::Utf8Pattern {
    fn from(arg: PatternArg) -> Self {
        match arg {
            PatternArg::Ascii => generators::Utf8Pattern::Ascii,
            PatternArg::Latin => generators::Utf8Pattern::Latin,
            PatternArg::Cjk => generators::Utf8Pattern::Cjk,
            PatternArg::Emoji => generators::Utf8Pattern::Emoji,
            PatternArg::Mixed => generators::Utf8Pattern::Mixed,
            PatternArg::Structural => generators::Utf8Pattern::Structural,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// Raw bytes
    Raw,
    /// Integer list, e.g. [197, 130, 1]
    List,
}

/// Parse size string like "1mb", "512KB", "2GB", "1024" (case insensitive)
/// Largest size `generate` accepts; the output is built in memory.
const MAX_GENERATE_SIZE: u64 = 16 * 1024 * 1024 * 1024;

fn parse_size(s: &str) -> Result<usize, String> {
    let bytes = parse_size_unbounded(s)?;
    if bytes as u64 > MAX_GENERATE_SIZE {
        return Err(format!("Size too large: '{}' (maximum is 16gb)", s.trim()));
    }
    Ok(bytes)
}

fn parse_size_unbounded(s: &str) -> Result<usize, String> {
    let s = s.trim().to_lowercase();

    if let Ok(bytes) = s.parse::<usize>() {
        return Ok(bytes);
    }

    let (num_str, unit) = if let Some(n) = s.strip_suffix("gb") {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("mb") {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("kb") {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix('b') {
        (n, 1)
    } else {
        return Err(format!(
            "Invalid size format: '{}'. Use format like '1mb', '512KB', or '1024'",
            s
        ));
    };

    num_str
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_mul(unit))
        .ok_or_else(|| format!("Invalid number in size: '{}'", s))
}

/// Render bytes as an integer list.
fn format_list(bytes: &[u8]) -> String {
    let items: Vec<String> = bytes.iter().map(|b| b.to_string()).collect();
    format!("[{}]", items.join(", "))
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let bytes = generators::generate_utf8(args.size, args.pattern.into(), args.seed, args.truncate);

    if args.verify {
        let result = utf8check::validate_utf8(&bytes);
        if args.truncate {
            ensure!(result.is_err(), "truncated output unexpectedly validated");
        } else if let Err(err) = result {
            anyhow::bail!("generated invalid UTF-8: {}", err);
        }
        eprintln!("✓ Output verified");
    }

    let output = match args.format {
        FormatArg::Raw => bytes,
        FormatArg::List => {
            let mut list = format_list(&bytes).into_bytes();
            list.push(b'\n');
            list
        }
    };

    match args.output {
        Some(path) => {
            std::fs::write(&path, &output)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("✓ Wrote {} bytes to {}", output.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&output).context("failed to write to stdout")?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Validate(args) => {
            let code = text_validate::run(args)?;
            std::process::exit(code);
        }
        Command::Check(args) => {
            let code = check::run(args)?;
            std::process::exit(code);
        }
        Command::Generate(args) => run_generate(args),
    }
}
