//! CLI handler for the `validate` command.

use anyhow::{Context, Result};
use clap::Parser;
use memmap2::Mmap;
use std::fs::File;
use std::io::{self, Read};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use utf8check::text::byte::format_byte;
use utf8check::{validate_utf8, Utf8Error, Utf8ErrorKind};

use crate::exit_codes;

/// Validate files for UTF-8 structure.
#[derive(Debug, Parser)]
pub struct ValidateUtf8Args {
    /// Input files to validate (reads from stdin if none provided)
    #[arg(trailing_var_arg = true)]
    pub files: Vec<PathBuf>,

    /// Quiet mode: exit code only, no output
    #[arg(short, long)]
    pub quiet: bool,

    /// Force color output even when not a TTY
    #[arg(short = 'C', long = "color")]
    pub color: bool,

    /// Disable color output
    #[arg(short = 'M', long = "no-color")]
    pub no_color: bool,

    /// Memory-map input files instead of reading them into memory
    #[arg(long)]
    pub mmap: bool,
}

/// ANSI color codes for error output.
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const LOCATION: &str = "\x1b[1;34m"; // Bold blue
    pub const GUTTER: &str = "\x1b[0;34m"; // Blue
    pub const CARET: &str = "\x1b[1;32m"; // Bold green
    pub const HINT: &str = "\x1b[0;33m"; // Yellow
}

/// Color scheme that can be disabled.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    error: &'static str,
    location: &'static str,
    gutter: &'static str,
    caret: &'static str,
    hint: &'static str,
    reset: &'static str,
}

impl Palette {
    pub fn new(use_color: bool) -> Self {
        if use_color {
            Self {
                error: colors::ERROR,
                location: colors::LOCATION,
                gutter: colors::GUTTER,
                caret: colors::CARET,
                hint: colors::HINT,
                reset: colors::RESET,
            }
        } else {
            Self {
                error: "",
                location: "",
                gutter: "",
                caret: "",
                hint: "",
                reset: "",
            }
        }
    }

    /// Pick colors from the flags, falling back to TTY detection on stderr.
    pub fn from_flags(color: bool, no_color: bool) -> Self {
        let use_color = if no_color {
            false
        } else if color {
            true
        } else {
            atty::is(atty::Stream::Stderr)
        };
        Self::new(use_color)
    }
}

/// File contents, either owned or memory-mapped.
enum Input {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

impl Deref for Input {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Self::Owned(bytes) => bytes,
            Self::Mapped(map) => map,
        }
    }
}

fn open_input(path: &Path, mmap: bool) -> io::Result<Input> {
    if !mmap {
        return std::fs::read(path).map(Input::Owned);
    }

    let file = File::open(path)?;
    // Zero-length mappings are rejected on some platforms
    if file.metadata()?.len() == 0 {
        return Ok(Input::Owned(Vec::new()));
    }
    // SAFETY: the mapping is read-only and dropped before this command
    // returns; concurrent truncation of the file by another process is
    // outside what this tool guards against.
    let map = unsafe { Mmap::map(&file)? };
    Ok(Input::Mapped(map))
}

/// Run the validate command.
pub fn run(args: ValidateUtf8Args) -> Result<i32> {
    let palette = Palette::from_flags(args.color, args.no_color);

    if args.files.is_empty() {
        let mut input = Vec::new();
        io::stdin()
            .read_to_end(&mut input)
            .context("failed to read from stdin")?;

        return Ok(check_input(&input, "<stdin>", args.quiet, &palette));
    }

    let mut any_invalid = false;
    let mut any_io_error = false;

    for path in &args.files {
        match open_input(path, args.mmap) {
            Ok(input) => {
                let name = path.to_string_lossy();
                if check_input(&input, &name, args.quiet, &palette) == exit_codes::INVALID {
                    any_invalid = true;
                }
            }
            Err(e) => {
                any_io_error = true;
                if !args.quiet {
                    eprintln!(
                        "{}error{}: {}: {}",
                        palette.error,
                        palette.reset,
                        path.display(),
                        e
                    );
                }
            }
        }
    }

    Ok(if any_io_error {
        exit_codes::IO_ERROR
    } else if any_invalid {
        exit_codes::INVALID
    } else {
        exit_codes::SUCCESS
    })
}

/// Validate one input, printing a diagnostic on failure.
fn check_input(input: &[u8], name: &str, quiet: bool, palette: &Palette) -> i32 {
    match validate_utf8(input) {
        Ok(()) => exit_codes::SUCCESS,
        Err(err) => {
            if !quiet {
                eprint!("{}", render_diagnostic(&err, input, name, palette));
            }
            exit_codes::INVALID
        }
    }
}

/// Render a rustc-style diagnostic with a one-line context snippet.
pub fn render_diagnostic(err: &Utf8Error, input: &[u8], name: &str, palette: &Palette) -> String {
    let mut out = format!(
        "{}error{}: {}\n  {}--> {}:{}:{}{}\n",
        palette.error,
        palette.reset,
        describe(err, input),
        palette.location,
        name,
        err.line,
        err.column,
        palette.reset
    );

    let (text, caret) = snippet(input, err.offset, err.column);
    let width = err.line.to_string().len().max(3);
    let pad = " ".repeat(width + 2);

    out.push_str(&format!("{}{}|{}\n", pad, palette.gutter, palette.reset));
    out.push_str(&format!(
        " {}{:>width$}{} {}|{} {}\n",
        palette.gutter,
        err.line,
        palette.reset,
        palette.gutter,
        palette.reset,
        text,
        width = width
    ));
    out.push_str(&format!(
        "{}{}|{} {}{}^{}{}\n\n",
        pad,
        palette.gutter,
        palette.reset,
        " ".repeat(caret),
        palette.caret,
        palette.reset,
        hint(err.kind, palette)
    ));

    out
}

/// Headline for an error, naming the offending byte when there is one.
fn describe(err: &Utf8Error, input: &[u8]) -> String {
    match (err.kind, input.get(err.offset)) {
        (Utf8ErrorKind::TruncatedSequence, Some(&lead)) => format!(
            "{} at end of input (lead byte {})",
            err.kind,
            format_byte(lead)
        ),
        (_, Some(&byte)) => format!("{} (byte {})", err.kind, format_byte(byte)),
        (_, None) => err.kind.to_string(),
    }
}

fn hint(kind: Utf8ErrorKind, palette: &Palette) -> String {
    let text = match kind {
        Utf8ErrorKind::UnexpectedContinuation => "bytes 0x80-0xBF only continue a character",
        Utf8ErrorKind::InvalidLeadByte => "bytes 0xF8-0xFF never start a character",
        Utf8ErrorKind::InvalidContinuationByte => "expected byte 0x80-0xBF",
        Utf8ErrorKind::TruncatedSequence => "character is missing continuation bytes",
        Utf8ErrorKind::ValueOutOfRange => "values must lie in 0-255",
    };
    format!(" {}{}{}", palette.hint, text, palette.reset)
}

/// Maximum snippet width in bytes before the line is elided.
const MAX_SNIPPET: usize = 80;

/// The line containing `offset` (lossily decoded) and the caret column.
fn snippet(input: &[u8], offset: usize, column: usize) -> (String, usize) {
    let line_start = offset + 1 - column;
    let line_end = input[line_start..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(input.len(), |i| line_start + i);
    let line = &input[line_start..line_end];

    let error_col = column - 1;
    if line.len() <= MAX_SNIPPET {
        return (display_prefix(line), display_width(&line[..error_col]));
    }

    // Keep a window around the error column
    let start = error_col.saturating_sub(MAX_SNIPPET / 2);
    let end = (start + MAX_SNIPPET).min(line.len());
    let lead = if start > 0 { "..." } else { "" };
    let tail = if end < line.len() { "..." } else { "" };
    let text = format!("{}{}{}", lead, display_prefix(&line[start..end]), tail);
    let caret = lead.len() + display_width(&line[start..error_col]);
    (text, caret)
}

fn display_prefix(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Characters the lossy rendering of `bytes` occupies.
fn display_width(bytes: &[u8]) -> usize {
    String::from_utf8_lossy(bytes).chars().count()
}
