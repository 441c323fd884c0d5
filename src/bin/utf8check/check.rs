//! CLI handler for the `check` command.
//!
//! Each input is a textual integer list. Verdicts are printed one per list
//! and a tally is flushed to stderr at end of input, or when interrupted.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::io::{self, BufRead};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use utf8check::{parse_byte_list, validate_utf8_with, ValidatorConfig, ValuePolicy};

use crate::exit_codes;

/// Check integer lists for UTF-8 structure.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Lists to check, e.g. "[197, 130, 1]" (reads one list per stdin line if none provided)
    pub lists: Vec<String>,

    /// Reject values outside 0-255 instead of masking them to their low 8 bits
    #[arg(long)]
    pub reject_out_of_range: bool,

    /// Print one JSON object per list instead of text
    #[arg(long)]
    pub json: bool,

    /// Quiet mode: exit code only, no output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Outcome for a single list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub input: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

impl Verdict {
    /// Parse and validate one list. Unparseable lists are invalid.
    pub fn evaluate(input: &str, config: &ValidatorConfig) -> Self {
        let input = input.trim();
        let (error, offset) = match parse_byte_list(input) {
            // The parse error names its own element; `offset` stays a byte position
            Err(err) => (Some(err.to_string()), None),
            Ok(values) => match validate_utf8_with(config, &values) {
                Ok(()) => (None, None),
                Err(err) => (Some(err.kind.to_string()), Some(err.offset)),
            },
        };

        Self {
            input: input.to_string(),
            valid: error.is_none(),
            error,
            offset,
        }
    }

    fn to_text(&self) -> String {
        match (&self.error, self.offset) {
            (None, _) => format!("{}: valid", self.input),
            (Some(error), Some(offset)) => {
                format!("{}: invalid: {} at element {}", self.input, error, offset)
            }
            (Some(error), None) => format!("{}: invalid: {}", self.input, error),
        }
    }
}

/// Running counts of verdicts, shared with the Ctrl+C handler.
#[derive(Debug, Default)]
pub struct Tally {
    valid: AtomicUsize,
    invalid: AtomicUsize,
}

impl Tally {
    pub fn record(&self, verdict: &Verdict) {
        let counter = if verdict.valid {
            &self.valid
        } else {
            &self.invalid
        };
        counter.fetch_add(1, Ordering::SeqCst);
    }

    pub fn valid(&self) -> usize {
        self.valid.load(Ordering::SeqCst)
    }

    pub fn invalid(&self) -> usize {
        self.invalid.load(Ordering::SeqCst)
    }

    pub fn summary(&self) -> String {
        format!(
            "checked {}: {} valid, {} invalid",
            self.valid() + self.invalid(),
            self.valid(),
            self.invalid()
        )
    }

    /// Print the summary to stderr.
    pub fn flush(&self) {
        eprintln!("{}", self.summary());
    }

    /// Text flushed to stderr when the run is interrupted, `None` when quiet.
    pub fn interrupt_report(&self, quiet: bool) -> Option<String> {
        if quiet {
            None
        } else {
            Some(format!("\n{}\n", self.summary()))
        }
    }

    pub fn exit_code(&self) -> i32 {
        if self.invalid() > 0 {
            exit_codes::INVALID
        } else {
            exit_codes::SUCCESS
        }
    }
}

/// Run the check command.
pub fn run(args: CheckArgs) -> Result<i32> {
    let config = ValidatorConfig::default().with_value_policy(if args.reject_out_of_range {
        ValuePolicy::Reject
    } else {
        ValuePolicy::Mask
    });

    let tally = Arc::new(Tally::default());

    if args.lists.is_empty() {
        let handler_tally = Arc::clone(&tally);
        let quiet = args.quiet;
        ctrlc::set_handler(move || {
            if let Some(text) = handler_tally.interrupt_report(quiet) {
                eprint!("{}", text);
            }
            std::process::exit(exit_codes::INTERRUPTED);
        })
        .context("failed to set Ctrl+C handler")?;

        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read from stdin")?;
            if line.trim().is_empty() {
                continue;
            }
            report(&Verdict::evaluate(&line, &config), &args, &tally)?;
        }
    } else {
        for list in &args.lists {
            report(&Verdict::evaluate(list, &config), &args, &tally)?;
        }
    }

    if !args.quiet {
        tally.flush();
    }

    Ok(tally.exit_code())
}

fn report(verdict: &Verdict, args: &CheckArgs, tally: &Tally) -> Result<()> {
    tally.record(verdict);
    if args.quiet {
        return Ok(());
    }

    if args.json {
        println!("{}", serde_json::to_string(verdict)?);
    } else {
        println!("{}", verdict.to_text());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_list() {
        let verdict = Verdict::evaluate(" [197, 130, 1] ", &ValidatorConfig::default());
        assert!(verdict.valid);
        assert_eq!(verdict.to_text(), "[197, 130, 1]: valid");
    }

    #[test]
    fn invalid_list_reports_offset() {
        let verdict = Verdict::evaluate("[229, 65, 244, 142]", &ValidatorConfig::default());
        assert!(!verdict.valid);
        assert_eq!(verdict.offset, Some(1));
        assert_eq!(
            verdict.to_text(),
            "[229, 65, 244, 142]: invalid: invalid UTF-8 continuation byte at element 1"
        );
    }

    #[test]
    fn unparseable_list_is_invalid() {
        let verdict = Verdict::evaluate("[65, x]", &ValidatorConfig::default());
        assert!(!verdict.valid);
        assert_eq!(verdict.error.as_deref(), Some("invalid number `x` at element 1"));
        assert_eq!(verdict.offset, None);
        assert_eq!(verdict.to_text(), "[65, x]: invalid: invalid number `x` at element 1");

        let json = serde_json::to_string(&verdict).unwrap();
        assert_eq!(
            json,
            r#"{"input":"[65, x]","valid":false,"error":"invalid number `x` at element 1"}"#
        );
    }

    #[test]
    fn policy_changes_verdict() {
        assert!(Verdict::evaluate("[256]", &ValidatorConfig::masking()).valid);
        assert!(!Verdict::evaluate("[256]", &ValidatorConfig::rejecting()).valid);
    }

    #[test]
    fn json_shape() {
        let verdict = Verdict::evaluate("[128]", &ValidatorConfig::default());
        let json = serde_json::to_string(&verdict).unwrap();
        assert_eq!(
            json,
            r#"{"input":"[128]","valid":false,"error":"unexpected UTF-8 continuation byte","offset":0}"#
        );

        let verdict = Verdict::evaluate("[]", &ValidatorConfig::default());
        let json = serde_json::to_string(&verdict).unwrap();
        assert_eq!(json, r#"{"input":"[]","valid":true}"#);
    }

    #[test]
    fn tally_counts_and_exit_code() {
        let tally = Tally::default();
        assert_eq!(tally.exit_code(), exit_codes::SUCCESS);

        let config = ValidatorConfig::default();
        for list in ["[65]", "[255]", "[197, 130]", "[235, 140, 4]"] {
            tally.record(&Verdict::evaluate(list, &config));
        }
        assert_eq!(tally.valid(), 2);
        assert_eq!(tally.invalid(), 2);
        assert_eq!(tally.summary(), "checked 4: 2 valid, 2 invalid");
        assert_eq!(tally.exit_code(), exit_codes::INVALID);
    }

    #[test]
    fn interrupt_report_carries_partial_tally() {
        let tally = Tally::default();
        let config = ValidatorConfig::default();
        for list in ["[65]", "[128]", "[197, 130]"] {
            tally.record(&Verdict::evaluate(list, &config));
        }

        assert_eq!(
            tally.interrupt_report(false).as_deref(),
            Some("\nchecked 3: 2 valid, 1 invalid\n")
        );
        assert_eq!(tally.interrupt_report(true), None);
    }
}
