//! UTF-8 structure validation with detailed error reporting.
//!
//! This module checks that a sequence of byte values decomposes into complete
//! UTF-8 character shapes. On failure it reports:
//! - The exact element offset of the error
//! - The line number (1-indexed)
//! - The column number (1-indexed, in bytes)
//! - The specific type of violation
//!
//! ## UTF-8 Structure Rules
//!
//! | Bytes | First byte    | Continuation bytes |
//! |-------|---------------|--------------------|
//! | 1     | `0xxxxxxx`    | -                  |
//! | 2     | `110xxxxx`    | `10xxxxxx`         |
//! | 3     | `1110xxxx`    | `10xxxxxx` × 2     |
//! | 4     | `11110xxx`    | `10xxxxxx` × 3     |
//!
//! ## Validation Checks
//!
//! The validator checks for:
//! 1. **Unexpected continuation bytes**: `10xxxxxx` where a character starts
//! 2. **Invalid lead bytes**: five or more leading one bits (`11111xxx`)
//! 3. **Invalid continuation bytes**: anything but `10xxxxxx` inside a character
//! 4. **Truncated sequences**: input ends while continuation bytes are owed
//!
//! Only bit patterns are checked. Overlong encodings, surrogate halves and
//! shapes above U+10FFFF are accepted: `C0 80`, `ED A0 80` and `F7 BF BF BF`
//! all validate.

use crate::config::{ValidatorConfig, ValuePolicy};
use crate::text::byte::{is_continuation_byte, lead_ones, ByteValue};

/// Error information for UTF-8 validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Utf8Error {
    /// The element offset where the error occurred (0-indexed).
    ///
    /// For [`Utf8ErrorKind::TruncatedSequence`] this is the lead byte of the
    /// unfinished character.
    pub offset: usize,
    /// The line number where the error occurred (1-indexed).
    pub line: usize,
    /// The column (byte position within the line, 1-indexed).
    pub column: usize,
    /// The kind of UTF-8 error.
    pub kind: Utf8ErrorKind,
}

impl core::fmt::Display for Utf8Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} at byte {}, line {}, column {}",
            self.kind, self.offset, self.line, self.column
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Utf8Error {}

/// The specific type of UTF-8 validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Utf8ErrorKind {
    /// A continuation byte (`10xxxxxx`) appeared where a character starts.
    UnexpectedContinuation,

    /// A byte with five or more leading ones (`11111xxx`) appeared where a
    /// character starts. UTF-8 characters are at most four bytes long.
    InvalidLeadByte,

    /// A byte other than `10xxxxxx` appeared where a continuation byte was
    /// owed.
    InvalidContinuationByte,

    /// The input ended while continuation bytes were still owed.
    TruncatedSequence,

    /// An element outside `0..=255` under [`ValuePolicy::Reject`].
    ValueOutOfRange,
}

impl core::fmt::Display for Utf8ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnexpectedContinuation => write!(f, "unexpected UTF-8 continuation byte"),
            Self::InvalidLeadByte => write!(f, "invalid UTF-8 lead byte"),
            Self::InvalidContinuationByte => write!(f, "invalid UTF-8 continuation byte"),
            Self::TruncatedSequence => write!(f, "truncated UTF-8 sequence"),
            Self::ValueOutOfRange => write!(f, "value outside byte range"),
        }
    }
}

/// Where the validator stands between two bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// The next byte starts a character. Initial and only accepting state.
    AwaitingLead,
    /// `remaining` continuation bytes are still owed for the character whose
    /// lead byte sits at `lead_offset`.
    AwaitingContinuation {
        remaining: u8,
        lead_offset: usize,
        lead_line: usize,
        lead_column: usize,
    },
    /// A violation was found; every later call reports it again.
    Failed(Utf8Error),
}

/// Incremental UTF-8 structure validator.
///
/// Bytes may be supplied one at a time or in chunks of any size; a chunk
/// boundary may fall inside a character.
///
/// # Examples
///
/// ```
/// use utf8check::Utf8Validator;
///
/// let mut validator = Utf8Validator::new();
/// validator.feed(&[0xE6, 0x97]).unwrap();
/// assert_eq!(validator.remaining(), 1);
///
/// validator.feed(&[0xA5]).unwrap();
/// assert!(validator.is_accepting());
/// assert!(validator.finish().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Utf8Validator {
    config: ValidatorConfig,
    state: State,
    offset: usize,
    line: usize,
    line_start: usize,
}

impl Default for Utf8Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Utf8Validator {
    /// Create a validator with the default configuration (mask to 8 bits).
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::default())
    }

    /// Create a validator with the given configuration.
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            config,
            state: State::AwaitingLead,
            offset: 0,
            line: 1,
            line_start: 0,
        }
    }

    /// The configuration this validator was created with.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Number of elements consumed so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Continuation bytes still owed for the current character.
    pub fn remaining(&self) -> usize {
        match self.state {
            State::AwaitingContinuation { remaining, .. } => remaining as usize,
            State::AwaitingLead | State::Failed(_) => 0,
        }
    }

    /// Whether the input seen so far is complete, valid UTF-8 structure.
    pub fn is_accepting(&self) -> bool {
        self.state == State::AwaitingLead
    }

    /// The first violation found, if any.
    pub fn error(&self) -> Option<Utf8Error> {
        match self.state {
            State::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Forget all input and start over with the same configuration.
    pub fn reset(&mut self) {
        *self = Self::with_config(self.config);
    }

    /// Consume one element.
    ///
    /// Once an error has been returned the validator stays failed and keeps
    /// returning that error.
    pub fn push<T: ByteValue>(&mut self, value: T) -> Result<(), Utf8Error> {
        if let State::Failed(err) = self.state {
            return Err(err);
        }

        let result = self.step(value);
        if let Err(err) = result {
            self.state = State::Failed(err);
        }
        result
    }

    /// Consume a chunk of elements, stopping at the first violation.
    pub fn feed<T: ByteValue>(&mut self, chunk: &[T]) -> Result<(), Utf8Error> {
        chunk.iter().try_for_each(|&value| self.push(value))
    }

    /// Signal end of input.
    ///
    /// Fails with [`Utf8ErrorKind::TruncatedSequence`] if the last character
    /// is unfinished.
    pub fn finish(self) -> Result<(), Utf8Error> {
        match self.state {
            State::AwaitingLead => Ok(()),
            State::AwaitingContinuation {
                lead_offset,
                lead_line,
                lead_column,
                ..
            } => Err(Utf8Error {
                offset: lead_offset,
                line: lead_line,
                column: lead_column,
                kind: Utf8ErrorKind::TruncatedSequence,
            }),
            State::Failed(err) => Err(err),
        }
    }

    fn step<T: ByteValue>(&mut self, value: T) -> Result<(), Utf8Error> {
        let byte = match self.config.value_policy {
            ValuePolicy::Mask => value.low_byte(),
            ValuePolicy::Reject => value
                .exact_byte()
                .ok_or_else(|| self.error_here(Utf8ErrorKind::ValueOutOfRange))?,
        };

        self.state = match self.state {
            State::AwaitingLead => match lead_ones(byte) {
                0 => State::AwaitingLead,
                1 => return Err(self.error_here(Utf8ErrorKind::UnexpectedContinuation)),
                n if n > 4 => return Err(self.error_here(Utf8ErrorKind::InvalidLeadByte)),
                n => State::AwaitingContinuation {
                    remaining: (n - 1) as u8,
                    lead_offset: self.offset,
                    lead_line: self.line,
                    lead_column: self.column(),
                },
            },
            State::AwaitingContinuation {
                remaining,
                lead_offset,
                lead_line,
                lead_column,
            } => {
                if !is_continuation_byte(byte) {
                    return Err(self.error_here(Utf8ErrorKind::InvalidContinuationByte));
                }
                if remaining == 1 {
                    State::AwaitingLead
                } else {
                    State::AwaitingContinuation {
                        remaining: remaining - 1,
                        lead_offset,
                        lead_line,
                        lead_column,
                    }
                }
            }
            State::Failed(err) => return Err(err),
        };

        // Track newlines for error reporting
        if byte == b'\n' {
            self.line += 1;
            self.line_start = self.offset + 1;
        }
        self.offset += 1;

        Ok(())
    }

    #[inline]
    fn column(&self) -> usize {
        self.offset - self.line_start + 1
    }

    fn error_here(&self, kind: Utf8ErrorKind) -> Utf8Error {
        Utf8Error {
            offset: self.offset,
            line: self.line,
            column: self.column(),
            kind,
        }
    }
}

/// Validate that the input has well-formed UTF-8 structure.
///
/// Each element contributes its low 8 bits. Returns `Ok(())` if the input
/// decomposes into complete characters, or an `Err(Utf8Error)` describing the
/// first violation.
///
/// # Examples
///
/// ```
/// use utf8check::text::utf8::{validate_utf8, Utf8ErrorKind};
///
/// // Valid ASCII
/// assert!(validate_utf8(b"Hello, world!").is_ok());
///
/// // Valid multi-byte UTF-8
/// assert!(validate_utf8("日本語".as_bytes()).is_ok());
/// assert!(validate_utf8("émoji: 🎉".as_bytes()).is_ok());
///
/// // Invalid: bare continuation byte
/// assert!(validate_utf8(&[0x80]).is_err());
///
/// // Invalid: truncated sequence
/// let err = validate_utf8(&[0xC2]).unwrap_err();
/// assert_eq!(err.kind, Utf8ErrorKind::TruncatedSequence);
/// ```
#[inline]
pub fn validate_utf8<T: ByteValue>(data: &[T]) -> Result<(), Utf8Error> {
    validate_utf8_with(&ValidatorConfig::default(), data)
}

/// Validate with an explicit configuration.
pub fn validate_utf8_with<T: ByteValue>(
    config: &ValidatorConfig,
    data: &[T],
) -> Result<(), Utf8Error> {
    let mut validator = Utf8Validator::with_config(*config);
    validator.feed(data)?;
    validator.finish()
}

/// Check whether the input has well-formed UTF-8 structure.
///
/// Malformed input is a normal `false`, never a panic.
///
/// # Examples
///
/// ```
/// use utf8check::is_valid_utf8;
///
/// assert!(is_valid_utf8::<u8>(&[]));
/// assert!(is_valid_utf8(&[65, 97, 48]));
/// assert!(is_valid_utf8(&[197, 130, 1]));
///
/// assert!(!is_valid_utf8(&[229, 65, 244, 142]));
/// assert!(!is_valid_utf8(&[255]));
/// assert!(!is_valid_utf8(&[128]));
/// ```
#[inline]
pub fn is_valid_utf8<T: ByteValue>(data: &[T]) -> bool {
    validate_utf8(data).is_ok()
}

/// Check with an explicit configuration.
#[inline]
pub fn is_valid_utf8_with<T: ByteValue>(config: &ValidatorConfig, data: &[T]) -> bool {
    validate_utf8_with(config, data).is_ok()
}
