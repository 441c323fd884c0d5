//! Text processing utilities.
//!
//! This module provides structural UTF-8 validation over integer sequences.
//!
//! ## UTF-8 Validation
//!
//! The [`utf8`] module validates byte structure and reports the offset, line
//! and column of the first violation. [`byte`] holds the per-byte
//! classification it is built on, and [`list`] parses textual integer lists
//! such as `[197, 130, 1]`.
//!
//! ```
//! use utf8check::text::utf8::{validate_utf8, Utf8ErrorKind};
//!
//! // Valid UTF-8
//! assert!(validate_utf8(b"Hello, world!").is_ok());
//! assert!(validate_utf8("日本語".as_bytes()).is_ok());
//!
//! // Invalid UTF-8 (bare continuation byte)
//! let err = validate_utf8(&[0x80]).unwrap_err();
//! assert_eq!(err.kind, Utf8ErrorKind::UnexpectedContinuation);
//! assert_eq!(err.offset, 0);
//! ```

pub mod byte;
pub mod list;
pub mod utf8;

// Re-export commonly used types
pub use byte::{ByteClass, ByteValue};
pub use utf8::{is_valid_utf8, validate_utf8, Utf8Error, Utf8ErrorKind, Utf8Validator};
