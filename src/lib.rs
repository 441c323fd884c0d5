//! # utf8check
//!
//! Structural UTF-8 validation over sequences of integers.
//!
//! Each input element holds one byte in its low 8 bits. The validator answers
//! a single question: does the sequence decompose cleanly into complete
//! 1-4 byte UTF-8 character shapes? It checks bit patterns only, so overlong
//! encodings, surrogate halves and code points above U+10FFFF are accepted as
//! long as their lead and continuation bytes line up.
//!
//! ## Module Organization
//!
//! - [`text`] - Byte classification, the validator state machine and
//!   integer-list parsing
//! - [`config`] - Validator configuration (out-of-range value policy)
//!
//! ## Quick Start
//!
//! ```
//! use utf8check::is_valid_utf8;
//!
//! // Plain ASCII "Aa0"
//! assert!(is_valid_utf8(&[65, 97, 48]));
//!
//! // A 2-byte character followed by ASCII
//! assert!(is_valid_utf8(&[197, 130, 1]));
//!
//! // A bare continuation byte
//! assert!(!is_valid_utf8(&[128]));
//!
//! // Wider integers are masked to their low 8 bits: 256 is 0x00
//! assert!(is_valid_utf8(&[256]));
//! ```
//!
//! ## Features
//!
//! - `std` (default) - `std::error::Error` impls
//! - `serde` - Serialization of [`ValidatorConfig`]
//! - `cli` - The `utf8check` command-line tool

// Use no_std unless std feature is enabled or we're in test mode
#![cfg_attr(not(any(test, feature = "std")), no_std)]

// When using no_std, we need to explicitly link the alloc crate
#[cfg(not(any(test, feature = "std")))]
extern crate alloc;

// When using std, re-export alloc types from std for compatibility
#[cfg(any(test, feature = "std"))]
extern crate std as alloc;

/// Validator configuration.
pub mod config;

/// Byte classification, UTF-8 structure validation and list parsing.
pub mod text;

// =============================================================================
// Public re-exports
// =============================================================================

pub use config::{ValidatorConfig, ValuePolicy};
pub use text::byte::{lead_ones, ByteClass, ByteValue};
pub use text::list::{is_valid_utf8_list, parse_byte_list, ListError, ListErrorKind};
pub use text::utf8::{
    is_valid_utf8, is_valid_utf8_with, validate_utf8, validate_utf8_with, Utf8Error,
    Utf8ErrorKind, Utf8Validator,
};
