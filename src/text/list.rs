//! Parsing of textual integer lists such as `[197, 130, 1]`.
//!
//! Lists may be wrapped in square brackets and separate elements with commas,
//! whitespace or both. Elements are decimal, `0x` hexadecimal or `0b` binary
//! integers with an optional sign. A single trailing comma is allowed.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::text::utf8::is_valid_utf8;

/// Error information for list parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListError {
    /// Position of the offending element (0-indexed).
    pub index: usize,
    /// The offending text, empty for [`ListErrorKind::EmptyElement`].
    pub token: String,
    /// The kind of parse error.
    pub kind: ListErrorKind,
}

impl core::fmt::Display for ListError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            ListErrorKind::InvalidNumber => {
                write!(f, "{} `{}` at element {}", self.kind, self.token, self.index)
            }
            ListErrorKind::EmptyElement | ListErrorKind::UnbalancedBracket => {
                write!(f, "{} at element {}", self.kind, self.index)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ListError {}

/// The specific type of list parsing error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListErrorKind {
    /// An element is not an integer, or does not fit in an `i64`.
    InvalidNumber,
    /// Two separators with nothing between them, as in `1,,2`.
    EmptyElement,
    /// An opening `[` without a closing `]`, or the reverse.
    UnbalancedBracket,
}

impl core::fmt::Display for ListErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidNumber => write!(f, "invalid number"),
            Self::EmptyElement => write!(f, "empty element"),
            Self::UnbalancedBracket => write!(f, "unbalanced bracket"),
        }
    }
}

/// Parse a textual integer list.
///
/// # Examples
///
/// ```
/// use utf8check::parse_byte_list;
///
/// assert_eq!(parse_byte_list("[197, 130, 1]").unwrap(), vec![197, 130, 1]);
/// assert_eq!(parse_byte_list("0xC5 0x82 0b1").unwrap(), vec![197, 130, 1]);
/// assert_eq!(parse_byte_list("[]").unwrap(), Vec::<i64>::new());
/// assert!(parse_byte_list("[1, two]").is_err());
/// ```
pub fn parse_byte_list(input: &str) -> Result<Vec<i64>, ListError> {
    let body = strip_brackets(input.trim())?;
    let mut values = Vec::new();

    let segments: Vec<&str> = body.split(',').collect();
    let last = segments.len() - 1;

    for (i, segment) in segments.iter().enumerate() {
        let segment = segment.trim();
        if segment.is_empty() {
            // "" and "[1, 2,]" are fine, "1,,2" and ",1" are not
            if i == last && (last == 0 || !values.is_empty()) {
                continue;
            }
            return Err(ListError {
                index: values.len(),
                token: String::new(),
                kind: ListErrorKind::EmptyElement,
            });
        }

        for token in segment.split_whitespace() {
            let value = parse_integer(token).ok_or_else(|| ListError {
                index: values.len(),
                token: token.to_string(),
                kind: ListErrorKind::InvalidNumber,
            })?;
            values.push(value);
        }
    }

    Ok(values)
}

/// Check a textual integer list for well-formed UTF-8 structure.
///
/// A list that does not parse is reported as invalid rather than as an error.
///
/// ```
/// use utf8check::is_valid_utf8_list;
///
/// assert!(is_valid_utf8_list("[197, 130, 1]"));
/// assert!(!is_valid_utf8_list("[229, 65, 244, 142]"));
/// assert!(!is_valid_utf8_list("[65, \"a\"]"));
/// ```
pub fn is_valid_utf8_list(input: &str) -> bool {
    parse_byte_list(input)
        .map(|values| is_valid_utf8(&values))
        .unwrap_or(false)
}

fn strip_brackets(input: &str) -> Result<&str, ListError> {
    let opens = input.starts_with('[');
    let closes = input.ends_with(']');

    match (opens, closes) {
        (true, true) if input.len() >= 2 => Ok(&input[1..input.len() - 1]),
        (false, false) => Ok(input),
        _ => Err(ListError {
            index: 0,
            token: input.to_string(),
            kind: ListErrorKind::UnbalancedBracket,
        }),
    }
}

fn parse_integer(token: &str) -> Option<i64> {
    let (negative, unsigned) = match token.as_bytes().first().copied()? {
        b'-' => (true, &token[1..]),
        b'+' => (false, &token[1..]),
        _ => (false, token),
    };

    let (radix, digits) = if let Some(hex) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        (16, hex)
    } else if let Some(bin) = unsigned
        .strip_prefix("0b")
        .or_else(|| unsigned.strip_prefix("0B"))
    {
        (2, bin)
    } else {
        (10, unsigned)
    };

    // from_str_radix would accept a second sign
    if digits.is_empty() || digits.starts_with(|c: char| c == '+' || c == '-') {
        return None;
    }

    let magnitude = i64::from_str_radix(digits, radix).ok()?;
    if negative {
        magnitude.checked_neg()
    } else {
        Some(magnitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod parsing {
        use super::*;

        #[test]
        fn bracketed_comma_list() {
            assert_eq!(parse_byte_list("[65, 97, 48]").unwrap(), vec![65, 97, 48]);
            assert_eq!(parse_byte_list("  [1,2,3]  ").unwrap(), vec![1, 2, 3]);
        }

        #[test]
        fn bare_and_whitespace_separated() {
            assert_eq!(parse_byte_list("235 140 4").unwrap(), vec![235, 140, 4]);
            assert_eq!(parse_byte_list("235, 140\t4").unwrap(), vec![235, 140, 4]);
        }

        #[test]
        fn empty_lists() {
            assert!(parse_byte_list("").unwrap().is_empty());
            assert!(parse_byte_list("[]").unwrap().is_empty());
            assert!(parse_byte_list("[  ]").unwrap().is_empty());
        }

        #[test]
        fn radix_prefixes_and_signs() {
            assert_eq!(
                parse_byte_list("0xEB 0X8C 0b100 -1 +7").unwrap(),
                vec![235, 140, 4, -1, 7]
            );
            assert_eq!(parse_byte_list("-0x80").unwrap(), vec![-128]);
        }

        #[test]
        fn trailing_comma() {
            assert_eq!(parse_byte_list("[1, 2,]").unwrap(), vec![1, 2]);
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn non_numeric_element() {
            let err = parse_byte_list("[65, abc, 48]").unwrap_err();
            assert_eq!(err.kind, ListErrorKind::InvalidNumber);
            assert_eq!(err.index, 1);
            assert_eq!(err.token, "abc");
            assert_eq!(err.to_string(), "invalid number `abc` at element 1");
        }

        #[test]
        fn malformed_numbers() {
            for token in ["--5", "+-5", "0x", "0b2", "1.5", "0x-1", "99999999999999999999"] {
                let err = parse_byte_list(token).unwrap_err();
                assert_eq!(err.kind, ListErrorKind::InvalidNumber, "{}", token);
            }
        }

        #[test]
        fn empty_elements() {
            let err = parse_byte_list("1,,2").unwrap_err();
            assert_eq!(err.kind, ListErrorKind::EmptyElement);
            assert_eq!(err.index, 1);

            let err = parse_byte_list(",1").unwrap_err();
            assert_eq!(err.kind, ListErrorKind::EmptyElement);
            assert_eq!(err.index, 0);

            assert!(parse_byte_list("[,]").is_err());
        }

        #[test]
        fn unbalanced_brackets() {
            for input in ["[1, 2", "1, 2]", "["] {
                let err = parse_byte_list(input).unwrap_err();
                assert_eq!(err.kind, ListErrorKind::UnbalancedBracket, "{}", input);
            }
        }
    }

    mod verdicts {
        use super::*;

        #[test]
        fn valid_lists() {
            assert!(is_valid_utf8_list("[]"));
            assert!(is_valid_utf8_list("[65, 97, 48]"));
            assert!(is_valid_utf8_list("[197, 130, 1]"));
        }

        #[test]
        fn invalid_lists() {
            assert!(!is_valid_utf8_list("[235, 140, 4, 256]"));
            assert!(!is_valid_utf8_list("[255]"));
            assert!(!is_valid_utf8_list("[128]"));
        }

        #[test]
        fn unparseable_list_is_invalid() {
            assert!(!is_valid_utf8_list("[65, None]"));
            assert!(!is_valid_utf8_list("[65"));
        }
    }
}
