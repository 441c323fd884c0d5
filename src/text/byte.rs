//! Per-byte classification for UTF-8 structure checks.
//!
//! | Class          | Bit pattern | Leading ones | Continuations owed |
//! |----------------|-------------|--------------|--------------------|
//! | `Ascii`        | `0xxxxxxx`  | 0            | 0                  |
//! | `Continuation` | `10xxxxxx`  | 1            | -                  |
//! | `LeadOf2`      | `110xxxxx`  | 2            | 1                  |
//! | `LeadOf3`      | `1110xxxx`  | 3            | 2                  |
//! | `LeadOf4`      | `11110xxx`  | 4            | 3                  |
//! | `Invalid`      | `11111xxx`  | 5-8          | -                  |

use alloc::string::String;

/// An integer that carries one byte in its low 8 bits.
///
/// Implemented for every primitive integer type so callers can validate
/// `&[u8]`, `&[i32]`, `&[u64]` and so on without converting first.
pub trait ByteValue: Copy {
    /// The low 8 bits, two's complement for signed types.
    ///
    /// `256` becomes `0x00` and `-1` becomes `0xFF`.
    fn low_byte(self) -> u8;

    /// The value as a byte if it lies in `0..=255`.
    fn exact_byte(self) -> Option<u8>;
}

macro_rules! impl_byte_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ByteValue for $ty {
                #[inline(always)]
                fn low_byte(self) -> u8 {
                    self as u8
                }

                #[inline(always)]
                fn exact_byte(self) -> Option<u8> {
                    u8::try_from(self).ok()
                }
            }
        )*
    };
}

impl_byte_value!(u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl ByteValue for u8 {
    #[inline(always)]
    fn low_byte(self) -> u8 {
        self
    }

    #[inline(always)]
    fn exact_byte(self) -> Option<u8> {
        Some(self)
    }
}

impl<T: ByteValue> ByteValue for &T {
    #[inline(always)]
    fn low_byte(self) -> u8 {
        (*self).low_byte()
    }

    #[inline(always)]
    fn exact_byte(self) -> Option<u8> {
        (*self).exact_byte()
    }
}

/// Count the leading one bits of a byte, from bit 7 downward.
///
/// Returns a value in `0..=8`.
#[inline(always)]
pub fn lead_ones(byte: u8) -> u32 {
    byte.leading_ones()
}

/// Check if a byte matches the continuation pattern `10xxxxxx`.
#[inline(always)]
pub fn is_continuation_byte(byte: u8) -> bool {
    (byte & 0xC0) == 0x80
}

/// Structural role of a single byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteClass {
    /// `0xxxxxxx`: a complete single-byte character.
    Ascii,
    /// `10xxxxxx`: only legal inside a multi-byte character.
    Continuation,
    /// `110xxxxx`: starts a 2-byte character.
    LeadOf2,
    /// `1110xxxx`: starts a 3-byte character.
    LeadOf3,
    /// `11110xxx`: starts a 4-byte character.
    LeadOf4,
    /// `11111xxx`: never legal.
    Invalid,
}

impl ByteClass {
    /// Classify a byte by its leading one bits.
    #[inline]
    pub fn of(byte: u8) -> Self {
        match lead_ones(byte) {
            0 => Self::Ascii,
            1 => Self::Continuation,
            2 => Self::LeadOf2,
            3 => Self::LeadOf3,
            4 => Self::LeadOf4,
            _ => Self::Invalid,
        }
    }

    /// Number of continuation bytes a character starting with this byte owes.
    ///
    /// Returns `None` for bytes that cannot start a character.
    #[inline]
    pub fn continuations(self) -> Option<usize> {
        match self {
            Self::Ascii => Some(0),
            Self::LeadOf2 => Some(1),
            Self::LeadOf3 => Some(2),
            Self::LeadOf4 => Some(3),
            Self::Continuation | Self::Invalid => None,
        }
    }

    /// Total character length for a lead byte of this class.
    #[inline]
    pub fn sequence_len(self) -> Option<usize> {
        self.continuations().map(|n| n + 1)
    }

    /// Whether a byte of this class can start a character.
    #[inline]
    pub fn starts_character(self) -> bool {
        self.continuations().is_some()
    }
}

/// Format a byte as a human-readable string for error messages.
pub fn format_byte(byte: u8) -> String {
    if byte.is_ascii_graphic() || byte == b' ' {
        alloc::format!("0x{:02X} ({:?})", byte, byte as char)
    } else {
        alloc::format!("0x{:02X}", byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod lead_ones_count {
        use super::*;

        #[test]
        fn boundaries() {
            assert_eq!(lead_ones(0x00), 0);
            assert_eq!(lead_ones(0x7F), 0);
            assert_eq!(lead_ones(0x80), 1);
            assert_eq!(lead_ones(0xBF), 1);
            assert_eq!(lead_ones(0xC0), 2);
            assert_eq!(lead_ones(0xDF), 2);
            assert_eq!(lead_ones(0xE0), 3);
            assert_eq!(lead_ones(0xEF), 3);
            assert_eq!(lead_ones(0xF0), 4);
            assert_eq!(lead_ones(0xF7), 4);
            assert_eq!(lead_ones(0xF8), 5);
            assert_eq!(lead_ones(0xFC), 6);
            assert_eq!(lead_ones(0xFE), 7);
            assert_eq!(lead_ones(0xFF), 8);
        }

        #[test]
        fn matches_shift_probe() {
            // Probe bit 7 downward, stopping at the first zero bit
            for byte in 0..=255u8 {
                let mut mask = 0x80u8;
                let mut count = 0;
                while mask != 0 && byte & mask != 0 {
                    count += 1;
                    mask >>= 1;
                }
                assert_eq!(lead_ones(byte), count, "byte 0x{:02X}", byte);
            }
        }
    }

    mod classification {
        use super::*;

        #[test]
        fn every_byte_has_expected_class() {
            for byte in 0..=255u8 {
                let expected = match byte {
                    0x00..=0x7F => ByteClass::Ascii,
                    0x80..=0xBF => ByteClass::Continuation,
                    0xC0..=0xDF => ByteClass::LeadOf2,
                    0xE0..=0xEF => ByteClass::LeadOf3,
                    0xF0..=0xF7 => ByteClass::LeadOf4,
                    0xF8..=0xFF => ByteClass::Invalid,
                };
                assert_eq!(ByteClass::of(byte), expected, "byte 0x{:02X}", byte);
            }
        }

        #[test]
        fn continuation_counts() {
            assert_eq!(ByteClass::Ascii.continuations(), Some(0));
            assert_eq!(ByteClass::LeadOf2.continuations(), Some(1));
            assert_eq!(ByteClass::LeadOf3.continuations(), Some(2));
            assert_eq!(ByteClass::LeadOf4.continuations(), Some(3));
            assert_eq!(ByteClass::Continuation.continuations(), None);
            assert_eq!(ByteClass::Invalid.continuations(), None);

            assert_eq!(ByteClass::LeadOf4.sequence_len(), Some(4));
            assert!(!ByteClass::Continuation.starts_character());
            assert!(ByteClass::Ascii.starts_character());
        }

        #[test]
        fn continuation_pattern() {
            assert!(is_continuation_byte(0x80));
            assert!(is_continuation_byte(0xBF));
            assert!(!is_continuation_byte(0x7F));
            assert!(!is_continuation_byte(0xC0));
        }
    }

    mod byte_values {
        use super::*;

        #[test]
        fn low_byte_masks() {
            assert_eq!(256u32.low_byte(), 0x00);
            assert_eq!(386i32.low_byte(), 0x82);
            assert_eq!((-1i64).low_byte(), 0xFF);
            assert_eq!((-128i8).low_byte(), 0x80);
            assert_eq!(0x1_0000_00C5u64.low_byte(), 0xC5);
            assert_eq!(0xE5u8.low_byte(), 0xE5);
        }

        #[test]
        fn exact_byte_rejects_out_of_range() {
            assert_eq!(255i32.exact_byte(), Some(0xFF));
            assert_eq!(0usize.exact_byte(), Some(0));
            assert_eq!(256i32.exact_byte(), None);
            assert_eq!((-1i32).exact_byte(), None);
            assert_eq!((-1i8).exact_byte(), None);
        }

        #[test]
        fn references_delegate() {
            let value = 300u16;
            assert_eq!((&value).low_byte(), 44);
            assert_eq!((&value).exact_byte(), None);
        }
    }

    #[test]
    fn format_byte_output() {
        assert_eq!(format_byte(b'A'), "0x41 ('A')");
        assert_eq!(format_byte(b' '), "0x20 (' ')");
        assert_eq!(format_byte(0x80), "0x80");
    }
}
