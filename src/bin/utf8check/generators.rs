//! Byte sequence generators for benchmarking and testing.
//!
//! Output is built from whole characters, so it always validates unless
//! truncation is requested, in which case exactly the final character is cut
//! short.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Character mixes for generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf8Pattern {
    /// Pure ASCII (single-byte characters)
    Ascii,
    /// Latin Extended (2-byte characters)
    Latin,
    /// CJK ideographs (3-byte characters)
    Cjk,
    /// Emoji (4-byte characters)
    Emoji,
    /// Uniform mix of all character lengths
    Mixed,
    /// Random payload bits for every length, including overlong encodings,
    /// surrogate halves and values above U+10FFFF
    Structural,
}

impl Utf8Pattern {
    /// Character lengths this pattern draws from.
    fn lengths(self) -> &'static [usize] {
        match self {
            Self::Ascii => &[1],
            Self::Latin => &[2],
            Self::Cjk => &[3],
            Self::Emoji => &[4],
            Self::Mixed | Self::Structural => &[1, 2, 3, 4],
        }
    }
}

/// Generate roughly `target_size` bytes of whole characters.
///
/// With `truncate`, a final multi-byte character is appended and then cut
/// short by at least one byte, so the output is invalid.
pub fn generate_utf8(
    target_size: usize,
    pattern: Utf8Pattern,
    seed: Option<u64>,
    truncate: bool,
) -> Vec<u8> {
    let mut rng = seed
        .map(ChaCha8Rng::seed_from_u64)
        .unwrap_or_else(ChaCha8Rng::from_entropy);
    let mut result = Vec::with_capacity(target_size.saturating_add(4));
    let lengths = pattern.lengths();

    while result.len() < target_size {
        let len = lengths[rng.gen_range(0..lengths.len())];
        // Pad with ASCII rather than overshoot
        let len = if result.len() + len > target_size { 1 } else { len };
        push_character(&mut result, len, pattern, &mut rng);
    }

    if truncate {
        let len = match pattern {
            Utf8Pattern::Ascii => rng.gen_range(2..=4),
            _ => *lengths.iter().filter(|&&n| n > 1).max().unwrap_or(&4),
        };
        push_character(&mut result, len, pattern, &mut rng);
        let cut = rng.gen_range(1..len);
        result.truncate(result.len() - cut);
    }

    result
}

fn push_character(out: &mut Vec<u8>, len: usize, pattern: Utf8Pattern, rng: &mut ChaCha8Rng) {
    if pattern == Utf8Pattern::Structural {
        push_raw_shape(out, len, rng);
        return;
    }

    let ch = random_char(len, rng);
    let mut buf = [0u8; 4];
    out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
}

/// A random scalar value whose UTF-8 encoding is `len` bytes long.
fn random_char(len: usize, rng: &mut ChaCha8Rng) -> char {
    let (low, high) = match len {
        1 => (0x20, 0x7E),
        2 => (0x80, 0x7FF),
        3 => (0x800, 0xFFFF),
        _ => (0x10000, 0x10FFFF),
    };

    loop {
        // Surrogates are the only gap in these ranges
        if let Some(ch) = char::from_u32(rng.gen_range(low..=high)) {
            return ch;
        }
    }
}

/// A lead byte followed by `len - 1` continuation bytes, payload bits random.
fn push_raw_shape(out: &mut Vec<u8>, len: usize, rng: &mut ChaCha8Rng) {
    let lead = match len {
        1 => rng.gen_range(0x00..=0x7Fu8),
        2 => 0xC0 | rng.gen_range(0x00..=0x1Fu8),
        3 => 0xE0 | rng.gen_range(0x00..=0x0Fu8),
        _ => 0xF0 | rng.gen_range(0x00..=0x07u8),
    };
    out.push(lead);
    for _ in 1..len {
        out.push(0x80 | rng.gen_range(0x00..=0x3Fu8));
    }
}
