//! Text <-> binary codec
//!
//! Converts between Unicode text and its UTF-8 byte encoding written as
//! 8-digit base-2 groups, most-significant bit first, joined with single
//! spaces. Decoding accepts arbitrary separators: every character that is
//! not '0' or '1' is discarded before the digits are packed into bytes.

use thiserror::Error;

/// Invalid binary-pane input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// 0/1 digit count (separators stripped) is not a whole number of octets.
    #[error("binary length must be a multiple of 8 bits, got {0}")]
    TruncatedOctet(usize),
    /// The packed bytes are not a valid UTF-8 sequence.
    #[error("binary data is not valid UTF-8 text")]
    InvalidUtf8(#[source] std::str::Utf8Error),
}

/// Encodes text into a space-separated binary string.
///
/// Each UTF-8 byte becomes one zero-padded 8-digit group. Total for any
/// `&str`; the empty string encodes to the empty string.
pub fn encode(text: &str) -> String {
    // 8 digits plus a separator per byte
    let mut out = String::with_capacity(text.len() * 9);
    for byte in text.bytes() {
        if !out.is_empty() {
            out.push(' ');
        }
        for shift in (0..8).rev() {
            out.push(if byte >> shift & 1 == 1 { '1' } else { '0' });
        }
    }
    out
}

/// Decodes a binary string back into text.
///
/// Characters other than '0' and '1' are treated as separators and skipped.
/// Fails if the remaining digit count is not a multiple of 8 or if the byte
/// sequence is not valid UTF-8. Never mutates anything on failure.
pub fn decode(binary: &str) -> Result<String, FormatError> {
    let mut bytes = Vec::with_capacity(binary.len() / 9 + 1);
    let mut acc = 0u8;
    let mut filled = 0usize;
    for c in binary.chars() {
        let bit = match c {
            '0' => 0,
            '1' => 1,
            _ => continue,
        };
        acc = acc << 1 | bit;
        filled += 1;
        if filled == 8 {
            bytes.push(acc);
            acc = 0;
            filled = 0;
        }
    }
    if filled != 0 {
        return Err(FormatError::TruncatedOctet(bytes.len() * 8 + filled));
    }
    String::from_utf8(bytes).map_err(|e| FormatError::InvalidUtf8(e.utf8_error()))
}

/// Count of significant 0/1 digits, separators excluded.
pub fn bit_len(binary: &str) -> usize {
    binary.chars().filter(|c| matches!(c, '0' | '1')).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_single_ascii_byte() {
        assert_eq!(encode("A"), "01000001");
    }

    #[test]
    fn encodes_with_space_separators() {
        assert_eq!(encode("AB"), "01000001 01000010");
    }

    #[test]
    fn empty_string_round_trips_to_empty() {
        assert_eq!(encode(""), "");
        assert_eq!(decode("").unwrap(), "");
    }

    #[test]
    fn decodes_single_ascii_byte() {
        assert_eq!(decode("01000001").unwrap(), "A");
    }

    #[test]
    fn round_trips_unicode() {
        for text in ["hello world", "héllo", "中文转换", "🦀 rust", "a\nb\tc"] {
            assert_eq!(decode(&encode(text)).unwrap(), text, "round trip of {text:?}");
        }
    }

    #[test]
    fn separators_are_ignored() {
        assert_eq!(decode("0100 0001").unwrap(), "A");
        assert_eq!(decode("01000001\n01000010").unwrap(), "AB");
        assert_eq!(decode("0100-0001, 0100_0010!").unwrap(), "AB");
    }

    #[test]
    fn rejects_unaligned_digit_count() {
        assert_eq!(decode("0100000"), Err(FormatError::TruncatedOctet(7)));
        assert!(matches!(
            decode("01000001 0"),
            Err(FormatError::TruncatedOctet(9))
        ));
    }

    #[test]
    fn rejects_invalid_utf8() {
        // 0xFF is never valid in UTF-8
        assert!(matches!(
            decode("11111111"),
            Err(FormatError::InvalidUtf8(_))
        ));
        // lone continuation byte
        assert!(matches!(
            decode("10000000"),
            Err(FormatError::InvalidUtf8(_))
        ));
    }

    #[test]
    fn multibyte_sequences_decode() {
        // U+4E2D as three UTF-8 bytes
        assert_eq!(decode("11100100 10111000 10101101").unwrap(), "中");
    }

    #[test]
    fn bit_len_counts_digits_only() {
        assert_eq!(bit_len(""), 0);
        assert_eq!(bit_len("01000001"), 8);
        assert_eq!(bit_len("0100 0001 x"), 8);
        assert_eq!(bit_len(&encode("中")), 24);
    }

    #[test]
    fn error_messages_are_user_facing() {
        let err = decode("010").unwrap_err();
        assert_eq!(err.to_string(), "binary length must be a multiple of 8 bits, got 3");
    }
}
