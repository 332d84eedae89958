//! Byte decoding for delimited text.

use std::borrow::Cow;

use encoding_rs::{UTF_8, WINDOWS_1252};

/// Decodes raw file bytes into text.
///
/// A byte order mark selects the encoding (and is stripped). Without one the
/// bytes are read as UTF-8, falling back to Windows-1252 when they are not
/// valid UTF-8.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    if let Some((encoding, bom_len)) = encoding_rs::Encoding::for_bom(bytes) {
        let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        if had_errors {
            tracing::warn!(
                encoding = encoding.name(),
                "Input contains invalid sequences; replaced with U+FFFD"
            );
        }
        return text;
    }

    match UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => text,
        None => {
            tracing::warn!("Input is not valid UTF-8, decoding as Windows-1252");
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_utf8_bom() {
        let bytes = b"\xEF\xBB\xBFname,age\n";
        assert_eq!(decode_text(bytes), "name,age\n");
    }

    #[test]
    fn test_utf16_le_bom() {
        let bytes = [0xFF, 0xFE, b'a', 0x00, b',', 0x00, b'b', 0x00];
        assert_eq!(decode_text(&bytes), "a,b");
    }

    #[test]
    fn test_windows_1252_fallback() {
        // "café" with 0xE9 for é
        let bytes = b"caf\xE9";
        assert_eq!(decode_text(bytes), "café");
    }
}
