//! Windows-1252 encoding utilities for Latin label printers
//!
//! Label and receipt printers sold for Western markets ship with the
//! WPC1252 code page. This module provides utilities for:
//! - Calculating printed string widths
//! - Truncating strings to a printed width
//! - Converting UTF-8 to Windows-1252 while preserving ESC/POS commands

use encoding_rs::WINDOWS_1252;
use tracing::instrument;

/// ESC t 16 - Select character code table WPC1252
const SELECT_CP1252: [u8; 3] = [0x1B, 0x74, 16];

/// Byte printed in place of characters the code page cannot represent
const REPLACEMENT: u8 = b'?';

/// Get the printed width of a string
///
/// Every character occupies exactly one cell in a single-byte code page,
/// unmappable characters included (they print as `?`).
pub fn text_width(s: &str) -> usize {
    s.chars().count()
}

/// Truncate a string to fit within a printed width
pub fn truncate_width(s: &str, max_width: usize) -> String {
    s.chars().take(max_width).collect()
}

/// Convert mixed UTF-8 content (with ESC/POS commands) to Windows-1252
///
/// ASCII bytes (0x00-0x7F) are preserved exactly as is, which protects
/// ESC/POS commands from being corrupted. Only bytes >= 0x80 are treated as
/// UTF-8 sequences and converted.
///
/// The code page is selected at the start and again after every INIT
/// command (ESC @), since INIT resets the printer to its default table.
#[instrument(skip(bytes))]
pub fn convert_to_cp1252(bytes: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(bytes.len() + SELECT_CP1252.len());
    result.extend_from_slice(&SELECT_CP1252);

    let mut buffer = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if b == 0x1B && i + 1 < bytes.len() && bytes[i + 1] == 0x40 {
            flush_buffer(&mut buffer, &mut result);
            result.extend_from_slice(&[0x1B, 0x40]);
            result.extend_from_slice(&SELECT_CP1252);
            i += 2;
            continue;
        }

        if b < 0x80 {
            flush_buffer(&mut buffer, &mut result);
            result.push(b);
        } else {
            buffer.push(b);
        }
        i += 1;
    }

    flush_buffer(&mut buffer, &mut result);
    result
}

/// Flush the non-ASCII buffer, converting UTF-8 to Windows-1252
fn flush_buffer(buffer: &mut Vec<u8>, result: &mut Vec<u8>) {
    if buffer.is_empty() {
        return;
    }

    let s = String::from_utf8_lossy(buffer);
    let mut tmp = [0u8; 4];
    for c in s.chars() {
        let (encoded, _, had_errors) = WINDOWS_1252.encode(c.encode_utf8(&mut tmp));
        if had_errors {
            // encoding_rs substitutes an HTML numeric reference; the printer needs one cell
            result.push(REPLACEMENT);
        } else {
            result.extend_from_slice(&encoded);
        }
    }
    buffer.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("hello"), 5);
        assert_eq!(text_width("Café"), 4);
        assert_eq!(text_width(""), 0);
    }

    #[test]
    fn test_truncate_width() {
        assert_eq!(truncate_width("hello world", 5), "hello");
        assert_eq!(truncate_width("Señor", 3), "Señ");
        assert_eq!(truncate_width("ab", 10), "ab");
    }

    #[test]
    fn test_ascii_and_commands_preserved() {
        let input = [0x1B, 0x45, 0x01, b'A', b'B', 0x0A];
        let out = convert_to_cp1252(&input);
        assert_eq!(&out[..3], &SELECT_CP1252);
        assert_eq!(&out[3..], &input);
    }

    #[test]
    fn test_latin_characters_converted() {
        let out = convert_to_cp1252("Café €5".as_bytes());
        assert_eq!(&out[3..], &[b'C', b'a', b'f', 0xE9, b' ', 0x80, b'5']);
    }

    #[test]
    fn test_unmappable_becomes_question_mark() {
        let out = convert_to_cp1252("A你B".as_bytes());
        assert_eq!(&out[3..], b"A?B");
    }

    #[test]
    fn test_code_page_reselected_after_init() {
        let out = convert_to_cp1252(&[b'x', 0x1B, 0x40, b'y']);
        assert_eq!(
            out,
            vec![0x1B, 0x74, 16, b'x', 0x1B, 0x40, 0x1B, 0x74, 16, b'y']
        );
    }
}
