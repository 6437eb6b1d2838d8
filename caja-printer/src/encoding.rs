//! Windows-1252 encoding utilities for Western-language thermal printers
//!
//! Receipts carry Spanish text (accented vowels, `ñ`, the Euro sign),
//! which most ESC/POS firmwares expect in a single-byte code page.
//! This module provides utilities for:
//! - Calculating CP1252 string widths
//! - Truncating/padding strings to CP1252 widths
//! - Converting UTF-8 to CP1252 while preserving ESC/POS commands

/// Get the CP1252 byte width of a string
///
/// Every encodable character is a single byte in CP1252.
pub fn cp1252_width(s: &str) -> usize {
    let (cow, _, _) = encoding_rs::WINDOWS_1252.encode(s);
    cow.len()
}

/// Truncate a string to fit within a CP1252 byte width
pub fn truncate_cp1252(s: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut result = String::new();
    for c in s.chars() {
        let s_char = c.to_string();
        let (cow, _, _) = encoding_rs::WINDOWS_1252.encode(&s_char);
        let char_len = cow.len();

        if width + char_len > max_width {
            break;
        }
        result.push(c);
        width += char_len;
    }
    result
}

/// Pad a string to a specific CP1252 byte width
///
/// If the string is longer than the width, it will be truncated.
pub fn pad_cp1252(s: &str, width: usize, align_right: bool) -> String {
    let current_width = cp1252_width(s);
    if current_width >= width {
        return truncate_cp1252(s, width);
    }
    let spaces = width - current_width;
    if align_right {
        format!("{}{}", " ".repeat(spaces), s)
    } else {
        format!("{}{}", s, " ".repeat(spaces))
    }
}

// ESC t 16 - select character code table WPC1252
const SELECT_CP1252: [u8; 3] = [0x1B, 0x74, 16];

/// Convert mixed UTF-8 content (with ESC/POS commands) to CP1252
///
/// ASCII bytes (0x00-0x7F) pass through exactly as is, which protects
/// ESC/POS commands from being corrupted. Only bytes >= 0x80 are treated
/// as UTF-8 sequences and re-encoded to CP1252.
///
/// The INIT command (ESC @) resets the code page, so the CP1252 code
/// table is re-selected after every INIT encountered in the stream.
pub fn convert_to_cp1252(bytes: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(bytes.len() + 8);

    // Select the CP1252 code table at the start
    result.extend_from_slice(&SELECT_CP1252);

    let mut buffer = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        // INIT (ESC @ = 0x1B 0x40) resets the code table
        if b == 0x1B && i + 1 < bytes.len() && bytes[i + 1] == 0x40 {
            flush_buffer(&mut buffer, &mut result);

            result.push(0x1B);
            result.push(0x40);
            result.extend_from_slice(&SELECT_CP1252);

            i += 2;
            continue;
        }

        if b < 128 {
            // ASCII byte (command or ASCII text)
            flush_buffer(&mut buffer, &mut result);
            result.push(b);
        } else {
            // Non-ASCII byte (part of a UTF-8 sequence)
            buffer.push(b);
        }
        i += 1;
    }

    flush_buffer(&mut buffer, &mut result);

    result
}

/// Flush the non-ASCII buffer, converting UTF-8 to CP1252
fn flush_buffer(buffer: &mut Vec<u8>, result: &mut Vec<u8>) {
    if buffer.is_empty() {
        return;
    }

    let s = String::from_utf8_lossy(buffer);
    let (cp, _, _) = encoding_rs::WINDOWS_1252.encode(&s);
    result.extend_from_slice(&cp);
    buffer.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cp1252_width() {
        assert_eq!(cp1252_width("hello"), 5);
        assert_eq!(cp1252_width("café"), 4);
        assert_eq!(cp1252_width("señal"), 5);
    }

    #[test]
    fn test_truncate_cp1252() {
        assert_eq!(truncate_cp1252("hello world", 5), "hello");
        assert_eq!(truncate_cp1252("ñandú", 3), "ñan");
    }

    #[test]
    fn test_pad_cp1252() {
        assert_eq!(pad_cp1252("hi", 5, false), "hi   ");
        assert_eq!(pad_cp1252("hi", 5, true), "   hi");
        assert_eq!(pad_cp1252("hello world", 5, false), "hello");
    }

    #[test]
    fn test_convert_selects_code_page() {
        let out = convert_to_cp1252(b"abc");
        assert_eq!(&out[..3], &[0x1B, 0x74, 16]);
        assert_eq!(&out[3..], b"abc");
    }

    #[test]
    fn test_convert_reselects_after_init() {
        let out = convert_to_cp1252(&[0x1B, 0x40, b'x']);
        // INIT passes through, then the code table is selected again
        assert_eq!(out, vec![0x1B, 0x74, 16, 0x1B, 0x40, 0x1B, 0x74, 16, b'x']);
    }

    #[test]
    fn test_convert_reencodes_accents() {
        let out = convert_to_cp1252("ñ".as_bytes());
        assert_eq!(&out[3..], &[0xF1]); // CP1252 'ñ'
    }

    #[test]
    fn test_convert_euro_sign() {
        let out = convert_to_cp1252("€".as_bytes());
        assert_eq!(&out[3..], &[0x80]); // CP1252 '€'
    }
}
