//! UTF-16 offset helpers
//!
//! Stored offsets and DOM selection offsets count UTF-16 code units, while
//! Rust strings index by byte. Everything crossing that line goes through
//! here.

/// Length of `text` in UTF-16 code units
pub fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Byte index for a UTF-16 offset.
///
/// An offset landing inside a surrogate pair snaps back to the start of that
/// character. Offsets past the end return `None`.
pub fn utf16_to_byte(text: &str, offset: usize) -> Option<usize> {
    let mut units = 0;
    for (byte, ch) in text.char_indices() {
        let next = units + ch.len_utf16();
        if offset < next {
            return Some(byte);
        }
        units = next;
    }
    (offset == units).then_some(text.len())
}

/// UTF-16 offset of a byte index (must be a char boundary)
pub fn byte_to_utf16(text: &str, byte: usize) -> usize {
    text.get(..byte).map(utf16_len).unwrap_or_else(|| utf16_len(text))
}

/// Round a UTF-16 offset down to the start of the character it falls in,
/// clamping to the end of `text`
pub fn floor_char_boundary(text: &str, offset: usize) -> usize {
    let len = utf16_len(text);
    if offset >= len {
        return len;
    }
    utf16_to_byte(text, offset)
        .map(|byte| byte_to_utf16(text, byte))
        .unwrap_or(len)
}

/// Slice `text` by UTF-16 offsets, `None` when out of bounds or inverted
pub fn slice_utf16(text: &str, start: usize, end: usize) -> Option<&str> {
    if start > end {
        return None;
    }
    let from = utf16_to_byte(text, start)?;
    let to = utf16_to_byte(text, end)?;
    text.get(from..to)
}
