//! Unicode scalar <-> UTF-16 text, surrogate pairs included.

/// Numeric value of the first character of `text`, read as UTF-16.
///
/// A leading high/low surrogate pair combines into one scalar; anything
/// else falls back to the first code unit. There is no error path, and an
/// empty string decodes to 0.
pub fn decode(text: &str) -> u32 {
    let mut units = text.encode_utf16();
    let Some(first) = units.next() else { return 0 };
    match units.next() {
        Some(second) if (first & 0xFC00) == 0xD800 && (second & 0xFC00) == 0xDC00 => {
            0x10000 + (((first as u32) - 0xD800) << 10) + ((second as u32) - 0xDC00)
        }
        _ => first as u32,
    }
}

/// Inverse of [`decode`]: scalars above the BMP split into a conforming
/// surrogate pair.
pub fn encode(code: u32) -> String {
    if code > 0xFFFF {
        let c = code - 0x10000;
        let high = (0xD800 + (c >> 10)) as u16;
        let low = (0xDC00 + (c & 0x3FF)) as u16;
        String::from_utf16_lossy(&[high, low])
    } else {
        char::from_u32(code).map(String::from).unwrap_or_default()
    }
}
