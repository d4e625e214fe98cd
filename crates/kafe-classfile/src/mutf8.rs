//! Modified UTF-8, the string encoding of `Utf8` constants.
//!
//! Differs from standard UTF-8 in two places: U+0000 is written as the two
//! bytes `C0 80`, and characters outside the BMP are written as a UTF-16
//! surrogate pair with each half encoded in three bytes.

/// Encode a string as modified UTF-8.
pub fn encode(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for unit in text.encode_utf16() {
        match unit {
            0x0001..=0x007F => out.push(unit as u8),
            // Includes U+0000, which takes the overlong two-byte form.
            0x0000 | 0x0080..=0x07FF => {
                out.push(0xC0 | (unit >> 6) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            }
            _ => {
                out.push(0xE0 | (unit >> 12) as u8);
                out.push(0x80 | ((unit >> 6) & 0x3F) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            }
        }
    }
    out
}

/// Decode modified UTF-8. Returns `None` on malformed input.
pub fn decode(bytes: &[u8]) -> Option<String> {
    let mut units = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b & 0x80 == 0 {
            // A raw NUL byte never appears in modified UTF-8.
            if b == 0 {
                return None;
            }
            units.push(u16::from(b));
            i += 1;
        } else if b & 0xE0 == 0xC0 {
            let b2 = continuation(bytes, i + 1)?;
            units.push((u16::from(b & 0x1F) << 6) | b2);
            i += 2;
        } else if b & 0xF0 == 0xE0 {
            let b2 = continuation(bytes, i + 1)?;
            let b3 = continuation(bytes, i + 2)?;
            units.push((u16::from(b & 0x0F) << 12) | (b2 << 6) | b3);
            i += 3;
        } else {
            return None;
        }
    }

    String::from_utf16(&units).ok()
}

fn continuation(bytes: &[u8], at: usize) -> Option<u16> {
    let b = *bytes.get(at)?;
    (b & 0xC0 == 0x80).then_some(u16::from(b & 0x3F))
}
