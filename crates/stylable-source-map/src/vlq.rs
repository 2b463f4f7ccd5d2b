//! Base64 variable-length quantities as used by the `mappings` field.
//!
//! Each value is stored sign-in-lowest-bit, then split into 5-bit groups
//! (least significant first). Bit 6 of every base64 digit marks continuation.

use crate::error::SourceMapError;

const BASE64_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

const VLQ_BASE_SHIFT: u32 = 5;
const VLQ_BASE_MASK: u64 = (1 << VLQ_BASE_SHIFT) - 1;
const VLQ_CONTINUATION_BIT: u64 = 1 << VLQ_BASE_SHIFT;

/// Append the encoding of `value` to `out`
pub fn encode(value: i64, out: &mut String) {
    let mut vlq: u64 = if value < 0 {
        (value.unsigned_abs() << 1) | 1
    } else {
        (value as u64) << 1
    };

    loop {
        let mut digit = vlq & VLQ_BASE_MASK;
        vlq >>= VLQ_BASE_SHIFT;
        if vlq > 0 {
            digit |= VLQ_CONTINUATION_BIT;
        }
        out.push(BASE64_ALPHABET[digit as usize] as char);
        if vlq == 0 {
            break;
        }
    }
}

fn digit_value(ch: u8) -> Option<u64> {
    let value = match ch {
        b'A'..=b'Z' => ch - b'A',
        b'a'..=b'z' => ch - b'a' + 26,
        b'0'..=b'9' => ch - b'0' + 52,
        b'+' => 62,
        b'/' => 63,
        _ => return None,
    };
    Some(value as u64)
}

/// Decode every value in one segment (the text between `,` / `;` separators)
pub fn decode_segment(segment: &str) -> Result<Vec<i64>, SourceMapError> {
    let mut values = Vec::new();
    let mut accumulated: u64 = 0;
    let mut shift: u32 = 0;
    let mut pending = false;

    for &ch in segment.as_bytes() {
        let digit = digit_value(ch).ok_or_else(|| {
            SourceMapError::decoding(format!(
                "invalid base64 digit {:?} in segment {:?}",
                ch as char, segment
            ))
        })?;
        let bits = digit & VLQ_BASE_MASK;
        // Only four bits of the last group fit in 64
        if shift > 60 || (shift == 60 && bits > 0b1111) {
            return Err(SourceMapError::decoding(format!(
                "value too large in segment {:?}",
                segment
            )));
        }

        accumulated |= bits << shift;
        pending = true;

        if digit & VLQ_CONTINUATION_BIT != 0 {
            shift += VLQ_BASE_SHIFT;
            continue;
        }

        let magnitude = (accumulated >> 1) as i64;
        values.push(if accumulated & 1 == 1 {
            -magnitude
        } else {
            magnitude
        });
        accumulated = 0;
        shift = 0;
        pending = false;
    }

    if pending {
        return Err(SourceMapError::decoding(format!(
            "segment {:?} ends in the middle of a value",
            segment
        )));
    }

    Ok(values)
}
