//! A-law (G.711) companding.
//!
//! The encoder works on a 13-bit magnitude (input divided by 8, truncating
//! toward zero). Even bits of the code are inverted on the wire, which is
//! what the `0x55` / `0xD5` masks implement.

use crate::segment;

/// Segment end points for the 13-bit magnitude.
static SEG_AEND: [u32; 8] = [0x1F, 0x3F, 0x7F, 0xFF, 0x1FF, 0x3FF, 0x7FF, 0xFFF];

/// Encode one 16-bit linear sample as an A-law byte.
#[allow(clippy::arithmetic_side_effects)] // |scaled| <= 4096, seg <= 7
#[allow(clippy::cast_possible_truncation)] // composed code fits in 7 bits
pub fn encode(pcm: i16) -> u8 {
    let scaled = i32::from(pcm) / 8;

    // Negative values use one's complement magnitude: -1 -> 0.
    let (mask, magnitude): (u8, u32) = if scaled >= 0 {
        (0xD5, scaled.unsigned_abs())
    } else {
        (0x55, scaled.unsigned_abs() - 1)
    };

    let seg = segment(magnitude, &SEG_AEND);
    if seg > 7 {
        return 0x7F ^ mask;
    }

    let mantissa = if seg < 2 {
        (magnitude >> 1) & 0x0F
    } else {
        (magnitude >> seg) & 0x0F
    };
    (((seg << 4) | mantissa) as u8) ^ mask
}

/// Decode one A-law byte to a 16-bit linear sample.
///
/// The result magnitude lies in `8..=32256`; there is no zero code.
#[allow(clippy::arithmetic_side_effects)] // t <= 0x1F8 << 6
pub fn decode(code: u8) -> i16 {
    let code = code ^ 0x55;

    let mut t = i16::from(code & 0x0F) << 4;
    let seg = (code & 0x70) >> 4;
    match seg {
        0 => t += 8,
        1 => t += 0x108,
        _ => t = (t + 0x108) << (seg - 1),
    }

    if code & 0x80 != 0 {
        t
    } else {
        -t
    }
}

/// Encode `pcm` into `out`; returns the number of samples converted.
pub fn encode_slice(pcm: &[i16], out: &mut [u8]) -> usize {
    for (dst, &sample) in out.iter_mut().zip(pcm) {
        *dst = encode(sample);
    }
    pcm.len().min(out.len())
}

/// Decode `codes` into `out`; returns the number of samples converted.
pub fn decode_slice(codes: &[u8], out: &mut [i16]) -> usize {
    for (dst, &code) in out.iter_mut().zip(codes) {
        *dst = decode(code);
    }
    codes.len().min(out.len())
}
