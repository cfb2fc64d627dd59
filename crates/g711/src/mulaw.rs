//! Mu-law (G.711 µ-255) companding.
//!
//! The encoder works on a 14-bit magnitude: the two least significant bits of
//! the 16-bit input are dropped, the magnitude is clipped to [`CLIP`] and the
//! bias is added before the segment search. Codes are stored complemented, so
//! a zero sample encodes as `0xFF`.

use crate::segment;

/// Bias added to the magnitude before segment lookup (16-bit scale).
pub const BIAS: i32 = 0x84;

/// Largest 14-bit magnitude accepted before saturation.
pub const CLIP: u32 = 8159;

/// Segment end points for the biased 14-bit magnitude.
static SEG_UEND: [u32; 8] = [0x3F, 0x7F, 0xFF, 0x1FF, 0x3FF, 0x7FF, 0xFFF, 0x1FFF];

/// Encode one 16-bit linear sample as a mu-law byte.
///
/// Magnitudes beyond the last segment saturate to the largest code of the
/// matching sign (`0x80` positive, `0x00` negative).
#[allow(clippy::arithmetic_side_effects)] // magnitude <= 8192, seg <= 7
#[allow(clippy::cast_possible_truncation)] // composed code fits in 7 bits
pub fn encode(pcm: i16) -> u8 {
    let scaled = i32::from(pcm) >> 2;
    let mask: u8 = if scaled < 0 { 0x7F } else { 0xFF };
    let magnitude = scaled.unsigned_abs().min(CLIP) + BIAS.unsigned_abs() / 4;

    let seg = segment(magnitude, &SEG_UEND);
    if seg > 7 {
        return 0x7F ^ mask;
    }

    let code = (seg << 4) | ((magnitude >> (seg + 1)) & 0x0F);
    (code as u8) ^ mask
}

/// Decode one mu-law byte to a 16-bit linear sample.
///
/// The result lies in `-32124..=32124`.
#[allow(clippy::arithmetic_side_effects)] // t <= 252 << 7
#[allow(clippy::cast_possible_truncation)] // |result| <= 32124
pub fn decode(code: u8) -> i16 {
    let code = !code;

    let t = ((i32::from(code & 0x0F) << 3) + BIAS) << ((code & 0x70) >> 4);

    if code & 0x80 != 0 {
        (BIAS - t) as i16
    } else {
        (t - BIAS) as i16
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
