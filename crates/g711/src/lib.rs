//! G.711 companding for telephony audio
//!
//! Converts signed 16-bit linear PCM to and from the two 8-bit logarithmic
//! codes standardised by ITU-T G.711:
//!
//! - [`mulaw`]: North American / Japanese mu-law (14-bit magnitude)
//! - [`alaw`]: European A-law (13-bit magnitude)
//!
//! Every transform is a pure function over one sample. The only shared data
//! are the two static segment tables. Output is bit-compatible with the Sun
//! `g711.c` reference, so bytes produced here decode correctly anywhere else
//! and vice versa.
//!
//! # Example
//!
//! ```
//! use g711::{Law, alaw, mulaw};
//!
//! assert_eq!(mulaw::encode(0), 0xFF);
//! assert_eq!(alaw::encode(0), 0xD5);
//!
//! let byte = Law::MuLaw.compress(-1000);
//! let back = Law::MuLaw.expand(byte);
//! assert!((i32::from(back) + 1000).abs() <= 64);
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod alaw;
pub mod mulaw;

/// Segment lookup shared by both laws.
///
/// Returns the first index whose end point is not below `magnitude`, or the
/// table length when `magnitude` is past the last segment.
#[inline]
#[allow(clippy::cast_possible_truncation)] // index into an 8-entry table
fn segment(magnitude: u32, ends: &[u32; 8]) -> u32 {
    ends.iter()
        .position(|&end| magnitude <= end)
        .unwrap_or(ends.len()) as u32
}

/// Companding law selector.
///
/// The two codes are not interchangeable: a byte produced by one law decodes
/// to garbage under the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Law {
    /// ITU-T G.711 mu-law
    #[default]
    MuLaw,
    /// ITU-T G.711 A-law
    ALaw,
}

impl Law {
    /// Compress one linear sample.
    #[inline]
    pub fn compress(self, pcm: i16) -> u8 {
        match self {
            Self::MuLaw => mulaw::encode(pcm),
            Self::ALaw => alaw::encode(pcm),
        }
    }

    /// Expand one compressed byte.
    #[inline]
    pub fn expand(self, code: u8) -> i16 {
        match self {
            Self::MuLaw => mulaw::decode(code),
            Self::ALaw => alaw::decode(code),
        }
    }

    /// Code emitted for a zero sample (`0xFF` mu-law, `0xD5` A-law).
    ///
    /// Useful to pre-fill an output buffer with silence.
    pub const fn silence(self) -> u8 {
        match self {
            Self::MuLaw => 0xFF,
            Self::ALaw => 0xD5,
        }
    }

    /// Compress `pcm` into `out`, returning the number of samples written.
    ///
    /// Processes `min(pcm.len(), out.len())` samples.
    pub fn compress_slice(self, pcm: &[i16], out: &mut [u8]) -> usize {
        match self {
            Self::MuLaw => mulaw::encode_slice(pcm, out),
            Self::ALaw => alaw::encode_slice(pcm, out),
        }
    }

    /// Expand `codes` into `out`, returning the number of samples written.
    ///
    /// Processes `min(codes.len(), out.len())` samples.
    pub fn expand_slice(self, codes: &[u8], out: &mut [i16]) -> usize {
        match self {
            Self::MuLaw => mulaw::decode_slice(codes, out),
            Self::ALaw => alaw::decode_slice(codes, out),
        }
    }
}
