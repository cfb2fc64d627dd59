//! Audio domain newtypes.
//!
//! - `GainLevel`: output volume 0–32, clamps on construction and maps onto
//!   the DAC volume register (TXG field plus speaker mutes)

use crate::registers::{SLM_ACTIVE, SRM_ACTIVE, TXG_MAX, TXG_SHIFT};

// ── Error type ───────────────────────────────────────────────────────────────

/// Error returned when a value is out of the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRangeError {
    /// The value that was out of range.
    pub value: u32,
    /// The inclusive minimum allowed value.
    pub min: u32,
    /// The inclusive maximum allowed value.
    pub max: u32,
}

// ── GainLevel ────────────────────────────────────────────────────────────────

/// Output volume step, 0 (mute) to 32 (+12 dB).
///
/// Levels 1–32 select TXG codes 0–31 (−34.5 dB to +12 dB in 1.5 dB steps)
/// with both speaker outputs active. Level 0 mutes both outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct GainLevel(u8);

impl GainLevel {
    /// Highest level.
    pub const MAX: u8 = 32;

    /// Both outputs muted.
    pub const MUTE: Self = Self(0);

    /// Create a `GainLevel`, clamping values above 32 to 32.
    #[must_use]
    pub fn new(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }

    /// Create a `GainLevel`, returning an error if `value > 32`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `value > 32`.
    pub fn try_new(value: u8) -> Result<Self, OutOfRangeError> {
        if value > Self::MAX {
            Err(OutOfRangeError {
                value: u32::from(value),
                min: 0,
                max: u32::from(Self::MAX),
            })
        } else {
            Ok(Self(value))
        }
    }

    /// Return the inner level (0–32).
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Whether this level mutes the outputs.
    #[must_use]
    pub fn is_mute(self) -> bool {
        self.0 == 0
    }

    /// DAC volume control register value for this level.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)] // step <= 31 before a 2-bit shift
    pub fn dac_register(self) -> u16 {
        match self.0.checked_sub(1) {
            None => 0,
            Some(step) => (u16::from(step).min(TXG_MAX) << TXG_SHIFT) | SLM_ACTIVE | SRM_ACTIVE,
        }
    }
}

impl From<u8> for GainLevel {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::{TXG_12DB, TXG_6DB, TXG_M34P5DB};

    #[test]
    fn new_clamps() {
        assert_eq!(GainLevel::new(33).get(), 32);
        assert_eq!(GainLevel::new(255).get(), 32);
        assert_eq!(GainLevel::new(12).get(), 12);
    }

    #[test]
    fn try_new_rejects_above_max() {
        assert_eq!(
            GainLevel::try_new(33),
            Err(OutOfRangeError {
                value: 33,
                min: 0,
                max: 32
            })
        );
        assert_eq!(GainLevel::try_new(32), Ok(GainLevel::new(32)));
    }

    #[test]
    fn mute_writes_zero() {
        assert!(GainLevel::MUTE.is_mute());
        assert_eq!(GainLevel::MUTE.dac_register(), 0);
    }

    #[test]
    fn register_mapping_endpoints() {
        assert_eq!(GainLevel::new(1).dac_register(), TXG_M34P5DB | 0x03);
        assert_eq!(GainLevel::new(28).dac_register(), TXG_6DB | 0x03);
        assert_eq!(GainLevel::new(32).dac_register(), TXG_12DB | 0x03);
        assert_eq!(GainLevel::new(32).dac_register(), 0x7F);
    }

    #[test]
    fn register_is_monotone_in_level() {
        let mut prev = GainLevel::MUTE.dac_register();
        for level in 1..=GainLevel::MAX {
            let reg = GainLevel::new(level).dac_register();
            assert!(reg > prev, "level {level}");
            prev = reg;
        }
    }
}
