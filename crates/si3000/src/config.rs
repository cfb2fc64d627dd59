//! Driver configuration and timing constants.
//!
//! The defaults reproduce the reference board: a 4 MHz MCLK into PLL1,
//! 8 kHz sample rate, 100 ms reset pulses, and blocking flag polls.

use crate::audio_types::GainLevel;
use crate::error::Error;
use crate::poll::PollPolicy;

/// No-op cycles between a bridge access and the next status poll.
pub const SETTLE_CYCLES: u32 = 3;

/// Duration of each phase of the reset pulse in `begin`.
pub const RESET_SETTLE_MS: u32 = 100;

/// Master clock fed to the codec.
pub const MCLK_HZ: u32 = 4_000_000;

/// Sample rate produced by the default PLL setting.
pub const SAMPLE_RATE_HZ: u32 = 8_000;

/// PLL1 input divider register value (N1 − 1).
pub const DEFAULT_PLL_DIVIDER: u8 = 24;

/// PLL1 multiplier register value (M1 − 1).
pub const DEFAULT_PLL_MULTIPLIER: u8 = 255;

/// Default DAC gain: TXG +6 dB with both speakers active.
pub const DEFAULT_GAIN_LEVEL: u8 = 28;

/// Si3000 driver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Si3000Config {
    /// How long to wait for bridge flags.
    pub poll: PollPolicy,
    /// Duration of each reset pulse phase, in milliseconds.
    pub reset_settle_ms: u32,
    /// PLL1 input divider register value (N1 − 1).
    pub pll_divider: u8,
    /// PLL1 multiplier register value (M1 − 1).
    pub pll_multiplier: u8,
    /// DAC gain written during `begin`.
    pub initial_volume: GainLevel,
}

impl Default for Si3000Config {
    fn default() -> Self {
        Self {
            poll: PollPolicy::Blocking,
            reset_settle_ms: RESET_SETTLE_MS,
            pll_divider: DEFAULT_PLL_DIVIDER,
            pll_multiplier: DEFAULT_PLL_MULTIPLIER,
            initial_volume: GainLevel::new(DEFAULT_GAIN_LEVEL),
        }
    }
}

impl Si3000Config {
    /// Check that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for a zero reset settle time or a
    /// bounded poll policy that allows no polls.
    pub fn validate(&self) -> Result<(), Error> {
        if self.reset_settle_ms == 0 {
            return Err(Error::InvalidConfig {
                field: "reset_settle_ms",
            });
        }
        if self.poll == (PollPolicy::Bounded { max_polls: 0 }) {
            return Err(Error::InvalidConfig { field: "poll" });
        }
        Ok(())
    }

    /// Sample rate produced by the PLL setting with [`MCLK_HZ`] in and the
    /// divide-by-5 post divider.
    ///
    /// `Fs = MCLK × M1 / (N1 × 5 × 1024)`
    #[allow(clippy::arithmetic_side_effects)] // operands fit easily in u64, divisor >= 5120
    #[allow(clippy::cast_possible_truncation)] // result <= MCLK_HZ * 256 / 5120
    pub fn sample_rate_hz(&self) -> u32 {
        let m1 = u64::from(self.pll_multiplier) + 1;
        let n1 = u64::from(self.pll_divider) + 1;
        (u64::from(MCLK_HZ) * m1 / (n1 * 5 * 1024)) as u32
    }
}
