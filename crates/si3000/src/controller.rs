//! Chip bring-up and gain control.

use bitflags::bitflags;
use embedded_hal::delay::DelayNs;

use crate::audio_types::GainLevel;
use crate::bus::{Bus, ControlStatus};
use crate::channel::RegisterChannel;
use crate::config::Si3000Config;
use crate::error::Error;
use crate::pipe::SamplePipe;
use crate::registers::*;

bitflags! {
    /// Short-circuit flags from the status report register.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StatusReport: u8 {
        /// Left speaker output shorted.
        const LEFT_SPEAKER_SHORT  = 1 << 7;
        /// Right speaker output shorted.
        const RIGHT_SPEAKER_SHORT = 1 << 6;
        /// Line output shorted.
        const LINE_OUT_SHORT      = 1 << 5;
    }
}

/// Control 1 value with every analog section powered down.
pub const CONTROL_1_POWER_DOWN: u16 =
    SR_NORMAL | SPD_PWR_DOWN | LPD_PWR_DOWN | HPD_PWR_DOWN | MPD_PWR_DOWN | CPD_PWR_DOWN;

/// Control 1 value used at bring-up: speaker drive on.
pub const CONTROL_1_RUN: u16 = SPD_NORMAL;

/// Register writes issued by `begin`, in order.
pub fn bring_up_writes(config: &Si3000Config) -> [(u8, u16); 8] {
    [
        (REG_PLL1_DIV_N1, u16::from(config.pll_divider)),
        (REG_PLL1_MUL_M1, u16::from(config.pll_multiplier)),
        (REG_CONTROL_1, CONTROL_1_RUN),
        (
            REG_CONTROL_2,
            HPFD_ENABLE | PLL_DIV_5 | DL1_NORMAL | DL2_NORMAL,
        ),
        (
            REG_RX_GAIN_CONTROL_1,
            LIM_MUTE | MCG_30DB | HIM_MUTE | FIR_ENABLE,
        ),
        (REG_ADC_VOL_CONTROL, RXG_12DB | LOM_MUTE | HOM_MUTE),
        (REG_DAC_VOL_CONTROL, config.initial_volume.dac_register()),
        (REG_ANALOG_ATTEN, LOT_M18DB | SOT_M18DB),
    ]
}

/// Si3000 driver.
///
/// Owns the bridge and the delay source; every operation takes `&mut self`,
/// so a shared device needs an external lock.
pub struct Si3000<B, D> {
    bus: B,
    delay: D,
    config: Si3000Config,
}

impl<B: Bus, D: DelayNs> Si3000<B, D> {
    /// Create a driver with the default configuration.
    pub fn new(bus: B, delay: D) -> Self {
        Self {
            bus,
            delay,
            config: Si3000Config::default(),
        }
    }

    /// Create a driver with `config`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfig`] if `config` does not validate.
    pub fn with_config(bus: B, delay: D, config: Si3000Config) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self { bus, delay, config })
    }

    /// Active configuration.
    pub fn config(&self) -> &Si3000Config {
        &self.config
    }

    /// Shared access to the bus, for inspection.
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Register channel over this driver's bus.
    pub fn registers(&mut self) -> RegisterChannel<'_, B> {
        RegisterChannel::new(&mut self.bus, self.config.poll)
    }

    /// Sample pipe over this driver's bus.
    pub fn samples(&mut self) -> SamplePipe<'_, B> {
        SamplePipe::new(&mut self.bus, self.config.poll)
    }

    /// Give back the bus and delay.
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    /// Reset the chip and load the default register set.
    ///
    /// Pulses RESET_N low for one settle period, then writes the PLL,
    /// control, gain and attenuation registers. Nothing is read back.
    ///
    /// # Errors
    ///
    /// [`Error::Timeout`] if a bounded poll policy expires.
    pub fn begin(&mut self) -> Result<(), Error> {
        #[cfg(feature = "defmt")]
        defmt::info!("si3000: reset pulse");

        let running = ControlStatus::RESET_N | ControlStatus::ENABLE;
        let settle_ms = self.config.reset_settle_ms;
        self.bus.set_csr(running);
        self.delay.delay_ms(settle_ms);
        self.bus.set_csr(ControlStatus::ENABLE);
        self.delay.delay_ms(settle_ms);
        self.bus.set_csr(running);
        self.delay.delay_ms(settle_ms);
        self.bus.set_csr(running);

        let writes = bring_up_writes(&self.config);
        let mut channel = self.registers();
        for (addr, value) in writes {
            #[cfg(feature = "defmt")]
            defmt::trace!("si3000: reg {} <- {=u16:#x}", addr, value);
            channel.write(addr, value)?;
        }

        #[cfg(feature = "defmt")]
        defmt::info!(
            "si3000: configured, {} Hz",
            self.config.sample_rate_hz()
        );
        Ok(())
    }

    /// Set the DAC output gain.
    ///
    /// # Errors
    ///
    /// [`Error::Timeout`] if a bounded poll policy expires.
    pub fn set_volume(&mut self, level: GainLevel) -> Result<(), Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!("si3000: volume {}", level.get());
        self.registers()
            .write(REG_DAC_VOL_CONTROL, level.dac_register())
    }

    /// Read the short-circuit status report.
    ///
    /// # Errors
    ///
    /// [`Error::Timeout`] if a bounded poll policy expires.
    pub fn status(&mut self) -> Result<StatusReport, Error> {
        let [_, bits] = self.registers().read(REG_STATUS_REPORT)?.to_be_bytes();
        let report = StatusReport::from_bits_truncate(bits);
        #[cfg(feature = "defmt")]
        if !report.is_empty() {
            defmt::warn!("si3000: output short, status {=u8:#x}", report.bits());
        }
        Ok(report)
    }

    /// Power down every analog section.
    ///
    /// # Errors
    ///
    /// [`Error::Timeout`] if a bounded poll policy expires.
    pub fn power_down(&mut self) -> Result<(), Error> {
        self.registers().write(REG_CONTROL_1, CONTROL_1_POWER_DOWN)
    }

    /// Restore the bring-up power state.
    ///
    /// # Errors
    ///
    /// [`Error::Timeout`] if a bounded poll policy expires.
    pub fn power_up(&mut self) -> Result<(), Error> {
        self.registers().write(REG_CONTROL_1, CONTROL_1_RUN)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mock::SimulatedBus;
    use embedded_hal_mock::eh1::delay::NoopDelay;

    #[test]
    fn bring_up_values() {
        let writes = bring_up_writes(&Si3000Config::default());
        assert_eq!(
            writes,
            [
                (3, 24),
                (4, 255),
                (1, 0x10),
                (2, 0x00),
                (5, 0x3A),
                (6, 0x7C),
                (7, 0x6F),
                (9, 0x0F),
            ]
        );
    }

    #[test]
    fn power_down_value() {
        assert_eq!(CONTROL_1_POWER_DOWN, 0x03);
    }

    #[test]
    fn status_decodes_flags() {
        let mut bus = SimulatedBus::new();
        bus.set_register(REG_STATUS_REPORT, SLSC | LOSC);
        let mut codec = Si3000::new(&mut bus, NoopDelay);
        assert_eq!(
            codec.status().unwrap(),
            StatusReport::LEFT_SPEAKER_SHORT | StatusReport::LINE_OUT_SHORT
        );
    }

    #[test]
    fn power_cycle_rewrites_control_1() {
        let mut bus = SimulatedBus::new();
        let mut codec = Si3000::new(&mut bus, NoopDelay);
        codec.power_down().unwrap();
        codec.power_up().unwrap();
        assert_eq!(bus.reg_writes(), &[(1, 0x03), (1, 0x10)]);
    }

    #[test]
    fn with_config_validates() {
        let config = Si3000Config {
            reset_settle_ms: 0,
            ..Si3000Config::default()
        };
        assert!(Si3000::with_config(SimulatedBus::new(), NoopDelay, config).is_err());
    }
}
