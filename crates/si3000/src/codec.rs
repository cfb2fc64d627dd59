//! Voice codec capability trait.

use embedded_hal::delay::DelayNs;

use crate::audio_types::GainLevel;
use crate::bus::Bus;
use crate::controller::Si3000;
use crate::error::Error;

/// Operations an application needs from a voice-band codec.
///
/// Implemented by [`Si3000`] for hardware and by
/// [`SimulatedCodec`](crate::mock::SimulatedCodec) for host tests.
/// Companding uses G.711 mu-law; A-law is available from the [`g711`] crate.
pub trait VoiceCodec {
    /// Error type
    type Error: core::fmt::Debug;

    /// Reset the chip and load the default register set.
    fn begin(&mut self) -> Result<(), Self::Error>;

    /// Read a control register (address masked to 5 bits).
    fn reg_read(&mut self, addr: u8) -> Result<u16, Self::Error>;

    /// Write a control register (address masked to 5 bits).
    fn reg_write(&mut self, addr: u8, value: u16) -> Result<(), Self::Error>;

    /// Fetch the next ADC sample.
    fn sample_read(&mut self) -> Result<u16, Self::Error>;

    /// Queue a DAC sample; its LSB is cleared on the wire.
    fn sample_write(&mut self, sample: u16) -> Result<(), Self::Error>;

    /// Set output gain, 0 (mute) to 32; larger values clamp to 32.
    fn output_volume(&mut self, level: u8) -> Result<(), Self::Error>;

    /// Mu-law compress one linear sample.
    fn sample_compress(&self, pcm: i16) -> u8 {
        g711::mulaw::encode(pcm)
    }

    /// Mu-law expand one byte.
    fn sample_expand(&self, code: u8) -> i16 {
        g711::mulaw::decode(code)
    }
}

impl<B: Bus, D: DelayNs> VoiceCodec for Si3000<B, D> {
    type Error = Error;

    fn begin(&mut self) -> Result<(), Error> {
        Si3000::begin(self)
    }

    fn reg_read(&mut self, addr: u8) -> Result<u16, Error> {
        self.registers().read(addr)
    }

    fn reg_write(&mut self, addr: u8, value: u16) -> Result<(), Error> {
        self.registers().write(addr, value)
    }

    fn sample_read(&mut self) -> Result<u16, Error> {
        self.samples().read()
    }

    fn sample_write(&mut self, sample: u16) -> Result<(), Error> {
        self.samples().write(sample)
    }

    fn output_volume(&mut self, level: u8) -> Result<(), Error> {
        self.set_volume(GainLevel::new(level))
    }
}
