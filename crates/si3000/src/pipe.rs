//! PCM sample streaming over the primary frame.

use crate::bus::Bus;
use crate::error::Error;
use crate::poll::{wait_for, Flag, PollPolicy};

/// The primary frame requires bit 0 of an outgoing sample to be clear; a
/// set bit would request a secondary (register) frame.
pub const SAMPLE_LSB_MASK: u8 = 0xFE;

/// Raw 16-bit sample transfer, borrowed from the driver.
pub struct SamplePipe<'a, B> {
    bus: &'a mut B,
    poll: PollPolicy,
}

impl<'a, B: Bus> SamplePipe<'a, B> {
    /// Wrap `bus` for sample transfer.
    pub fn new(bus: &'a mut B, poll: PollPolicy) -> Self {
        Self { bus, poll }
    }

    /// Queue one sample for the DAC.
    ///
    /// The LSB is forced to zero. Completion is not awaited.
    ///
    /// # Errors
    ///
    /// [`Error::Timeout`] if a bounded poll policy expires.
    pub fn write(&mut self, sample: u16) -> Result<(), Error> {
        let [high, low] = sample.to_be_bytes();
        wait_for(&mut *self.bus, self.poll, Flag::WrBusyClear)?;
        self.bus.write_data_high(high);
        self.bus.write_data_low(low & SAMPLE_LSB_MASK);
        Ok(())
    }

    /// Fetch the next ADC sample, unmasked.
    ///
    /// # Errors
    ///
    /// [`Error::Timeout`] if a bounded poll policy expires.
    pub fn read(&mut self) -> Result<u16, Error> {
        wait_for(&mut *self.bus, self.poll, Flag::DataAvailable)?;
        let high = self.bus.read_data_high();
        let low = self.bus.read_data_low();
        Ok(u16::from_be_bytes([high, low]))
    }

    /// Write every sample of `frame`; returns the number written.
    ///
    /// # Errors
    ///
    /// Stops at the first [`Error::Timeout`].
    pub fn write_frame(&mut self, frame: &[i16]) -> Result<usize, Error> {
        for &sample in frame {
            self.write(u16::from_be_bytes(sample.to_be_bytes()))?;
        }
        Ok(frame.len())
    }

    /// Fill `frame` with ADC samples; returns the number read.
    ///
    /// # Errors
    ///
    /// Stops at the first [`Error::Timeout`].
    pub fn read_frame(&mut self, frame: &mut [i16]) -> Result<usize, Error> {
        for slot in frame.iter_mut() {
            *slot = i16::from_be_bytes(self.read()?.to_be_bytes());
        }
        Ok(frame.len())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mock::{BusEvent, SimulatedBus};

    #[test]
    fn write_clears_lsb() {
        let mut bus = SimulatedBus::new();
        SamplePipe::new(&mut bus, PollPolicy::Blocking)
            .write(0x1235)
            .unwrap();
        assert_eq!(
            bus.port_writes(),
            &[BusEvent::High(0x12), BusEvent::Low(0x34)]
        );
        assert_eq!(bus.tx_samples(), &[0x1234]);
    }

    #[test]
    fn read_returns_unmasked_word() {
        let mut bus = SimulatedBus::new();
        bus.queue_adc_sample(0x0101).unwrap();
        assert_eq!(
            SamplePipe::new(&mut bus, PollPolicy::Blocking).read().unwrap(),
            0x0101
        );
    }

    #[test]
    fn frames_round_trip_signed_samples() {
        let mut bus = SimulatedBus::new();
        for s in [-2i16, 100, i16::MIN] {
            bus.queue_adc_sample(u16::from_be_bytes(s.to_be_bytes()))
                .unwrap();
        }
        let mut pipe = SamplePipe::new(&mut bus, PollPolicy::Blocking);

        let mut frame = [0i16; 3];
        assert_eq!(pipe.read_frame(&mut frame).unwrap(), 3);
        assert_eq!(frame, [-2, 100, i16::MIN]);

        assert_eq!(pipe.write_frame(&[-1, 3]).unwrap(), 2);
        assert_eq!(bus.tx_samples(), &[0xFFFE, 0x0002]);
    }

    #[test]
    fn frame_write_stops_at_first_timeout() {
        let mut bus = SimulatedBus::new();
        bus.set_wr_busy_stuck(true);
        let err = SamplePipe::new(&mut bus, PollPolicy::Bounded { max_polls: 4 })
            .write_frame(&[1, 2, 3])
            .unwrap_err();
        assert_eq!(
            err,
            Error::Timeout {
                flag: Flag::WrBusyClear,
                polls: 4
            }
        );
        assert!(bus.tx_samples().is_empty());
    }
}
