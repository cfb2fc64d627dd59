//! Register access over the bridge handshake.
//!
//! A register transaction rides the secondary frame: the address (with the
//! read strobe in bit 5) goes to `WriteDataHigh`, a `1` in the low byte
//! requests the secondary frame, and the data byte follows. Each step waits
//! for the bridge to finish shifting the previous one out.
//!
//! The Si3000 control word carries 8 data bits; only the low byte of a
//! written value reaches the chip.

use crate::bus::Bus;
use crate::error::Error;
use crate::poll::{wait_for, Flag, PollPolicy};
use crate::registers::ADDR_MASK;

/// Bit 5 of the address byte selects a register read.
pub const READ_STROBE: u8 = 0x20;

/// Low-byte value that requests a secondary frame.
pub const SECONDARY_REQUEST: u8 = 0x01;

/// Blocking 16-bit register read/write, borrowed from the driver.
pub struct RegisterChannel<'a, B> {
    bus: &'a mut B,
    poll: PollPolicy,
}

impl<'a, B: Bus> RegisterChannel<'a, B> {
    /// Wrap `bus` for register access.
    pub fn new(bus: &'a mut B, poll: PollPolicy) -> Self {
        Self { bus, poll }
    }

    fn wait(&mut self, flag: Flag) -> Result<(), Error> {
        wait_for(&mut *self.bus, self.poll, flag)
    }

    /// Write `value` to register `addr`.
    ///
    /// `addr` is masked to 5 bits; only the low byte of `value` is sent.
    ///
    /// # Errors
    ///
    /// [`Error::Timeout`] if a bounded poll policy expires.
    pub fn write(&mut self, addr: u8, value: u16) -> Result<(), Error> {
        let addr = addr & ADDR_MASK;
        let [_, data] = value.to_be_bytes();

        // Address phase
        self.wait(Flag::WrBusyClear)?;
        self.bus.write_data_high(addr);
        self.bus.write_data_low(SECONDARY_REQUEST);
        self.bus.settle();

        // Data phase
        self.wait(Flag::WrBusyClear)?;
        self.bus.write_data_low(data);
        self.bus.settle();

        // Release the address and request lines
        self.wait(Flag::WrBusyClear)?;
        self.bus.settle();
        self.bus.write_data_high(0);
        self.bus.write_data_low(0);
        self.bus.settle();

        self.wait(Flag::WrBusyClear)
    }

    /// Read register `addr`.
    ///
    /// `addr` is masked to 5 bits. The result is `(high << 8) | low` as
    /// presented by the read ports.
    ///
    /// # Errors
    ///
    /// [`Error::Timeout`] if a bounded poll policy expires.
    pub fn read(&mut self, addr: u8) -> Result<u16, Error> {
        let addr = addr & ADDR_MASK;

        // Drop whatever primary-frame word is sitting in the read port.
        let _ = self.bus.read_data_low();
        self.bus.write_data_high(addr | READ_STROBE);
        self.bus.settle();

        self.wait(Flag::DataAvailable)?;
        self.bus.settle();
        self.wait(Flag::WrBusyClear)?;
        self.bus.settle();

        self.bus.write_data_low(SECONDARY_REQUEST);
        self.bus.settle();
        let _ = self.bus.read_data_low();

        self.wait(Flag::WrBusyClear)?;
        self.bus.write_data_low(0);

        // Two frames go by before the secondary word lands in the read ports.
        self.wait(Flag::DataAvailable)?;
        self.bus.settle();
        let _ = self.bus.read_data_low();
        self.bus.settle();

        self.wait(Flag::DataAvailable)?;
        self.bus.settle();
        let high = self.bus.read_data_high();
        let low = self.bus.read_data_low();
        Ok(u16::from_be_bytes([high, low]))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mock::{BusEvent, SimulatedBus};

    #[test]
    fn write_sends_address_then_data_then_release() {
        let mut bus = SimulatedBus::new();
        RegisterChannel::new(&mut bus, PollPolicy::Blocking)
            .write(7, 0x6F)
            .unwrap();

        assert_eq!(
            bus.port_writes(),
            &[
                BusEvent::High(7),
                BusEvent::Low(SECONDARY_REQUEST),
                BusEvent::Low(0x6F),
                BusEvent::High(0),
                BusEvent::Low(0),
            ]
        );
        assert_eq!(bus.register(7), 0x6F);
    }

    #[test]
    fn write_masks_address() {
        let mut bus = SimulatedBus::new();
        RegisterChannel::new(&mut bus, PollPolicy::Blocking)
            .write(33, 0x12)
            .unwrap();
        assert_eq!(bus.register(1), 0x12);
    }

    #[test]
    fn read_sets_strobe_and_returns_register() {
        let mut bus = SimulatedBus::new();
        let mut channel = RegisterChannel::new(&mut bus, PollPolicy::Blocking);
        channel.write(9, 0x0F).unwrap();
        assert_eq!(channel.read(9).unwrap(), 0x0F);
        assert!(bus
            .port_writes()
            .contains(&BusEvent::High(9 | READ_STROBE)));
    }

    #[test]
    fn only_low_byte_reaches_the_chip() {
        let mut bus = SimulatedBus::new();
        let mut channel = RegisterChannel::new(&mut bus, PollPolicy::Blocking);
        channel.write(4, 0x1234).unwrap();
        assert_eq!(channel.read(4).unwrap(), 0x34);
    }

    #[test]
    fn every_step_settles() {
        let mut bus = SimulatedBus::new();
        RegisterChannel::new(&mut bus, PollPolicy::Blocking)
            .write(2, 0)
            .unwrap();
        assert_eq!(bus.settle_count(), 4);
    }

    #[test]
    fn every_read_step_settles() {
        let mut bus = SimulatedBus::new();
        RegisterChannel::new(&mut bus, PollPolicy::Blocking)
            .read(2)
            .unwrap();
        assert_eq!(bus.settle_count(), 7);
    }
}
