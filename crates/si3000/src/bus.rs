//! Bridge register surface.
//!
//! The Si3000 is not wired to the MCU directly. A bridge exposes one
//! control/status register (CSR) and four byte-wide data ports; every
//! register access and sample transfer is a handshake over these five bytes.
//!
//! | Port            | Direction | Role                                   |
//! |-----------------|-----------|----------------------------------------|
//! | CSR             | R/W       | [`ControlStatus`] flags                |
//! | `WriteDataHigh` | W         | address + strobe, or sample high byte  |
//! | `WriteDataLow`  | W         | trigger / data byte, or sample low     |
//! | `ReadDataHigh`  | R         | result high byte                       |
//! | `ReadDataLow`   | R         | result low byte                        |

use bitflags::bitflags;

use crate::config::SETTLE_CYCLES;

bitflags! {
    /// Control/status register of the bridge.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ControlStatus: u8 {
        /// Chip reset line, active low (set = running).
        const RESET_N    = 1 << 7;
        /// Primary frame sync pulse seen.
        const PRI_PULSE  = 1 << 6;
        /// Secondary frame sync pulse seen.
        const SEC_PULSE  = 1 << 5;
        /// Transfer complete.
        const DONE       = 1 << 4;
        /// A received word is waiting in the read ports.
        const DATA_AVAIL = 1 << 3;
        /// Write ports are still being shifted out.
        const WR_BUSY    = 1 << 2;
        /// Bridge enabled.
        const ENABLE     = 1 << 1;
        /// Synchronous reset of the bridge logic.
        const SYNC_RESET = 1 << 0;
    }
}

/// Byte-level access to the bridge.
///
/// Implemented by [`MmioBus`] for real hardware and by
/// [`SimulatedBus`](crate::mock::SimulatedBus) for host tests.
pub trait Bus {
    /// Read the control/status register.
    fn csr(&mut self) -> ControlStatus;

    /// Write the control/status register.
    fn set_csr(&mut self, value: ControlStatus);

    /// Write the high data port.
    fn write_data_high(&mut self, value: u8);

    /// Write the low data port.
    fn write_data_low(&mut self, value: u8);

    /// Read the high data port.
    fn read_data_high(&mut self) -> u8;

    /// Read the low data port.
    fn read_data_low(&mut self) -> u8;

    /// Settling margin after an access, before the next status poll.
    ///
    /// The default spins for [`SETTLE_CYCLES`] no-op cycles.
    fn settle(&mut self) {
        for _ in 0..SETTLE_CYCLES {
            core::hint::spin_loop();
        }
    }
}

impl<B: Bus + ?Sized> Bus for &mut B {
    fn csr(&mut self) -> ControlStatus {
        (**self).csr()
    }

    fn set_csr(&mut self, value: ControlStatus) {
        (**self).set_csr(value);
    }

    fn write_data_high(&mut self, value: u8) {
        (**self).write_data_high(value);
    }

    fn write_data_low(&mut self, value: u8) {
        (**self).write_data_low(value);
    }

    fn read_data_high(&mut self) -> u8 {
        (**self).read_data_high()
    }

    fn read_data_low(&mut self) -> u8 {
        (**self).read_data_low()
    }

    fn settle(&mut self) {
        (**self).settle();
    }
}

/// Physical addresses of the five bridge registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MmioMap {
    /// Control/status register.
    pub csr: usize,
    /// `WriteDataHigh` port.
    pub write_high: usize,
    /// `WriteDataLow` port.
    pub write_low: usize,
    /// `ReadDataHigh` port.
    pub read_high: usize,
    /// `ReadDataLow` port.
    pub read_low: usize,
}

/// Volatile memory-mapped access to the bridge.
pub struct MmioBus {
    csr: *mut u8,
    write_high: *mut u8,
    write_low: *mut u8,
    read_high: *const u8,
    read_low: *const u8,
}

impl MmioBus {
    /// Bind to the bridge at `map`.
    ///
    /// # Safety
    ///
    /// Every address in `map` must be a valid, byte-aligned device register
    /// for the lifetime of the returned value, and no other code may access
    /// those registers concurrently.
    pub unsafe fn new(map: MmioMap) -> Self {
        Self {
            csr: map.csr as *mut u8,
            write_high: map.write_high as *mut u8,
            write_low: map.write_low as *mut u8,
            read_high: map.read_high as *const u8,
            read_low: map.read_low as *const u8,
        }
    }
}

impl Bus for MmioBus {
    fn csr(&mut self) -> ControlStatus {
        // SAFETY: address validity is guaranteed by the caller of `MmioBus::new`.
        ControlStatus::from_bits_retain(unsafe { self.csr.read_volatile() })
    }

    fn set_csr(&mut self, value: ControlStatus) {
        // SAFETY: address validity is guaranteed by the caller of `MmioBus::new`.
        unsafe { self.csr.write_volatile(value.bits()) }
    }

    fn write_data_high(&mut self, value: u8) {
        // SAFETY: address validity is guaranteed by the caller of `MmioBus::new`.
        unsafe { self.write_high.write_volatile(value) }
    }

    fn write_data_low(&mut self, value: u8) {
        // SAFETY: address validity is guaranteed by the caller of `MmioBus::new`.
        unsafe { self.write_low.write_volatile(value) }
    }

    fn read_data_high(&mut self) -> u8 {
        // SAFETY: address validity is guaranteed by the caller of `MmioBus::new`.
        unsafe { self.read_high.read_volatile() }
    }

    fn read_data_low(&mut self) -> u8 {
        // SAFETY: address validity is guaranteed by the caller of `MmioBus::new`.
        unsafe { self.read_low.read_volatile() }
    }
}

#[cfg(test)]
#[allow(clippy::arithmetic_side_effects, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn csr_bit_positions() {
        assert_eq!(ControlStatus::RESET_N.bits(), 0x80);
        assert_eq!(ControlStatus::DATA_AVAIL.bits(), 0x08);
        assert_eq!(ControlStatus::WR_BUSY.bits(), 0x04);
        assert_eq!(ControlStatus::ENABLE.bits(), 0x02);
        assert_eq!((ControlStatus::RESET_N | ControlStatus::ENABLE).bits(), 0x82);
    }

    #[test]
    fn mmio_bus_reads_and_writes_through_pointers() {
        let mut regs = [0u8; 5];
        let base = regs.as_mut_ptr() as usize;
        let map = MmioMap {
            csr: base,
            write_high: base + 1,
            write_low: base + 2,
            read_high: base + 3,
            read_low: base + 4,
        };
        // SAFETY: all five addresses point into `regs`, which outlives `bus`.
        let mut bus = unsafe { MmioBus::new(map) };

        bus.set_csr(ControlStatus::RESET_N | ControlStatus::ENABLE);
        bus.write_data_high(0x12);
        bus.write_data_low(0x34);
        assert_eq!(bus.csr(), ControlStatus::RESET_N | ControlStatus::ENABLE);
        drop(bus);
        assert_eq!(regs[..3], [0x82, 0x12, 0x34]);

        regs[3] = 0xAB;
        regs[4] = 0xCD;
        // SAFETY: as above.
        let mut bus = unsafe { MmioBus::new(map) };
        assert_eq!(bus.read_data_high(), 0xAB);
        assert_eq!(bus.read_data_low(), 0xCD);
    }
}
