//! Simulated hardware for host-side testing
//!
//! - [`SimulatedBus`] answers the bridge handshake byte by byte, the way the
//!   real bridge and chip do, and records every port access.
//! - [`SimulatedCodec`] implements [`VoiceCodec`] directly over a 16-bit
//!   register file, for application code that does not care about the wire.
//!
//! Both are `no_std` and use fixed-capacity `heapless` storage; logs stop
//! growing once full.

use core::convert::Infallible;

use heapless::{Deque, Vec};

use crate::audio_types::GainLevel;
use crate::bus::{Bus, ControlStatus};
use crate::channel::{READ_STROBE, SECONDARY_REQUEST};
use crate::codec::VoiceCodec;
use crate::config::Si3000Config;
use crate::controller::bring_up_writes;
use crate::registers::{ADDR_MASK, REG_DAC_VOL_CONTROL};

/// Number of addressable registers.
pub const REGISTER_COUNT: usize = 32;

/// Capacity of the data-port write log.
pub const PORT_LOG_LEN: usize = 256;

/// Capacity of the register-write, CSR-write and received-sample logs.
pub const LOG_LEN: usize = 64;

/// Capacity of the transmitted-sample log.
pub const SAMPLE_LOG_LEN: usize = 256;

/// One write to a bridge data port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEvent {
    /// `WriteDataHigh`
    High(u8),
    /// `WriteDataLow`
    Low(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Low-port writes are primary-frame samples unless they request a
    /// secondary frame.
    Idle,
    /// Write request accepted; next low byte is the register data.
    Data { addr: u8 },
    /// Transaction done; next low byte releases the request line.
    Release,
}

fn reg_index(addr: u8) -> usize {
    usize::from(addr & ADDR_MASK)
}

// ---------------------------------------------------------------------------
// SimulatedBus
// ---------------------------------------------------------------------------

/// Handshake-level simulation of the bridge and an Si3000 behind it.
///
/// The chip stores 8-bit register values, so a register read returns only
/// the low byte of what was written. A word in the read ports is consumed
/// when its high byte and then its low byte are read; a lone low-byte read
/// leaves it in place. `DATA_AVAIL` stays set because the ADC produces a
/// frame every sample period; an empty receive queue reads as silence.
#[derive(Debug)]
pub struct SimulatedBus {
    csr: ControlStatus,
    regs: [u16; REGISTER_COUNT],
    high: u8,
    phase: Phase,
    result: Option<u16>,
    high_read: bool,
    rx: Deque<u16, LOG_LEN>,
    tx: Vec<u16, SAMPLE_LOG_LEN>,
    port_log: Vec<BusEvent, PORT_LOG_LEN>,
    reg_log: Vec<(u8, u16), LOG_LEN>,
    csr_log: Vec<ControlStatus, LOG_LEN>,
    busy_polls_after_write: u32,
    busy_remaining: u32,
    wr_busy_stuck: bool,
    data_avail_stuck_low: bool,
    csr_reads: u32,
    settles: u32,
}

impl SimulatedBus {
    /// Powered-up chip with every register zero and no faults.
    pub fn new() -> Self {
        Self {
            csr: ControlStatus::empty(),
            regs: [0; REGISTER_COUNT],
            high: 0,
            phase: Phase::Idle,
            result: None,
            high_read: false,
            rx: Deque::new(),
            tx: Vec::new(),
            port_log: Vec::new(),
            reg_log: Vec::new(),
            csr_log: Vec::new(),
            busy_polls_after_write: 0,
            busy_remaining: 0,
            wr_busy_stuck: false,
            data_avail_stuck_low: false,
            csr_reads: 0,
            settles: 0,
        }
    }

    /// Current value of register `addr` (masked to 5 bits).
    pub fn register(&self, addr: u8) -> u16 {
        self.regs.get(reg_index(addr)).copied().unwrap_or(0)
    }

    /// Preload register `addr`, e.g. to fake a status report.
    pub fn set_register(&mut self, addr: u8, value: u16) {
        if let Some(slot) = self.regs.get_mut(reg_index(addr)) {
            *slot = value;
        }
    }

    /// Queue a word for the ADC side of the primary frame.
    ///
    /// # Errors
    ///
    /// Returns the sample back if the queue is full.
    pub fn queue_adc_sample(&mut self, sample: u16) -> Result<(), u16> {
        self.rx.push_back(sample)
    }

    /// Keep `WR_BUSY` set forever.
    pub fn set_wr_busy_stuck(&mut self, stuck: bool) {
        self.wr_busy_stuck = stuck;
    }

    /// Keep `DATA_AVAIL` clear forever.
    pub fn set_data_avail_stuck_low(&mut self, stuck: bool) {
        self.data_avail_stuck_low = stuck;
    }

    /// Report `WR_BUSY` for `polls` CSR reads after every data-port write.
    pub fn set_busy_polls_after_write(&mut self, polls: u32) {
        self.busy_polls_after_write = polls;
    }

    /// Every data-port write, in order.
    pub fn port_writes(&self) -> &[BusEvent] {
        &self.port_log
    }

    /// Every completed register write as `(address, value)`, in order.
    pub fn reg_writes(&self) -> &[(u8, u16)] {
        &self.reg_log
    }

    /// Every CSR write, in order.
    pub fn csr_writes(&self) -> &[ControlStatus] {
        &self.csr_log
    }

    /// Samples sent on the primary frame, as they reached the chip.
    pub fn tx_samples(&self) -> &[u16] {
        &self.tx
    }

    /// Number of CSR reads so far.
    pub fn csr_reads(&self) -> u32 {
        self.csr_reads
    }

    /// Number of settle calls so far.
    pub fn settle_count(&self) -> u32 {
        self.settles
    }

    /// Forget all logged traffic. Register contents are kept.
    pub fn clear_log(&mut self) {
        self.port_log.clear();
        self.reg_log.clear();
        self.csr_log.clear();
        self.tx.clear();
    }

    fn rx_word(&self) -> u16 {
        self.result.or_else(|| self.rx.front().copied()).unwrap_or(0)
    }

    fn port_written(&mut self, event: BusEvent) {
        let _ = self.port_log.push(event);
        self.busy_remaining = self.busy_polls_after_write;
    }
}

impl Default for SimulatedBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for SimulatedBus {
    fn csr(&mut self) -> ControlStatus {
        self.csr_reads = self.csr_reads.saturating_add(1);
        let mut flags = self
            .csr
            .difference(ControlStatus::WR_BUSY | ControlStatus::DATA_AVAIL);
        if !self.data_avail_stuck_low {
            flags |= ControlStatus::DATA_AVAIL;
        }
        if self.wr_busy_stuck || self.busy_remaining > 0 {
            flags |= ControlStatus::WR_BUSY;
        }
        self.busy_remaining = self.busy_remaining.saturating_sub(1);
        flags
    }

    fn set_csr(&mut self, value: ControlStatus) {
        let _ = self.csr_log.push(value);
        if !value.contains(ControlStatus::RESET_N) {
            self.regs = [0; REGISTER_COUNT];
            self.phase = Phase::Idle;
            self.result = None;
        }
        self.csr = value;
    }

    fn write_data_high(&mut self, value: u8) {
        self.port_written(BusEvent::High(value));
        self.high = value;
        self.result = None;
    }

    fn write_data_low(&mut self, value: u8) {
        self.port_written(BusEvent::Low(value));
        match self.phase {
            Phase::Idle if value & SECONDARY_REQUEST != 0 => {
                let addr = self.high & ADDR_MASK;
                if self.high & READ_STROBE != 0 {
                    self.result = Some(self.register(addr) & 0x00FF);
                    self.phase = Phase::Release;
                } else {
                    self.phase = Phase::Data { addr };
                }
            }
            Phase::Idle => {
                let _ = self.tx.push(u16::from_be_bytes([self.high, value]));
            }
            Phase::Data { addr } => {
                self.set_register(addr, u16::from(value));
                let _ = self.reg_log.push((addr, u16::from(value)));
                self.phase = Phase::Release;
            }
            Phase::Release => self.phase = Phase::Idle,
        }
    }

    fn read_data_high(&mut self) -> u8 {
        self.high_read = true;
        let [high, _] = self.rx_word().to_be_bytes();
        high
    }

    fn read_data_low(&mut self) -> u8 {
        let [_, low] = self.rx_word().to_be_bytes();
        if core::mem::take(&mut self.high_read) && self.result.take().is_none() {
            let _ = self.rx.pop_front();
        }
        low
    }

    fn settle(&mut self) {
        self.settles = self.settles.saturating_add(1);
    }
}

// ---------------------------------------------------------------------------
// SimulatedCodec
// ---------------------------------------------------------------------------

/// Register-file codec: every operation succeeds and registers hold 16 bits.
#[derive(Debug)]
pub struct SimulatedCodec {
    regs: [u16; REGISTER_COUNT],
    begun: bool,
    rx: Deque<u16, LOG_LEN>,
    tx: Vec<u16, SAMPLE_LOG_LEN>,
}

impl SimulatedCodec {
    /// Codec with every register zero.
    pub fn new() -> Self {
        Self {
            regs: [0; REGISTER_COUNT],
            begun: false,
            rx: Deque::new(),
            tx: Vec::new(),
        }
    }

    /// Current value of register `addr` (masked to 5 bits).
    pub fn register(&self, addr: u8) -> u16 {
        self.regs.get(reg_index(addr)).copied().unwrap_or(0)
    }

    /// Whether `begin` has run.
    pub fn is_begun(&self) -> bool {
        self.begun
    }

    /// Queue a word for [`VoiceCodec::sample_read`].
    ///
    /// # Errors
    ///
    /// Returns the sample back if the queue is full.
    pub fn queue_adc_sample(&mut self, sample: u16) -> Result<(), u16> {
        self.rx.push_back(sample)
    }

    /// Samples written so far, LSB cleared.
    pub fn tx_samples(&self) -> &[u16] {
        &self.tx
    }

    fn store(&mut self, addr: u8, value: u16) {
        if let Some(slot) = self.regs.get_mut(reg_index(addr)) {
            *slot = value;
        }
    }
}

impl Default for SimulatedCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl VoiceCodec for SimulatedCodec {
    type Error = Infallible;

    fn begin(&mut self) -> Result<(), Infallible> {
        for (addr, value) in bring_up_writes(&Si3000Config::default()) {
            self.store(addr, value);
        }
        self.begun = true;
        Ok(())
    }

    fn reg_read(&mut self, addr: u8) -> Result<u16, Infallible> {
        Ok(self.register(addr))
    }

    fn reg_write(&mut self, addr: u8, value: u16) -> Result<(), Infallible> {
        self.store(addr, value);
        Ok(())
    }

    fn sample_read(&mut self) -> Result<u16, Infallible> {
        Ok(self.rx.pop_front().unwrap_or(0))
    }

    fn sample_write(&mut self, sample: u16) -> Result<(), Infallible> {
        let _ = self.tx.push(sample & !1);
        Ok(())
    }

    fn output_volume(&mut self, level: u8) -> Result<(), Infallible> {
        self.store(REG_DAC_VOL_CONTROL, GainLevel::new(level).dac_register());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn busy_clears_after_configured_polls() {
        let mut bus = SimulatedBus::new();
        bus.set_busy_polls_after_write(2);
        bus.write_data_high(0);
        assert!(bus.csr().contains(ControlStatus::WR_BUSY));
        assert!(bus.csr().contains(ControlStatus::WR_BUSY));
        assert!(!bus.csr().contains(ControlStatus::WR_BUSY));
    }

    #[test]
    fn reset_low_clears_registers() {
        let mut bus = SimulatedBus::new();
        bus.set_register(5, 0x3A);
        bus.set_csr(ControlStatus::ENABLE);
        assert_eq!(bus.register(5), 0);
    }

    #[test]
    fn lone_low_read_does_not_consume() {
        let mut bus = SimulatedBus::new();
        bus.queue_adc_sample(0xABCD).unwrap();
        assert_eq!(bus.read_data_low(), 0xCD);
        assert_eq!(bus.read_data_high(), 0xAB);
        assert_eq!(bus.read_data_low(), 0xCD);
        assert_eq!(bus.read_data_high(), 0x00);
    }

    #[test]
    fn sample_with_lsb_set_is_a_secondary_request() {
        let mut bus = SimulatedBus::new();
        bus.write_data_high(0x03);
        bus.write_data_low(0x01);
        bus.write_data_low(0x42);
        bus.write_data_high(0);
        bus.write_data_low(0);
        assert!(bus.tx_samples().is_empty());
        assert_eq!(bus.reg_writes(), &[(3, 0x42)]);
    }

    #[test]
    fn codec_begin_loads_defaults() {
        let mut codec = SimulatedCodec::new();
        codec.begin().unwrap();
        assert!(codec.is_begun());
        assert_eq!(codec.register(REG_DAC_VOL_CONTROL), 0x6F);
        assert_eq!(codec.register(3), 24);
    }

    #[test]
    fn codec_keeps_sixteen_bits() {
        let mut codec = SimulatedCodec::new();
        codec.reg_write(40, 0xBEEF).unwrap();
        assert_eq!(codec.reg_read(8).unwrap(), 0xBEEF);
    }

    #[test]
    fn codec_sample_write_clears_lsb() {
        let mut codec = SimulatedCodec::new();
        codec.sample_write(0x0003).unwrap();
        assert_eq!(codec.tx_samples(), &[0x0002]);
    }
}
