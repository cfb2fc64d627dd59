//! Si3000 control register map.
//!
//! Reference: Silicon Labs Si3000 datasheet Rev 1.4, "Control Registers".
//!
//! Every register is 8 bits wide on the chip. Values are typed `u16` here
//! because they travel through the 16-bit register channel; the upper byte
//! is always zero.
//!
//! Field constants are pre-shifted into position so they can be OR-ed
//! together into a register value.

#![allow(clippy::identity_op, clippy::erasing_op)] // `0 << n` documents field position

/// Register addresses are 5 bits wide; larger values are masked.
pub const ADDR_MASK: u8 = 0x1F;

// ---------------------------------------------------------------------------
// Register 1: Control 1
// ---------------------------------------------------------------------------

/// Control 1: software reset and per-section power down.
pub const REG_CONTROL_1: u8 = 1;

/// SR: software reset.
pub const SR_RESET: u16 = 1 << 7;
/// SR: normal operation.
pub const SR_NORMAL: u16 = 0 << 7;
/// SPD: speaker drive powered.
pub const SPD_NORMAL: u16 = 1 << 4;
/// SPD: speaker drive powered down.
pub const SPD_PWR_DOWN: u16 = 0 << 4;
/// LPD: line driver powered.
pub const LPD_NORMAL: u16 = 1 << 3;
/// LPD: line driver powered down.
pub const LPD_PWR_DOWN: u16 = 0 << 3;
/// HPD: handset driver powered.
pub const HPD_NORMAL: u16 = 1 << 2;
/// HPD: handset driver powered down.
pub const HPD_PWR_DOWN: u16 = 0 << 2;
/// MPD: microphone bias powered down.
pub const MPD_PWR_DOWN: u16 = 1 << 1;
/// MPD: microphone bias powered.
pub const MPD_NORMAL: u16 = 0 << 1;
/// CPD: chip (analog core) powered down.
pub const CPD_PWR_DOWN: u16 = 1 << 0;
/// CPD: chip powered.
pub const CPD_NORMAL: u16 = 0 << 0;

// ---------------------------------------------------------------------------
// Register 2: Control 2
// ---------------------------------------------------------------------------

/// Control 2: high-pass filter, PLL post-divider, digital loopbacks.
pub const REG_CONTROL_2: u8 = 2;

/// HPFD: high-pass filter disabled.
pub const HPFD_DISABLE: u16 = 1 << 4;
/// HPFD: high-pass filter enabled.
pub const HPFD_ENABLE: u16 = 0 << 4;
/// PLL post-divide by 10.
pub const PLL_DIV_10: u16 = 1 << 3;
/// PLL post-divide by 5.
pub const PLL_DIV_5: u16 = 0 << 3;
/// DL1: digital loopback 1 enabled.
pub const DL1_EN: u16 = 1 << 2;
/// DL1: normal operation.
pub const DL1_NORMAL: u16 = 0 << 2;
/// DL2: digital loopback 2 enabled.
pub const DL2_EN: u16 = 1 << 1;
/// DL2: normal operation.
pub const DL2_NORMAL: u16 = 0 << 1;

// ---------------------------------------------------------------------------
// Registers 3–4: PLL1
// ---------------------------------------------------------------------------

/// PLL1 input divider N1 (register value is N1 − 1).
pub const REG_PLL1_DIV_N1: u8 = 3;
/// PLL1 feedback multiplier M1 (register value is M1 − 1).
pub const REG_PLL1_MUL_M1: u8 = 4;

// ---------------------------------------------------------------------------
// Register 5: RX gain control 1
// ---------------------------------------------------------------------------

/// RX gain control 1: line-in gain, mic gain, mutes, filter choice.
pub const REG_RX_GAIN_CONTROL_1: u8 = 5;

/// LIG: line-in gain +20 dB.
pub const LIG_20DB: u16 = 3 << 6;
/// LIG: line-in gain +10 dB.
pub const LIG_10DB: u16 = 2 << 6;
/// LIG: line-in gain 0 dB.
pub const LIG_0DB: u16 = 1 << 6;
/// LIM: line-in mute.
pub const LIM_MUTE: u16 = 1 << 5;
/// MCG: microphone gain +30 dB.
pub const MCG_30DB: u16 = 3 << 3;
/// MCG: microphone gain +20 dB.
pub const MCG_20DB: u16 = 2 << 3;
/// MCG: microphone gain +10 dB.
pub const MCG_10DB: u16 = 1 << 3;
/// MCG: microphone gain 0 dB.
pub const MCG_0DB: u16 = 0 << 3;
/// MCM: microphone input mute.
pub const MCM_MUTE: u16 = 1 << 2;
/// HIM: handset input mute.
pub const HIM_MUTE: u16 = 1 << 1;
/// IIR decimation filter.
pub const IIR_ENABLE: u16 = 1 << 0;
/// FIR decimation filter.
pub const FIR_ENABLE: u16 = 0 << 0;

// ---------------------------------------------------------------------------
// Register 6: ADC volume control
// ---------------------------------------------------------------------------

/// ADC volume control: RX PGA gain and line/handset output mutes.
pub const REG_ADC_VOL_CONTROL: u8 = 6;

/// RXG: +12 dB.
pub const RXG_12DB: u16 = 0x1F << 2;
/// RXG: 0 dB.
pub const RXG_0DB: u16 = 0x17 << 2;
/// RXG: −34.5 dB.
pub const RXG_M34P5DB: u16 = 0x00 << 2;
/// LOM: line output muted.
pub const LOM_MUTE: u16 = 0 << 1;
/// LOM: line output active.
pub const LOM_ACTIVE: u16 = 1 << 1;
/// HOM: handset output muted.
pub const HOM_MUTE: u16 = 0 << 0;
/// HOM: handset output active.
pub const HOM_ACTIVE: u16 = 1 << 0;

// ---------------------------------------------------------------------------
// Register 7: DAC volume control
// ---------------------------------------------------------------------------

/// DAC volume control: TX PGA gain and speaker output mutes.
pub const REG_DAC_VOL_CONTROL: u8 = 7;

/// TXG field position (bits 6:2).
pub const TXG_SHIFT: u16 = 2;
/// TXG field width mask (before shifting).
pub const TXG_MAX: u16 = 0x1F;
/// TXG: +12 dB.
pub const TXG_12DB: u16 = 0x1F << 2;
/// TXG: +6 dB.
pub const TXG_6DB: u16 = 0x1B << 2;
/// TXG: 0 dB.
pub const TXG_0DB: u16 = 0x17 << 2;
/// TXG: −34.5 dB.
pub const TXG_M34P5DB: u16 = 0x00 << 2;
/// SLM: left speaker muted.
pub const SLM_MUTE: u16 = 0 << 1;
/// SLM: left speaker active.
pub const SLM_ACTIVE: u16 = 1 << 1;
/// SRM: right speaker muted.
pub const SRM_MUTE: u16 = 0 << 0;
/// SRM: right speaker active.
pub const SRM_ACTIVE: u16 = 1 << 0;

// ---------------------------------------------------------------------------
// Register 8: Status report
// ---------------------------------------------------------------------------

/// Status report: short-circuit detection (read only).
pub const REG_STATUS_REPORT: u8 = 8;

/// SLSC: left speaker short circuit.
pub const SLSC: u16 = 1 << 7;
/// SRSC: right speaker short circuit.
pub const SRSC: u16 = 1 << 6;
/// LOSC: line output short circuit.
pub const LOSC: u16 = 1 << 5;

// ---------------------------------------------------------------------------
// Register 9: Analog attenuation
// ---------------------------------------------------------------------------

/// Analog attenuation: line and speaker output attenuators.
pub const REG_ANALOG_ATTEN: u8 = 9;

/// LOT: line output −18 dB.
pub const LOT_M18DB: u16 = 3 << 2;
/// LOT: line output −12 dB.
pub const LOT_M12DB: u16 = 2 << 2;
/// LOT: line output −6 dB.
pub const LOT_M6DB: u16 = 1 << 2;
/// LOT: line output 0 dB.
pub const LOT_0DB: u16 = 0 << 2;
/// SOT: speaker output −18 dB.
pub const SOT_M18DB: u16 = 3 << 0;
/// SOT: speaker output −12 dB.
pub const SOT_M12DB: u16 = 2 << 0;
/// SOT: speaker output −6 dB.
pub const SOT_M6DB: u16 = 1 << 0;
/// SOT: speaker output 0 dB.
pub const SOT_0DB: u16 = 0 << 0;

#[cfg(test)]
#[allow(clippy::arithmetic_side_effects, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn register_addresses_match_datasheet() {
        let addrs = [
            REG_CONTROL_1,
            REG_CONTROL_2,
            REG_PLL1_DIV_N1,
            REG_PLL1_MUL_M1,
            REG_RX_GAIN_CONTROL_1,
            REG_ADC_VOL_CONTROL,
            REG_DAC_VOL_CONTROL,
            REG_STATUS_REPORT,
            REG_ANALOG_ATTEN,
        ];
        assert_eq!(addrs, [1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn all_addresses_fit_the_mask() {
        assert_eq!(REG_ANALOG_ATTEN & ADDR_MASK, REG_ANALOG_ATTEN);
    }

    #[test]
    fn gain_presets_sit_in_txg_field() {
        for preset in [TXG_12DB, TXG_6DB, TXG_0DB, TXG_M34P5DB] {
            assert_eq!(preset & !(TXG_MAX << TXG_SHIFT), 0);
        }
    }

    #[test]
    fn volume_registers_are_single_byte() {
        assert!(RXG_12DB | LOM_ACTIVE | HOM_ACTIVE <= 0xFF);
        assert!(TXG_12DB | SLM_ACTIVE | SRM_ACTIVE <= 0xFF);
    }
}
