//! LTR-329 register map and bit field packing.
//!
//! Packing and unpacking are plain functions over the register byte so they can be checked
//! without a bus.

use crate::settings::{Gain, IntegrationTime, MeasurementRate, Mode};

pub const ALS_CTRL: u8 = 0x80;
pub const MEAS_RATE: u8 = 0x85;
pub const PART_ID: u8 = 0x86;
pub const MANU_ID: u8 = 0x87;
/// First of four consecutive data registers.  Reads auto-increment through `CH1DATA_1`,
/// `CH0DATA_0` and `CH0DATA_1`.
pub const CH1DATA_0: u8 = 0x88;
pub const CH1DATA_1: u8 = 0x89;
pub const CH0DATA_0: u8 = 0x8A;
pub const CH0DATA_1: u8 = 0x8B;
pub const STATUS: u8 = 0x8C;

pub const ALS_CTRL_RESET: u8 = 0x00;
pub const MEAS_RATE_RESET: u8 = 0x03;
pub const PART_ID_RESET: u8 = 0xA0;
pub const MANU_ID_RESET: u8 = 0x05;
pub const STATUS_RESET: u8 = 0x00;

const MODE_MASK: u8 = 0b0000_0001;
const SW_RESET: u8 = 0b0000_0010;
const GAIN_SHIFT: u8 = 2;
const FIELD_MASK: u8 = 0b0000_0111;
const INTEGRATION_SHIFT: u8 = 3;

const STATUS_DATA_INVALID: u8 = 0b1000_0000;
const STATUS_GAIN_SHIFT: u8 = 4;
const STATUS_INTERRUPT: u8 = 0b0000_1000;
const STATUS_NEW_DATA: u8 = 0b0000_0100;

/// ALS_CTRL with the gain and mode set.  Reserved bits and the soft reset bit are written as zero.
#[must_use]
pub fn als_control(gain: Gain, mode: Mode) -> u8 {
    (u8::from(gain) << GAIN_SHIFT) | u8::from(mode)
}

/// ALS_CTRL requesting a soft reset.
#[must_use]
pub const fn als_control_reset() -> u8 {
    SW_RESET
}

/// `None` when the gain bits hold one of the reserved codes.
#[must_use]
pub fn gain(als_control: u8) -> Option<Gain> {
    Gain::try_from((als_control >> GAIN_SHIFT) & FIELD_MASK).ok()
}

#[must_use]
pub const fn mode(als_control: u8) -> Mode {
    if als_control & MODE_MASK == 0 {
        Mode::Standby
    } else {
        Mode::Active
    }
}

/// Replaces the mode bit, keeping every other bit of `als_control`.
#[must_use]
pub fn with_mode(als_control: u8, mode: Mode) -> u8 {
    (als_control & !MODE_MASK) | u8::from(mode)
}

#[must_use]
pub fn meas_rate(integration_time: IntegrationTime, measurement_rate: MeasurementRate) -> u8 {
    (u8::from(integration_time) << INTEGRATION_SHIFT) | u8::from(measurement_rate)
}

#[must_use]
pub fn integration_time(meas_rate: u8) -> IntegrationTime {
    match (meas_rate >> INTEGRATION_SHIFT) & FIELD_MASK {
        1 => IntegrationTime::Ms50,
        2 => IntegrationTime::Ms200,
        3 => IntegrationTime::Ms400,
        4 => IntegrationTime::Ms150,
        5 => IntegrationTime::Ms250,
        6 => IntegrationTime::Ms300,
        7 => IntegrationTime::Ms350,
        _ => IntegrationTime::Ms100,
    }
}

/// Codes `5`, `6` and `7` all run at 2000 ms.
#[must_use]
pub fn measurement_rate(meas_rate: u8) -> MeasurementRate {
    match meas_rate & FIELD_MASK {
        0 => MeasurementRate::Ms50,
        1 => MeasurementRate::Ms100,
        2 => MeasurementRate::Ms200,
        3 => MeasurementRate::Ms500,
        4 => MeasurementRate::Ms1000,
        _ => MeasurementRate::Ms2000,
    }
}

/// Decoded STATUS register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    /// The last conversion is not valid, usually because the gain changed mid conversion.
    pub data_invalid: bool,
    /// Gain the data registers were measured with.
    pub gain: Option<Gain>,
    pub interrupt: bool,
    /// The data registers hold a conversion that has not been read yet.
    pub new_data: bool,
}

impl From<u8> for Status {
    fn from(status: u8) -> Self {
        Self {
            data_invalid: status & STATUS_DATA_INVALID != 0,
            gain: Gain::try_from((status >> STATUS_GAIN_SHIFT) & FIELD_MASK).ok(),
            interrupt: status & STATUS_INTERRUPT != 0,
            new_data: status & STATUS_NEW_DATA != 0,
        }
    }
}

#[cfg(all(test, not(all(target_arch = "arm", target_os = "none"))))]
mod test {
    use super::*;

    #[test]
    pub fn als_control_layout() {
        assert_eq!(als_control(Gain::X1, Mode::Standby), ALS_CTRL_RESET);
        assert_eq!(als_control(Gain::X8, Mode::Standby), 0b0000_1100);
        assert_eq!(als_control(Gain::X96, Mode::Active), 0b0001_1101);
        assert_eq!(als_control_reset(), 0b0000_0010);
    }

    #[test]
    pub fn gain_round_trip() {
        for g in [Gain::X1, Gain::X2, Gain::X4, Gain::X8, Gain::X48, Gain::X96] {
            assert_eq!(gain(als_control(g, Mode::Active)), Some(g));
        }
    }

    #[test]
    pub fn reserved_gain_bits() {
        assert_eq!(gain(0b0001_0000), None);
        assert_eq!(gain(0b0001_0101), None);
    }

    #[test]
    pub fn mode_bit() {
        assert_eq!(mode(0b0000_1101), Mode::Active);
        assert_eq!(mode(0b0000_1100), Mode::Standby);
        assert_eq!(with_mode(0b0000_1100, Mode::Active), 0b0000_1101);
        assert_eq!(with_mode(0b1110_1101, Mode::Standby), 0b1110_1100);
    }

    #[test]
    pub fn meas_rate_layout() {
        assert_eq!(
            meas_rate(IntegrationTime::Ms100, MeasurementRate::Ms500),
            MEAS_RATE_RESET
        );
        assert_eq!(
            meas_rate(IntegrationTime::Ms200, MeasurementRate::Ms2000),
            0b0001_0101
        );
        assert_eq!(integration_time(0b0001_0101), IntegrationTime::Ms200);
        assert_eq!(measurement_rate(0b0001_0101), MeasurementRate::Ms2000);
    }

    #[test]
    pub fn rate_aliases() {
        assert_eq!(measurement_rate(0b0000_0110), MeasurementRate::Ms2000);
        assert_eq!(measurement_rate(0b0000_0111), MeasurementRate::Ms2000);
    }

    #[test]
    pub fn status_bits() {
        assert_eq!(
            Status::from(STATUS_RESET),
            Status {
                data_invalid: false,
                gain: Some(Gain::X1),
                interrupt: false,
                new_data: false,
            }
        );
        assert_eq!(
            Status::from(0b1011_0100),
            Status {
                data_invalid: true,
                gain: Some(Gain::X8),
                interrupt: false,
                new_data: true,
            }
        );
        assert_eq!(Status::from(0b0100_1000).gain, None);
        assert!(Status::from(0b0100_1000).interrupt);
    }
}
