//! Sensor settings and their register codes.

use fugit::MillisDurationU32;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Analog gain applied to both photodiode channels.
///
/// Codes `4` and `5` are reserved by the chip and have no variant, so converting them with
/// [`TryFrom<u8>`] fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Gain {
    X1 = 0,
    X2 = 1,
    X4 = 2,
    X8 = 3,
    X48 = 6,
    X96 = 7,
}

impl Gain {
    #[must_use]
    pub const fn multiplier(self) -> u32 {
        match self {
            Self::X1 => 1,
            Self::X2 => 2,
            Self::X4 => 4,
            Self::X8 => 8,
            Self::X48 => 48,
            Self::X96 => 96,
        }
    }
}

/// How long each conversion integrates light for.  The register codes are not in ascending order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum IntegrationTime {
    Ms100 = 0,
    Ms50 = 1,
    Ms200 = 2,
    Ms400 = 3,
    Ms150 = 4,
    Ms250 = 5,
    Ms300 = 6,
    Ms350 = 7,
}

impl IntegrationTime {
    #[must_use]
    pub const fn millis(self) -> u32 {
        match self {
            Self::Ms50 => 50,
            Self::Ms100 => 100,
            Self::Ms150 => 150,
            Self::Ms200 => 200,
            Self::Ms250 => 250,
            Self::Ms300 => 300,
            Self::Ms350 => 350,
            Self::Ms400 => 400,
        }
    }

    #[must_use]
    pub const fn duration(self) -> MillisDurationU32 {
        MillisDurationU32::from_ticks(self.millis())
    }
}

/// Period between the starts of two conversions.
///
/// The chip also decodes `6` and `7` as 2000 ms.  Those aliases are not accepted from callers but
/// are understood when reading the register back (see [`crate::register::measurement_rate`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MeasurementRate {
    Ms50 = 0,
    Ms100 = 1,
    Ms200 = 2,
    Ms500 = 3,
    Ms1000 = 4,
    Ms2000 = 5,
}

impl MeasurementRate {
    #[must_use]
    pub const fn millis(self) -> u32 {
        match self {
            Self::Ms50 => 50,
            Self::Ms100 => 100,
            Self::Ms200 => 200,
            Self::Ms500 => 500,
            Self::Ms1000 => 1000,
            Self::Ms2000 => 2000,
        }
    }

    #[must_use]
    pub const fn duration(self) -> MillisDurationU32 {
        MillisDurationU32::from_ticks(self.millis())
    }
}

/// ALS operating mode.  The chip powers up in [`Mode::Standby`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Mode {
    Standby = 0,
    Active = 1,
}

/// The values last written to the chip.  [`Settings::default`] matches the power-on state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    pub gain: Gain,
    pub integration_time: IntegrationTime,
    pub measurement_rate: MeasurementRate,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gain: Gain::X1,
            integration_time: IntegrationTime::Ms100,
            measurement_rate: MeasurementRate::Ms500,
        }
    }
}

impl Settings {
    /// A measurement rate shorter than the integration time leaves the chip in an undefined state.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.measurement_rate.duration() >= self.integration_time.duration()
    }
}
