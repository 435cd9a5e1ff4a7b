//! # Rust Driver for LTR-329ALS-01 Ambient Light Sensor
//!
//! ## External Links
//!
//! - [Product Site]
//! - [Arduino Library]
//! - [Lux Appendix]
//!
//! [Product Site]: https://www.adafruit.com/product/5591
//! [Arduino Library]: https://github.com/adafruit/Adafruit_LTR329_LTR303
//! [Lux Appendix]: https://github.com/aniketpalu/LTR303/blob/main/LTR-303%20329_Appendix%20A%20Ver_1.0_22%20Feb%202013.pdf

use crate::register::{self, Status};
use crate::settings::{Gain, IntegrationTime, MeasurementRate, Mode, Settings};
use crate::{DriverUsingDelay, OutOfRange, WhoAmI};
use embedded_hal::{delay::DelayNs, i2c::I2c};
use fixed::types::U32F32;

pub const DEFAULT_ADDRESS: u8 = 0x29;
pub const MANUFACTURER_ID: u8 = register::MANU_ID_RESET;
/// Time from standby (or a soft reset) until the ALS is active.
pub const WAKEUP_DELAY_MS: u32 = 10;
pub const POLL_INTERVAL_MS: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    I2cError(E),
    ArgumentError,
    UnexpectedDevice,
    NotInitialized,
    /// A settings write failed partway.  The chip has to be configured (or reset) again before
    /// its data can be trusted.
    StaleConfiguration,
    NotReady,
    InvalidData,
    /// The raw channels are valid but too bright to convert to lux.
    Saturated(Channels),
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::I2cError(error)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    Uninitialized,
    Identified,
    Configured,
    Indeterminate,
}

/// Raw photodiode counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channels {
    /// Visible and infrared
    pub channel0: u16,
    /// Infrared only
    pub channel1: u16,
}

pub struct Ltr329<I2C, DELAY> {
    i2c: I2C,
    address: u8,
    delay: DELAY,
    state: State,
    settings: Settings,
}

impl<I2C: I2c, DELAY: DelayNs> DriverUsingDelay<I2C, DELAY, Error<I2C::Error>>
    for Ltr329<I2C, DELAY>
{
    /// Any 7-bit address is accepted.
    fn address_check(address: u8) -> Result<(), OutOfRange> {
        if address <= 0x7F {
            Ok(())
        } else {
            Err(OutOfRange)
        }
    }

    fn new_inner(i2c: I2C, address: u8, delay: DELAY) -> Self {
        Self {
            i2c,
            address,
            delay,
            state: State::Uninitialized,
            settings: Settings::default(),
        }
    }

    fn init(&mut self) -> Result<(), Error<I2C::Error>> {
        let part_id = self.whoami()?;
        if !<Self as WhoAmI<I2C, u8>>::is_expected(part_id) {
            return Err(Error::UnexpectedDevice);
        }
        self.state = State::Identified;
        self.settings = Settings::default();
        Ok(())
    }
}

impl<I2C: I2c, DELAY: DelayNs> Ltr329<I2C, DELAY> {
    #[must_use]
    pub const fn state(&self) -> State {
        self.state
    }

    /// Settings last written by [`Ltr329::configure`] through this handle, or the power-on
    /// defaults.  [`DriverUsingDelay::init`] does not read them back from the chip, so a sensor
    /// left configured by an earlier handle reports defaults here until it is configured again.
    #[must_use]
    pub const fn settings(&self) -> Settings {
        self.settings
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    fn ensure_identified(&self) -> Result<(), Error<I2C::Error>> {
        match self.state {
            State::Uninitialized => Err(Error::NotInitialized),
            _ => Ok(()),
        }
    }

    fn ensure_readable(&self) -> Result<(), Error<I2C::Error>> {
        match self.state {
            State::Uninitialized => Err(Error::NotInitialized),
            State::Indeterminate => Err(Error::StaleConfiguration),
            State::Identified | State::Configured => Ok(()),
        }
    }

    fn read_register(&mut self, register: u8) -> Result<u8, I2C::Error> {
        let mut data: [u8; 1] = [0];
        self.i2c.write_read(self.address, &[register], &mut data)?;
        Ok(data[0])
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[register, value])
    }

    /// Sets gain, integration time and measurement rate and activates the ALS.
    ///
    /// Each setting may be given as its enum or as a raw register code.
    ///
    /// # Errors
    ///
    /// - [`Error::NotInitialized`]: [`DriverUsingDelay::init`] has not succeeded
    /// - [`Error::ArgumentError`]: a reserved code, or a measurement rate shorter than the
    ///   integration time.  Nothing is written.
    /// - [`Error::I2cError`]: a write failed.  The handle is left in [`State::Indeterminate`].
    pub fn configure<G, T, R>(
        &mut self,
        gain: G,
        integration_time: T,
        measurement_rate: R,
    ) -> Result<(), Error<I2C::Error>>
    where
        G: TryInto<Gain>,
        T: TryInto<IntegrationTime>,
        R: TryInto<MeasurementRate>,
    {
        self.ensure_identified()?;
        let settings = Settings {
            gain: gain.try_into().map_err(|_| Error::ArgumentError)?,
            integration_time: integration_time
                .try_into()
                .map_err(|_| Error::ArgumentError)?,
            measurement_rate: measurement_rate
                .try_into()
                .map_err(|_| Error::ArgumentError)?,
        };
        if !settings.is_consistent() {
            return Err(Error::ArgumentError);
        }

        self.state = State::Indeterminate;
        self.write_register(
            register::ALS_CTRL,
            register::als_control(settings.gain, Mode::Active),
        )?;
        self.delay.delay_ms(WAKEUP_DELAY_MS);
        self.write_register(
            register::MEAS_RATE,
            register::meas_rate(settings.integration_time, settings.measurement_rate),
        )?;

        self.settings = settings;
        self.state = State::Configured;
        Ok(())
    }

    /// Soft resets the chip.  It comes back in standby with power-on settings.
    pub fn reset(&mut self) -> Result<(), Error<I2C::Error>> {
        self.ensure_identified()?;
        self.state = State::Indeterminate;
        self.write_register(register::ALS_CTRL, register::als_control_reset())?;
        self.delay.delay_ms(WAKEUP_DELAY_MS);

        self.settings = Settings::default();
        self.state = State::Identified;
        Ok(())
    }

    pub fn mode(&mut self) -> Result<Mode, Error<I2C::Error>> {
        self.ensure_identified()?;
        Ok(register::mode(self.read_register(register::ALS_CTRL)?))
    }

    pub fn set_mode(&mut self, mode: Mode) -> Result<(), Error<I2C::Error>> {
        self.ensure_identified()?;
        let als_control = self.read_register(register::ALS_CTRL)?;
        self.write_register(register::ALS_CTRL, register::with_mode(als_control, mode))?;
        if mode == Mode::Active {
            self.delay.delay_ms(WAKEUP_DELAY_MS);
        }
        Ok(())
    }

    pub fn gain(&mut self) -> Result<Gain, Error<I2C::Error>> {
        self.ensure_identified()?;
        register::gain(self.read_register(register::ALS_CTRL)?).ok_or(Error::UnexpectedDevice)
    }

    pub fn integration_time(&mut self) -> Result<IntegrationTime, Error<I2C::Error>> {
        self.ensure_identified()?;
        Ok(register::integration_time(
            self.read_register(register::MEAS_RATE)?,
        ))
    }

    pub fn measurement_rate(&mut self) -> Result<MeasurementRate, Error<I2C::Error>> {
        self.ensure_identified()?;
        Ok(register::measurement_rate(
            self.read_register(register::MEAS_RATE)?,
        ))
    }

    pub fn manufacturer_id(&mut self) -> Result<u8, Error<I2C::Error>> {
        self.ensure_identified()?;
        Ok(self.read_register(register::MANU_ID)?)
    }

    pub fn status(&mut self) -> Result<Status, Error<I2C::Error>> {
        self.ensure_identified()?;
        Ok(Status::from(self.read_register(register::STATUS)?))
    }

    pub fn data_ready(&mut self) -> Result<bool, Error<I2C::Error>> {
        Ok(self.status()?.new_data)
    }

    /// Reads both channels in one transaction.  Does not wait for a new conversion.
    ///
    /// # Errors
    ///
    /// - [`Error::NotInitialized`]: [`DriverUsingDelay::init`] has not succeeded
    /// - [`Error::StaleConfiguration`]: the last settings write failed
    /// - [`Error::I2cError`]: the read failed
    pub fn read_channels(&mut self) -> Result<Channels, Error<I2C::Error>> {
        self.ensure_readable()?;
        let mut data: [u8; 4] = [0; 4];
        self.i2c
            .write_read(self.address, &[register::CH1DATA_0], &mut data)?;
        Ok(Channels {
            channel1: u16::from_le_bytes([data[0], data[1]]),
            channel0: u16::from_le_bytes([data[2], data[3]]),
        })
    }

    /// Polls the status register until a new conversion is available, then reads it.  Gives up
    /// after one measurement period plus one integration time.
    pub fn read_channels_when_ready(&mut self) -> Result<Channels, Error<I2C::Error>> {
        self.ensure_readable()?;
        let attempts = (self.settings.measurement_rate.millis()
            + self.settings.integration_time.millis())
        .div_ceil(POLL_INTERVAL_MS);
        for _ in 0..attempts {
            let status = self.status()?;
            if status.data_invalid {
                return Err(Error::InvalidData);
            }
            if status.new_data {
                return self.read_channels();
            }
            self.delay.delay_ms(POLL_INTERVAL_MS);
        }
        Err(Error::NotReady)
    }

    /// Reads both channels and converts them with [`Ltr329::settings`], the settings last written
    /// through this handle.  Call [`Ltr329::configure`] or [`Ltr329::reset`] after
    /// [`DriverUsingDelay::init`] when the chip may still hold settings from before.
    ///
    /// # Errors
    ///
    /// [`Error::Saturated`]: carries the raw channels that could not be converted
    pub fn lux(&mut self) -> Result<U32F32, Error<I2C::Error>> {
        let channels = self.read_channels()?;
        helper::lux(
            channels,
            self.settings.gain,
            self.settings.integration_time,
        )
        .map_err(|helper::Saturated| Error::Saturated(channels))
    }
}


pub mod helper;
pub mod whoami;
