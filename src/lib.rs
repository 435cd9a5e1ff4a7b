#![no_std]
#![doc = include_str!("../README.md")]

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

/// Devices that report a fixed identity code from one of their registers.
pub trait WhoAmI<I2C: I2c, T: core::cmp::Eq> {
    const EXPECTED_WHOAMI: T;

    fn whoami(&mut self) -> Result<T, I2C::Error>;

    /// Whether an identity code read from the device belongs to the expected part.
    fn is_expected(whoami: T) -> bool {
        whoami == Self::EXPECTED_WHOAMI
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRange;

pub trait DriverUsingDelay<I2C: I2c, DELAY: DelayNs, T> {
    fn address_check(address: u8) -> Result<(), OutOfRange> {
        if (0x08..=0x77).contains(&address) {
            Ok(())
        } else {
            Err(OutOfRange)
        }
    }

    fn new_inner(i2c: I2C, address: u8, delay: DELAY) -> Self;

    /// The entry point for a [`DriverUsingDelay`].  Expects [`I2c`] (obtainable from target
    /// platform HAL), an I2C device address and a [`DelayNs`] (also usually obtainable from the
    /// target platform HAL).  This provides a handle that does not touch the bus.  Initialization
    /// is deferred to [`DriverUsingDelay::init`].
    ///
    /// # Errors
    ///
    /// [`OutOfRange`]: address is rejected by [`DriverUsingDelay::address_check`]
    fn new(i2c: I2C, address: u8, delay: DELAY) -> Result<Self, OutOfRange>
    where
        Self: Sized,
    {
        Self::address_check(address)?;
        Ok(Self::new_inner(i2c, address, delay))
    }

    /// Initializes the hardware.  Initialization is required prior to interacting with the
    /// device.  A failed initialization leaves the handle as it was, so calling
    /// [`DriverUsingDelay::init`] again is safe.
    ///
    /// # Errors
    ///
    /// [`T`]: a device dependent error type for any problems encountered during initialization.
    fn init(&mut self) -> Result<(), T>;
}

pub mod ltr329;
pub mod register;
pub mod settings;
