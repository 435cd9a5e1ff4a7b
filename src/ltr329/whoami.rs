use crate::{ltr329::Ltr329, register, WhoAmI};
use embedded_hal::{delay::DelayNs, i2c::I2c};

impl<I2C: I2c, DELAY: DelayNs> WhoAmI<I2C, u8> for Ltr329<I2C, DELAY> {
    const EXPECTED_WHOAMI: u8 = register::PART_ID_RESET;

    fn whoami(&mut self) -> Result<u8, I2C::Error> {
        let mut data: [u8; 1] = [0];
        self.i2c
            .write_read(self.address, &[register::PART_ID], &mut data)?;
        Ok(data[0])
    }
}

#[cfg(all(test, not(all(target_arch = "arm", target_os = "none"))))]
mod whoami_test {
    extern crate std;
    use std::vec;
    extern crate embedded_hal;
    extern crate embedded_hal_mock;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    use crate::{ltr329::Ltr329, DriverUsingDelay, WhoAmI};

    #[test]
    pub fn whoami() {
        let expectations = [I2cTransaction::write_read(0x29, vec![0x86], vec![0xA0])];
        let i2c = I2cMock::new(&expectations);
        let mut i2c_clone = i2c.clone();

        let mut ltr329 = Ltr329::new(i2c, 0x29, NoopDelay::new()).unwrap();
        assert_eq!(ltr329.whoami(), Ok(0xA0));

        i2c_clone.done();
    }

    #[test]
    pub fn expected() {
        type Sensor = Ltr329<I2cMock, NoopDelay>;
        assert!(<Sensor as WhoAmI<I2cMock, u8>>::is_expected(0xA0));
        assert!(!<Sensor as WhoAmI<I2cMock, u8>>::is_expected(0xA1));
        assert!(!<Sensor as WhoAmI<I2cMock, u8>>::is_expected(0x05));
    }
}
