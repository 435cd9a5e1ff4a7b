#![no_std]
#![no_main]

#[cfg(not(target_os = "none"))]
mod other {
    extern crate std;
    use std::println;
    #[no_mangle]
    pub extern "C" fn main() {
        loop {
            println!("unsupported target");
        }
    }
}

#[cfg(all(target_arch = "arm", target_os = "none"))]
mod arm {
    use ltr329::{
        ltr329::{Error, Ltr329, DEFAULT_ADDRESS},
        settings::{Gain, IntegrationTime, MeasurementRate},
        DriverUsingDelay,
    };

    use defmt::*;
    use defmt_rtt as _;
    use fugit::RateExtU32;
    use panic_probe as _;
    use rp2040_hal::{
        clocks::init_clocks_and_plls, entry, i2c::I2C, pac, sio::Sio, watchdog::Watchdog, Timer,
    };

    use embedded_hal::delay::DelayNs;

    #[link_section = ".boot2"]
    #[used]
    pub static BOOT2: [u8; 256] = rp2040_boot2::BOOT_LOADER_GENERIC_03H;

    #[entry]
    fn main() -> ! {
        let mut pac = pac::Peripherals::take().unwrap();
        let mut watchdog = Watchdog::new(pac.WATCHDOG);
        let sio = Sio::new(pac.SIO);

        let external_xtal_freq_hz = 12_000_000u32;
        let clocks = init_clocks_and_plls(
            external_xtal_freq_hz,
            pac.XOSC,
            pac.CLOCKS,
            pac.PLL_SYS,
            pac.PLL_USB,
            &mut pac.RESETS,
            &mut watchdog,
        )
        .ok()
        .unwrap();

        let pins = rp2040_hal::gpio::Pins::new(
            pac.IO_BANK0,
            pac.PADS_BANK0,
            sio.gpio_bank0,
            &mut pac.RESETS,
        );

        let mut i2c = I2C::i2c0(
            pac.I2C0,
            pins.gpio8.reconfigure(), // sda
            pins.gpio9.reconfigure(), // scl
            400.kHz(),
            &mut pac.RESETS,
            &clocks.system_clock,
        );

        let timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
        let mut delay = timer;

        let mut ltr329 = Ltr329::new(&mut i2c, DEFAULT_ADDRESS, timer).unwrap();
        ltr329.init().unwrap();
        ltr329
            .configure(Gain::X1, IntegrationTime::Ms100, MeasurementRate::Ms500)
            .unwrap();

        loop {
            match ltr329.read_channels_when_ready() {
                Ok(channels) => match ltr329::ltr329::helper::lux(
                    channels,
                    ltr329.settings().gain,
                    ltr329.settings().integration_time,
                ) {
                    Ok(lux) => println!("{} lux", lux.to_num::<f32>()),
                    Err(_) => println!("saturated {}", Debug2Format(&channels)),
                },
                Err(Error::NotReady) => {}
                Err(e) => println!("{}", Debug2Format(&e)),
            }
            delay.delay_ms(500);
        }
    }
}
