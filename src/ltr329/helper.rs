use crate::ltr329::Channels;
use crate::settings::{Gain, IntegrationTime};
use fixed::types::U32F32;

/// The channels are outside the range the lux formula is valid for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Saturated;

/// Converts raw channel counts to lux using the piecewise formula from the LTR-329 appendix.
///
/// The formula is selected by `channel1 / (channel0 + channel1)`.  Ratios of `0.85` and above,
/// `channel0 == 0` and either channel at full scale are reported as [`Saturated`].
///
/// # Errors
///
/// [`Saturated`]: the reading cannot be converted
pub fn lux(
    channels: Channels,
    gain: Gain,
    integration_time: IntegrationTime,
) -> Result<U32F32, Saturated> {
    let Channels { channel0, channel1 } = channels;
    if channel0 == 0 || channel0 == u16::MAX || channel1 == u16::MAX {
        return Err(Saturated);
    }

    let total = u32::from(channel0) + u32::from(channel1);

    let ch0 = U32F32::from_num(channel0);
    let ch1 = U32F32::from_num(channel1);
    // ratio < n / 100 without dividing
    let ratio = 100 * u32::from(channel1);
    let weighted = if ratio < 45 * total {
        ch0 * U32F32::lit("1.7743") + ch1 * U32F32::lit("1.1059")
    } else if ratio < 64 * total {
        (ch0 * U32F32::lit("4.2785")).saturating_sub(ch1 * U32F32::lit("1.9548"))
    } else if ratio < 85 * total {
        ch0 * U32F32::lit("0.5926") + ch1 * U32F32::lit("0.1185")
    } else {
        return Err(Saturated);
    };

    // integration time is normalised to 100 ms
    Ok(weighted * U32F32::from_num(100)
        / U32F32::from_num(gain.multiplier() * integration_time.millis()))
}

#[cfg(all(test, not(all(target_arch = "arm", target_os = "none"))))]
mod test {
    extern crate std;
    use super::{lux, Saturated};
    use crate::ltr329::Channels;
    use crate::settings::{Gain, IntegrationTime};

    fn close(channel0: u16, channel1: u16, gain: Gain, time: IntegrationTime, expected: f32) {
        let lux = lux(Channels { channel0, channel1 }, gain, time)
            .unwrap()
            .to_num::<f32>();
        assert!((lux - expected).abs() < 0.01, "{lux} != {expected}");
    }

    #[test]
    pub fn low_ratio() {
        close(1000, 200, Gain::X1, IntegrationTime::Ms100, 1995.48);
        close(1000, 200, Gain::X2, IntegrationTime::Ms200, 498.87);
    }

    #[test]
    pub fn middle_ratio() {
        close(0x1000, 0x1000, Gain::X1, IntegrationTime::Ms100, 9517.875);
    }

    #[test]
    pub fn high_ratio() {
        close(100, 300, Gain::X1, IntegrationTime::Ms100, 94.81);
        close(100, 300, Gain::X48, IntegrationTime::Ms50, 3.95);
    }

    #[test]
    pub fn no_visible_channel() {
        let channels = Channels {
            channel0: 0,
            channel1: 0,
        };
        assert_eq!(
            lux(channels, Gain::X96, IntegrationTime::Ms400),
            Err(Saturated)
        );
        assert_eq!(
            lux(channels, Gain::X1, IntegrationTime::Ms100),
            Err(Saturated)
        );
    }

    #[test]
    pub fn dim_light() {
        close(1, 0, Gain::X1, IntegrationTime::Ms100, 1.7743);
    }

    #[test]
    pub fn infrared_only() {
        let channels = Channels {
            channel0: 0,
            channel1: 0xFFFF,
        };
        assert_eq!(
            lux(channels, Gain::X1, IntegrationTime::Ms100),
            Err(Saturated)
        );
        let channels = Channels {
            channel0: 0,
            channel1: 12,
        };
        assert_eq!(
            lux(channels, Gain::X1, IntegrationTime::Ms100),
            Err(Saturated)
        );
    }

    #[test]
    pub fn full_scale() {
        let channels = Channels {
            channel0: 0xFFFF,
            channel1: 0x0100,
        };
        assert_eq!(
            lux(channels, Gain::X1, IntegrationTime::Ms100),
            Err(Saturated)
        );
    }
}
