//! Period and duty cycle arithmetic.
//!
//! Kept free of hardware register types so it can be checked on the host.

/// Counter resolution: Timer5 is 16 bit.
pub const RESOLUTION: u32 = 65536;

/// Denominator of the duty cycle fraction (10 bit fixed point).
pub const DUTY_SCALE: u16 = 1024;

/// Clock prescaler tap feeding the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prescaler {
    /// No prescale, full system clock.
    Direct,
    Div8,
    Div64,
    Div256,
    Div1024,
}

impl Prescaler {
    /// The division factor of this tap.
    #[must_use]
    pub const fn divisor(self) -> u32 {
        match self {
            Prescaler::Direct => 1,
            Prescaler::Div8 => 8,
            Prescaler::Div64 => 64,
            Prescaler::Div256 => 256,
            Prescaler::Div1024 => 1024,
        }
    }
}

/// A resolved period: prescaler tap plus counter TOP value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodSetting {
    pub prescaler: Prescaler,
    pub ticks: u16,
}

/// Translate a period in microseconds into a prescaler tap and TOP value.
///
/// The counter runs backwards after TOP and the overflow interrupt fires at
/// BOTTOM, so one mechanical period covers two counter sweeps: divide the
/// microseconds by 2 when converting to cycles. The smallest tap that fits
/// the cycle count under [`RESOLUTION`] wins; a period too long even for
/// /1024 is clamped to the maximum representable one.
#[must_use]
pub fn period_setting(cpu_hz: u32, microseconds: u32) -> PeriodSetting {
    // Shift from the previous tap to this one: 1, 8, 64, 256, 1024.
    const TAPS: [(Prescaler, u32); 5] = [
        (Prescaler::Direct, 0),
        (Prescaler::Div8, 3),
        (Prescaler::Div64, 3),
        (Prescaler::Div256, 2),
        (Prescaler::Div1024, 2),
    ];

    let mut cycles = u64::from(cpu_hz / 2_000_000) * u64::from(microseconds);

    for (prescaler, shift) in TAPS {
        cycles >>= shift;
        if cycles < u64::from(RESOLUTION) {
            return PeriodSetting {
                prescaler,
                ticks: cycles as u16,
            };
        }
    }

    // Request was out of bounds, set as maximum.
    PeriodSetting {
        prescaler: Prescaler::Div1024,
        ticks: (RESOLUTION - 1) as u16,
    }
}

/// Compare register value for a duty given as `duty / 1024` of the period.
///
/// Values of `duty` at or above [`DUTY_SCALE`] push the compare value to or
/// past TOP, saturating the channel.
#[must_use]
pub const fn compare_value(period_ticks: u16, duty: u16) -> u16 {
    ((period_ticks as u32 * duty as u32) >> 10) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    const CPU_HZ: u32 = 16_000_000;

    #[test]
    fn reference_period_is_direct() {
        // 1000 us at 16 MHz: (16_000_000 / 2_000_000) * 1000 = 8000 cycles.
        let setting = period_setting(CPU_HZ, 1000);
        assert_eq!(setting.prescaler, Prescaler::Direct);
        assert_eq!(setting.ticks, 8000);
    }

    #[test]
    fn smallest_fitting_tap_wins() {
        // 8 cycles per microsecond at 16 MHz.
        let cases = [
            (8191, Prescaler::Direct, 65528),
            (10_000, Prescaler::Div8, 10_000),
            (500_000, Prescaler::Div64, 62_500),
            (1_000_000, Prescaler::Div256, 31_250),
            (4_000_000, Prescaler::Div1024, 31_250),
        ];
        for (us, prescaler, ticks) in cases {
            let setting = period_setting(CPU_HZ, us);
            assert_eq!(setting.prescaler, prescaler, "{us} us");
            assert_eq!(setting.ticks, ticks, "{us} us");
            // Ticks are the cycle count divided by the selected tap.
            let cycles = u64::from(CPU_HZ / 2_000_000) * u64::from(us);
            assert_eq!(
                u64::from(setting.ticks),
                cycles / u64::from(prescaler.divisor())
            );
        }
    }

    #[test]
    fn tap_boundary() {
        // 8192 us is exactly 65536 cycles: one past Direct.
        let setting = period_setting(CPU_HZ, 8192);
        assert_eq!(setting.prescaler, Prescaler::Div8);
        assert_eq!(setting.ticks, 8192);
    }

    #[test]
    fn out_of_bounds_clamps_to_maximum() {
        // 65536 * 1024 cycles = 8_388_608 us at 16 MHz; anything at or past
        // that no longer fits and clamps.
        let setting = period_setting(CPU_HZ, 8_388_608);
        assert_eq!(setting.prescaler, Prescaler::Div1024);
        assert_eq!(setting.ticks, 65535);

        let setting = period_setting(CPU_HZ, u32::MAX);
        assert_eq!(setting.prescaler, Prescaler::Div1024);
        assert_eq!(setting.ticks, 65535);
    }

    #[test]
    fn duty_fraction() {
        assert_eq!(compare_value(8000, 0), 0);
        assert_eq!(compare_value(8000, 512), 4000);
        assert_eq!(compare_value(8000, 1023), 7992);
        // At and past full scale the channel saturates.
        assert_eq!(compare_value(8000, 1024), 8000);
        assert_eq!(compare_value(8000, 2048), 16000);
    }
}
