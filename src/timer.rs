//! The Timer5 driver.

use core::convert::Infallible;
use core::marker::PhantomData;

use embedded_hal::pwm::{ErrorType, SetDutyCycle};

use crate::clock::Clock;
use crate::handler::{self, Callback};
use crate::period::{self, DUTY_SCALE, Prescaler};
use crate::regs::{Channel, TimerRegisters};

/// Period used by `initialize` callers that have no preference: 1 second.
pub const DEFAULT_PERIOD_US: u32 = 1_000_000;

/// Lifecycle of the driver.
///
/// `set_period`, the duty setters and `clear` are legal in any state but
/// `Uninitialized`; `attach_interrupt` is legal everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Constructed, hardware not yet configured.
    Uninitialized,
    /// `initialize` has run; mode and period are programmed.
    Configured,
    /// `start` has run; the counter is advancing.
    Running,
    /// `stop` has run; the counter is halted at zero.
    Stopped,
}

/// Driver for the 16 bit Timer/Counter5 in phase and frequency correct PWM
/// mode.
///
/// `C` is the system clock rate, `R` the register access capability. There
/// is one physical peripheral, so at most one instance should exist with the
/// real register block behind it; the HAL's peripheral singleton enforces
/// that on AVR targets.
pub struct Timer<C, R> {
    regs: R,
    state: State,
    period_ticks: u16,
    prescaler: Prescaler,
    _clock: PhantomData<C>,
}

impl<C: Clock, R: TimerRegisters> Timer<C, R> {
    /// Wrap a register block. The hardware is left untouched until
    /// [`initialize`](Self::initialize).
    #[must_use]
    pub fn new(regs: R) -> Self {
        Self {
            regs,
            state: State::Uninitialized,
            period_ticks: 0,
            prescaler: Prescaler::Direct,
            _clock: PhantomData,
        }
    }

    /// Put the timer into phase and frequency correct PWM mode with the
    /// clock stopped and program the period.
    ///
    /// Pass [`DEFAULT_PERIOD_US`] for the conventional 1 second period.
    pub fn initialize(&mut self, microseconds: u32) {
        self.regs.reset_to_pfc();
        self.state = State::Configured;
        self.set_period(microseconds);
    }

    /// Program the PWM period.
    ///
    /// Selects the smallest prescaler tap that keeps the cycle count within
    /// the 16 bit resolution. A period too long for even the /1024 tap is
    /// silently clamped to the maximum representable one; callers cannot
    /// tell an exact period from a clamped one.
    pub fn set_period(&mut self, microseconds: u32) {
        debug_assert!(
            self.state != State::Uninitialized,
            "set_period before initialize"
        );

        let setting = period::period_setting(C::FREQ, microseconds);
        self.prescaler = setting.prescaler;
        self.period_ticks = setting.ticks;

        // 16 bit register on an 8 bit bus: keep the interrupt context from
        // observing a torn write.
        critical_section::with(|_| self.regs.write_top(setting.ticks));
    }

    /// Set the same duty cycle on channels A and B.
    ///
    /// `duty` is a 10 bit fixed point fraction of the period
    /// (`duty / 1024`); values of 1024 and above saturate the output.
    pub fn set_pwm_duty(&mut self, duty: u16) {
        debug_assert!(
            self.state != State::Uninitialized,
            "set_pwm_duty before initialize"
        );

        let value = period::compare_value(self.period_ticks, duty);
        critical_section::with(|_| {
            self.regs.write_compare(Channel::A, value);
            self.regs.write_compare(Channel::B, value);
        });
    }

    /// Set the duty cycle on channel C only, same scale as
    /// [`set_pwm_duty`](Self::set_pwm_duty).
    pub fn set_channel_c_duty(&mut self, duty: u16) {
        debug_assert!(
            self.state != State::Uninitialized,
            "set_channel_c_duty before initialize"
        );

        let value = period::compare_value(self.period_ticks, duty);
        critical_section::with(|_| self.regs.write_compare(Channel::C, value));
    }

    /// Register the overflow callback and enable the overflow and channel A
    /// compare match interrupt sources.
    ///
    /// Pending flags are cleared first so a stale flag does not fire a
    /// phantom interrupt the moment the source is enabled. Reattaching
    /// replaces the previous callback.
    pub fn attach_interrupt(&mut self, callback: Callback) {
        handler::install(callback);
        self.regs.clear_pending_interrupts();
        self.regs.enable_interrupts();
    }

    /// Connect the A and B outputs and start the counter.
    ///
    /// The counter is seeded with 1 before the clock tap is enabled, so the
    /// first tick cannot land on BOTTOM and fire a spurious overflow.
    pub fn start(&mut self) {
        debug_assert!(self.state != State::Uninitialized, "start before initialize");

        self.regs.connect_outputs();
        self.regs.write_counter(1);
        self.regs.select_clock(self.prescaler);
        self.state = State::Running;
    }

    /// Disconnect all outputs and halt the counter.
    ///
    /// The counter is zeroed and the overflow flag cleared so a later
    /// [`start`](Self::start) does not replay a stale overflow interrupt.
    pub fn stop(&mut self) {
        debug_assert!(self.state != State::Uninitialized, "stop before initialize");

        self.regs.disconnect_outputs();
        self.regs.stop_clock();
        critical_section::with(|_| {
            self.regs.write_counter(0);
            self.regs.clear_overflow_flag();
        });
        self.state = State::Stopped;
    }

    /// Force all three compare registers to zero.
    ///
    /// In PWM mode the compare registers are double buffered and a plain
    /// write only lands at TOP, so hop through CTC mode where writes land
    /// immediately, then switch back. The full control register writes also
    /// clear the clock select bits; counting resumes on the next `start`.
    pub fn clear(&mut self) {
        debug_assert!(self.state != State::Uninitialized, "clear before initialize");

        self.regs.set_waveform_ctc();
        self.regs.write_compare(Channel::A, 0);
        self.regs.write_compare(Channel::B, 0);
        self.regs.write_compare(Channel::C, 0);
        self.regs.set_waveform_pfc();
    }

    /// The cached TOP value programmed by the last `set_period`.
    #[must_use]
    pub fn period_ticks(&self) -> u16 {
        self.period_ticks
    }

    /// The prescaler tap selected by the last `set_period`.
    #[must_use]
    pub fn prescaler(&self) -> Prescaler {
        self.prescaler
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }
}

impl<C: Clock, R: TimerRegisters> ErrorType for Timer<C, R> {
    type Error = Infallible;
}

/// The A/B channel pair as an `embedded-hal` PWM output.
impl<C: Clock, R: TimerRegisters> SetDutyCycle for Timer<C, R> {
    fn max_duty_cycle(&self) -> u16 {
        DUTY_SCALE
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.set_pwm_duty(duty);
        Ok(())
    }
}

/// The driver bound to the real peripheral.
#[cfg(target_arch = "avr")]
pub type Timer5<C> = Timer<C, crate::hal::pac::TC5>;

#[cfg(target_arch = "avr")]
mod avr {
    use super::{Clock, Timer5};
    use crate::hal::pac::TC5;
    use crate::hal::port::{Pin, PL3, PL4, PL5, mode::Output};

    impl<C: Clock> Timer5<C> {
        /// Claim the peripheral together with its three output pins.
        ///
        /// The pins are consumed as proof that PL3/PL4/PL5 are configured as
        /// outputs and owned by this driver.
        #[must_use]
        pub fn with_pins(
            regs: TC5,
            _oc5a: Pin<Output, PL3>,
            _oc5b: Pin<Output, PL4>,
            _oc5c: Pin<Output, PL5>,
        ) -> Self {
            Self::new(regs)
        }
    }
}
