//! Register access seam for the timer peripheral.
//!
//! The driver talks to the hardware only through [`TimerRegisters`], so unit
//! tests can substitute a simulated register file for the real `TC5` block.

use crate::period::Prescaler;

/// Output compare channels of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// OC5A (pin PL3).
    A,
    /// OC5B (pin PL4).
    B,
    /// OC5C (pin PL5).
    C,
}

/// Raw operations on the timer register block.
///
/// The waveform mode setters perform full control register writes, exactly as
/// the hardware sequences require: they also clear the clock select bits, so
/// the clock has to be reselected afterwards to resume counting. None of the
/// methods bracket themselves in a critical section; the driver adds one
/// around every access to a 16 bit register.
pub trait TimerRegisters {
    /// Reset both control registers: phase and frequency correct PWM
    /// (WGM mode 8), outputs disconnected, clock stopped.
    fn reset_to_pfc(&mut self);

    /// Switch the waveform generator to CTC on ICR5 (WGM mode 12).
    ///
    /// In this mode compare register writes are not double buffered and land
    /// immediately.
    fn set_waveform_ctc(&mut self);

    /// Switch the waveform generator back to phase and frequency correct PWM
    /// (WGM mode 8).
    fn set_waveform_pfc(&mut self);

    /// Write the TOP value (ICR5).
    fn write_top(&mut self, ticks: u16);

    /// Write one channel's compare register (OCR5A/OCR5B/OCR5C).
    fn write_compare(&mut self, channel: Channel, value: u16);

    /// Write the live counter (TCNT5).
    fn write_counter(&mut self, value: u16);

    /// Connect the OC5A and OC5B outputs in non-inverting PWM drive.
    fn connect_outputs(&mut self);

    /// Disconnect all three outputs from the waveform generator.
    fn disconnect_outputs(&mut self);

    /// Set the clock select bits for the given prescaler tap.
    fn select_clock(&mut self, prescaler: Prescaler);

    /// Clear the clock select bits, halting the counter.
    fn stop_clock(&mut self);

    /// Clear pending overflow and channel A compare match flags
    /// (write 1 to TOV5 and OCF5A).
    fn clear_pending_interrupts(&mut self);

    /// Clear a pending overflow flag (write 1 to TOV5).
    fn clear_overflow_flag(&mut self);

    /// Enable the overflow and channel A compare match interrupt sources
    /// (TOIE5 and OCIE5A).
    fn enable_interrupts(&mut self);
}

#[cfg(target_arch = "avr")]
mod tc5 {
    use super::{Channel, Prescaler, TimerRegisters};
    use crate::hal::pac::TC5;

    impl TimerRegisters for TC5 {
        fn reset_to_pfc(&mut self) {
            self.tccr5a.reset();
            // WGM53 only: mode 8, clock select cleared.
            self.tccr5b.write(|w| w.wgm5().bits(0b10));
        }

        fn set_waveform_ctc(&mut self) {
            // WGM53 | WGM52: mode 12.
            self.tccr5b.write(|w| w.wgm5().bits(0b11));
        }

        fn set_waveform_pfc(&mut self) {
            self.tccr5b.write(|w| w.wgm5().bits(0b10));
        }

        fn write_top(&mut self, ticks: u16) {
            // ICR5 is TOP in phase and frequency correct mode.
            self.icr5.write(|w| w.bits(ticks));
        }

        fn write_compare(&mut self, channel: Channel, value: u16) {
            match channel {
                Channel::A => self.ocr5a.write(|w| w.bits(value)),
                Channel::B => self.ocr5b.write(|w| w.bits(value)),
                Channel::C => self.ocr5c.write(|w| w.bits(value)),
            }
        }

        fn write_counter(&mut self, value: u16) {
            self.tcnt5.write(|w| w.bits(value));
        }

        fn connect_outputs(&mut self) {
            self.tccr5a
                .modify(|_, w| w.com5a().match_clear().com5b().match_clear());
        }

        fn disconnect_outputs(&mut self) {
            self.tccr5a.modify(|_, w| {
                w.com5a()
                    .disconnected()
                    .com5b()
                    .disconnected()
                    .com5c()
                    .disconnected()
            });
        }

        fn select_clock(&mut self, prescaler: Prescaler) {
            self.tccr5b.modify(|_, w| match prescaler {
                Prescaler::Direct => w.cs5().direct(),
                Prescaler::Div8 => w.cs5().prescale_8(),
                Prescaler::Div64 => w.cs5().prescale_64(),
                Prescaler::Div256 => w.cs5().prescale_256(),
                Prescaler::Div1024 => w.cs5().prescale_1024(),
            });
        }

        fn stop_clock(&mut self) {
            self.tccr5b.modify(|_, w| w.cs5().no_clock());
        }

        fn clear_pending_interrupts(&mut self) {
            self.tifr5.write(|w| w.tov5().set_bit().ocf5a().set_bit());
        }

        fn clear_overflow_flag(&mut self) {
            self.tifr5.write(|w| w.tov5().set_bit());
        }

        fn enable_interrupts(&mut self) {
            self.timsk5.write(|w| w.toie5().set_bit().ocie5a().set_bit());
        }
    }
}
