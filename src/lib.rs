//! Interrupt and PWM utilities for the 16 bit Timer/Counter5 on the ATmega2560.
//!
//! The timer runs in phase and frequency correct PWM mode: the counter ramps
//! up to TOP (ICR5) and back down to BOTTOM, the overflow interrupt fires at
//! BOTTOM once per full up/down cycle, and the three output compare channels
//! drive OC5A/OC5B/OC5C (pins PL3/PL4/PL5).

#![no_std]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]

pub mod clock;
pub mod handler;
pub mod period;
pub mod regs;
pub mod timer;

#[cfg(target_arch = "avr")]
mod isr;

#[cfg(target_arch = "avr")]
pub use atmega_hal as hal;

pub use period::{DUTY_SCALE, Prescaler, RESOLUTION};
pub use regs::{Channel, TimerRegisters};
pub use timer::{DEFAULT_PERIOD_US, State, Timer};

#[cfg(target_arch = "avr")]
pub use timer::Timer5;
