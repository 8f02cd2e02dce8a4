//! Interrupt vectors for Timer5.

use crate::handler;

/// Overflow vector: fires at BOTTOM, once per PWM cycle. Wraps the user
/// defined callback supplied by `attach_interrupt`.
#[avr_device::interrupt(atmega2560)]
fn TIMER5_OVF() {
    handler::dispatch();
}

/// The channel A compare match source is enabled together with the overflow
/// source, so give it a vector that does nothing instead of letting it fall
/// through to the bad interrupt handler.
#[avr_device::interrupt(atmega2560)]
fn TIMER5_COMPA() {}
