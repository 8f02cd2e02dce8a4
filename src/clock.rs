//! System clock rate markers.

/// A clock speed of the device.
pub trait Clock {
    /// Frequency in Hz.
    const FREQ: u32;
}

/// 8 MHz system clock.
pub struct MHz8;

impl Clock for MHz8 {
    const FREQ: u32 = 8_000_000;
}

/// 16 MHz system clock.
pub struct MHz16;

impl Clock for MHz16 {
    const FREQ: u32 = 16_000_000;
}

/// 20 MHz system clock.
pub struct MHz20;

impl Clock for MHz20 {
    const FREQ: u32 = 20_000_000;
}
