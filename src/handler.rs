//! Registry for the user supplied overflow callback.
//!
//! Exactly one callback is active at a time; installing a new one replaces
//! the previous one, it never composes. The interrupt vector calls
//! [`dispatch`], which tolerates an empty registry by doing nothing.

use core::cell::Cell;
use critical_section::Mutex;

/// The overflow callback: no arguments, no return value, runs in interrupt
/// context.
pub type Callback = fn();

static OVERFLOW_CALLBACK: Mutex<Cell<Option<Callback>>> = Mutex::new(Cell::new(None));

/// Register `callback` as the overflow handler, replacing any previous one.
pub(crate) fn install(callback: Callback) {
    critical_section::with(|cs| OVERFLOW_CALLBACK.borrow(cs).set(Some(callback)));
}

/// Invoke the registered callback, if any.
///
/// Called by the `TIMER5_OVF` vector on every overflow. Public so that host
/// tests and simulators can force an overflow event.
pub fn dispatch() {
    let callback = critical_section::with(|cs| OVERFLOW_CALLBACK.borrow(cs).get());
    if let Some(callback) = callback {
        callback();
    }
}
