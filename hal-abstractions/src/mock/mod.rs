//! Host-side test doubles
//!
//! Scripted stand-ins for the radio driver, the power-controller line and
//! the delay provider. They record every call so tests can assert on call
//! order and call counts, not just on results.

mod delay;
mod gpio;
mod radio;

pub use delay::MockDelay;
pub use gpio::{MockPin, MockPinError, PinLevel};
pub use radio::{MockAccessPoint, MockRadio, RadioCalls};
