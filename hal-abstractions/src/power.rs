//! External power controller signaling
//!
//! The beacon does not switch its own supply. A dedicated output line tells
//! an external power controller whether the device wants to stay awake (low)
//! or is about to sleep (high).

use embedded_hal::digital::OutputPin;

/// Signals the external power controller
pub trait PowerController {
    /// Error reported by the signaling hardware
    type Error;

    /// Tell the controller the device is running and must stay powered
    fn hold_awake(&mut self) -> Result<(), Self::Error>;

    /// Tell the controller the device is going to sleep
    fn signal_sleep(&mut self) -> Result<(), Self::Error>;
}

/// Power controller driven by a single GPIO output
///
/// The line is low while awake and driven high once before sleeping.
pub struct PinPowerSignal<P> {
    pin: P,
}

impl<P: OutputPin> PinPowerSignal<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Give the pin back
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> PowerController for PinPowerSignal<P> {
    type Error = P::Error;

    fn hold_awake(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low()
    }

    fn signal_sleep(&mut self) -> Result<(), Self::Error> {
        self.pin.set_high()
    }
}
