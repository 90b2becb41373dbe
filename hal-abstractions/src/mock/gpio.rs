//! Mock output pin

use embedded_hal::digital::{Error, ErrorKind, ErrorType, OutputPin};

/// Logic level written to a [`MockPin`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinLevel {
    Low,
    High,
}

/// Error returned by a pin built with [`MockPin::failing`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockPinError;

impl Error for MockPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Output pin recording every level written to it
#[derive(Debug, Default)]
pub struct MockPin {
    transitions: Vec<PinLevel>,
    fail: bool,
}

impl MockPin {
    pub fn new() -> Self {
        Self::default()
    }

    /// A pin whose writes always fail
    pub fn failing() -> Self {
        Self {
            transitions: Vec::new(),
            fail: true,
        }
    }

    /// Every level written, oldest first
    pub fn transitions(&self) -> &[PinLevel] {
        &self.transitions
    }

    /// Last level written, if any
    pub fn level(&self) -> Option<PinLevel> {
        self.transitions.last().copied()
    }

    fn write(&mut self, level: PinLevel) -> Result<(), MockPinError> {
        if self.fail {
            return Err(MockPinError);
        }
        self.transitions.push(level);
        Ok(())
    }
}

impl ErrorType for MockPin {
    type Error = MockPinError;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(PinLevel::Low)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(PinLevel::High)
    }
}
