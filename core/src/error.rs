//! Beacon error types

/// Errors raised by the beacon core
///
/// None of these are fatal. Association failure ends in a deep-sleep
/// request; every transmission failure only ends the current duty cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BeaconError {
    /// Association retry budget exhausted without connecting
    AssociationFailed,
    /// Transmission requested with no datapoints
    EmptyBatch,
    /// Collection endpoint could not be reached
    ConnectFailed,
    /// Endpoint never answered within the response poll budget
    ResponseTimeout,
    /// Batch does not fit the payload buffer
    PayloadOverflow,
    /// Positioning network set is empty
    NoPositioningNetworks,
    /// Association retry budget is zero
    InvalidRetryBudget,
    /// Response poll budget is zero
    InvalidResponsePolls,
    /// Endpoint host and path do not fit the request header buffer
    EndpointTooLong,
    /// Transmission size is zero
    InvalidTransmissionSize,
}

impl core::fmt::Display for BeaconError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AssociationFailed => write!(f, "Association failed"),
            Self::EmptyBatch => write!(f, "Nothing to transmit"),
            Self::ConnectFailed => write!(f, "Endpoint connection failed"),
            Self::ResponseTimeout => write!(f, "Endpoint response timeout"),
            Self::PayloadOverflow => write!(f, "Payload buffer overflow"),
            Self::NoPositioningNetworks => write!(f, "No positioning networks configured"),
            Self::InvalidRetryBudget => write!(f, "Invalid association retry budget"),
            Self::InvalidResponsePolls => write!(f, "Invalid response poll budget"),
            Self::EndpointTooLong => write!(f, "Endpoint host or path too long"),
            Self::InvalidTransmissionSize => write!(f, "Invalid transmission size"),
        }
    }
}

impl core::error::Error for BeaconError {}

impl embedded_io::Error for BeaconError {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self {
            Self::AssociationFailed => embedded_io::ErrorKind::NotConnected,
            Self::ConnectFailed => embedded_io::ErrorKind::ConnectionRefused,
            Self::ResponseTimeout => embedded_io::ErrorKind::TimedOut,
            Self::PayloadOverflow => embedded_io::ErrorKind::OutOfMemory,
            Self::EmptyBatch
            | Self::NoPositioningNetworks
            | Self::InvalidRetryBudget
            | Self::InvalidResponsePolls
            | Self::EndpointTooLong
            | Self::InvalidTransmissionSize => embedded_io::ErrorKind::InvalidInput,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_io::{Error, ErrorKind};

    #[test]
    fn test_transmission_error_kinds() {
        assert_eq!(BeaconError::ConnectFailed.kind(), ErrorKind::ConnectionRefused);
        assert_eq!(BeaconError::ResponseTimeout.kind(), ErrorKind::TimedOut);
        assert_eq!(BeaconError::EmptyBatch.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_config_rejections_are_invalid_input() {
        assert_eq!(BeaconError::EndpointTooLong.kind(), ErrorKind::InvalidInput);
        assert_eq!(
            BeaconError::InvalidTransmissionSize.kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(BeaconError::AssociationFailed.kind(), ErrorKind::NotConnected);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            format!("{}", BeaconError::ResponseTimeout),
            "Endpoint response timeout"
        );
    }
}
