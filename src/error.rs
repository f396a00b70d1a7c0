//! Error types for WebSocket session operations.
//!
//! Errors fall into two families. Genuine failures (contract violations,
//! malformed payloads, transport failures) signal that something went wrong.
//! [`Error::Disconnected`] is not a failure: it is how the typed receive
//! helpers report that the peer ended the exchange, and the iteration helpers
//! absorb it to end their streams cleanly.

use thiserror::Error;

use crate::connection::Direction;
use crate::message::CloseCode;

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving a WebSocket session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// An event of the wrong kind for the current state, or a helper invoked
    /// in a state that forbids it.
    ///
    /// This is a bug in the caller or in the transport. The connection state
    /// is undefined afterwards.
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    /// Receive or send invoked after that direction already reached `Closed`.
    #[error("{}", already_terminated_message(.0))]
    AlreadyTerminated(Direction),

    /// The peer ended the exchange with the given close code.
    #[error("Disconnected: {0}")]
    Disconnected(CloseCode),

    /// A data message could not be decoded into the requested shape.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Message size exceeds configured maximum.
    #[error("Message too large: {size} bytes (max: {max})")]
    MessageTooLarge {
        /// Actual message size.
        size: usize,
        /// Maximum allowed size.
        max: usize,
    },

    /// The outbound side of the transport has gone away.
    #[error("Transport closed")]
    TransportClosed,

    /// I/O error reported by the transport.
    #[error("I/O error: {0}")]
    Io(String),
}

fn already_terminated_message(direction: &Direction) -> &'static str {
    match direction {
        Direction::Receive => "Cannot receive once a termination has been received",
        Direction::Send => "Cannot send once a termination has been sent",
    }
}

impl Error {
    /// Returns `true` if this is the peer-termination signal rather than a
    /// genuine failure.
    #[must_use]
    pub const fn is_disconnect(&self) -> bool {
        matches!(self, Error::Disconnected(_))
    }

    /// Returns the close code carried by a termination signal.
    #[must_use]
    pub const fn close_code(&self) -> Option<CloseCode> {
        match self {
            Error::Disconnected(code) => Some(*code),
            _ => None,
        }
    }

    /// Returns `true` for errors that indicate a bug rather than a runtime
    /// condition.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Error::ContractViolation(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::MalformedPayload(format!("invalid UTF-8: {err}"))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedPayload(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MessageTooLarge {
            size: 20_000_000,
            max: 16_000_000,
        };
        assert_eq!(
            err.to_string(),
            "Message too large: 20000000 bytes (max: 16000000)"
        );
    }

    #[test]
    fn test_already_terminated_display() {
        assert_eq!(
            Error::AlreadyTerminated(Direction::Receive).to_string(),
            "Cannot receive once a termination has been received"
        );
        assert_eq!(
            Error::AlreadyTerminated(Direction::Send).to_string(),
            "Cannot send once a termination has been sent"
        );
    }

    #[test]
    fn test_disconnect_signal() {
        let err = Error::Disconnected(CloseCode::Other(4000));
        assert!(err.is_disconnect());
        assert!(!err.is_fatal());
        assert_eq!(err.close_code(), Some(CloseCode::Other(4000)));
        assert_eq!(err.to_string(), "Disconnected: 4000");
    }

    #[test]
    fn test_contract_violation_is_fatal() {
        let err = Error::ContractViolation("unexpected event".into());
        assert!(err.is_fatal());
        assert!(!err.is_disconnect());
        assert_eq!(err.close_code(), None);
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe broken");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::MalformedPayload(_)));
    }

    #[test]
    fn test_error_from_utf8() {
        let bytes = [0xff, 0xfe];
        let utf8_err = std::str::from_utf8(&bytes).unwrap_err();
        let err: Error = utf8_err.into();
        assert!(matches!(err, Error::MalformedPayload(_)));
    }

    #[test]
    fn test_error_clone() {
        let err = Error::TransportClosed;
        let cloned = err.clone();
        assert_eq!(err, cloned);
    }
}
