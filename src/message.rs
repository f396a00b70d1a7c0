//! Session events, data payloads and close codes.
//!
//! An [`Event`] is the unit exchanged with the transport in both directions.
//! The transport hands the session `Handshake`, `Data` and `Termination`
//! events; the session hands the transport `Accept`, `Data` and `Termination`
//! events.

use bytes::Bytes;

/// WebSocket close status code per RFC 6455 Section 7.4.
///
/// Codes compare and hash by numeric value, so `Other(1000)` equals
/// `Normal`. Prefer [`CloseCode::from_u16`] when decoding to get the named
/// variant.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub enum CloseCode {
    /// Normal closure (1000). The connection successfully completed.
    #[default]
    Normal,
    /// Going away (1001). Endpoint is going away (e.g., server shutdown, browser navigating away).
    GoingAway,
    /// Protocol error (1002). Endpoint received a malformed frame or protocol violation.
    ProtocolError,
    /// Unsupported data (1003). Endpoint received data type it cannot handle.
    UnsupportedData,
    /// Abnormal closure (1006). The peer vanished without a close handshake.
    ///
    /// Reported by transports, never sent by an endpoint.
    Abnormal,
    /// Invalid payload (1007). Endpoint received a message with invalid data (e.g., non-UTF-8 in text).
    InvalidPayload,
    /// Policy violation (1008). Endpoint received a message that violates its policy.
    PolicyViolation,
    /// Message too big (1009). Endpoint received a message too large to process.
    MessageTooBig,
    /// Mandatory extension (1010). Client expected server to negotiate an extension.
    MandatoryExtension,
    /// Internal error (1011). Server encountered an unexpected condition.
    InternalError,
    /// Custom close code (3000-4999 for applications, 1012-1014 for registered codes).
    Other(u16),
}

impl CloseCode {
    /// Create a `CloseCode` from its numeric value.
    #[must_use]
    pub const fn from_u16(code: u16) -> Self {
        match code {
            1000 => CloseCode::Normal,
            1001 => CloseCode::GoingAway,
            1002 => CloseCode::ProtocolError,
            1003 => CloseCode::UnsupportedData,
            1006 => CloseCode::Abnormal,
            1007 => CloseCode::InvalidPayload,
            1008 => CloseCode::PolicyViolation,
            1009 => CloseCode::MessageTooBig,
            1010 => CloseCode::MandatoryExtension,
            1011 => CloseCode::InternalError,
            other => CloseCode::Other(other),
        }
    }

    /// Get the numeric value of this close code.
    #[must_use]
    pub const fn as_u16(&self) -> u16 {
        match self {
            CloseCode::Normal => 1000,
            CloseCode::GoingAway => 1001,
            CloseCode::ProtocolError => 1002,
            CloseCode::UnsupportedData => 1003,
            CloseCode::Abnormal => 1006,
            CloseCode::InvalidPayload => 1007,
            CloseCode::PolicyViolation => 1008,
            CloseCode::MessageTooBig => 1009,
            CloseCode::MandatoryExtension => 1010,
            CloseCode::InternalError => 1011,
            CloseCode::Other(code) => *code,
        }
    }

    /// Check if this close code may be sent by an endpoint per RFC 6455 Section 7.4.1.
    ///
    /// Valid codes:
    /// - 1000-1003
    /// - 1007-1014
    /// - 3000-4999: Reserved for libraries/frameworks and applications
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        let code = self.as_u16();
        matches!(code, 1000..=1003 | 1007..=1014 | 3000..=4999)
    }

    /// Check if this close code is reserved and MUST NOT be sent in a Close frame.
    ///
    /// Reserved codes per RFC 6455 Section 7.4.1:
    /// - 1004: Reserved
    /// - 1005: No Status Received
    /// - 1006: Abnormal Closure
    /// - 1015: TLS Handshake
    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        let code = self.as_u16();
        matches!(code, 1004..=1006 | 1015)
    }
}

impl PartialEq for CloseCode {
    fn eq(&self, other: &Self) -> bool {
        self.as_u16() == other.as_u16()
    }
}

impl Eq for CloseCode {}

impl std::hash::Hash for CloseCode {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.as_u16().hash(state);
    }
}

impl From<u16> for CloseCode {
    fn from(code: u16) -> Self {
        CloseCode::from_u16(code)
    }
}

impl From<CloseCode> for u16 {
    fn from(code: CloseCode) -> Self {
        code.as_u16()
    }
}

impl std::fmt::Display for CloseCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

/// How a structured (JSON) document travels inside a data message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Carried in the text payload.
    #[default]
    Text,
    /// Carried in the binary payload as UTF-8 bytes.
    Binary,
}

/// Payload of a data event.
///
/// A well-formed message carries exactly one of `text` or `bytes`. Both
/// fields are optional so that transports can faithfully report malformed
/// shapes; the typed receive helpers reject them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    /// Text payload.
    pub text: Option<String>,
    /// Binary payload.
    pub bytes: Option<Bytes>,
}

impl Message {
    /// Create a text message.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self {
            text: Some(s.into()),
            bytes: None,
        }
    }

    /// Create a binary message.
    #[must_use]
    pub fn binary(data: impl Into<Bytes>) -> Self {
        Self {
            text: None,
            bytes: Some(data.into()),
        }
    }

    /// Returns `true` if exactly one payload field is populated.
    #[must_use]
    pub const fn is_well_formed(&self) -> bool {
        self.text.is_some() != self.bytes.is_some()
    }

    /// Returns `true` if this is a well-formed text message.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        self.text.is_some() && self.bytes.is_none()
    }

    /// Returns `true` if this is a well-formed binary message.
    #[must_use]
    pub const fn is_binary(&self) -> bool {
        self.bytes.is_some() && self.text.is_none()
    }

    /// Size of the populated payload in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.as_ref().map_or(0, String::len) + self.bytes.as_ref().map_or(0, Bytes::len)
    }

    /// Returns `true` if no payload bytes are carried.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the text content, if this is a text message.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Borrow the binary content, if this is a binary message.
    #[must_use]
    pub fn as_binary(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }
}

/// A protocol event exchanged with the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Event {
    /// The peer requests a session (inbound only).
    Handshake,
    /// The local side accepts the session (outbound only).
    Accept {
        /// Subprotocol selected for the session, passed through verbatim.
        subprotocol: Option<String>,
    },
    /// A data message (both directions).
    Data(Message),
    /// One direction of the exchange ends (both directions).
    Termination {
        /// Reason code.
        code: CloseCode,
    },
}

impl Event {
    /// Create a text data event.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Event::Data(Message::text(s))
    }

    /// Create a binary data event.
    #[must_use]
    pub fn binary(data: impl Into<Bytes>) -> Self {
        Event::Data(Message::binary(data))
    }

    /// Create an accept event.
    #[must_use]
    pub fn accept(subprotocol: Option<&str>) -> Self {
        Event::Accept {
            subprotocol: subprotocol.map(str::to_owned),
        }
    }

    /// Create a termination event.
    #[must_use]
    pub const fn termination(code: CloseCode) -> Self {
        Event::Termination { code }
    }

    /// Short name of the event kind, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Event::Handshake => "handshake",
            Event::Accept { .. } => "accept",
            Event::Data(_) => "data",
            Event::Termination { .. } => "termination",
        }
    }

    /// Returns `true` if this is a data event.
    #[must_use]
    pub const fn is_data(&self) -> bool {
        matches!(self, Event::Data(_))
    }

    /// Returns `true` if this is a termination event.
    #[must_use]
    pub const fn is_termination(&self) -> bool {
        matches!(self, Event::Termination { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_text_creation() {
        let msg = Message::text("hello");
        assert_eq!(msg.as_text(), Some("hello"));
        assert!(msg.bytes.is_none());
        assert!(msg.is_text());
        assert!(!msg.is_binary());
    }

    #[test]
    fn test_message_binary_creation() {
        let msg = Message::binary(vec![1, 2, 3]);
        assert_eq!(msg.as_binary(), Some([1, 2, 3].as_slice()));
        assert!(msg.text.is_none());
        assert!(msg.is_binary());

        let msg = Message::binary(Bytes::from_static(b"abc"));
        assert_eq!(msg.len(), 3);
    }

    #[test]
    fn test_message_well_formed() {
        assert!(Message::text("a").is_well_formed());
        assert!(Message::binary(vec![1]).is_well_formed());

        let neither = Message::default();
        assert!(!neither.is_well_formed());
        assert!(neither.is_empty());

        let both = Message {
            text: Some("a".into()),
            bytes: Some(Bytes::from_static(b"a")),
        };
        assert!(!both.is_well_formed());
        assert!(!both.is_text());
        assert!(!both.is_binary());
    }

    #[test]
    fn test_event_constructors() {
        assert_eq!(Event::text("hi"), Event::Data(Message::text("hi")));
        assert_eq!(
            Event::accept(Some("chat")),
            Event::Accept {
                subprotocol: Some("chat".into())
            }
        );
        assert_eq!(
            Event::termination(CloseCode::Normal),
            Event::Termination {
                code: CloseCode::Normal
            }
        );
    }

    #[test]
    fn test_event_kind() {
        assert_eq!(Event::Handshake.kind(), "handshake");
        assert_eq!(Event::accept(None).kind(), "accept");
        assert_eq!(Event::binary(vec![0]).kind(), "data");
        assert_eq!(Event::termination(CloseCode::GoingAway).kind(), "termination");
        assert!(Event::text("x").is_data());
        assert!(Event::termination(CloseCode::Normal).is_termination());
        assert!(!Event::Handshake.is_data());
    }

    #[test]
    fn test_close_code_from_u16() {
        assert_eq!(CloseCode::from_u16(1000), CloseCode::Normal);
        assert_eq!(CloseCode::from_u16(1001), CloseCode::GoingAway);
        assert_eq!(CloseCode::from_u16(1002), CloseCode::ProtocolError);
        assert_eq!(CloseCode::from_u16(1003), CloseCode::UnsupportedData);
        assert_eq!(CloseCode::from_u16(1006), CloseCode::Abnormal);
        assert_eq!(CloseCode::from_u16(1007), CloseCode::InvalidPayload);
        assert_eq!(CloseCode::from_u16(1011), CloseCode::InternalError);
        assert_eq!(CloseCode::from_u16(4000), CloseCode::Other(4000));
        assert_eq!(CloseCode::from(1008), CloseCode::PolicyViolation);
    }

    #[test]
    fn test_close_code_as_u16() {
        assert_eq!(CloseCode::Normal.as_u16(), 1000);
        assert_eq!(CloseCode::Abnormal.as_u16(), 1006);
        assert_eq!(CloseCode::Other(3500).as_u16(), 3500);
        assert_eq!(u16::from(CloseCode::MessageTooBig), 1009);
        assert_eq!(CloseCode::default().as_u16(), 1000);
    }

    #[test]
    fn test_close_code_validity() {
        assert!(CloseCode::Normal.is_valid());
        assert!(CloseCode::InternalError.is_valid());
        assert!(CloseCode::Other(1012).is_valid());
        assert!(CloseCode::Other(4000).is_valid());

        assert!(!CloseCode::Abnormal.is_valid());
        assert!(!CloseCode::Other(0).is_valid());
        assert!(!CloseCode::Other(1005).is_valid());
        assert!(!CloseCode::Other(1015).is_valid());
        assert!(!CloseCode::Other(2999).is_valid());
        assert!(!CloseCode::Other(5000).is_valid());
    }

    #[test]
    fn test_close_code_reserved() {
        assert!(CloseCode::Other(1004).is_reserved());
        assert!(CloseCode::Other(1005).is_reserved());
        assert!(CloseCode::Abnormal.is_reserved());
        assert!(CloseCode::Other(1015).is_reserved());

        assert!(!CloseCode::Normal.is_reserved());
        assert!(!CloseCode::Other(3000).is_reserved());
    }

    #[test]
    fn test_close_code_compares_by_value() {
        use std::collections::HashSet;

        assert_eq!(CloseCode::Other(1000), CloseCode::Normal);
        assert_eq!(CloseCode::Other(1006), CloseCode::Abnormal);
        assert_ne!(CloseCode::Other(4000), CloseCode::Normal);
        assert_eq!(
            crate::Error::Disconnected(CloseCode::Other(1001)),
            crate::Error::Disconnected(CloseCode::GoingAway)
        );

        let codes: HashSet<CloseCode> = [CloseCode::Normal, CloseCode::Other(1000)].into();
        assert_eq!(codes.len(), 1);
    }

    #[test]
    fn test_close_code_display() {
        assert_eq!(CloseCode::Normal.to_string(), "1000");
        assert_eq!(CloseCode::Other(4321).to_string(), "4321");
    }

    #[test]
    fn test_mode_default_is_text() {
        assert_eq!(Mode::default(), Mode::Text);
    }
}
