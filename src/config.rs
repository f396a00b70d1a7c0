//! Configuration and limits for WebSocket sessions.

/// Resource limits applied to data messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum size of a single data message payload in bytes.
    ///
    /// Applies to messages received through the typed helpers and to every
    /// data message sent.
    ///
    /// Default: 64 MB (64 * 1024 * 1024)
    pub max_message_size: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_message_size: 64 * 1024 * 1024, // 64 MB
        }
    }
}

impl Limits {
    /// Create new limits with custom values.
    #[must_use]
    pub const fn new(max_message_size: usize) -> Self {
        Self { max_message_size }
    }

    /// Create limits suitable for small embedded systems.
    ///
    /// - Max message: 256 KB
    #[must_use]
    pub const fn embedded() -> Self {
        Self {
            max_message_size: 256 * 1024,
        }
    }

    /// Create limits for unrestricted use.
    ///
    /// Warning: Use only in trusted environments.
    #[must_use]
    pub const fn unrestricted() -> Self {
        Self {
            max_message_size: usize::MAX,
        }
    }

    /// Validate that message size is within limits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MessageTooLarge`](crate::Error::MessageTooLarge) if `size` exceeds the configured maximum.
    pub const fn check_message_size(&self, size: usize) -> Result<(), crate::Error> {
        if size > self.max_message_size {
            Err(crate::Error::MessageTooLarge {
                size,
                max: self.max_message_size,
            })
        } else {
            Ok(())
        }
    }
}

/// Session configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Resource limits.
    pub limits: Limits,

    /// Reject outbound terminations whose close code an endpoint may not send.
    ///
    /// When enabled, `close(CloseCode::Abnormal)` or a code outside the
    /// RFC 6455 sendable ranges is a contract violation.
    ///
    /// Default: true
    pub strict_close_codes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            strict_close_codes: true,
        }
    }
}

impl Config {
    /// Create a new configuration with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom limits.
    #[must_use]
    pub const fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Enable or disable close code validation on send.
    #[must_use]
    pub const fn with_strict_close_codes(mut self, strict: bool) -> Self {
        self.strict_close_codes = strict;
        self
    }
}
