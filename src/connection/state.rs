//! Per-direction session state.

use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle state of one direction of a session.
///
/// A session tracks two of these: one for what the peer has told us and one
/// for what we have told the peer. Each moves only forward,
/// `Connecting -> Open -> Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ConnectionState {
    /// Handshake not yet completed in this direction.
    #[default]
    Connecting,
    /// Handshake completed; data messages may flow.
    Open,
    /// Termination completed; no further activity permitted.
    Closed,
}

impl ConnectionState {
    /// Check if this direction can still carry events.
    ///
    /// Returns `true` for `Connecting` or `Open` states.
    #[must_use]
    #[inline]
    pub const fn is_active(&self) -> bool {
        !matches!(self, ConnectionState::Closed)
    }

    /// Check if data messages may flow in this direction.
    #[must_use]
    #[inline]
    pub const fn is_open(&self) -> bool {
        matches!(self, ConnectionState::Open)
    }

    /// Check if this direction has terminated.
    #[must_use]
    #[inline]
    pub const fn is_closed(&self) -> bool {
        matches!(self, ConnectionState::Closed)
    }

    pub(crate) const fn as_u8(self) -> u8 {
        match self {
            ConnectionState::Connecting => 0,
            ConnectionState::Open => 1,
            ConnectionState::Closed => 2,
        }
    }

    pub(crate) const fn from_u8(value: u8) -> Self {
        match value {
            0 => ConnectionState::Connecting,
            1 => ConnectionState::Open,
            _ => ConnectionState::Closed,
        }
    }
}

/// A direction state readable from both halves of a split session.
///
/// Only the half that owns the direction stores into it.
#[derive(Debug, Default)]
pub(crate) struct SharedState(AtomicU8);

impl SharedState {
    pub(crate) fn load(&self) -> ConnectionState {
        ConnectionState::from_u8(self.0.load(Ordering::Acquire))
    }

    pub(crate) fn store(&self, state: ConnectionState) {
        self.0.store(state.as_u8(), Ordering::Release);
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionState::Connecting => write!(f, "Connecting"),
            ConnectionState::Open => write!(f, "Open"),
            ConnectionState::Closed => write!(f, "Closed"),
        }
    }
}

/// One of the two independent directions of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Remote to local: events received from the peer.
    Receive,
    /// Local to remote: events sent to the peer.
    Send,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Receive => write!(f, "receive"),
            Direction::Send => write!(f, "send"),
        }
    }
}
