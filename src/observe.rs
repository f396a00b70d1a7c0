//! Observation hooks for session activity.
//!
//! A [`Connection`](crate::Connection) reports every state transition, every
//! event it sees, each suspend/resume around a transport call and every
//! failure to the [`Observer`] it was built with. The default observer,
//! [`TracingObserver`], turns these into `tracing` events inside a
//! per-session span.

use std::sync::Arc;

use tracing::Span;

use crate::connection::{ConnectionState, Direction};
use crate::error::Error;
use crate::message::Event;

/// Receives notifications about one session's activity.
///
/// All methods default to doing nothing.
pub trait Observer: Send + Sync {
    /// A direction moved from one state to another.
    fn on_transition(&self, _direction: Direction, _from: ConnectionState, _to: ConnectionState) {}

    /// An event was received from the peer, or is about to be handed to the
    /// transport.
    fn on_event(&self, _direction: Direction, _event: &Event) {}

    /// The session is about to wait on the transport.
    fn on_suspend(&self, _direction: Direction) {}

    /// The transport call the session was waiting on has completed.
    fn on_resume(&self, _direction: Direction) {}

    /// An operation failed.
    fn on_error(&self, _direction: Direction, _error: &Error) {}
}

impl<T: Observer + ?Sized> Observer for Arc<T> {
    fn on_transition(&self, direction: Direction, from: ConnectionState, to: ConnectionState) {
        (**self).on_transition(direction, from, to);
    }

    fn on_event(&self, direction: Direction, event: &Event) {
        (**self).on_event(direction, event);
    }

    fn on_suspend(&self, direction: Direction) {
        (**self).on_suspend(direction);
    }

    fn on_resume(&self, direction: Direction) {
        (**self).on_resume(direction);
    }

    fn on_error(&self, direction: Direction, error: &Error) {
        (**self).on_error(direction, error);
    }
}

/// Discards all notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {}

/// Emits `tracing` events within a session span.
///
/// Transitions are logged at `debug`, events and transport waits at `trace`,
/// contract violations at `warn` and other failures at `debug`.
#[derive(Debug, Clone)]
pub struct TracingObserver {
    span: Span,
}

impl TracingObserver {
    /// Log within the given span.
    ///
    /// Attach connection metadata such as the client address to the span.
    #[must_use]
    pub const fn new(span: Span) -> Self {
        Self { span }
    }

    /// The span events are recorded in.
    #[must_use]
    pub const fn span(&self) -> &Span {
        &self.span
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new(tracing::debug_span!("session"))
    }
}

impl Observer for TracingObserver {
    fn on_transition(&self, direction: Direction, from: ConnectionState, to: ConnectionState) {
        let _enter = self.span.enter();
        tracing::debug!(%direction, %from, %to, "state transition");
    }

    fn on_event(&self, direction: Direction, event: &Event) {
        let _enter = self.span.enter();
        match event {
            Event::Data(message) => {
                tracing::trace!(%direction, kind = event.kind(), len = message.len(), "event");
            }
            Event::Termination { code } => {
                tracing::trace!(%direction, kind = event.kind(), %code, "event");
            }
            Event::Accept { subprotocol } => {
                tracing::trace!(%direction, kind = event.kind(), ?subprotocol, "event");
            }
            Event::Handshake => tracing::trace!(%direction, kind = event.kind(), "event"),
        }
    }

    fn on_suspend(&self, direction: Direction) {
        let _enter = self.span.enter();
        tracing::trace!(%direction, "awaiting transport");
    }

    fn on_resume(&self, direction: Direction) {
        let _enter = self.span.enter();
        tracing::trace!(%direction, "transport ready");
    }

    fn on_error(&self, direction: Direction, error: &Error) {
        let _enter = self.span.enter();
        if error.is_fatal() {
            tracing::warn!(%direction, %error, "session contract violated");
        } else {
            tracing::debug!(%direction, %error, "session operation failed");
        }
    }
}
