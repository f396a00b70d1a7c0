//! Transport seams consumed by a session.
//!
//! A transport is split into an [`Inbound`] half, which yields the peer's
//! events one at a time, and an [`Outbound`] half, which accepts the events a
//! session emits. Framing, TLS and the listener that produced the transport
//! live on the other side of these traits.

use std::future::Future;

use futures::{Stream, StreamExt};

use crate::error::Result;
use crate::message::{CloseCode, Event};

#[cfg(feature = "channel")]
mod channel;

#[cfg(feature = "channel")]
pub use channel::{ChannelTransport, channel};

/// Source of inbound events for one session.
pub trait Inbound: Send {
    /// Wait for the next event from the peer.
    ///
    /// A transport that loses its peer without a termination should report
    /// it as `Event::Termination { code: CloseCode::Abnormal }`.
    fn recv(&mut self) -> impl Future<Output = Result<Event>> + Send;
}

/// Sink for outbound events of one session.
pub trait Outbound: Send {
    /// Hand an event to the transport, waiting until it has been accepted.
    fn send(&mut self, event: Event) -> impl Future<Output = Result<()>> + Send;
}

impl<T: Inbound> Inbound for &mut T {
    fn recv(&mut self) -> impl Future<Output = Result<Event>> + Send {
        (**self).recv()
    }
}

impl<T: Outbound> Outbound for &mut T {
    fn send(&mut self, event: Event) -> impl Future<Output = Result<()>> + Send {
        (**self).send(event)
    }
}

/// Adapts a [`Stream`] of events into an [`Inbound`] half.
///
/// When the stream is exhausted, every further `recv` yields an abnormal
/// termination.
#[derive(Debug)]
pub struct StreamInbound<S> {
    stream: S,
}

impl<S> StreamInbound<S> {
    /// Wrap a stream of events.
    #[must_use]
    pub const fn new(stream: S) -> Self {
        Self { stream }
    }

    /// Recover the wrapped stream.
    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S> Inbound for StreamInbound<S>
where
    S: Stream<Item = Result<Event>> + Unpin + Send,
{
    async fn recv(&mut self) -> Result<Event> {
        match self.stream.next().await {
            Some(event) => event,
            None => Ok(Event::termination(CloseCode::Abnormal)),
        }
    }
}

/// Refuses a session before any `Connection` is built for it.
///
/// Routing layers use this when no handler exists for an incoming session:
/// the transport receives a single termination and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rejection {
    code: CloseCode,
}

impl Rejection {
    /// Create a rejection carrying the given close code.
    #[must_use]
    pub const fn new(code: CloseCode) -> Self {
        Self { code }
    }

    /// The close code that will be sent.
    #[must_use]
    pub const fn code(&self) -> CloseCode {
        self.code
    }

    /// Send the termination to `outbound`.
    pub async fn send_to<O: Outbound>(&self, outbound: &mut O) -> Result<()> {
        tracing::debug!(code = %self.code, "rejecting session");
        outbound.send(Event::termination(self.code)).await
    }
}
