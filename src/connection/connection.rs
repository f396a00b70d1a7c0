use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::connection::half::{ReceiveHalf, SendHalf};
use crate::connection::state::SharedState;
use crate::connection::{ConnectionState, Direction};
use crate::error::{Error, Result};
use crate::message::{CloseCode, Event, Mode};
use crate::observe::{Observer, TracingObserver};
use crate::transport::{Inbound, Outbound};

/// A WebSocket session over an event transport.
///
/// `Connection` tracks the two directions of a session independently: the
/// remote state reflects what the peer has sent us, the local state reflects
/// what we have sent the peer. Every inbound event is checked against the
/// remote state and every outbound event against the local state before it
/// reaches the transport.
///
/// Receiving and sending each take `&mut self`. To wait on the peer while
/// another task sends, [`split`](Self::split) the session into its halves.
///
/// ## Type Parameters
///
/// - `C`: Opaque connection metadata (headers, client address, ...)
/// - `I`: The inbound half of the transport
/// - `O`: The outbound half of the transport
///
/// ## Example
///
/// ```rust,ignore
/// use wsession::{CloseCode, Connection};
///
/// let (local, _peer) = wsession::transport::channel(16);
/// let (inbound, outbound) = local.split();
/// let mut conn = Connection::new((), inbound, outbound);
///
/// conn.accept(None).await?;
/// let text = conn.receive_text().await?;
/// conn.send_text(text).await?;
/// conn.close(CloseCode::Normal).await?;
/// ```
pub struct Connection<C, I, O> {
    context: C,
    receiver: ReceiveHalf<I>,
    sender: SendHalf<O>,
}

impl<C, I, O> Connection<C, I, O> {
    /// Create a session for a freshly accepted transport.
    ///
    /// Both directions start in `Connecting`. Activity is logged through a
    /// default [`TracingObserver`].
    pub fn new(context: C, inbound: I, outbound: O) -> Self {
        let local_state = Arc::new(SharedState::default());
        let observer: Arc<dyn Observer> = Arc::new(TracingObserver::default());
        Self {
            context,
            receiver: ReceiveHalf::new(
                inbound,
                Arc::clone(&local_state),
                Config::default(),
                Arc::clone(&observer),
            ),
            sender: SendHalf::new(outbound, local_state, Config::default(), observer),
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.receiver.config = config.clone();
        self.sender.config = config;
        self
    }

    /// Replace the observer notified of session activity.
    #[must_use]
    pub fn with_observer(mut self, observer: impl Observer + 'static) -> Self {
        let observer: Arc<dyn Observer> = Arc::new(observer);
        self.receiver.observer = Arc::clone(&observer);
        self.sender.observer = observer;
        self
    }

    /// Connection metadata supplied at construction.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// State of the remote -> local direction.
    pub fn remote_state(&self) -> ConnectionState {
        self.receiver.remote_state()
    }

    /// State of the local -> remote direction.
    pub fn local_state(&self) -> ConnectionState {
        self.sender.local_state()
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.sender.config
    }

    /// Returns `true` once both directions have reached `Closed`.
    pub fn is_terminated(&self) -> bool {
        self.remote_state().is_closed() && self.local_state().is_closed()
    }

    /// Take the connection apart, returning the context and transport halves.
    pub fn into_parts(self) -> (C, I, O) {
        (
            self.context,
            self.receiver.into_inner(),
            self.sender.into_inner(),
        )
    }

    /// Split the session into independently usable receive and send halves.
    ///
    /// Both halves keep enforcing their direction's state machine. The
    /// receive half observes the local state, so typed receives still
    /// require the session to have been accepted.
    ///
    /// ```rust,ignore
    /// conn.accept(None).await?;
    /// let (_, mut rx, mut tx) = conn.split();
    ///
    /// let writer = tokio::spawn(async move {
    ///     tx.send_text("tick").await?;
    ///     tx.close(CloseCode::Normal).await
    /// });
    /// while let Some(text) = rx.iter_text().next().await {
    ///     println!("{}", text?);
    /// }
    /// ```
    pub fn split(self) -> (C, ReceiveHalf<I>, SendHalf<O>) {
        (self.context, self.receiver, self.sender)
    }
}

impl<C, I: Inbound, O: Outbound> Connection<C, I, O> {
    /// Receive the next event from the peer, enforcing the remote state machine.
    ///
    /// - While `Connecting`, the event must be `Handshake` (remote becomes
    ///   `Open`) or `Termination` (the peer vanished; remote becomes `Closed`).
    /// - While `Open`, the event must be `Data` or `Termination` (remote
    ///   becomes `Closed`).
    ///
    /// ## Errors
    ///
    /// - `Error::AlreadyTerminated` if a termination was already received; the
    ///   transport is not touched
    /// - `Error::ContractViolation` if the event is not allowed in the current state
    /// - Transport errors, unchanged
    pub async fn receive(&mut self) -> Result<Event> {
        self.receiver.receive().await
    }

    /// Send an event to the peer, enforcing the local state machine.
    ///
    /// - While `Connecting`, the event must be `Accept` (local becomes `Open`)
    ///   or `Termination` (local becomes `Closed`).
    /// - While `Open`, the event must be `Data` or `Termination` (local
    ///   becomes `Closed`).
    ///
    /// The state advances before the event is handed to the transport.
    ///
    /// ## Errors
    ///
    /// - `Error::AlreadyTerminated` if a termination was already sent
    /// - `Error::ContractViolation` if the event is not allowed in the current
    ///   state, is a malformed data message, or carries an unsendable close
    ///   code while `strict_close_codes` is set
    /// - `Error::MessageTooLarge` if a data payload exceeds `limits.max_message_size`
    /// - Transport errors, unchanged
    pub async fn send(&mut self, event: Event) -> Result<()> {
        self.sender.send(event).await
    }

    /// Accept the session, optionally selecting a subprotocol.
    ///
    /// If the peer's handshake has not been received yet, it is received
    /// first.
    ///
    /// ## Errors
    ///
    /// - `Error::ContractViolation` if the first inbound event is not a
    ///   handshake; the local side stays `Connecting`
    /// - Any error from [`receive`](Self::receive) or [`send`](Self::send)
    pub async fn accept(&mut self, subprotocol: Option<&str>) -> Result<()> {
        if self.remote_state() == ConnectionState::Connecting {
            let event = self.receive().await?;
            if event != Event::Handshake {
                let err = Error::ContractViolation(format!(
                    "expected handshake before accept, received {}",
                    event.kind()
                ));
                self.receiver.observer.on_error(Direction::Receive, &err);
                return Err(err);
            }
        }
        self.send(Event::accept(subprotocol)).await
    }

    /// Receive a text message.
    ///
    /// ## Errors
    ///
    /// - `Error::Disconnected` if the peer terminated the session
    /// - `Error::ContractViolation` if the session has not been accepted or
    ///   the message is binary
    /// - `Error::MalformedPayload` if the message carries no payload or both
    pub async fn receive_text(&mut self) -> Result<String> {
        self.receiver.receive_text().await
    }

    /// Receive a binary message.
    ///
    /// ## Errors
    ///
    /// As [`receive_text`](Self::receive_text), with text and binary swapped.
    pub async fn receive_binary(&mut self) -> Result<Bytes> {
        self.receiver.receive_binary().await
    }

    /// Receive a JSON document carried as described by `mode`.
    ///
    /// ## Errors
    ///
    /// - `Error::MalformedPayload` if the payload is not UTF-8 or not valid
    ///   JSON for `T`; the session state is unaffected
    /// - Otherwise as [`receive_text`](Self::receive_text)
    pub async fn receive_json<T: DeserializeOwned>(&mut self, mode: Mode) -> Result<T> {
        self.receiver.receive_json(mode).await
    }

    /// Send a text message.
    pub async fn send_text(&mut self, data: impl Into<String>) -> Result<()> {
        self.sender.send_text(data).await
    }

    /// Send a binary message.
    pub async fn send_binary(&mut self, data: impl Into<Bytes>) -> Result<()> {
        self.sender.send_binary(data).await
    }

    /// Serialize `value` as JSON and send it as described by `mode`.
    ///
    /// ## Errors
    ///
    /// - `Error::MalformedPayload` if `value` cannot be serialized
    /// - Otherwise as [`send`](Self::send)
    pub async fn send_json<T: Serialize + ?Sized>(&mut self, value: &T, mode: Mode) -> Result<()> {
        self.sender.send_json(value, mode).await
    }

    /// Terminate the local -> remote direction with the given close code.
    ///
    /// `CloseCode::default()` is `Normal` (1000).
    pub async fn close(&mut self, code: CloseCode) -> Result<()> {
        self.sender.close(code).await
    }

    pub(super) fn receiver_mut(&mut self) -> &mut ReceiveHalf<I> {
        &mut self.receiver
    }
}

impl<C: std::fmt::Debug, I, O> std::fmt::Debug for Connection<C, I, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("context", &self.context)
            .field("remote_state", &self.remote_state())
            .field("local_state", &self.local_state())
            .field("config", self.config())
            .finish_non_exhaustive()
    }
}
