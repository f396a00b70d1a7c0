//! The receive and send halves of a session.
//!
//! A [`Connection`](super::Connection) is built from one of each. Splitting
//! it hands them out separately so that one task can wait on the peer while
//! another sends. The send half owns the local state; the receive half reads
//! it to refuse typed receives on a session that is not accepted.

use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::connection::state::SharedState;
use crate::connection::{ConnectionState, Direction};
use crate::error::{Error, Result};
use crate::message::{CloseCode, Event, Message, Mode};
use crate::observe::Observer;
use crate::transport::{Inbound, Outbound};

fn report(observer: &dyn Observer, direction: Direction, err: Error) -> Error {
    observer.on_error(direction, &err);
    err
}

fn shape_error(has_text: bool) -> Error {
    if has_text {
        Error::MalformedPayload("data message carries both text and binary payloads".into())
    } else {
        Error::MalformedPayload("data message carries no payload".into())
    }
}

/// Convert a termination event into [`Error::Disconnected`].
///
/// Every other event passes through as `Ok(())`.
pub fn check_termination(event: &Event) -> Result<()> {
    match event {
        Event::Termination { code } => Err(Error::Disconnected(*code)),
        _ => Ok(()),
    }
}

/// Remote -> local direction of a session.
pub struct ReceiveHalf<I> {
    inbound: I,
    remote_state: ConnectionState,
    local_state: Arc<SharedState>,
    pub(super) config: Config,
    pub(super) observer: Arc<dyn Observer>,
}

impl<I> ReceiveHalf<I> {
    pub(super) fn new(
        inbound: I,
        local_state: Arc<SharedState>,
        config: Config,
        observer: Arc<dyn Observer>,
    ) -> Self {
        Self {
            inbound,
            remote_state: ConnectionState::Connecting,
            local_state,
            config,
            observer,
        }
    }

    /// State of the remote -> local direction.
    pub fn remote_state(&self) -> ConnectionState {
        self.remote_state
    }

    /// State of the local -> remote direction, as last stored by the send half.
    pub fn local_state(&self) -> ConnectionState {
        self.local_state.load()
    }

    /// Recover the inbound transport half.
    pub fn into_inner(self) -> I {
        self.inbound
    }

    fn fail(&self, err: Error) -> Error {
        report(self.observer.as_ref(), Direction::Receive, err)
    }

    fn violation(&self, detail: String) -> Error {
        self.fail(Error::ContractViolation(detail))
    }

    fn require_accepted(&self, operation: &str) -> Result<()> {
        let local = self.local_state.load();
        if local.is_open() {
            Ok(())
        } else {
            Err(self.violation(format!(
                "{operation} requires an accepted session (local side is {local})"
            )))
        }
    }

    fn text_payload(&self, message: Message) -> Result<String> {
        match (message.text, message.bytes) {
            (Some(text), None) => Ok(text),
            (None, Some(_)) => {
                Err(self.violation("expected a text message, received binary".into()))
            }
            (text, _) => Err(self.fail(shape_error(text.is_some()))),
        }
    }

    fn binary_payload(&self, message: Message) -> Result<Bytes> {
        match (message.text, message.bytes) {
            (None, Some(bytes)) => Ok(bytes),
            (Some(_), None) => {
                Err(self.violation("expected a binary message, received text".into()))
            }
            (text, _) => Err(self.fail(shape_error(text.is_some()))),
        }
    }
}

impl<I: Inbound> ReceiveHalf<I> {
    /// Receive the next event from the peer, enforcing the remote state machine.
    ///
    /// See [`Connection::receive`](super::Connection::receive).
    pub async fn receive(&mut self) -> Result<Event> {
        let state = self.remote_state;
        if state.is_closed() {
            return Err(self.fail(Error::AlreadyTerminated(Direction::Receive)));
        }

        self.observer.on_suspend(Direction::Receive);
        let received = self.inbound.recv().await;
        self.observer.on_resume(Direction::Receive);
        let event = received.map_err(|err| self.fail(err))?;
        self.observer.on_event(Direction::Receive, &event);

        let next = match (state, &event) {
            (ConnectionState::Connecting, Event::Handshake) => ConnectionState::Open,
            (ConnectionState::Open, Event::Data(_)) => ConnectionState::Open,
            (_, Event::Termination { .. }) => ConnectionState::Closed,
            _ => {
                return Err(self.violation(format!(
                    "unexpected {} event while remote side is {state}",
                    event.kind()
                )));
            }
        };
        if next != state {
            debug_assert!(state < next, "receive state moved backward: {state} -> {next}");
            self.remote_state = next;
            self.observer.on_transition(Direction::Receive, state, next);
        }
        Ok(event)
    }

    async fn receive_message(&mut self, operation: &str) -> Result<Message> {
        self.require_accepted(operation)?;
        let event = self.receive().await?;
        check_termination(&event)?;
        match event {
            Event::Data(message) => {
                self.config
                    .limits
                    .check_message_size(message.len())
                    .map_err(|err| self.fail(err))?;
                Ok(message)
            }
            other => Err(self.violation(format!(
                "{operation} expected a data event, received {}",
                other.kind()
            ))),
        }
    }

    /// Receive a text message.
    ///
    /// See [`Connection::receive_text`](super::Connection::receive_text).
    pub async fn receive_text(&mut self) -> Result<String> {
        let message = self.receive_message("receive_text").await?;
        self.text_payload(message)
    }

    /// Receive a binary message.
    pub async fn receive_binary(&mut self) -> Result<Bytes> {
        let message = self.receive_message("receive_binary").await?;
        self.binary_payload(message)
    }

    /// Receive a JSON document carried as described by `mode`.
    pub async fn receive_json<T: DeserializeOwned>(&mut self, mode: Mode) -> Result<T> {
        let message = self.receive_message("receive_json").await?;
        let decoded = match mode {
            Mode::Text => {
                let text = self.text_payload(message)?;
                serde_json::from_str(&text)
            }
            Mode::Binary => {
                let bytes = self.binary_payload(message)?;
                let text = std::str::from_utf8(&bytes).map_err(|err| self.fail(err.into()))?;
                serde_json::from_str(text)
            }
        };
        decoded.map_err(|err| self.fail(err.into()))
    }
}

impl<I> std::fmt::Debug for ReceiveHalf<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReceiveHalf")
            .field("remote_state", &self.remote_state)
            .field("local_state", &self.local_state.load())
            .finish_non_exhaustive()
    }
}

/// Local -> remote direction of a session.
pub struct SendHalf<O> {
    outbound: O,
    local_state: Arc<SharedState>,
    pub(super) config: Config,
    pub(super) observer: Arc<dyn Observer>,
}

impl<O> SendHalf<O> {
    pub(super) fn new(
        outbound: O,
        local_state: Arc<SharedState>,
        config: Config,
        observer: Arc<dyn Observer>,
    ) -> Self {
        Self {
            outbound,
            local_state,
            config,
            observer,
        }
    }

    /// State of the local -> remote direction.
    pub fn local_state(&self) -> ConnectionState {
        self.local_state.load()
    }

    /// Recover the outbound transport half.
    pub fn into_inner(self) -> O {
        self.outbound
    }

    fn fail(&self, err: Error) -> Error {
        report(self.observer.as_ref(), Direction::Send, err)
    }

    fn violation(&self, detail: String) -> Error {
        self.fail(Error::ContractViolation(detail))
    }
}

impl<O: Outbound> SendHalf<O> {
    /// Send an event to the peer, enforcing the local state machine.
    ///
    /// See [`Connection::send`](super::Connection::send).
    pub async fn send(&mut self, event: Event) -> Result<()> {
        let state = self.local_state.load();
        if state.is_closed() {
            return Err(self.fail(Error::AlreadyTerminated(Direction::Send)));
        }

        let next = match (state, &event) {
            (ConnectionState::Connecting, Event::Accept { .. }) => ConnectionState::Open,
            (ConnectionState::Open, Event::Data(message)) => {
                if !message.is_well_formed() {
                    return Err(self.violation(
                        "data message must carry exactly one of text or bytes".into(),
                    ));
                }
                self.config
                    .limits
                    .check_message_size(message.len())
                    .map_err(|err| self.fail(err))?;
                ConnectionState::Open
            }
            (_, Event::Termination { code }) => {
                if self.config.strict_close_codes && !code.is_valid() {
                    return Err(self.violation(format!(
                        "close code {code} may not be sent by an endpoint"
                    )));
                }
                ConnectionState::Closed
            }
            _ => {
                return Err(self.violation(format!(
                    "cannot send {} event while local side is {state}",
                    event.kind()
                )));
            }
        };
        if next != state {
            debug_assert!(state < next, "send state moved backward: {state} -> {next}");
            self.local_state.store(next);
            self.observer.on_transition(Direction::Send, state, next);
        }

        self.observer.on_event(Direction::Send, &event);
        self.observer.on_suspend(Direction::Send);
        let sent = self.outbound.send(event).await;
        self.observer.on_resume(Direction::Send);
        sent.map_err(|err| self.fail(err))
    }

    /// Send a text message.
    pub async fn send_text(&mut self, data: impl Into<String>) -> Result<()> {
        self.send(Event::text(data)).await
    }

    /// Send a binary message.
    pub async fn send_binary(&mut self, data: impl Into<Bytes>) -> Result<()> {
        self.send(Event::binary(data)).await
    }

    /// Serialize `value` as JSON and send it as described by `mode`.
    pub async fn send_json<T: Serialize + ?Sized>(&mut self, value: &T, mode: Mode) -> Result<()> {
        let text = serde_json::to_string(value).map_err(|err| self.fail(err.into()))?;
        let event = match mode {
            Mode::Text => Event::text(text),
            Mode::Binary => Event::binary(text.into_bytes()),
        };
        self.send(event).await
    }

    /// Terminate the local -> remote direction with the given close code.
    pub async fn close(&mut self, code: CloseCode) -> Result<()> {
        self.send(Event::termination(code)).await
    }
}

impl<O> std::fmt::Debug for SendHalf<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SendHalf")
            .field("local_state", &self.local_state.load())
            .finish_non_exhaustive()
    }
}
