//! # wsession - WebSocket session state machine
//!
//! `wsession` sits between an application handler and an event-based
//! WebSocket transport (an ASGI-style server, a test harness, an in-memory
//! channel). It enforces the handshake -> data -> termination lifecycle for
//! each direction of a session independently and layers typed helpers on top.
//!
//! ## Features
//!
//! - **Dual state machine**: remote and local directions open and close independently
//! - **Typed helpers** for text, binary and JSON payloads
//! - **Disconnect as a distinct signal**, absorbed by the streaming helpers
//! - **Pluggable transport** through the [`Inbound`](transport::Inbound) and
//!   [`Outbound`](transport::Outbound) traits
//! - **Structured logging** through an injected [`Observer`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use wsession::{CloseCode, Connection};
//!
//! let mut conn = Connection::new(context, inbound, outbound);
//! conn.accept(None).await?;
//!
//! let mut messages = std::pin::pin!(conn.iter_text());
//! while let Some(text) = messages.next().await {
//!     let text = text?;
//!     // ...
//! }
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod message;
pub mod observe;
pub mod transport;

pub use config::{Config, Limits};
pub use connection::{
    Connection, ConnectionState, Direction, ReceiveHalf, SendHalf, check_termination,
};
pub use error::{Error, Result};
pub use message::{CloseCode, Event, Message, Mode};
pub use observe::{NoopObserver, Observer, TracingObserver};
pub use transport::{Inbound, Outbound, Rejection, StreamInbound};
