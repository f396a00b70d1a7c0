//! WebSocket session management and state machine.
//!
//! This module provides the core `Connection` type. A connection wraps an
//! [`Inbound`](crate::transport::Inbound) and an
//! [`Outbound`](crate::transport::Outbound) transport half and tracks each
//! direction with its own [`ConnectionState`].
//!
//! ## Session Lifecycle
//!
//! 1. **Connecting** - the peer's handshake has not been seen / we have not accepted
//! 2. **Open** - data messages may flow in that direction
//! 3. **Closed** - a termination has been seen / sent in that direction
//!
//! A connection can be split into a [`ReceiveHalf`] and a [`SendHalf`] so the
//! two directions can be driven from different tasks.
//!
//! ## Example
//!
//! ```rust,ignore
//! use wsession::{CloseCode, Connection};
//!
//! let mut conn = Connection::new(context, inbound, outbound);
//! conn.accept(None).await?;
//!
//! let mut messages = conn.iter_text();
//! while let Some(text) = messages.next().await {
//!     println!("Received: {}", text?);
//! }
//! ```

mod half;
mod state;
mod stream;

pub use half::{ReceiveHalf, SendHalf, check_termination};
pub use state::{ConnectionState, Direction};

#[allow(clippy::module_inception)]
mod connection;

pub use connection::Connection;
