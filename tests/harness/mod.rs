//! Test harness for driving sessions from the peer's side.
//!
//! `TestPeer` plays the remote end of an in-memory transport and `TestServer`
//! runs an echo handler per session, the way an application would.

#![allow(dead_code)]

mod peer;
mod server;

pub use peer::{ChannelConnection, TestPeer, session};
pub use server::TestServer;

/// Install a test-friendly tracing subscriber once per test binary.
///
/// Honours `RUST_LOG`; silent by default.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
