//! The remote side of an in-memory session.

use tokio::sync::mpsc;
use wsession::transport::{ChannelTransport, channel};
use wsession::{CloseCode, Connection, Event};

/// A session whose transport is an in-memory channel.
pub type ChannelConnection<C = ()> = Connection<C, mpsc::Receiver<Event>, mpsc::Sender<Event>>;

/// Create a session and the peer that drives it.
pub fn session() -> (ChannelConnection, TestPeer) {
    session_with_context(())
}

/// Create a session carrying `context` and the peer that drives it.
pub fn session_with_context<C>(context: C) -> (ChannelConnection<C>, TestPeer) {
    let (local, remote) = channel(16);
    let (inbound, outbound) = local.split();
    (
        Connection::new(context, inbound, outbound),
        TestPeer { transport: remote },
    )
}

/// Drives the remote end of a session.
pub struct TestPeer {
    transport: ChannelTransport,
}

impl TestPeer {
    /// Send the opening handshake.
    pub async fn connect(&self) {
        self.transport.send(Event::Handshake).await.unwrap();
    }

    /// Send the handshake and wait for the session to be accepted.
    pub async fn connect_and_wait(&mut self) -> Option<String> {
        self.connect().await;
        match self.recv().await {
            Some(Event::Accept { subprotocol }) => subprotocol,
            other => panic!("expected accept, got {other:?}"),
        }
    }

    /// Send an arbitrary event.
    pub async fn send(&self, event: Event) {
        self.transport.send(event).await.unwrap();
    }

    /// Send a text message.
    pub async fn send_text(&self, text: &str) {
        self.send(Event::text(text)).await;
    }

    /// Send a binary message.
    pub async fn send_binary(&self, data: &[u8]) {
        self.send(Event::binary(data.to_vec())).await;
    }

    /// Terminate the peer -> session direction.
    pub async fn disconnect(&self, code: CloseCode) {
        self.send(Event::termination(code)).await;
    }

    /// Next event emitted by the session.
    pub async fn recv(&mut self) -> Option<Event> {
        self.transport.recv().await
    }

    /// Next text message emitted by the session.
    pub async fn recv_text(&mut self) -> Option<String> {
        match self.recv().await? {
            Event::Data(message) => message.text,
            other => panic!("expected data, got {other:?}"),
        }
    }

    /// Split into independently owned receive and send halves.
    pub fn into_halves(self) -> (mpsc::Receiver<Event>, mpsc::Sender<Event>) {
        self.transport.split()
    }

    /// Drop the transport without a termination.
    pub fn hang_up(self) {}
}
