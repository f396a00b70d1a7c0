//! In-memory transport built on tokio channels.

use tokio::sync::mpsc;

use crate::error::{Error, Result};
use crate::message::{CloseCode, Event};
use crate::transport::{Inbound, Outbound};

/// Create a connected pair of in-memory transports.
///
/// Events sent on one end are received on the other. Each direction buffers
/// up to `capacity` events before `send` waits.
#[must_use]
pub fn channel(capacity: usize) -> (ChannelTransport, ChannelTransport) {
    let (a_tx, a_rx) = mpsc::channel(capacity);
    let (b_tx, b_rx) = mpsc::channel(capacity);
    (
        ChannelTransport { rx: a_rx, tx: b_tx },
        ChannelTransport { rx: b_rx, tx: a_tx },
    )
}

/// One end of an in-memory transport.
#[derive(Debug)]
pub struct ChannelTransport {
    rx: mpsc::Receiver<Event>,
    tx: mpsc::Sender<Event>,
}

impl ChannelTransport {
    /// Split into the inbound and outbound halves expected by a `Connection`.
    #[must_use]
    pub fn split(self) -> (mpsc::Receiver<Event>, mpsc::Sender<Event>) {
        (self.rx, self.tx)
    }

    /// Send an event to the other end.
    pub async fn send(&self, event: Event) -> Result<()> {
        self.tx.send(event).await.map_err(|_| Error::TransportClosed)
    }

    /// Receive the next event from the other end.
    ///
    /// Returns `None` once the other end has dropped its sender.
    pub async fn recv(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

impl Inbound for mpsc::Receiver<Event> {
    async fn recv(&mut self) -> Result<Event> {
        Ok(mpsc::Receiver::recv(self)
            .await
            .unwrap_or(Event::termination(CloseCode::Abnormal)))
    }
}

impl Outbound for mpsc::Sender<Event> {
    async fn send(&mut self, event: Event) -> Result<()> {
        mpsc::Sender::send(self, event)
            .await
            .map_err(|_| Error::TransportClosed)
    }
}

impl Inbound for mpsc::UnboundedReceiver<Event> {
    async fn recv(&mut self) -> Result<Event> {
        Ok(mpsc::UnboundedReceiver::recv(self)
            .await
            .unwrap_or(Event::termination(CloseCode::Abnormal)))
    }
}

impl Outbound for mpsc::UnboundedSender<Event> {
    async fn send(&mut self, event: Event) -> Result<()> {
        mpsc::UnboundedSender::send(self, event).map_err(|_| Error::TransportClosed)
    }
}
