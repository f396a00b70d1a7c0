//! Echo server for concurrency testing.
//!
//! Each session runs in its own task: accept, echo every text message, close
//! once the peer terminates.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::task::JoinSet;
use wsession::CloseCode;

use super::peer::{TestPeer, session_with_context};

/// Spawns an echo handler per session.
pub struct TestServer {
    tasks: JoinSet<wsession::Result<()>>,
    completed: Arc<AtomicUsize>,
}

impl TestServer {
    pub fn spawn() -> Self {
        Self {
            tasks: JoinSet::new(),
            completed: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Open a new session served by an echo handler.
    pub fn connect(&mut self, id: usize) -> TestPeer {
        let (mut conn, peer) = session_with_context(id);
        let completed = self.completed.clone();

        self.tasks.spawn(async move {
            conn.accept(None).await?;
            loop {
                match conn.receive_text().await {
                    Ok(text) => conn.send_text(text).await?,
                    Err(err) if err.is_disconnect() => break,
                    Err(err) => return Err(err),
                }
            }
            conn.close(CloseCode::Normal).await?;
            completed.fetch_add(1, Ordering::Relaxed);
            Ok(())
        });

        peer
    }

    /// Sessions whose handler finished cleanly so far.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    /// Wait for every handler to finish, panicking on handler errors.
    pub async fn shutdown(mut self) -> usize {
        while let Some(result) = self.tasks.join_next().await {
            result.unwrap().unwrap();
        }
        self.completed()
    }
}
