//! Lazy iteration over incoming messages.
//!
//! Each stream pulls one message per poll through the matching typed receive
//! helper. A peer termination ends the stream without an item; any other
//! error is yielded once and ends the stream.

use bytes::Bytes;
use futures::Stream;
use futures::stream;
use serde::de::DeserializeOwned;

use crate::connection::{Connection, ReceiveHalf};
use crate::error::Result;
use crate::message::Mode;
use crate::transport::{Inbound, Outbound};

type Step<'a, T, I> = Option<(Result<T>, Option<&'a mut ReceiveHalf<I>>)>;

fn step<T, I>(item: Result<T>, half: &mut ReceiveHalf<I>) -> Step<'_, T, I> {
    match item {
        Ok(value) => Some((Ok(value), Some(half))),
        Err(err) if err.is_disconnect() => None,
        Err(err) => Some((Err(err), None)),
    }
}

impl<I: Inbound> ReceiveHalf<I> {
    /// Stream text messages until the peer terminates the session.
    ///
    /// ```rust,ignore
    /// let mut messages = std::pin::pin!(rx.iter_text());
    /// while let Some(text) = messages.next().await {
    ///     println!("{}", text?);
    /// }
    /// ```
    pub fn iter_text(&mut self) -> impl Stream<Item = Result<String>> + '_ {
        stream::unfold(Some(self), |half| async move {
            let half = half?;
            let item = half.receive_text().await;
            step(item, half)
        })
    }

    /// Stream binary messages until the peer terminates the session.
    pub fn iter_binary(&mut self) -> impl Stream<Item = Result<Bytes>> + '_ {
        stream::unfold(Some(self), |half| async move {
            let half = half?;
            let item = half.receive_binary().await;
            step(item, half)
        })
    }

    /// Stream JSON documents until the peer terminates the session.
    pub fn iter_json<T: DeserializeOwned>(
        &mut self,
        mode: Mode,
    ) -> impl Stream<Item = Result<T>> + '_ {
        stream::unfold(Some(self), move |half| async move {
            let half = half?;
            let item = half.receive_json::<T>(mode).await;
            step(item, half)
        })
    }
}

impl<C, I: Inbound, O: Outbound> Connection<C, I, O> {
    /// Stream text messages until the peer terminates the session.
    ///
    /// See [`ReceiveHalf::iter_text`].
    pub fn iter_text(&mut self) -> impl Stream<Item = Result<String>> + '_ {
        self.receiver_mut().iter_text()
    }

    /// Stream binary messages until the peer terminates the session.
    pub fn iter_binary(&mut self) -> impl Stream<Item = Result<Bytes>> + '_ {
        self.receiver_mut().iter_binary()
    }

    /// Stream JSON documents until the peer terminates the session.
    pub fn iter_json<T: DeserializeOwned>(
        &mut self,
        mode: Mode,
    ) -> impl Stream<Item = Result<T>> + '_ {
        self.receiver_mut().iter_json(mode)
    }
}
