//! Character sinks for the renderer

use crate::partial::SinkFailed;
use futures::{ready, Sink};
use std::convert::Infallible;
use std::io::{self, Write};
use std::pin::Pin;
use std::task::{Context, Poll};

/// Appends rendered characters to a `String`; never fails
#[derive(Debug)]
pub struct StringSink<'a> {
    out: &'a mut String,
}

impl<'a> StringSink<'a> {
    pub fn new(out: &'a mut String) -> Self {
        Self { out }
    }
}

impl Sink<char> for StringSink<'_> {
    type Error = Infallible;

    fn poll_ready(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn start_send(self: Pin<&mut Self>, item: char) -> Result<(), Self::Error> {
        self.get_mut().out.push(item);
        Ok(())
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }
}

/// Encodes rendered characters as UTF-8 into a blocking writer
///
/// Each character is handed to the writer as it arrives, so wrap unbuffered
/// writers in a [`BufWriter`](std::io::BufWriter). Flushing the sink flushes
/// the writer.
#[derive(Debug)]
pub struct WriteSink<W> {
    writer: W,
}

impl<W: Write + Unpin> WriteSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Unpin> Sink<char> for WriteSink<W> {
    type Error = io::Error;

    fn poll_ready(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn start_send(self: Pin<&mut Self>, item: char) -> Result<(), Self::Error> {
        let mut buf = [0u8; 4];
        self.get_mut()
            .writer
            .write_all(item.encode_utf8(&mut buf).as_bytes())
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(self.get_mut().writer.flush())
    }

    fn poll_close(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.poll_flush(cx)
    }
}

/// Hands a caller's sink to a custom partial under the erased error type
///
/// The first error of the wrapped sink is parked in `failure` for the
/// renderer to return once the partial finishes.
pub(crate) struct ForwardSink<'s, S: Sink<char>> {
    inner: &'s mut S,
    failure: &'s mut Option<S::Error>,
}

impl<'s, S: Sink<char> + Unpin> ForwardSink<'s, S> {
    pub(crate) fn new(inner: &'s mut S, failure: &'s mut Option<S::Error>) -> Self {
        Self { inner, failure }
    }

    fn keep(&mut self, result: Result<(), S::Error>) -> Result<(), SinkFailed> {
        result.map_err(|e| {
            if self.failure.is_none() {
                *self.failure = Some(e);
            }
            SinkFailed(())
        })
    }
}

impl<S: Sink<char> + Unpin> Sink<char> for ForwardSink<'_, S> {
    type Error = SinkFailed;

    fn poll_ready(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        let this = self.get_mut();
        let result = ready!(Pin::new(&mut *this.inner).poll_ready(cx));
        Poll::Ready(this.keep(result))
    }

    fn start_send(self: Pin<&mut Self>, item: char) -> Result<(), Self::Error> {
        let this = self.get_mut();
        let result = Pin::new(&mut *this.inner).start_send(item);
        this.keep(result)
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        let this = self.get_mut();
        let result = ready!(Pin::new(&mut *this.inner).poll_flush(cx));
        Poll::Ready(this.keep(result))
    }

    fn poll_close(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        let this = self.get_mut();
        let result = ready!(Pin::new(&mut *this.inner).poll_close(cx));
        Poll::Ready(this.keep(result))
    }
}
