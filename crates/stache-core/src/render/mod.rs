//! Template rendering
//!
//! There is a single tree walk, written against a [`futures::Sink`] of
//! characters. The asynchronous entry points hand it the caller's sink; the
//! synchronous ones hand it a [`StringSink`] and drive the resulting future to
//! completion on the current thread. Both paths therefore produce identical
//! output by construction.

mod section;
mod sink;

pub use sink::{StringSink, WriteSink};

use crate::context::Context;
use crate::partial::{Partial, PartialStore, Slot};
use crate::template::{Element, PartialRef, Template};
use crate::value::Value;
use futures::future::{BoxFuture, FutureExt};
use futures::{Sink, SinkExt};
use sink::ForwardSink;
use std::future::Future;
use std::pin::pin;
use tracing::trace;

impl Template {
    /// Render against `data` into a new string
    pub fn render(&self, data: &Value) -> String {
        let mut out = String::new();
        self.render_to(&mut out, data);
        out
    }

    /// Render against `data`, appending to `out`
    pub fn render_to(&self, out: &mut String, data: &Value) {
        let context = Context::new(data.clone());
        self.append_to(out, &context);
    }

    /// Render against an existing context frame into a new string
    pub fn render_context(&self, context: &Context<'_>) -> String {
        let mut out = String::new();
        self.append_to(&mut out, context);
        out
    }

    /// Render against an existing context frame, appending to `out`
    ///
    /// This is what lets a template act as a custom partial of another one.
    pub fn append_to(&self, out: &mut String, context: &Context<'_>) {
        let mut sink = StringSink::new(out);
        let result = run_to_completion(output_elements(
            &self.elements,
            context,
            &self.partials,
            &mut sink,
        ));
        if let Err(never) = result {
            match never {}
        }
    }

    /// Render against `data` into an asynchronous character sink
    ///
    /// The sink is flushed around every item of a stream section and once at
    /// the end. The first error returned by the sink stops rendering.
    pub async fn output_to<S>(&self, sink: &mut S, data: &Value) -> Result<(), S::Error>
    where
        S: Sink<char> + Unpin + Send,
        S::Error: Send,
    {
        let context = Context::new(data.clone());
        self.output_context(sink, &context).await
    }

    /// Render against an existing context frame into an asynchronous sink
    pub async fn output_context<S>(&self, sink: &mut S, context: &Context<'_>) -> Result<(), S::Error>
    where
        S: Sink<char> + Unpin + Send,
        S::Error: Send,
    {
        output_elements(&self.elements, context, &self.partials, sink).await?;
        sink.flush().await
    }
}

/// Poll once, blocking on the current thread only if the walk is not ready
///
/// Walks without stream sources always complete on the first poll, which
/// keeps synchronous rendering usable from inside a custom partial called by
/// another synchronous render.
fn run_to_completion<F: Future>(future: F) -> F::Output {
    let mut future = pin!(future);
    match future.as_mut().now_or_never() {
        Some(output) => output,
        None => futures::executor::block_on(future),
    }
}

pub(crate) fn output_elements<'a, S>(
    elements: &'a [Element],
    context: &'a Context<'a>,
    partials: &'a PartialStore,
    sink: &'a mut S,
) -> BoxFuture<'a, Result<(), S::Error>>
where
    S: Sink<char> + Unpin + Send + 'a,
    S::Error: Send,
{
    async move {
        for element in elements {
            output_element(element, context, partials, sink).await?;
        }
        Ok(())
    }
    .boxed()
}

async fn output_element<S>(
    element: &Element,
    context: &Context<'_>,
    partials: &PartialStore,
    sink: &mut S,
) -> Result<(), S::Error>
where
    S: Sink<char> + Unpin + Send,
    S::Error: Send,
{
    match element {
        Element::Text(text) => emit(sink, text).await,
        Element::Variable(path) => match context.resolve(path).and_then(|v| v.to_text()) {
            Some(text) => emit(sink, &html_escape::encode_double_quoted_attribute(&text)).await,
            None => Ok(()),
        },
        Element::LiteralVariable(path) => match context.resolve(path).and_then(|v| v.to_text()) {
            Some(text) => emit(sink, &text).await,
            None => Ok(()),
        },
        Element::Section { path, children } => {
            section::output_section(path, children, context, partials, sink).await
        }
        Element::InvertedSection { path, children } => {
            if section::renders_nothing(context.resolve(path)).await {
                output_elements(children, context, partials, sink).await
            } else {
                Ok(())
            }
        }
        Element::Partial(reference) => output_partial(reference, context, partials, sink).await,
    }
}

async fn output_partial<S>(
    reference: &PartialRef,
    context: &Context<'_>,
    partials: &PartialStore,
    sink: &mut S,
) -> Result<(), S::Error>
where
    S: Sink<char> + Unpin + Send,
    S::Error: Send,
{
    let Some(slot) = partials.slot(reference.slot()) else {
        return Ok(());
    };
    match slot.get() {
        Some(Slot::Parsed(elements)) => output_elements(elements, context, partials, sink).await,
        Some(Slot::Registered(Partial::Template(template))) => {
            output_elements(&template.elements, context, &template.partials, sink).await
        }
        Some(Slot::Registered(Partial::Custom(renderer))) => {
            let mut failure = None;
            let result = {
                let mut forward = ForwardSink::new(sink, &mut failure);
                renderer.output_to(&mut forward, context).await
            };
            match failure {
                Some(e) => Err(e),
                None => {
                    // only the forwarding sink can produce `SinkFailed`
                    debug_assert!(result.is_ok());
                    Ok(())
                }
            }
        }
        None => {
            // still being filled by a concurrent parse
            trace!(partial = reference.name(), "partial not ready, skipped");
            Ok(())
        }
    }
}

async fn emit<S>(sink: &mut S, text: &str) -> Result<(), S::Error>
where
    S: Sink<char> + Unpin,
{
    for ch in text.chars() {
        sink.feed(ch).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
