//! Named partials and the registry that caches them
//!
//! Partials live in an append-only arena of slots. Parsed templates refer to
//! a partial by slot index, never by pointer, so a partial that includes
//! itself does not form a reference cycle.
//!
//! A slot is reserved before the partial's source is parsed and filled
//! afterwards. While the body is being parsed the name already maps to the
//! reserved slot, which is what lets `{{>node}}` appear inside `node` itself.

use crate::context::Context;
use crate::template::{Element, Template};
use futures::future::{BoxFuture, FutureExt};
use futures::{Sink, SinkExt};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

/// Something that can stand in for a `{{>name}}` reference
pub enum Partial {
    /// A compiled template, rendered with its own partials
    Template(Template),
    /// A caller-supplied renderer
    Custom(Arc<dyn Render>),
}

impl Partial {
    pub fn custom(renderer: impl Render + 'static) -> Self {
        Partial::Custom(Arc::new(renderer))
    }

    /// Build a custom partial from a closure
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&mut String, &Context<'_>) + Send + Sync + 'static,
    {
        Partial::Custom(Arc::new(f))
    }
}

impl fmt::Debug for Partial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Partial::Template(template) => f.debug_tuple("Template").field(template).finish(),
            Partial::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// The underlying sink of a streaming render failed
///
/// The original error is kept by the renderer and returned to its caller
/// once the custom partial gives control back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("output sink failed")]
pub struct SinkFailed(pub(crate) ());

/// Character sink handed to custom partials on the streaming path
pub type CharSink<'s> = dyn Sink<char, Error = SinkFailed> + Send + Unpin + 's;

/// Render contract for custom partials
///
/// A custom partial sees exactly the context of the tag that references it.
/// `append_to` serves synchronous renders and `output_to` streaming ones.
/// The default `output_to` renders into a buffer with `append_to` first, so
/// a partial that itself waits on streamed data should override it.
pub trait Render: Send + Sync {
    fn append_to(&self, out: &mut String, context: &Context<'_>);

    fn output_to<'a>(
        &'a self,
        sink: &'a mut CharSink<'_>,
        context: &'a Context<'_>,
    ) -> BoxFuture<'a, Result<(), SinkFailed>> {
        let mut text = String::new();
        self.append_to(&mut text, context);
        async move {
            for ch in text.chars() {
                sink.feed(ch).await?;
            }
            Ok(())
        }
        .boxed()
    }
}

impl<F> Render for F
where
    F: Fn(&mut String, &Context<'_>) + Send + Sync,
{
    fn append_to(&self, out: &mut String, context: &Context<'_>) {
        self(out, context)
    }
}

/// Contents of a filled slot
pub(crate) enum Slot {
    /// Parsed by the owning parser; partial indices point into the same store
    Parsed(Vec<Element>),
    /// Registered explicitly by the caller
    Registered(Partial),
}

pub(crate) type SlotCell = Arc<OnceLock<Slot>>;

/// Outcome of looking up a name for parsing
pub(crate) enum Reservation {
    /// Already known (possibly still being parsed)
    Cached(usize),
    /// Newly reserved; the caller must fill the slot or release it
    Fresh(usize, SlotCell),
}

#[derive(Default)]
struct Registry {
    names: HashMap<String, usize>,
    slots: Vec<SlotCell>,
}

/// Shared partial cache of one parser and all templates it produced
#[derive(Default)]
pub(crate) struct PartialStore {
    inner: Mutex<Registry>,
}

impl PartialStore {
    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the slot for `name`, reserving an empty one on a miss
    pub(crate) fn reserve(&self, name: &str) -> Reservation {
        let mut registry = self.registry();
        if let Some(&index) = registry.names.get(name) {
            return Reservation::Cached(index);
        }
        let slot: SlotCell = Arc::default();
        let index = registry.slots.len();
        registry.slots.push(Arc::clone(&slot));
        registry.names.insert(name.to_string(), index);
        Reservation::Fresh(index, slot)
    }

    /// Forget a reservation that could not be filled
    pub(crate) fn release(&self, name: &str, index: usize) {
        let mut registry = self.registry();
        if registry.names.get(name) == Some(&index) {
            registry.names.remove(name);
        }
    }

    /// Bind `name` to a new, already filled slot
    pub(crate) fn register(&self, name: &str, partial: Partial) {
        let slot = OnceLock::from(Slot::Registered(partial));
        let mut registry = self.registry();
        let index = registry.slots.len();
        registry.slots.push(Arc::new(slot));
        registry.names.insert(name.to_string(), index);
    }

    pub(crate) fn slot(&self, index: usize) -> Option<SlotCell> {
        self.registry().slots.get(index).cloned()
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.registry().names.get(name).copied()
    }
}

impl fmt::Debug for PartialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry();
        f.debug_struct("PartialStore")
            .field("names", &registry.names)
            .finish_non_exhaustive()
    }
}
