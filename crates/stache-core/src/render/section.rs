//! Section classification
//!
//! How many times a section body renders, and against which frames, depends
//! only on the kind of value its path resolves to:
//!
//! | value                          | body renders                        |
//! |--------------------------------|-------------------------------------|
//! | absent, `Null`                 | never                               |
//! | `Seq`, `Map`, `Stream`         | once per item, with an item frame   |
//! | `Text`                         | once if non-empty                   |
//! | `Bool`                         | once if `true`                      |
//! | `Int`, `Float`                 | once if not exactly zero            |
//! | `Enum`                         | once, with a variant frame          |
//! | `Object`                       | once                                |
//!
//! An inverted section renders exactly when the section would not.

use super::output_elements;
use crate::context::Context;
use crate::partial::PartialStore;
use crate::template::Element;
use crate::value::{Entry, Value};
use futures::{Sink, SinkExt, StreamExt};

pub(super) async fn output_section<S>(
    path: &str,
    children: &[Element],
    context: &Context<'_>,
    partials: &PartialStore,
    sink: &mut S,
) -> Result<(), S::Error>
where
    S: Sink<char> + Unpin + Send,
    S::Error: Send,
{
    let Some(value) = context.resolve(path) else {
        return Ok(());
    };
    match &value {
        Value::Null => Ok(()),
        Value::Seq(items) => {
            let count = items.len();
            for (index, item) in items.iter().enumerate() {
                let frame = context.item_child(item.clone(), index == 0, index + 1 == count, index);
                output_elements(children, &frame, partials, sink).await?;
            }
            Ok(())
        }
        Value::Map(map) => {
            let count = map.len();
            for (index, (key, item)) in map.iter().enumerate() {
                let entry = Value::object(Entry {
                    key: key.clone(),
                    value: item.clone(),
                });
                let frame = context.item_child(entry, index == 0, index + 1 == count, index);
                output_elements(children, &frame, partials, sink).await?;
            }
            Ok(())
        }
        Value::Stream(source) => {
            let mut items = source.open();
            let mut index = 0;
            while let Some(item) = items.next().await {
                sink.flush().await?;
                let frame = context.item_child(item, index == 0, false, index);
                output_elements(children, &frame, partials, sink).await?;
                sink.flush().await?;
                index += 1;
            }
            Ok(())
        }
        Value::Enum(_) => {
            let frame = context.enum_child(value.clone());
            output_elements(children, &frame, partials, sink).await
        }
        Value::Object(_) => output_once(children, context, value.clone(), partials, sink).await,
        Value::Text(text) if !text.is_empty() => {
            output_once(children, context, value.clone(), partials, sink).await
        }
        Value::Bool(true) => output_once(children, context, value.clone(), partials, sink).await,
        Value::Int(n) if *n != 0 => {
            output_once(children, context, value.clone(), partials, sink).await
        }
        Value::Float(x) if *x != 0.0 => {
            output_once(children, context, value.clone(), partials, sink).await
        }
        Value::Text(_) | Value::Bool(false) | Value::Int(_) | Value::Float(_) => Ok(()),
    }
}

async fn output_once<S>(
    children: &[Element],
    context: &Context<'_>,
    value: Value,
    partials: &PartialStore,
    sink: &mut S,
) -> Result<(), S::Error>
where
    S: Sink<char> + Unpin + Send,
    S::Error: Send,
{
    let frame = context.child(value);
    output_elements(children, &frame, partials, sink).await
}

/// Whether a section over `value` would render zero times
pub(super) async fn renders_nothing(value: Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::Int(n)) => n == 0,
        Some(Value::Float(x)) => x == 0.0,
        Some(Value::Text(text)) => text.is_empty(),
        Some(Value::Seq(items)) => items.is_empty(),
        Some(Value::Map(map)) => map.is_empty(),
        Some(Value::Stream(source)) => source.open().next().await.is_none(),
        Some(Value::Enum(_)) | Some(Value::Object(_)) => false,
    }
}
