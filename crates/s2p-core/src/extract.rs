//! Message extraction from channel-based documents.
//!
//! An AsyncAPI document declares its messages under `channels`. Three forms
//! are supported, in priority order per channel: a named `messages` map, a
//! `publish.message.oneOf` list of alternatives, and a single
//! `publish.message` node.

use serde_yaml::Value;
use tracing::debug;

use s2p_model::LINE_KEY;

/// Collect every message definition reachable from the document's channels.
///
/// Returned in document order: channels first, then declaration order within
/// each channel's alternatives. A channel without a usable message is skipped
/// silently; a document without `channels` yields an empty list.
pub fn extract_messages(doc: &Value) -> Vec<&Value> {
    let mut messages = Vec::new();
    let Some(channels) = doc.get("channels").and_then(Value::as_mapping) else {
        return messages;
    };
    for (name, channel) in channels {
        if name.as_str() == Some(LINE_KEY) {
            continue;
        }
        // a named messages map always wins over publish
        if let Some(named) = channel.get("messages").and_then(Value::as_mapping) {
            for (key, definition) in named {
                if key.as_str() == Some(LINE_KEY) {
                    continue;
                }
                messages.push(definition);
            }
            continue;
        }
        let Some(message) = channel.get("publish").and_then(|publish| publish.get("message"))
        else {
            continue;
        };
        if is_empty_message(message) {
            continue;
        }
        match message.get("oneOf").and_then(Value::as_sequence) {
            Some(alternatives) => messages.extend(alternatives.iter()),
            None => messages.push(message),
        }
    }
    debug!(messages = messages.len(), "extracted message definitions");
    messages
}

/// An explicitly empty message declaration is skipped, not an error.
///
/// A mapping holding nothing but its line annotation still counts as empty.
fn is_empty_message(message: &Value) -> bool {
    match message {
        Value::Null => true,
        Value::Mapping(map) => map.iter().all(|(key, _)| key.as_str() == Some(LINE_KEY)),
        Value::Sequence(items) => items.is_empty(),
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}
