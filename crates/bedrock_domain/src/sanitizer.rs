use std::str::FromStr;

use serde_json::Value;
use tracing::warn;

use crate::{ChatMessage, Role};

/// Content used when the caller supplies no messages at all.
pub const EMPTY_CONVERSATION_GREETING: &str = "Hello";

/// Content of the user turn appended to a system-only conversation.
pub const ASSISTANCE_REQUEST: &str = "Please provide assistance.";

/// Content substituted for a message whose content is missing or empty.
pub const CONTENT_FILLER: &str = "Please help me.";

/// Repairs a loosely-typed message array so Bedrock accepts it.
///
/// Bedrock rejects conversations without at least one non-system turn, as
/// well as turns with an empty body. The returned sequence is never empty,
/// contains at least one non-system message and every message carries a
/// non-empty content string. Input order is preserved and at most one user
/// message is appended, always at the end.
pub fn sanitize_messages(messages: impl IntoIterator<Item = Value>) -> Vec<ChatMessage> {
    let mut repaired: Vec<ChatMessage> = messages
        .into_iter()
        .enumerate()
        .map(|(index, value)| repair_message(index, value))
        .collect();

    if repaired.is_empty() {
        warn!("Empty message array, substituting a default user message");
        return vec![ChatMessage::user(EMPTY_CONVERSATION_GREETING)];
    }

    if repaired.iter().all(|message| message.has_role(Role::System)) {
        warn!("Only system messages present, appending a user message");
        repaired.push(ChatMessage::user(ASSISTANCE_REQUEST));
    }

    repaired
}

/// Typed entry point for callers that already hold [`ChatMessage`] values.
pub fn sanitize_chat_messages(messages: &[ChatMessage]) -> Vec<ChatMessage> {
    sanitize_messages(messages.iter().map(ChatMessage::to_value))
}

fn repair_message(index: usize, value: Value) -> ChatMessage {
    let mut record = match value {
        Value::Object(record) => record,
        other => {
            warn!(index, "Message is not a record, coercing into a user message");
            let text = match other {
                Value::String(text) => text,
                other => other.to_string(),
            };
            if text.is_empty() {
                return ChatMessage::user(CONTENT_FILLER);
            }
            return ChatMessage::user(text);
        }
    };

    let role = record
        .get("role")
        .and_then(Value::as_str)
        .and_then(|role| Role::from_str(role).ok())
        .unwrap_or_else(|| {
            warn!(index, "Message role missing or unrecognised, defaulting to user");
            Role::User
        });

    let content = record
        .remove("content")
        .and_then(content_text)
        .unwrap_or_else(|| {
            warn!(index, "Message content missing or empty, using filler content");
            CONTENT_FILLER.to_string()
        });

    ChatMessage { role, content }
}

/// Extracts a non-empty text body from a content value, treating falsy
/// values as absent.
fn content_text(value: Value) -> Option<String> {
    let text = match value {
        Value::Null | Value::Bool(false) => return None,
        Value::String(text) => text,
        Value::Number(ref number) if number.as_f64() == Some(0.0) => return None,
        Value::Array(parts) if parts.is_empty() => return None,
        Value::Object(ref record) if record.is_empty() => return None,
        Value::Array(parts) => {
            let texts: Vec<String> = parts
                .iter()
                .filter_map(|part| match part {
                    Value::String(text) => Some(text.clone()),
                    Value::Object(record) => {
                        record.get("text").and_then(Value::as_str).map(str::to_string)
                    }
                    _ => None,
                })
                .collect();
            if texts.is_empty() {
                Value::Array(parts).to_string()
            } else {
                texts.join("\n")
            }
        }
        other => other.to_string(),
    };

    (!text.is_empty()).then_some(text)
}
