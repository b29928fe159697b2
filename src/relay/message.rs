//! Inbound payload extraction and the outbound chat envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `msgtype` value for WeCom robot markdown messages
pub const MARKDOWN_MSGTYPE: &str = "markdown";

/// Message envelope accepted by the WeCom group robot webhook.
///
/// Field order is the serialization order: `msgtype` precedes `markdown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundChatMessage {
    pub msgtype: String,
    pub markdown: MarkdownContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownContent {
    pub content: String,
}

impl OutboundChatMessage {
    /// Wrap `content` verbatim in a markdown envelope.
    pub fn markdown(content: impl Into<String>) -> Self {
        Self {
            msgtype: MARKDOWN_MSGTYPE.to_string(),
            markdown: MarkdownContent {
                content: content.into(),
            },
        }
    }
}

/// Read `detailedMessage.markdown` from an inbound service-hook payload.
///
/// Returns `Ok(None)` when the value is JSON `null`. Any structural mismatch
/// (non-object body, missing or non-object `detailedMessage`, missing
/// `markdown`, non-string `markdown`) is an `Err` describing what was wrong.
pub fn extract_markdown(body: &Value) -> Result<Option<&str>, String> {
    let Value::Object(root) = body else {
        return Err(format!("expected a JSON object, got {}", kind(body)));
    };

    let detailed = root
        .get("detailedMessage")
        .ok_or_else(|| "missing field `detailedMessage`".to_string())?;
    let Value::Object(detailed) = detailed else {
        return Err(format!(
            "`detailedMessage` must be an object, got {}",
            kind(detailed)
        ));
    };

    match detailed.get("markdown") {
        None => Err("missing field `detailedMessage.markdown`".to_string()),
        Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.as_str())),
        Some(other) => Err(format!(
            "`detailedMessage.markdown` must be a string, got {}",
            kind(other)
        )),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
