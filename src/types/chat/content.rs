//! Content types for chat messages

use serde::{Deserialize, Serialize};

/// Message content - plain text or an ordered list of content blocks.
///
/// Serializes to the chat-completions wire shape directly: a JSON string for
/// `Text`, a JSON array of typed blocks for `MultiModal`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text
    Text(String),
    /// Multimodal content
    MultiModal(Vec<ContentPart>),
}

impl MessageContent {
    /// Extract text content if available
    pub fn text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(text) => Some(text),
            MessageContent::MultiModal(parts) => parts.iter().find_map(ContentPart::as_text),
        }
    }
}

impl From<String> for MessageContent {
    fn from(text: String) -> Self {
        MessageContent::Text(text)
    }
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        MessageContent::Text(text.to_string())
    }
}

impl From<Vec<ContentPart>> for MessageContent {
    fn from(parts: Vec<ContentPart>) -> Self {
        MessageContent::MultiModal(parts)
    }
}

/// One typed content block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Text block
    Text { text: String },
    /// Image reference block
    ImageUrl { image_url: ImageUrl },
}

impl ContentPart {
    /// Create a text block
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create an image-reference block
    pub fn image_url(url: impl Into<String>, detail: Option<ImageDetail>) -> Self {
        Self::ImageUrl {
            image_url: ImageUrl {
                url: url.into(),
                detail,
            },
        }
    }

    /// Text carried by this block, if it is a text block
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::ImageUrl { .. } => None,
        }
    }
}

/// Image reference payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageUrl {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<ImageDetail>,
}

/// Image detail level (for providers that support it)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImageDetail {
    Auto,
    Low,
    High,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_content_serializes_as_string() {
        let content = MessageContent::from("hi");
        assert_eq!(serde_json::to_value(&content).unwrap(), json!("hi"));
    }

    #[test]
    fn blocks_serialize_in_wire_shape() {
        let content = MessageContent::from(vec![
            ContentPart::text("look"),
            ContentPart::image_url("https://x/img.png", Some(ImageDetail::High)),
        ]);
        assert_eq!(
            serde_json::to_value(&content).unwrap(),
            json!([
                {"type": "text", "text": "look"},
                {"type": "image_url", "image_url": {"url": "https://x/img.png", "detail": "high"}}
            ])
        );
    }

    #[test]
    fn text_is_the_first_text_block() {
        let content = MessageContent::from(vec![
            ContentPart::image_url("u", None),
            ContentPart::text("a"),
            ContentPart::text("b"),
        ]);
        assert_eq!(content.text(), Some("a"));
    }
}
