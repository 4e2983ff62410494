//! Chat payload builder
//!
//! Assembles the wire message list from a system prompt, the resolved context
//! resources and the conversation turns.

use crate::error::LlmError;
use crate::types::{ChatMessage, ChatPayload, ContentPart, ContextResource, ImageDetail};

/// First block of the context message.
pub const CONTEXT_OPEN_MARKER: &str =
    "The following context resources are provided as background for this conversation.";

/// Last block of the context message.
pub const CONTEXT_CLOSE_MARKER: &str = "End of context resources.";

/// Block emitted after every resource.
pub const RESOURCE_SEPARATOR: &str = "---";

/// Joins the metadata fields of a resource description.
pub const METADATA_DELIMITER: &str = " | ";

/// Build the chat-completions payload.
///
/// The system prompt (if non-empty) comes first, followed by a single user
/// message carrying every context resource (if any), followed by
/// `conversation` verbatim.
pub fn build_chat_payload(
    system_prompt: &str,
    context_resources: Option<&[ContextResource]>,
    conversation: &[ChatMessage],
    model: &str,
    temperature: f64,
    stream: bool,
) -> Result<ChatPayload, LlmError> {
    let mut messages = Vec::with_capacity(conversation.len() + 2);

    if !system_prompt.is_empty() {
        messages.push(ChatMessage::system(system_prompt));
    }

    if let Some(resources) = context_resources
        && !resources.is_empty()
    {
        messages.push(context_message(resources));
    }

    messages.extend_from_slice(conversation);

    let payload = ChatPayload {
        messages,
        model: model.to_string(),
        temperature,
        stream,
    };
    // Fail here rather than at send time so callers see encoding problems early.
    payload.to_json()?;
    Ok(payload)
}

/// The user message that carries all context resources as content blocks.
///
/// Block layout: open marker, then `(description, content, separator)` per
/// resource, then the close marker.
pub fn context_message(resources: &[ContextResource]) -> ChatMessage {
    let mut parts = Vec::with_capacity(2 + 3 * resources.len());
    parts.push(ContentPart::text(CONTEXT_OPEN_MARKER));

    for resource in resources {
        parts.push(ContentPart::text(describe_resource(resource)));
        parts.push(resource_content(resource));
        parts.push(ContentPart::text(RESOURCE_SEPARATOR));
    }

    parts.push(ContentPart::text(CONTEXT_CLOSE_MARKER));
    ChatMessage::user_parts(parts)
}

/// Human-readable description: title, kind, then whatever metadata is set.
pub fn describe_resource(resource: &ContextResource) -> String {
    let mut fields = vec![
        format!("Resource: {}", resource.title),
        format!("Type: {}", resource.kind),
    ];
    if let Some(mime) = &resource.mime_type {
        fields.push(format!("MIME type: {mime}"));
    }
    if let Some(page) = resource.page_number {
        fields.push(format!("Page: {page}"));
    }
    if let Some(source) = &resource.source_file {
        fields.push(format!("Source file: {source}"));
    }
    fields.join(METADATA_DELIMITER)
}

fn resource_content(resource: &ContextResource) -> ContentPart {
    if resource.kind.is_image() {
        ContentPart::image_url(resource.content.clone(), Some(ImageDetail::High))
    } else {
        ContentPart::text(resource.content.clone())
    }
}
