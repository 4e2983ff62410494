//! Context resources injected ahead of conversation turns

use serde::{Deserialize, Serialize};

/// Kind of background material a resource carries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Text of the page the chat is attached to
    PageContext,
    /// Attached plain-text file
    TextFile,
    /// Attached image, referenced by URL
    ImageFile,
    /// Rendered PDF page, referenced by URL
    PdfPage,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::PageContext => "page_context",
            ResourceKind::TextFile => "text_file",
            ResourceKind::ImageFile => "image_file",
            ResourceKind::PdfPage => "pdf_page",
        }
    }

    /// Whether the resource body is a URL to an image rather than inline text.
    pub fn is_image(&self) -> bool {
        matches!(self, ResourceKind::ImageFile | ResourceKind::PdfPage)
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved piece of context supplied by the caller per request.
///
/// `content` holds the textual body for text kinds and the URL for image kinds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContextResource {
    pub kind: ResourceKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    pub content: String,
}

impl ContextResource {
    pub fn new(kind: ResourceKind, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            mime_type: None,
            page_number: None,
            source_file: None,
            content: content.into(),
        }
    }

    pub fn page_context(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(ResourceKind::PageContext, title, text)
    }

    pub fn text_file(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(ResourceKind::TextFile, title, text)
    }

    pub fn image_file(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(ResourceKind::ImageFile, title, url)
    }

    pub fn pdf_page(title: impl Into<String>, url: impl Into<String>, page_number: u32) -> Self {
        Self::new(ResourceKind::PdfPage, title, url).with_page_number(page_number)
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_page_number(mut self, page_number: u32) -> Self {
        self.page_number = Some(page_number);
        self
    }

    pub fn with_source_file(mut self, source_file: impl Into<String>) -> Self {
        self.source_file = Some(source_file.into());
        self
    }
}
