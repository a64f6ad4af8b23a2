use crate::error::SourceError;

/// Decoded file content: top-level keys mapped to JSON-like values.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Produces the decoded document consumed by the file stage.
///
/// `Ok(None)` means no document is configured. Any `Err` is treated by the
/// resolver as an unavailable source and never aborts resolution.
pub trait DocumentSource {
    /// Human readable origin, e.g. a file path.
    fn origin(&self) -> String;

    fn load(&self) -> Result<Option<Document>, SourceError>;
}

impl<S: DocumentSource + ?Sized> DocumentSource for Box<S> {
    fn origin(&self) -> String {
        (**self).origin()
    }

    fn load(&self) -> Result<Option<Document>, SourceError> {
        (**self).load()
    }
}

/// A document supplied directly by the caller.
#[derive(Debug, Clone, Default)]
pub struct InlineDocument {
    document: Document,
}

impl InlineDocument {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl DocumentSource for InlineDocument {
    fn origin(&self) -> String {
        "<inline>".to_string()
    }

    fn load(&self) -> Result<Option<Document>, SourceError> {
        Ok(Some(self.document.clone()))
    }
}
