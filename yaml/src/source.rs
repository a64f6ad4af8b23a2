use std::fmt;
use std::path::{Path, PathBuf};

use tierconf_sdk::{Document, DocumentSource, SourceError};
use tracing::debug;

use crate::expand::{expand_placeholders, VarLookup};

/// Decodes YAML text into a [`Document`].
///
/// Empty and null documents decode to an empty mapping. Any other
/// non-mapping top-level value is rejected.
///
/// # Errors
///
/// Returns [`SourceError::Decode`] for invalid YAML and
/// [`SourceError::NotAMapping`] for a scalar or sequence document.
pub fn decode(origin: &str, text: &str) -> Result<Document, SourceError> {
    if text.trim().is_empty() {
        return Ok(Document::new());
    }
    let value: serde_json::Value =
        serde_yaml::from_str(text).map_err(|e| SourceError::decode(origin, e))?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        serde_json::Value::Null => Ok(Document::new()),
        _ => Err(SourceError::NotAMapping {
            origin: origin.to_string(),
        }),
    }
}

fn decode_with(
    origin: &str,
    text: &str,
    placeholders: Option<&VarLookup>,
) -> Result<Document, SourceError> {
    match placeholders {
        Some(lookup) => decode(origin, &expand_placeholders(text, &**lookup)),
        None => decode(origin, text),
    }
}

/// A YAML file on disk. An empty path means no file is configured.
#[derive(Clone)]
pub struct YamlFile {
    path: PathBuf,
    placeholders: Option<VarLookup>,
}

impl YamlFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            placeholders: None,
        }
    }

    /// Enables `${VAR}` expansion before decoding.
    #[must_use]
    pub fn with_placeholders(mut self, lookup: VarLookup) -> Self {
        self.placeholders = Some(lookup);
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn expanded_path(&self) -> PathBuf {
        match self.path.to_str() {
            Some(raw) => PathBuf::from(shellexpand::tilde(raw).as_ref()),
            None => self.path.clone(),
        }
    }
}

impl fmt::Debug for YamlFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YamlFile")
            .field("path", &self.path)
            .field("placeholders", &self.placeholders.is_some())
            .finish()
    }
}

impl DocumentSource for YamlFile {
    fn origin(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Option<Document>, SourceError> {
        if self.path.as_os_str().is_empty() {
            return Ok(None);
        }
        let path = self.expanded_path();
        let content = std::fs::read_to_string(&path).map_err(|e| SourceError::Read {
            path: path.clone(),
            source: e,
        })?;
        let document = decode_with(&self.origin(), &content, self.placeholders.as_ref())?;
        debug!(path = %path.display(), keys = document.len(), "Decoded config file");
        Ok(Some(document))
    }
}

/// YAML text held in memory.
#[derive(Clone)]
pub struct YamlText {
    text: String,
    placeholders: Option<VarLookup>,
}

impl YamlText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            placeholders: None,
        }
    }

    #[must_use]
    pub fn with_placeholders(mut self, lookup: VarLookup) -> Self {
        self.placeholders = Some(lookup);
        self
    }
}

impl fmt::Debug for YamlText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YamlText")
            .field("len", &self.text.len())
            .field("placeholders", &self.placeholders.is_some())
            .finish()
    }
}

impl DocumentSource for YamlText {
    fn origin(&self) -> String {
        "<yaml>".to_string()
    }

    fn load(&self) -> Result<Option<Document>, SourceError> {
        decode_with(&self.origin(), &self.text, self.placeholders.as_ref()).map(Some)
    }
}
