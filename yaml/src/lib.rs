//! YAML document sources for the tierconf file stage.
//!
//! The YAML text is decoded into the JSON-like [`Document`] consumed by the
//! resolver. Top-level keys are matched against field names by the resolver,
//! case-sensitively; nothing here knows about the target record.
//!
//! ```yaml
//! host: "127.0.0.1"
//! port: 9000
//! token: "${SERVICE_TOKEN}"   # expanded only when placeholders are enabled
//! ```

#![allow(missing_docs)]

mod expand;
mod source;

pub use expand::{expand_placeholders, VarLookup};
pub use source::{decode, YamlFile, YamlText};
