#![doc = include_str!("../README.md")]

mod descriptor;
mod document;
mod error;
mod kind;
mod macros;
mod record;

pub use descriptor::{FieldDescriptor, Stage};
pub use document::{Document, DocumentSource, InlineDocument};
pub use error::{ResolveError, SourceError};
pub use kind::{FieldKind, FieldValue};
pub use record::{FieldSlot, Layered, Primitive};

pub type ResolveResult<T> = Result<T, ResolveError>;
