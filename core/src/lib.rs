//! tierconf resolution engine.
//!
//! Populates a [`Layered`] record from four stages, each allowed to
//! overwrite the previous one:
//!
//! 1. `default` annotations
//! 2. a YAML config file (or any [`DocumentSource`])
//! 3. command-line arguments
//! 4. environment variables (highest priority)
//!
//! Bad input never fails a call: a candidate that cannot be coerced leaves
//! the field as the previous stage left it, and an unreadable or undecodable
//! file is skipped. Only an invalid record description is an error.
//!
//! # Example
//!
//! ```
//! use tierconf_core::{layered, ArgSource, EnvSource, Resolver};
//!
//! #[derive(Debug, Default)]
//! struct Service {
//!     host: String,
//!     port: u16,
//!     debug: bool,
//! }
//!
//! layered! {
//!     Service {
//!         host: String { default = "localhost" },
//!         port: u16 { default = "8080", env = "SERVICE_PORT" },
//!         debug: bool,
//!     }
//! }
//!
//! let mut service = Service::default();
//! Resolver::isolated()
//!     .with_args(ArgSource::from_args(["--debug"]))
//!     .with_env(EnvSource::from_pairs([("SERVICE_PORT", "9000")]))
//!     .resolve(&mut service)
//!     .unwrap();
//!
//! assert_eq!(service.host, "localhost");
//! assert_eq!(service.port, 9000);
//! assert!(service.debug);
//! ```

#![allow(missing_docs)]

pub mod coerce;
mod file;
mod program;
mod report;
mod resolver;
pub mod source;

pub use program::{default_file_name, process_file_name, program_name};
pub use report::{FileOutcome, MergeDecision, Resolution};
pub use resolver::Resolver;
pub use source::{ArgSource, CandidateSource, DefaultSource, EnvSource};
pub use tierconf_sdk::{
    layered, Document, DocumentSource, FieldDescriptor, FieldKind, FieldSlot, FieldValue,
    InlineDocument, Layered, Primitive, ResolveError, ResolveResult, SourceError, Stage,
};
pub use tierconf_yaml::{YamlFile, YamlText};

/// Resolves `record` with `file` as the file stage, reading the process
/// arguments and environment.
///
/// # Errors
///
/// Returns [`ResolveError::InvalidTarget`] when the record's field table is
/// inconsistent.
pub fn resolve<R: Layered>(
    record: &mut R,
    file: impl DocumentSource + 'static,
) -> ResolveResult<()> {
    Resolver::new().with_document(file).resolve(record)
}

/// Resolves `record` using `<program>.yaml` as the config file.
///
/// # Errors
///
/// See [`resolve`].
pub fn load<R: Layered>(record: &mut R) -> ResolveResult<()> {
    load_from_file(&process_file_name(), record)
}

/// Resolves `record` using the YAML file at `path`.
///
/// # Errors
///
/// See [`resolve`].
pub fn load_from_file<R: Layered>(path: &str, record: &mut R) -> ResolveResult<()> {
    Resolver::new().with_file(path).resolve(record)
}
