//! Per-field candidate sources for the default, argument and environment stages.

mod args;
mod defaults;
mod env;

pub use args::ArgSource;
pub use defaults::DefaultSource;
pub use env::EnvSource;

use std::borrow::Cow;
use tierconf_sdk::{FieldDescriptor, Stage};

/// Yields a raw candidate for a field, or `None` when the source has nothing
/// for it. An empty string is a present candidate.
pub trait CandidateSource {
    fn stage(&self) -> Stage;

    fn candidate(&self, field: &FieldDescriptor) -> Option<Cow<'_, str>>;
}
