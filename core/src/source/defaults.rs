use std::borrow::Cow;
use tierconf_sdk::{FieldDescriptor, Stage};

use super::CandidateSource;

/// Seeds fields from their `default` annotation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSource;

impl CandidateSource for DefaultSource {
    fn stage(&self) -> Stage {
        Stage::Default
    }

    fn candidate(&self, field: &FieldDescriptor) -> Option<Cow<'_, str>> {
        field.default_literal().map(Cow::Borrowed)
    }
}
