use std::borrow::Cow;
use tierconf_sdk::{FieldDescriptor, Stage};

use super::CandidateSource;

const FLAG_SHORTHAND: &str = "true";

/// Read-only snapshot of command-line arguments.
///
/// Recognises `--KEY=VALUE` and `--KEY [VALUE]`. A bare `--KEY` followed by
/// nothing, or by another dash-prefixed token, yields `"true"`. The first
/// matching token wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgSource {
    args: Vec<String>,
}

impl ArgSource {
    /// Snapshots the process arguments, skipping the program name.
    #[must_use]
    pub fn from_process() -> Self {
        Self::from_args(
            std::env::args_os()
                .skip(1)
                .map(|arg| arg.to_string_lossy().into_owned()),
        )
    }

    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Finds the value for `--key`.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&str> {
        let flag = format!("--{key}");
        for (i, arg) in self.args.iter().enumerate() {
            if let Some(value) = arg
                .strip_prefix(flag.as_str())
                .and_then(|rest| rest.strip_prefix('='))
            {
                return Some(value);
            }
            if *arg == flag {
                return Some(match self.args.get(i + 1) {
                    Some(next) if !next.starts_with('-') => next.as_str(),
                    _ => FLAG_SHORTHAND,
                });
            }
        }
        None
    }
}

impl CandidateSource for ArgSource {
    fn stage(&self) -> Stage {
        Stage::Args
    }

    fn candidate(&self, field: &FieldDescriptor) -> Option<Cow<'_, str>> {
        self.find(field.key_for(Stage::Args)).map(Cow::Borrowed)
    }
}
