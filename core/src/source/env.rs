use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;
use tierconf_sdk::{FieldDescriptor, Stage};
use tierconf_yaml::VarLookup;

use super::CandidateSource;

/// Read-only snapshot of environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    vars: Arc<HashMap<String, String>>,
}

impl EnvSource {
    /// Snapshots the process environment. Entries that are not valid UTF-8
    /// are skipped.
    #[must_use]
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        Self {
            vars: Arc::new(vars),
        }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            vars: Arc::new(vars),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Lookup over this snapshot, for `${VAR}` expansion in config files.
    #[must_use]
    pub fn lookup(&self) -> VarLookup {
        let vars = Arc::clone(&self.vars);
        Arc::new(move |name: &str| vars.get(name).cloned())
    }
}

impl CandidateSource for EnvSource {
    fn stage(&self) -> Stage {
        Stage::Env
    }

    fn candidate(&self, field: &FieldDescriptor) -> Option<Cow<'_, str>> {
        self.get(field.key_for(Stage::Env)).map(Cow::Borrowed)
    }
}
