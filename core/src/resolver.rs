//! Layered merge orchestration.
//!
//! # Stage Order
//!
//! 1. Defaults (`default` annotations)
//! 2. Config file (decoded document, matched by field name)
//! 3. Command-line arguments (`--KEY=VALUE`, `--KEY VALUE`, `--KEY`)
//! 4. Environment variables
//!
//! Each stage may overwrite what an earlier one wrote, so the effective
//! precedence is env > args > file > default. A stage only writes a field
//! when it has a candidate that survives coercion.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use tierconf_sdk::{
    DocumentSource, FieldDescriptor, FieldValue, Layered, ResolveError, ResolveResult, Stage,
};
use tierconf_yaml::YamlFile;
use tracing::{debug, trace, warn};

use crate::coerce::coerce;
use crate::file::field_values;
use crate::report::{FileOutcome, MergeDecision, Resolution};
use crate::source::{ArgSource, CandidateSource, DefaultSource, EnvSource};

enum FileStage {
    None,
    Path(PathBuf),
    Source(Box<dyn DocumentSource>),
}

/// Resolves [`Layered`] records from defaults, a config file, arguments and
/// the environment.
///
/// # Example
///
/// ```ignore
/// use tierconf_core::Resolver;
///
/// let mut config = ServiceConfig::default();
/// Resolver::new()
///     .with_file("service.yaml")
///     .resolve(&mut config)?;
/// ```
pub struct Resolver {
    file: FileStage,
    args: ArgSource,
    env: EnvSource,
    expand_placeholders: bool,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = match &self.file {
            FileStage::None => "none".to_string(),
            FileStage::Path(path) => path.display().to_string(),
            FileStage::Source(source) => source.origin(),
        };
        f.debug_struct("Resolver")
            .field("file", &file)
            .field("args", &self.args.args().len())
            .field("env", &self.env.len())
            .field("expand_placeholders", &self.expand_placeholders)
            .finish()
    }
}

impl Resolver {
    /// Creates a resolver over snapshots of the process arguments and
    /// environment, with no config file.
    #[must_use]
    pub fn new() -> Self {
        Self {
            file: FileStage::None,
            args: ArgSource::from_process(),
            env: EnvSource::from_process(),
            expand_placeholders: false,
        }
    }

    /// Creates a resolver with no arguments, no environment and no file.
    ///
    /// Useful for testing with deterministic input.
    #[must_use]
    pub fn isolated() -> Self {
        Self {
            file: FileStage::None,
            args: ArgSource::empty(),
            env: EnvSource::empty(),
            expand_placeholders: false,
        }
    }

    /// Reads the file stage from a YAML file. An empty path disables it.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = FileStage::Path(path.into());
        self
    }

    /// Reads the file stage from a custom document source.
    #[must_use]
    pub fn with_document(mut self, source: impl DocumentSource + 'static) -> Self {
        self.file = FileStage::Source(Box::new(source));
        self
    }

    #[must_use]
    pub fn with_args(mut self, args: ArgSource) -> Self {
        self.args = args;
        self
    }

    #[must_use]
    pub fn with_env(mut self, env: EnvSource) -> Self {
        self.env = env;
        self
    }

    /// Expands `${VAR}` in a YAML file set with [`with_file`](Self::with_file)
    /// against the environment snapshot.
    #[must_use]
    pub fn expand_placeholders(mut self, enabled: bool) -> Self {
        self.expand_placeholders = enabled;
        self
    }

    /// Populates `record` in place.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidTarget`] when the record's field table
    /// does not describe its fields. The record is untouched in that case.
    /// Bad input data never fails the call.
    pub fn resolve<R: Layered>(&self, record: &mut R) -> ResolveResult<()> {
        self.resolve_with_report(record).map(|_| ())
    }

    /// Same as [`resolve`](Self::resolve), also reporting every mutation.
    ///
    /// # Errors
    ///
    /// See [`resolve`](Self::resolve).
    pub fn resolve_with_report<R: Layered>(&self, record: &mut R) -> ResolveResult<Resolution> {
        let descriptors = R::descriptors();
        validate(record, &descriptors)?;

        let mut decisions = Vec::new();
        apply_candidates(record, &descriptors, &DefaultSource, &mut decisions);
        let file = self.apply_file(record, &descriptors, &mut decisions);
        apply_candidates(record, &descriptors, &self.args, &mut decisions);
        apply_candidates(record, &descriptors, &self.env, &mut decisions);

        debug!(
            record = R::record_name(),
            decisions = decisions.len(),
            "Resolved configuration"
        );
        Ok(Resolution {
            record: R::record_name().to_string(),
            file,
            decisions,
        })
    }

    fn apply_file<R: Layered>(
        &self,
        record: &mut R,
        descriptors: &[FieldDescriptor],
        decisions: &mut Vec<MergeDecision>,
    ) -> FileOutcome {
        let yaml;
        let source: &dyn DocumentSource = match &self.file {
            FileStage::None => return FileOutcome::NotConfigured,
            FileStage::Path(path) => {
                yaml = self.yaml_file(path);
                &yaml
            }
            FileStage::Source(source) => source.as_ref(),
        };
        let origin = source.origin();

        let document = match source.load() {
            Ok(Some(document)) => document,
            Ok(None) => return FileOutcome::NotConfigured,
            Err(e) => {
                if e.is_missing() {
                    debug!(origin = %origin, "Config file not found, skipping");
                } else {
                    warn!(origin = %origin, error = %e, "Could not load config file, skipping");
                }
                return FileOutcome::Skipped {
                    origin,
                    reason: e.to_string(),
                };
            }
        };

        match field_values(descriptors, &document) {
            Ok(values) => {
                let fields = values.len();
                for (field, value) in values {
                    assign(record, field, Stage::File, value, decisions);
                }
                debug!(origin = %origin, fields, "Applied config file");
                FileOutcome::Applied { origin, fields }
            }
            Err(e) => {
                warn!(origin = %origin, error = %e, "Could not decode config file, skipping");
                FileOutcome::Skipped {
                    origin,
                    reason: e.to_string(),
                }
            }
        }
    }

    fn yaml_file(&self, path: &std::path::Path) -> YamlFile {
        let file = YamlFile::new(path);
        if self.expand_placeholders {
            file.with_placeholders(self.env.lookup())
        } else {
            file
        }
    }
}

/// Checks that the field table describes an addressable record before any
/// field is written.
fn validate<R: Layered>(record: &mut R, descriptors: &[FieldDescriptor]) -> ResolveResult<()> {
    let invalid = |reason: String| ResolveError::invalid_target(R::record_name(), reason);
    let mut seen = HashSet::new();

    for field in descriptors {
        if field.name.is_empty() {
            return Err(invalid("field with an empty name".to_string()));
        }
        if !seen.insert(field.name) {
            return Err(invalid(format!("duplicate field '{}'", field.name)));
        }
        match (field.is_embedded(), record.field_slot(field.name)) {
            (true, None) => {}
            (true, Some(_)) => {
                return Err(invalid(format!(
                    "embedded field '{}' exposes a primitive slot",
                    field.name
                )));
            }
            (false, None) => {
                return Err(invalid(format!("field '{}' is not accessible", field.name)));
            }
            (false, Some(slot)) if slot.kind() != field.kind => {
                return Err(invalid(format!(
                    "field '{}' is declared {} but stored as {}",
                    field.name,
                    field.kind,
                    slot.kind()
                )));
            }
            (false, Some(_)) => {}
        }
    }
    Ok(())
}

fn apply_candidates<R: Layered, S: CandidateSource>(
    record: &mut R,
    descriptors: &[FieldDescriptor],
    source: &S,
    decisions: &mut Vec<MergeDecision>,
) {
    let stage = source.stage();
    debug!(stage = %stage, record = R::record_name(), "Applying stage");

    for field in descriptors.iter().filter(|field| !field.is_embedded()) {
        let Some(raw) = source.candidate(field) else {
            continue;
        };
        match coerce(field.kind, &raw) {
            Some(value) => assign(record, field, stage, value, decisions),
            None => debug!(
                field = field.name,
                stage = %stage,
                key = field.key_for(stage),
                kind = %field.kind,
                "Candidate rejected, keeping previous value"
            ),
        }
    }
}

fn assign<R: Layered>(
    record: &mut R,
    field: &FieldDescriptor,
    stage: Stage,
    value: FieldValue,
    decisions: &mut Vec<MergeDecision>,
) {
    let Some(slot) = record.field_slot(field.name) else {
        return;
    };
    let rendered = value.to_string();
    if slot.assign(value) {
        trace!(field = field.name, stage = %stage, value = %rendered, "Applied value");
        decisions.push(MergeDecision::new(stage, field.name, rendered));
    }
}
