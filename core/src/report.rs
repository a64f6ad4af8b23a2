use serde::Serialize;
use tierconf_sdk::Stage;

/// One field mutation made by a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeDecision {
    pub stage: Stage,
    pub field: String,
    pub value: String,
}

impl MergeDecision {
    pub(crate) fn new(stage: Stage, field: &str, value: impl ToString) -> Self {
        Self {
            stage,
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

/// What the file stage did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    NotConfigured,
    Applied { origin: String, fields: usize },
    Skipped { origin: String, reason: String },
}

/// Outcome of a resolution pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub record: String,
    pub file: FileOutcome,
    pub decisions: Vec<MergeDecision>,
}

impl Resolution {
    /// The decision that set the final value of `field`, if any stage did.
    #[must_use]
    pub fn winner(&self, field: &str) -> Option<&MergeDecision> {
        self.decisions.iter().rev().find(|d| d.field == field)
    }

    pub fn by_stage(&self, stage: Stage) -> impl Iterator<Item = &MergeDecision> {
        self.decisions.iter().filter(move |d| d.stage == stage)
    }

    #[must_use]
    pub fn is_untouched(&self) -> bool {
        self.decisions.is_empty()
    }
}
