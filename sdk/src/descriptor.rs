use std::fmt;

use crate::kind::FieldKind;

/// One pass of a single resolver over every field of a record.
///
/// Variants are listed in evaluation order. A later stage overwrites an
/// earlier one, so the effective precedence is the reverse of this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Stage {
    Default,
    File,
    Args,
    Env,
}

impl Stage {
    pub const ORDER: [Stage; 4] = [Stage::Default, Stage::File, Stage::Args, Stage::Env];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::File => "file",
            Self::Args => "args",
            Self::Env => "env",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name, kind and annotations of a single record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Environment variable name override.
    pub env: Option<&'static str>,
    /// Command-line flag name override (without the leading `--`).
    pub arg: Option<&'static str>,
    /// Literal applied by the default stage.
    pub default: Option<&'static str>,
}

impl FieldDescriptor {
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            env: None,
            arg: None,
            default: None,
        }
    }

    #[must_use]
    pub const fn embedded(name: &'static str) -> Self {
        Self::new(name, FieldKind::Embedded)
    }

    #[must_use]
    pub const fn with_env(mut self, key: &'static str) -> Self {
        self.env = Some(key);
        self
    }

    #[must_use]
    pub const fn with_arg(mut self, key: &'static str) -> Self {
        self.arg = Some(key);
        self
    }

    #[must_use]
    pub const fn with_default(mut self, literal: &'static str) -> Self {
        self.default = Some(literal);
        self
    }

    #[must_use]
    pub fn is_embedded(&self) -> bool {
        self.kind.is_embedded()
    }

    /// Lookup key for `stage`.
    ///
    /// A non-empty annotation for the stage wins; otherwise the declared
    /// field name is used verbatim. The default and file stages always use
    /// the field name.
    #[must_use]
    pub fn key_for(&self, stage: Stage) -> &'static str {
        let annotation = match stage {
            Stage::Env => self.env,
            Stage::Args => self.arg,
            Stage::Default | Stage::File => None,
        };
        match annotation {
            Some(key) if !key.is_empty() => key,
            _ => self.name,
        }
    }

    /// The default literal, if present and non-empty.
    #[must_use]
    pub fn default_literal(&self) -> Option<&'static str> {
        self.default.filter(|literal| !literal.is_empty())
    }
}
