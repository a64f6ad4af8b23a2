use regex::{Captures, Regex};
use std::sync::{Arc, OnceLock};

/// Variable lookup used for `${VAR}` expansion.
pub type VarLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

fn placeholder() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"))
}

/// Replaces every `${NAME}` in `content` with `lookup(NAME)`.
/// Unknown names expand to the empty string.
pub fn expand_placeholders(content: &str, lookup: &dyn Fn(&str) -> Option<String>) -> String {
    placeholder()
        .replace_all(content, |caps: &Captures| lookup(&caps[1]).unwrap_or_default())
        .into_owned()
}
