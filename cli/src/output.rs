use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;
use tierconf_core::{FileOutcome, Layered, Resolution};

/// Renders one line per field: name, final value and the stage that set it.
pub fn text<R: Layered>(record: &mut R, resolution: &Resolution) -> Result<String, String> {
    let mut out = String::new();
    let fields = R::descriptors();
    let width = fields.iter().map(|f| f.name.len()).max().unwrap_or(0);

    writeln!(out, "{} {}", "Record:".bold(), resolution.record)
        .map_err(|e| e.to_string())?;
    let file = match &resolution.file {
        FileOutcome::NotConfigured => "(none)".dimmed().to_string(),
        FileOutcome::Applied { origin, fields } => {
            format!("{} ({fields} fields)", origin.cyan())
        }
        FileOutcome::Skipped { origin, reason } => {
            format!("{} {}", origin.cyan(), format!("skipped: {reason}").yellow())
        }
    };
    writeln!(out, "{} {file}", "File:".bold())
        .map_err(|e| e.to_string())?;

    for field in &fields {
        let (value, source) = if field.is_embedded() {
            ("(embedded)".dimmed().to_string(), "-".to_string())
        } else {
            let value = record
                .field_slot(field.name)
                .map(|slot| slot.current().to_string())
                .unwrap_or_default();
            let source = resolution.winner(field.name).map_or_else(
                || "unset".dimmed().to_string(),
                |d| d.stage.to_string().green().to_string(),
            );
            (value, source)
        };
        writeln!(out, "  {:<width$}  {value}  [{source}]", field.name)
            .map_err(|e| e.to_string())?;
    }
    Ok(out.trim_end().to_string())
}

#[derive(Serialize)]
struct Report<'a, C: Serialize> {
    config: &'a C,
    resolution: &'a Resolution,
}

pub fn json<C: Serialize>(config: &C, resolution: &Resolution) -> Result<String, String> {
    serde_json::to_string_pretty(&Report { config, resolution }).map_err(|e| e.to_string())
}
