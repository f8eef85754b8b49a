//! Form command - show the submit form with its initial values

use crate::context::Context;
use crate::output::{print_json, print_text};
use anyhow::Result;
use colored::Colorize;
use rendersub_core::job::{Field, FieldKind, SubmitForm};
use serde::Serialize;
use std::path::Path;

/// Field as shown to the user
#[derive(Serialize)]
struct FieldView {
    name: &'static str,
    value: serde_json::Value,
    enabled: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    options: Vec<String>,
}

pub fn run(config: Option<&Path>, scene: &Path, json: bool) -> Result<()> {
    let ctx = Context::new(config, scene)?;
    let form = ctx.form(&[])?;

    let views = field_views(&form)?;
    if json {
        print_json(&serde_json::to_string_pretty(&views)?)?;
    } else {
        render_human(&views)?;
    }

    Ok(())
}

fn field_views(form: &SubmitForm) -> Result<Vec<FieldView>> {
    form.fields()
        .map(|(field, value)| -> Result<FieldView> {
            let value = if field.is_secret() {
                serde_json::Value::String("***".to_string())
            } else {
                serde_json::to_value(value)?
            };
            let options = match field.kind() {
                FieldKind::Choice | FieldKind::MultiChoice => form.options(field),
                FieldKind::Text | FieldKind::Flag => Vec::new(),
            };

            Ok(FieldView {
                name: field.name(),
                value,
                enabled: form.is_enabled(field),
                options,
            })
        })
        .collect()
}

fn render_human(views: &[FieldView]) -> Result<()> {
    let width = Field::all().map(|f| f.name().len()).max().unwrap_or(0);

    for view in views {
        let value = match &view.value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Array(items) => items
                .iter()
                .filter_map(|v| v.as_str())
                .collect::<Vec<_>>()
                .join(","),
            other => other.to_string(),
        };

        let line = format!("{:width$}  {}", view.name, value, width = width);
        if view.enabled {
            print_text(&line)?;
        } else {
            print_text(&format!("{}", line.dimmed()))?;
        }

        if !view.options.is_empty() {
            print_text(&format!(
                "{:width$}  {} {}",
                "",
                "options:".dimmed(),
                view.options.join(" | "),
                width = width
            ))?;
        }
    }

    Ok(())
}
