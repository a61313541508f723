//! Runs the validation engine over a JSON description of forms, the same way
//! the page does on submit, and reports what the user would see.

use crate::{
    binding::{EventOutcome, FormBinding, FormEvent},
    cli::commands::input::{FormSource, Format},
    config::ValidationConfig,
    controls::{
        headless::{HeadlessControl, HeadlessDocument, HeadlessForm, HeadlessGroup},
        Control,
    },
    validation::{BoundField, Form},
    GIT_COMMIT_HASH,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fmt::Write as _,
    fs,
    io::{self, Read},
};
use tracing::{debug, info};

#[derive(Debug)]
pub struct Args {
    pub source: FormSource,
    pub format: Format,
    pub config: ValidationConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormDocument {
    pub forms: Vec<FormSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormSpec {
    pub id: String,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

/// One control, in document order.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type", default = "default_input_type")]
    pub input_type: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub disabled: bool,
    /// Whether the control sits inside a `form-group`.
    #[serde(default = "default_grouped")]
    pub grouped: bool,
}

fn default_input_type() -> String {
    "text".to_string()
}

const fn default_grouped() -> bool {
    true
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FormReport {
    pub id: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focused: Option<String>,
    pub fields: Vec<FieldReport>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FieldReport {
    pub name: String,
    pub valid: bool,
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Messages rendered into the field's group.
    pub annotations: Vec<String>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    build: &'a str,
    forms: &'a [FormReport],
}

/// Execute the check action.
/// # Errors
/// Returns an error if the form description cannot be read or parsed.
pub fn execute(args: &Args) -> Result<bool> {
    let raw = read_source(&args.source)?;
    let document: FormDocument =
        serde_json::from_str(&raw).context("invalid form description")?;

    debug!(
        build = GIT_COMMIT_HASH,
        forms = document.forms.len(),
        "Checking forms"
    );

    let reports: Vec<FormReport> = document
        .forms
        .iter()
        .map(|form| check_form(form, &args.config))
        .collect();

    match args.format {
        Format::Text => print!("{}", render_text(&reports)),
        Format::Json => println!(
            "{}",
            serde_json::to_string_pretty(&JsonReport {
                build: GIT_COMMIT_HASH,
                forms: &reports,
            })?
        ),
    }

    Ok(reports.iter().all(|report| report.valid))
}

fn read_source(source: &FormSource) -> Result<String> {
    match source {
        FormSource::Stdin => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read form description from stdin")?;
            Ok(raw)
        }
        FormSource::Path(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read form description: {}", path.display())),
    }
}

/// Binds the form to headless controls and simulates a submit.
#[must_use]
pub fn check_form(spec: &FormSpec, config: &ValidationConfig) -> FormReport {
    let document = HeadlessDocument::new();
    let fields = spec
        .fields
        .iter()
        .map(|field| {
            let control = document
                .control(&field.name, &field.input_type)
                .with_value(&field.value);
            control.set_required(field.required);
            control.set_disabled(field.disabled);
            BoundField::new(control, field.grouped.then(HeadlessGroup::new))
        })
        .collect();

    let binding = FormBinding::new(config, Form::new(HeadlessForm::new(), fields));
    let outcome = binding.handle(FormEvent::Submit);

    let fields: Vec<FieldReport> = binding
        .form()
        .fields()
        .iter()
        .map(|field| field_report(&binding, field))
        .collect();

    info!(form = %spec.id, fields = fields.len(), "Checked form");

    FormReport {
        id: spec.id.clone(),
        valid: outcome == EventOutcome::Continue,
        focused: document.active_name(),
        fields,
    }
}

fn field_report(
    binding: &FormBinding<HeadlessForm, HeadlessControl, HeadlessGroup>,
    field: &BoundField<HeadlessControl, HeadlessGroup>,
) -> FieldReport {
    let control = field.control();
    let disabled = control.is_disabled();
    let message = if disabled {
        None
    } else {
        binding.validator().evaluate(control).message()
    };

    FieldReport {
        name: control.name(),
        valid: message.is_none(),
        disabled,
        message,
        annotations: field
            .group()
            .map(HeadlessGroup::messages)
            .unwrap_or_default()
            .into_iter()
            .map(|annotation| annotation.text)
            .collect(),
    }
}

#[must_use]
pub fn render_text(reports: &[FormReport]) -> String {
    let mut out = String::new();

    for report in reports {
        let status = if report.valid { "valid" } else { "invalid" };
        let _ = write!(out, "form {}: {status}", report.id);
        if !report.valid {
            let _ = write!(out, " (submit cancelled");
            if let Some(focused) = &report.focused {
                let _ = write!(out, ", focus: {focused}");
            }
            out.push(')');
        }
        out.push('\n');

        for field in &report.fields {
            let detail = match (&field.message, field.disabled) {
                (_, true) => "skipped (disabled)",
                (Some(message), false) => message.as_str(),
                (None, false) => "ok",
            };
            let _ = writeln!(out, "  {}: {detail}", field.name);
        }
    }

    out
}
