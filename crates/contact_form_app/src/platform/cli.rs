use std::path::PathBuf;

use clap::Parser;
use contact_core::{FieldEdit, FormFieldSet};

/// Validate a contact form and post it to the site's mail script.
#[derive(Debug, Parser)]
#[command(name = "contact-form", version)]
pub struct Cli {
    /// RON configuration file; missing file means defaults.
    #[arg(long, default_value = "contact_form.ron")]
    pub config: PathBuf,

    /// Text field as `name=value`. Repeatable.
    #[arg(long = "field", value_name = "NAME=VALUE", value_parser = parse_pair)]
    pub fields: Vec<(String, String)>,

    /// Checked checkbox as `name` or `name=value`. Repeatable.
    #[arg(long = "checkbox", value_name = "NAME[=VALUE]")]
    pub checkboxes: Vec<String>,

    /// Override the configured base URL.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Print the result region as page markup.
    #[arg(long)]
    pub html: bool,
}

impl Cli {
    /// The standard contact layout filled from `--field`; unknown names are
    /// appended as extra text fields, `--checkbox` entries as checked boxes.
    pub fn form(&self) -> FormFieldSet {
        let mut form = FormFieldSet::contact("", "", "", "");
        for (name, value) in &self.fields {
            if form.value(name).is_none() {
                form = form.text(name, value);
            } else {
                form.apply(&FieldEdit::SetText {
                    name: name.clone(),
                    value: value.clone(),
                });
            }
        }
        for entry in &self.checkboxes {
            form = match entry.split_once('=') {
                Some((name, value)) => form.checkbox(name, Some(value), true),
                None => form.checkbox(entry, None, true),
            };
        }
        form
    }
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{raw}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err("field name must not be empty".to_string());
    }
    Ok((name.to_string(), value.to_string()))
}
