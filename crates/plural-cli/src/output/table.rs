//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};
use plural_rules::{CompileError, CompiledLocale, PluralCategory};
use serde::Serialize;

/// Check outcome for a single locale.
#[derive(Debug, Serialize)]
pub struct LocaleStatus {
    pub locale: String,
    /// Cardinal categories, `other` included. Empty when compilation failed.
    pub cardinal: Vec<&'static str>,
    /// Ordinal categories. Empty when the locale has no ordinal rules.
    pub ordinal: Vec<&'static str>,
    pub samples: usize,
    /// Samples the compiled rules disagree with.
    pub mismatches: Vec<String>,
    pub error: Option<String>,
}

impl LocaleStatus {
    pub fn compiled(compiled: &CompiledLocale) -> Self {
        LocaleStatus {
            locale: compiled.locale.clone(),
            cardinal: category_names(&compiled.cardinal.categories),
            ordinal: compiled
                .ordinal
                .as_ref()
                .map(|rules| category_names(&rules.categories))
                .unwrap_or_default(),
            samples: compiled.samples.len(),
            mismatches: compiled
                .verify_samples()
                .iter()
                .map(ToString::to_string)
                .collect(),
            error: None,
        }
    }

    pub fn failed(err: &CompileError) -> Self {
        LocaleStatus {
            locale: err.locale().to_string(),
            cardinal: Vec::new(),
            ordinal: Vec::new(),
            samples: 0,
            mismatches: Vec::new(),
            error: Some(err.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none() && self.mismatches.is_empty()
    }

    fn status(&self) -> String {
        if self.error.is_some() {
            "compile error".to_string()
        } else if self.mismatches.is_empty() {
            "ok".to_string()
        } else {
            format!("{} mismatched", self.mismatches.len())
        }
    }
}

fn category_names(categories: &[PluralCategory]) -> Vec<&'static str> {
    categories.iter().copied().map(PluralCategory::as_str).collect()
}

fn category_list(categories: &[&str]) -> String {
    if categories.is_empty() {
        "-".to_string()
    } else {
        categories.join(", ")
    }
}

/// Format check results as an ASCII table.
pub fn format_check_table(statuses: &[LocaleStatus]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Locale", "Cardinal", "Ordinal", "Samples", "Status"]);

    for status in statuses {
        table.add_row(vec![
            status.locale.clone(),
            category_list(&status.cardinal),
            category_list(&status.ordinal),
            status.samples.to_string(),
            status.status(),
        ]);
    }

    table
}
