//! Implementation of the `plurals eval` command.

use std::slice;

use clap::Args;
use miette::{miette, IntoDiagnostic, Result};
use plural_rules::{compile_all, RuleType};
use serde::Serialize;

use crate::commands::input::InputArgs;
use crate::output::compile_error_report;

/// Arguments for the eval command.
#[derive(Debug, Args)]
pub struct EvalArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Locale whose rules classify the value (e.g., en, ru, ar)
    #[arg(long, required = true)]
    pub locale: String,

    /// Use the ordinal rules instead of the cardinal rules
    #[arg(long)]
    pub ordinal: bool,

    /// Number to classify, e.g. 21 or 1.50
    #[arg(allow_hyphen_values = true)]
    pub value: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for eval results.
#[derive(Serialize)]
pub struct EvalResult {
    pub locale: String,
    pub rule_type: &'static str,
    pub value: String,
    pub category: &'static str,
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs) -> Result<i32> {
    let data = args.input.load(slice::from_ref(&args.locale))?;
    let mut report = compile_all(&data, &args.input.options(false));
    if let Some(err) = report.skipped.first() {
        return Err(compile_error_report(err));
    }
    let compiled = report
        .compiled
        .pop()
        .ok_or_else(|| miette!("no rules compiled for locale '{}'", args.locale))?;

    let rule_type = RuleType::from_ordinal_flag(args.ordinal);
    match compiled.category_for(args.value.as_str(), rule_type) {
        Ok(category) => {
            if args.json {
                let output = EvalResult {
                    locale: args.locale,
                    rule_type: rule_type.as_str(),
                    value: args.value,
                    category: category.as_str(),
                };
                println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                println!("{}", category);
            }
            Ok(exitcode::OK)
        }
        Err(e) => {
            if args.json {
                let output = serde_json::json!({
                    "error": e.to_string()
                });
                eprintln!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                eprintln!("Evaluation error: {}", e);
            }
            Ok(exitcode::DATAERR)
        }
    }
}
