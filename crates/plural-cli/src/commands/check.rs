//! Implementation of the `plurals check` command.

use clap::Args;
use miette::{IntoDiagnostic, Result};
use plural_rules::compile_all;

use crate::commands::input::InputArgs;
use crate::output::compile_error_report;
use crate::output::table::{format_check_table, LocaleStatus};

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Locales to check (comma-separated). Defaults to every locale.
    #[arg(long, value_delimiter = ',')]
    pub locale: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> Result<i32> {
    let data = args.input.load(&args.locale)?;
    let report = compile_all(&data, &args.input.options(true));

    let mut statuses: Vec<LocaleStatus> = report
        .compiled
        .iter()
        .map(LocaleStatus::compiled)
        .chain(report.skipped.iter().map(LocaleStatus::failed))
        .collect();
    statuses.sort_by(|a, b| a.locale.cmp(&b.locale));
    let all_ok = statuses.iter().all(LocaleStatus::is_ok);

    if args.json {
        let json_output = serde_json::to_string_pretty(&statuses).into_diagnostic()?;
        println!("{}", json_output);
    } else {
        for err in &report.skipped {
            eprintln!("{:?}", compile_error_report(err));
        }

        println!("{}", format_check_table(&statuses));

        for status in statuses.iter().filter(|status| !status.mismatches.is_empty()) {
            println!("\nMismatched samples in {}:", status.locale);
            for mismatch in &status.mismatches {
                println!("  - {}", mismatch);
            }
        }
    }

    if all_ok {
        Ok(exitcode::OK)
    } else {
        Ok(exitcode::DATAERR)
    }
}
