//! Implementation of the `plurals generate` command.

use std::fs::write;
use std::path::{Path, PathBuf};
use std::process::Command;

use clap::Args;
use miette::{miette, IntoDiagnostic, Result};
use owo_colors::{OwoColorize, Stream, Style};
use plural_codegen::render_module;
use plural_rules::{compile_all, CompiledLocale};
use tracing::{debug, warn};

use crate::commands::input::InputArgs;
use crate::output::compile_error_report;

/// Arguments for the generate command.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Locales to generate (comma-separated). Defaults to every locale.
    #[arg(long, value_delimiter = ',')]
    pub locale: Vec<String>,

    /// Destination of the generated Rust module
    #[arg(short, long)]
    pub output: PathBuf,

    /// Omit the generated sample test module
    #[arg(long)]
    pub no_tests: bool,

    /// Leave the output unformatted instead of running rustfmt on it
    #[arg(long)]
    pub no_format: bool,
}

/// Run the generate command.
///
/// Locales that fail to compile or disagree with their own samples are
/// reported and left out of the module.
pub fn run_generate(args: GenerateArgs) -> Result<i32> {
    let data = args.input.load(&args.locale)?;
    let report = compile_all(&data, &args.input.options(true));

    for err in &report.skipped {
        eprintln!("{:?}", compile_error_report(err));
    }

    let mut accepted: Vec<CompiledLocale> = Vec::new();
    let mut failed = report.skipped.len();
    for mut compiled in report.compiled {
        let mismatches = compiled.verify_samples();
        if mismatches.is_empty() {
            println!("{} {}", mark("✓", Style::new().green()), compiled.locale);
            if args.no_tests {
                compiled.samples.clear();
            }
            accepted.push(compiled);
        } else {
            failed += 1;
            println!("{} {}", mark("✗", Style::new().red()), compiled.locale);
            for mismatch in &mismatches {
                println!("    {}", mismatch);
            }
        }
    }
    for err in &report.skipped {
        println!("{} {}", mark("✗", Style::new().red()), err.locale());
    }

    let source = render_module(&accepted, &data.header_lines())
        .map_err(|e| miette!("Failed to generate code: {}", e))?;
    write(&args.output, source)
        .into_diagnostic()
        .map_err(|e| miette!("Failed to write {}: {}", args.output.display(), e))?;
    debug!(path = %args.output.display(), locales = accepted.len(), "wrote module");

    if !args.no_format {
        format_output(&args.output);
    }

    if failed == 0 {
        Ok(exitcode::OK)
    } else {
        Ok(exitcode::DATAERR)
    }
}

fn mark(symbol: &str, style: Style) -> String {
    symbol
        .if_supports_color(Stream::Stdout, |text| text.style(style))
        .to_string()
}

/// Run rustfmt over the written file. The unformatted module is still
/// valid Rust, so a missing or failing rustfmt only warns.
fn format_output(path: &Path) {
    match Command::new("rustfmt").arg("--edition=2021").arg(path).status() {
        Ok(status) if status.success() => {}
        Ok(status) => warn!(%status, "rustfmt failed; output left unformatted"),
        Err(err) => warn!(%err, "could not run rustfmt; output left unformatted"),
    }
}
