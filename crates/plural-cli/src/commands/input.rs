//! CLDR input files shared by every command.

use std::path::PathBuf;

use clap::Args;
use miette::{IntoDiagnostic, Result};
use plural_rules::{CldrData, CompileOptions, Specialization};
use tracing::debug;

/// Rule data files.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// CLDR cardinal rules (plurals.json)
    #[arg(long, env = "PLURALS_CARDINAL")]
    pub cardinal: PathBuf,

    /// CLDR ordinal rules (ordinals.json)
    #[arg(long, env = "PLURALS_ORDINAL")]
    pub ordinal_rules: Option<PathBuf>,

    /// Treat every classified value as an integer when that lets a
    /// locale skip fraction operands
    #[arg(long)]
    pub assume_integral: bool,
}

impl InputArgs {
    /// Load both documents, keeping only `locales` when it is non-empty.
    pub fn load(&self, locales: &[String]) -> Result<CldrData> {
        let mut data = CldrData::new();
        data.load_file(&self.cardinal).into_diagnostic()?;
        if let Some(path) = &self.ordinal_rules {
            data.load_file(path).into_diagnostic()?;
        }
        if !locales.is_empty() {
            data.retain_locales(locales).into_diagnostic()?;
        }
        debug!(locales = data.locales().count(), "loaded rule data");
        Ok(data)
    }

    pub fn options(&self, include_samples: bool) -> CompileOptions {
        let specialization = if self.assume_integral {
            Specialization::AssumeIntegral
        } else {
            Specialization::Strict
        };
        CompileOptions::builder()
            .specialization(specialization)
            .include_samples(include_samples)
            .build()
    }
}
