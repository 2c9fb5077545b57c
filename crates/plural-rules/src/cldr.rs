//! CLDR supplemental plural documents.
//!
//! Reads `plurals.json` and `ordinals.json` as published in the
//! `cldr-core` package. Any number of documents can be merged into one
//! [`CldrData`]; later documents replace the rules of locales they repeat.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{LoadError, compute_suggestions};

/// Rule entries of one locale: `pluralRule-count-<category>` to relation.
pub type LocaleRules = BTreeMap<String, String>;

#[derive(Debug, Deserialize)]
struct Document {
    supplemental: Option<Supplemental>,
}

#[derive(Debug, Deserialize)]
struct Supplemental {
    #[serde(default)]
    version: Option<Version>,
    #[serde(default)]
    generation: Option<Generation>,
    #[serde(rename = "plurals-type-cardinal", default)]
    cardinal: BTreeMap<String, LocaleRules>,
    #[serde(rename = "plurals-type-ordinal", default)]
    ordinal: BTreeMap<String, LocaleRules>,
}

#[derive(Debug, Deserialize)]
struct Version {
    #[serde(rename = "_cldrVersion")]
    cldr_version: Option<String>,
    /// Older releases only carry an SVN revision string.
    #[serde(rename = "_number")]
    number: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Generation {
    #[serde(rename = "_date")]
    date: Option<String>,
}

/// Plural rules of every locale read from one or more CLDR documents.
///
/// # Example
///
/// ```
/// use plural_rules::CldrData;
///
/// let mut data = CldrData::new();
/// data.load_str(r#"{
///     "supplemental": {
///         "version": { "_cldrVersion": "36" },
///         "plurals-type-cardinal": {
///             "ja": { "pluralRule-count-other": " @integer 0~15" }
///         }
///     }
/// }"#).unwrap();
/// assert_eq!(data.cldr_version(), Some("36"));
/// assert!(data.cardinal_for("ja").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CldrData {
    cardinal: BTreeMap<String, LocaleRules>,
    ordinal: BTreeMap<String, LocaleRules>,
    cldr_version: Option<String>,
    generated: Option<String>,
    sources: Vec<String>,
}

impl CldrData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and merge a document from disk.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let origin = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
        self.load_document(&text, origin)
    }

    /// Merge a document given as text.
    pub fn load_str(&mut self, text: &str) -> Result<(), LoadError> {
        self.load_document(text, "<string>".to_string())
    }

    fn load_document(&mut self, text: &str, origin: String) -> Result<(), LoadError> {
        let document: Document = serde_json::from_str(text).map_err(|source| LoadError::Json {
            origin: origin.clone(),
            source,
        })?;
        let Some(supplemental) = document.supplemental else {
            return Err(LoadError::NotCldr { origin });
        };

        if let Some(version) = supplemental.version {
            self.cldr_version = version.cldr_version.or(version.number).or(self.cldr_version.take());
        }
        if let Some(date) = supplemental.generation.and_then(|generation| generation.date) {
            self.generated = Some(date);
        }
        self.cardinal.extend(supplemental.cardinal);
        self.ordinal.extend(supplemental.ordinal);
        self.sources.push(origin);
        Ok(())
    }

    /// Keep only `locales`, failing on any locale without cardinal rules.
    pub fn retain_locales<S: AsRef<str>>(&mut self, locales: &[S]) -> Result<(), LoadError> {
        let available: Vec<String> = self.cardinal.keys().cloned().collect();
        for locale in locales {
            let locale = locale.as_ref();
            if !self.cardinal.contains_key(locale) {
                return Err(LoadError::UnknownLocale {
                    locale: locale.to_string(),
                    suggestions: compute_suggestions(locale, &available),
                });
            }
        }

        let keep = |name: &String| locales.iter().any(|locale| locale.as_ref() == name);
        self.cardinal.retain(|name, _| keep(name));
        self.ordinal.retain(|name, _| keep(name));
        Ok(())
    }

    /// Cardinal rules of every locale, in sorted locale order.
    pub fn cardinal(&self) -> impl Iterator<Item = (&String, &LocaleRules)> {
        self.cardinal.iter()
    }

    pub fn cardinal_for(&self, locale: &str) -> Option<&LocaleRules> {
        self.cardinal.get(locale)
    }

    pub fn ordinal_for(&self, locale: &str) -> Option<&LocaleRules> {
        self.ordinal.get(locale)
    }

    /// Locales with cardinal rules, sorted.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.cardinal.keys().map(String::as_str)
    }

    pub fn cldr_version(&self) -> Option<&str> {
        self.cldr_version.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.cardinal.is_empty()
    }

    /// Provenance lines for the header of generated code.
    pub fn header_lines(&self) -> Vec<String> {
        let mut lines = vec!["Plural category rules generated from CLDR data.".to_string()];
        if !self.sources.is_empty() {
            lines.push(format!("Sources: {}", self.sources.join(", ")));
        }
        if let Some(version) = &self.cldr_version {
            lines.push(format!("CLDR version: {version}"));
        }
        if let Some(date) = &self.generated {
            lines.push(format!("CLDR generation date: {date}"));
        }
        lines
    }
}
