//! Shared configuration loader for the svrf tools.
//!
//! `defaults/svrf.default.toml` is embedded into every binary so that the documented
//! defaults and runtime behavior stay in sync. Applications layer user files on top of those
//! defaults via [`Loader`] before deserializing into [`SvrfConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use svrf_icv::IcvOptions;

const DEFAULT_TOML: &str = include_str!("../defaults/svrf.default.toml");

/// Top-level configuration consumed by svrf applications.
#[derive(Debug, Clone, Deserialize)]
pub struct SvrfConfig {
    pub translate: IcvOptions,
    pub report: ReportConfig,
}

/// What the CLI prints around a run.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub show_diagnostics: bool,
    /// 0 means no limit
    pub max_diagnostics: usize,
    pub show_summary: bool,
    pub list_manual_rules: bool,
}

impl ReportConfig {
    /// How many of `total` diagnostics to print
    pub fn diagnostic_limit(&self, total: usize) -> usize {
        if !self.show_diagnostics {
            0
        } else if self.max_diagnostics == 0 {
            total
        } else {
            total.min(self.max_diagnostics)
        }
    }
}

/// Layers user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file, ignored if absent.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. from a CLI flag.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<SvrfConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// For callers that only need the defaults.
pub fn load_defaults() -> Result<SvrfConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_generator_defaults() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.translate, IcvOptions::default());
        assert!(config.report.show_diagnostics);
        assert_eq!(config.report.max_diagnostics, 50);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("translate.technology", "N5")
            .expect("override to apply")
            .set_override("translate.run_options.error_limit", 10i64)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.translate.technology, "N5");
        assert_eq!(config.translate.run_options.error_limit, 10);
        assert_eq!(config.translate.process_node, "180nm");
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[translate]\nprocess_node = \"28nm\"\n\n[report]\nmax_diagnostics = 0").unwrap();
        let config = Loader::new().with_file(file.path()).build().unwrap();
        assert_eq!(config.translate.process_node, "28nm");
        assert_eq!(config.translate.technology, "Generic");
        assert_eq!(config.report.diagnostic_limit(120), 120);
    }

    #[test]
    fn missing_required_file_fails() {
        let result = Loader::new().with_file("/nonexistent/svrf.toml").build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/svrf.toml")
            .build()
            .unwrap();
        assert!(config.report.show_summary);
    }

    #[test]
    fn diagnostic_limit() {
        let mut report = load_defaults().unwrap().report;
        assert_eq!(report.diagnostic_limit(10), 10);
        assert_eq!(report.diagnostic_limit(80), 50);
        report.show_diagnostics = false;
        assert_eq!(report.diagnostic_limit(10), 0);
    }
}
