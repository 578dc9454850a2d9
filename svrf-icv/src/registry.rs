//! Output formats by name

use crate::error::FormatError;
use crate::format::{IcvFormat, JsonFormat, OutputFormat, YamlFormat};
use crate::options::IcvOptions;
use std::collections::HashMap;
use svrf_parser::ParseResult;

pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn OutputFormat>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format, replacing any with the same name
    pub fn register<F: OutputFormat + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    pub fn get(&self, name: &str) -> Result<&dyn OutputFormat, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// All format names, sorted
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn serialize(
        &self,
        result: &ParseResult,
        format: &str,
        options: &IcvOptions,
    ) -> Result<String, FormatError> {
        self.get(format)?.serialize(result, options)
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(IcvFormat);
        registry.register(JsonFormat);
        registry.register(YamlFormat);
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svrf_parser::SourceLoader;

    struct CountFormat;
    impl OutputFormat for CountFormat {
        fn name(&self) -> &str {
            "count"
        }
        fn extension(&self) -> &str {
            "txt"
        }
        fn serialize(&self, result: &ParseResult, _: &IcvOptions) -> Result<String, FormatError> {
            Ok(result.rules.len().to_string())
        }
    }

    #[test]
    fn test_defaults() {
        let registry = FormatRegistry::with_defaults();
        assert_eq!(registry.list_formats(), vec!["icv", "json", "yaml"]);
        assert!(registry.has("icv"));
        assert_eq!(registry.get("json").unwrap().extension(), "json");
    }

    #[test]
    fn test_unknown_format() {
        let registry = FormatRegistry::with_defaults();
        let err = registry.get("html").err().unwrap();
        assert!(matches!(err, FormatError::FormatNotFound(name) if name == "html"));
    }

    #[test]
    fn test_custom_format() {
        let mut registry = FormatRegistry::new();
        registry.register(CountFormat);
        let result = SourceLoader::from_string("A { AREA M1 < 1 }\nB { X }")
            .parse()
            .unwrap();
        let out = registry
            .serialize(&result, "count", &IcvOptions::default())
            .unwrap();
        assert_eq!(out, "2");
    }
}
