//! Output format trait
//!
//! Every way a parsed deck can be written out implements `OutputFormat`. Formats are
//! serialization-only: reading happens in svrf-parser.

use crate::error::FormatError;
use crate::options::IcvOptions;
use crate::writer::IcvWriter;
use svrf_parser::svrf::formats;
use svrf_parser::ParseResult;

pub trait OutputFormat: Send + Sync {
    /// Registry key (e.g. "icv", "json")
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// File extension for generated files, without the dot
    fn extension(&self) -> &str;

    fn serialize(&self, result: &ParseResult, options: &IcvOptions) -> Result<String, FormatError>;
}

/// The ICV rule deck
pub struct IcvFormat;

impl OutputFormat for IcvFormat {
    fn name(&self) -> &str {
        "icv"
    }

    fn description(&self) -> &str {
        "ICV runset with run options, layers and grouped rules"
    }

    fn extension(&self) -> &str {
        "rs"
    }

    fn serialize(&self, result: &ParseResult, options: &IcvOptions) -> Result<String, FormatError> {
        Ok(IcvWriter::new(options).render(result))
    }
}

/// The parse result as pretty JSON
pub struct JsonFormat;

impl OutputFormat for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Parse result as JSON"
    }

    fn extension(&self) -> &str {
        "json"
    }

    fn serialize(&self, result: &ParseResult, _options: &IcvOptions) -> Result<String, FormatError> {
        Ok(formats::to_json(result)?)
    }
}

/// The parse result as YAML
pub struct YamlFormat;

impl OutputFormat for YamlFormat {
    fn name(&self) -> &str {
        "yaml"
    }

    fn description(&self) -> &str {
        "Parse result as YAML"
    }

    fn extension(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, result: &ParseResult, _options: &IcvOptions) -> Result<String, FormatError> {
        Ok(formats::to_yaml(result)?)
    }
}
