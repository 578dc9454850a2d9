//! Inspect transforms
//!
//! Each name is a pipeline stage plus an output format (e.g. "token-json", "result-yaml").

use svrf_parser::svrf::formats::{
    rules_listing, to_json, to_yaml, tokens_to_json, tokens_to_simple,
};
use svrf_parser::SourceLoader;

/// All inspect transforms, in the order `--help` lists them
pub const AVAILABLE_TRANSFORMS: &[&str] = &[
    "token-json",
    "token-simple",
    "result-json",
    "result-yaml",
    "rules",
];

/// Run a named transform over source text
pub fn execute_transform(source: &str, transform_name: &str) -> Result<String, String> {
    let loader = SourceLoader::from_string(source);

    match transform_name {
        "token-json" => {
            let tokens = loader
                .tokenize()
                .map_err(|e| format!("Transform failed: {}", e))?;
            serde_json::to_string_pretty(&tokens_to_json(&tokens))
                .map_err(|e| format!("JSON serialization failed: {}", e))
        }
        "token-simple" => {
            let tokens = loader
                .tokenize()
                .map_err(|e| format!("Transform failed: {}", e))?;
            Ok(tokens_to_simple(&tokens))
        }
        "result-json" => {
            let result = loader
                .parse()
                .map_err(|e| format!("Transform failed: {}", e))?;
            to_json(&result).map_err(|e| e.to_string())
        }
        "result-yaml" => {
            let result = loader
                .parse()
                .map_err(|e| format!("Transform failed: {}", e))?;
            to_yaml(&result).map_err(|e| e.to_string())
        }
        "rules" => {
            let result = loader
                .parse()
                .map_err(|e| format!("Transform failed: {}", e))?;
            Ok(rules_listing(&result))
        }
        _ => Err(format!("Unknown transform: {}", transform_name)),
    }
}
