//! Generation options
//!
//! Deserializable so that svrf-config can fill them from TOML. Every field has a default,
//! a partial table only overrides what it names.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IcvOptions {
    /// Technology name written into the header
    pub technology: String,
    pub process_node: String,
    pub run_options: RunOptions,
}

impl Default for IcvOptions {
    fn default() -> Self {
        Self {
            technology: "Generic".to_string(),
            process_node: "180nm".to_string(),
            run_options: RunOptions::default(),
        }
    }
}

/// Contents of the generated `run_options { ... }` block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunOptions {
    pub layout_file: String,
    pub output_dir: String,
    pub temp_dir: String,
    pub report_file: String,
    pub summary_file: String,
    pub error_limit: u32,
    pub verbose: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            layout_file: "layout.gds".to_string(),
            output_dir: "./icv_results".to_string(),
            temp_dir: "./icv_temp".to_string(),
            report_file: "drc_report.txt".to_string(),
            summary_file: "drc_summary.txt".to_string(),
            error_limit: 1000,
            verbose: true,
        }
    }
}

impl RunOptions {
    pub fn render(&self) -> String {
        format!(
            "run_options {{\n    layout_file = \"{}\";\n    output_dir = \"{}\";\n    temp_dir = \"{}\";\n    report_file = \"{}\";\n    summary_file = \"{}\";\n    error_limit = {};\n    verbose = {};\n}}\n",
            self.layout_file,
            self.output_dir,
            self.temp_dir,
            self.report_file,
            self.summary_file,
            self.error_limit,
            self.verbose
        )
    }
}
