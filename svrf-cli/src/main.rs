//! Command-line interface for svrf
//! Translates SVRF rule decks into ICV runsets and inspects how a deck was understood.
//!
//! Usage:
//!   svrf translate `<path>` [-o `<out>`] [-f icv|json|yaml] [--stdout] [--strict] - Write the translated deck
//!   svrf inspect `<path>` [-f `<transform>`]                             - Tokens, parse result or rule listing
//!   svrf stats `<path>` [--analyze] [--rules all|spacing|width]          - Deck statistics
//!   svrf list-formats                                                  - Output formats and inspect transforms
//!
//! Diagnostics and summaries go to stderr so stdout stays machine-readable.
//! Set RUST_LOG (e.g. RUST_LOG=debug) for pipeline logging.

mod report;
mod transforms;

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::fs;
use std::path::{Path, PathBuf};
use svrf_config::{Loader, SvrfConfig};
use svrf_icv::{FormatRegistry, TranslationSummary};
use svrf_parser::{ParseResult, SourceLoader};

fn build_cli() -> Command {
    Command::new("svrf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Translate SVRF design-rule decks to ICV")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the built-in defaults"),
        )
        .subcommand(
            Command::new("translate")
                .about("Translate a deck and write the result")
                .arg(
                    Arg::new("path")
                        .help("Path to the SVRF deck")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file (default: input path with the format's extension)"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format, see list-formats")
                        .default_value("icv"),
                )
                .arg(
                    Arg::new("technology")
                        .long("technology")
                        .help("Technology name for the output header"),
                )
                .arg(
                    Arg::new("process")
                        .long("process")
                        .help("Process node for the output header"),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .help("Fail without writing output when the deck has errors")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("stdout")
                        .long("stdout")
                        .help("Write to stdout instead of a file")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("output"),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Show tokens, the parse result or the classified rules")
                .arg(
                    Arg::new("path")
                        .help("Path to the SVRF deck")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("transform")
                        .long("format")
                        .short('f')
                        .help("Inspect transform")
                        .value_parser(transforms::AVAILABLE_TRANSFORMS.to_vec())
                        .default_value("rules"),
                ),
        )
        .subcommand(
            Command::new("stats")
                .about("Print deck statistics")
                .arg(
                    Arg::new("path")
                        .help("Path to the SVRF deck")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("analyze")
                        .long("analyze")
                        .help("Also report layers without rules and very restrictive rules")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("rules")
                        .long("rules")
                        .help("List rules of a kind")
                        .value_parser(["all", "spacing", "width"]),
                ),
        )
        .subcommand(Command::new("list-formats").about("List output formats and inspect transforms"))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = build_cli().get_matches();
    let config = load_config(matches.get_one::<String>("config"));

    match matches.subcommand() {
        Some(("translate", sub)) => handle_translate_command(sub, config),
        Some(("inspect", sub)) => handle_inspect_command(sub),
        Some(("stats", sub)) => handle_stats_command(sub, &config),
        Some(("list-formats", _)) => handle_list_formats_command(),
        _ => unreachable!("clap requires a subcommand"),
    }
}

fn load_config(path: Option<&String>) -> SvrfConfig {
    let mut loader = Loader::new();
    if let Some(path) = path {
        loader = loader.with_file(path);
    }
    loader.build().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    })
}

fn read_source(path: &str) -> SourceLoader {
    SourceLoader::from_path(path).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    })
}

fn parse_source(path: &str, strict: bool) -> ParseResult {
    let loader = read_source(path);
    let parsed = if strict {
        loader.parse_strict()
    } else {
        loader.parse()
    };
    parsed.unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    })
}

fn handle_translate_command(matches: &ArgMatches, mut config: SvrfConfig) {
    let path = matches
        .get_one::<String>("path")
        .expect("path is required");
    let format = matches
        .get_one::<String>("format")
        .expect("format has a default");
    if let Some(technology) = matches.get_one::<String>("technology") {
        config.translate.technology = technology.clone();
    }
    if let Some(process) = matches.get_one::<String>("process") {
        config.translate.process_node = process.clone();
    }

    let registry = FormatRegistry::with_defaults();
    let output_format = registry.get(format).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("Available formats: {}", registry.list_formats().join(", "));
        std::process::exit(1);
    });

    let result = parse_source(path, matches.get_flag("strict"));
    eprint!("{}", report::diagnostics(&result.diagnostics, &config.report));

    let rendered = output_format
        .serialize(&result, &config.translate)
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    if matches.get_flag("stdout") {
        print!("{}", rendered);
    } else {
        let output = matches
            .get_one::<String>("output")
            .map(PathBuf::from)
            .unwrap_or_else(|| default_output_path(path, output_format.extension()));
        if let Err(e) = fs::write(&output, rendered) {
            eprintln!("Error: cannot write {}: {}", output.display(), e);
            std::process::exit(1);
        }
        log::info!("wrote {}", output.display());
        eprintln!("Output written to: {}", output.display());
    }

    let summary = TranslationSummary::from_result(&result);
    if config.report.show_summary {
        eprintln!("{}", summary);
    }
    if config.report.list_manual_rules && summary.manual_rules > 0 {
        eprintln!(
            "Rules needing manual translation: {}",
            summary.manual_rule_names.join(", ")
        );
    }
}

fn default_output_path(input: &str, extension: &str) -> PathBuf {
    let path = Path::new(input);
    let candidate = path.with_extension(extension);
    if candidate == path {
        // keep the input intact when it already has the output extension
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        return path.with_file_name(format!("{}_icv.{}", stem, extension));
    }
    candidate
}

fn handle_inspect_command(matches: &ArgMatches) {
    let path = matches
        .get_one::<String>("path")
        .expect("path is required");
    let transform = matches
        .get_one::<String>("transform")
        .expect("transform has a default");

    let loader = read_source(path);
    match transforms::execute_transform(loader.source(), transform) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn handle_stats_command(matches: &ArgMatches, config: &SvrfConfig) {
    let path = matches
        .get_one::<String>("path")
        .expect("path is required");
    let result = parse_source(path, false);

    print!("{}", report::statistics(&result.statistics()));

    if let Some(kind) = matches.get_one::<String>("rules") {
        let all: Vec<_> = result.rules.iter().collect();
        let table = match kind.as_str() {
            "spacing" => report::rule_table("Spacing rules", &result.spacing_rules()),
            "width" => report::rule_table("Width rules", &result.width_rules()),
            _ => report::rule_table("Rules", &all),
        };
        print!("{}", table);
    }

    if matches.get_flag("analyze") {
        print!("{}", report::issues(&result.potential_issues()));
    }

    eprint!("{}", report::diagnostics(&result.diagnostics, &config.report));
}

fn handle_list_formats_command() {
    let registry = FormatRegistry::with_defaults();
    println!("Output formats (translate --format):\n");
    for name in registry.list_formats() {
        if let Ok(format) = registry.get(&name) {
            println!("  {:<8} {}", name, format.description());
        }
    }
    println!("\nInspect transforms (inspect --format):\n");
    for name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {}", name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path("decks/m1.svrf", "rs"),
            PathBuf::from("decks/m1.rs")
        );
        assert_eq!(
            default_output_path("decks/m1.rs", "rs"),
            PathBuf::from("decks/m1_icv.rs")
        );
        assert_eq!(default_output_path("deck", "json"), PathBuf::from("deck.json"));
    }
}
