// Command-line interface for tagup
//
// This binary provides commands for converting and inspecting tagup markup.
//
// Converting:
//
// The conversion needs a to and from pair. The from can be auto-detected from
// the file extension, while being overwrittable by an explicit --from flag.
// Usage:
//  tagup <input> --to <format> [--from <format>] [--output <file>]  - Convert between formats (default)
//  tagup convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  tagup inspect <path> [<transform>]    - Render the parsed tree (defaults to "ast-json")
//  tagup --list-transforms               - List available transforms
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format.
// Example:
//  tagup lesson.tag --to html --extra-wrap --extra-title "Lesson 1"

mod transforms;

use clap::{Arg, ArgAction, Command, ValueHint};
use std::collections::HashMap;
use std::fs;
use tagup::{CleanupRules, FormatRegistry};
use tagup_config::{Loader, TagupConfig};

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            // Check if the next arg is a value or another flag/end
            let has_value = if i + 1 < args.len() {
                !args[i + 1].starts_with('-')
            } else {
                false
            };

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                // No value, treat as boolean flag
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("tagup")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting and inspecting tagup markup")
        .long_about(
            "tagup is a command-line tool for working with tagup markup files.\n\n\
            Commands:\n  \
            - convert: Transform between tagup markup and HTML\n  \
            - inspect: View the parsed document tree\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            tagup lesson.tag --to html              # Convert to HTML (outputs to stdout)\n  \
            tagup page.html --to tagup -o out.tag   # HTML back to markup\n  \
            tagup lesson.tag --to html --extra-wrap # Standalone HTML page\n  \
            tagup inspect lesson.tag                # View parsed tree as JSON",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("list-transforms")
                .long("list-transforms")
                .help("List available inspect transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a tagup.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between tagup markup and HTML (default command)")
                .long_about(
                    "Convert documents between formats.\n\n\
                    Supported formats:\n  \
                    - tagup: Bracketed tag markup (.tag, .tagup)\n  \
                    - html:  HTML fragment or standalone page (.html, .htm)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    tagup convert lesson.tag --to html           # Markup to HTML (stdout)\n  \
                    tagup convert page.html --to tagup -o out.tag # HTML back to markup\n  \
                    tagup lesson.tag --to html                   # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect the parsed document tree")
                .long_about(
                    "Parse the input and render the document tree.\n\n\
                    Transforms:\n  \
                    - ast-json:    pretty-printed JSON (default)\n  \
                    - ast-compact: single-line JSON\n\n\
                    Examples:\n  \
                    tagup inspect lesson.tag                 # Pretty JSON\n  \
                    tagup inspect page.html ast-compact      # Compact, HTML source",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the input file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply. Defaults to 'ast-json'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                ),
        )
}

fn main() {
    // Try to parse args. If no subcommand is provided, inject "convert"
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // If the first arg looks like a file, inject "convert"
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && cleaned_args[1] != "inspect"
                && cleaned_args[1] != "convert"
                && cleaned_args[1] != "help"
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }
    if matches.get_flag("list-transforms") {
        handle_list_transforms_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let to = sub_matches.get_one::<String>("to").expect("to is required");
            let from = resolve_source_format(input, sub_matches.get_one::<String>("from"));
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &extra_params, &config);
        }
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or("ast-json");
            let from = resolve_source_format(path, sub_matches.get_one::<String>("from"));
            handle_inspect_command(path, &from, transform, &extra_params, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Resolve the source format, preferring an explicit --from over detection.
fn resolve_source_format(input: &str, from_arg: Option<&String>) -> String {
    if let Some(from) = from_arg {
        return from.to_string();
    }
    let registry = FormatRegistry::default();
    match registry.detect_format_from_filename(input) {
        Some(detected) => detected,
        None => {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        }
    }
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &TagupConfig,
) {
    let registry = FormatRegistry::default();

    // Validate formats exist
    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let doc = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    // Serialize (format-specific parameters allowed via --extra-*)
    let result = if to == "tagup" {
        let rules: CleanupRules = (&config.convert.tagup).into();
        tagup::formats::tagup::serializer::serialize_with_rules(&doc, &rules)
    } else {
        let mut format_options = HashMap::new();
        if to == "html" {
            format_options.insert(
                "wrap".to_string(),
                config.convert.html.wrap_document.to_string(),
            );
            format_options.insert("title".to_string(), config.convert.html.title.clone());
        }
        for (key, value) in extra_params {
            format_options.insert(key.clone(), value.clone());
        }
        registry
            .serialize_with_options(&doc, to, &format_options)
            .unwrap_or_else(|e| {
                eprintln!("Serialization error: {e}");
                std::process::exit(1);
            })
    };

    match output {
        Some(path) => {
            fs::write(path, result).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => {
            println!("{result}");
        }
    }
}

/// Handle the inspect command
fn handle_inspect_command(
    path: &str,
    from: &str,
    transform: &str,
    extra_params: &HashMap<String, String>,
    config: &TagupConfig,
) {
    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    });

    let mut params = extra_params.clone();
    if !params.contains_key("pretty") {
        params.insert("pretty".to_string(), config.inspect.pretty.to_string());
    }

    let output =
        transforms::execute_transform(&source, from, transform, &params).unwrap_or_else(|e| {
            eprintln!("Execution error: {e}");
            std::process::exit(1);
        });

    print!("{output}");
}

fn handle_list_formats_command() {
    println!("Available formats:");
    let registry = FormatRegistry::default();
    for format_name in registry.list_formats() {
        let format = registry.get(&format_name).expect("listed format exists");
        println!("  {format_name:<8} {}", format.description());
    }
}

fn handle_list_transforms_command() {
    println!("Available transforms:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> TagupConfig {
    let loader = Loader::new().with_optional_file("tagup.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn apply_config_overrides(config: &mut TagupConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = extra_params.remove("pretty") {
        config.inspect.pretty = parse_bool_arg("pretty", &raw);
    }
    if let Some(raw) = extra_params.remove("max-blank-lines") {
        config.convert.tagup.max_blank_lines = raw.parse().unwrap_or_else(|_| {
            eprintln!("Invalid value '{raw}' for --extra-max-blank-lines");
            std::process::exit(1);
        });
    }
    if let Some(raw) = extra_params.remove("trim-edges") {
        config.convert.tagup.trim_edges = parse_bool_arg("trim-edges", &raw);
    }
    if let Some(raw) = extra_params.remove("convert-nbsp") {
        config.convert.tagup.convert_nbsp = parse_bool_arg("convert-nbsp", &raw);
    }
    // wrap and title pass through as HTML format options.
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}
