// Command-line interface for quire
//
// This binary exports Markdown files to HTML, DOCX, RTF and PDF, and offers an inspect command
// for looking at the parsed document model.
//
// The core capabilities live in the quire-babel crate; this binary only reads files, resolves
// configuration and reports errors.
//
// Exporting:
//
// The target format is given with --to, or inferred from the extension of the -o path.
// Usage:
//  quire <input> --to <format> [-o <file>] [--no-styles]          - Export (default)
//  quire export <input> --to <format> [-o <file>] [--no-styles]   - Same as above (explicit)
//  quire inspect <path> [<transform>]                             - Inspect the model (defaults to "model-json")
//  quire generate-css                                             - Print the built-in stylesheet
//  quire --list-formats                                           - List export formats and transforms
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format/transform.
// Example:
//  quire notes.md --to docx -o notes.docx --extra-archiver system

use quire_cli::transforms;

use clap::{Arg, ArgAction, Command, ValueHint};
use quire_babel::formats::markdown::is_markdown_filename;
use quire_babel::{export_source, FormatRegistry, PublishArtifact};
use quire_config::{ArchiverKind, Loader, QuireConfig, PROJECT_CONFIG_FILE};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const SUBCOMMANDS: &[&str] = &["export", "inspect", "generate-css", "help"];

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

        let key_opt = arg
            .strip_prefix("--extra-")
            .or_else(|| arg.strip_prefix("--extras-"));

        if let Some(key) = key_opt {
            let has_value = args
                .get(i + 1)
                .is_some_and(|next| !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
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

/// Insert "export" when the first argument is an input path rather than a subcommand.
fn inject_default_subcommand(args: &[String]) -> Option<Vec<String>> {
    let first = args.get(1)?;
    if first.starts_with('-') || SUBCOMMANDS.contains(&first.as_str()) {
        return None;
    }
    let mut injected = vec![args[0].clone(), "export".to_string()];
    injected.extend_from_slice(&args[1..]);
    Some(injected)
}

fn build_cli() -> Command {
    Command::new("quire")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Export Markdown files to HTML, DOCX, RTF and PDF")
        .long_about(
            "quire converts Markdown files into styled documents.\n\n\
            Commands:\n  \
            - export: Render a Markdown file to html, docx, rtf or pdf (default)\n  \
            - inspect: View the parsed document model\n  \
            - generate-css: Print the built-in HTML stylesheet\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            quire notes.md --to html                   # HTML to stdout\n  \
            quire notes.md -o notes.docx               # Target inferred from extension\n  \
            quire notes.md --to pdf -o notes.pdf       # Paginated PDF\n  \
            quire inspect notes.md model-debug         # View the block tree",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List export formats and inspect transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a quire.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log pipeline steps to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("export")
                .about("Export a Markdown file (default command)")
                .long_about(
                    "Export a Markdown file to another format.\n\n\
                    Supported formats:\n  \
                    - html: HTML5 page with optional embedded CSS (.html)\n  \
                    - docx: Word document (.docx)\n  \
                    - rtf:  Rich Text Format (.rtf)\n  \
                    - pdf:  Paginated US Letter PDF (.pdf)\n\n\
                    Text formats go to stdout unless -o is given.\n\
                    Binary formats (docx, pdf) require -o.\n\n\
                    Examples:\n  \
                    quire export notes.md --to html -o notes.html\n  \
                    quire export notes.md -o notes.pdf\n  \
                    quire notes.md --to rtf                       # 'export' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Markdown file to export")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (inferred from -o when omitted)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("no-styles")
                        .long("no-styles")
                        .help("Omit the embedded stylesheet from HTML output")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect the parsed document model")
                .long_about(
                    "View the document model quire builds from a Markdown file.\n\n\
                    Transforms:\n  \
                    - model-json:  Blocks as JSON (default)\n  \
                    - model-debug: Blocks as an indented tree\n  \
                    - inline-json: Inline spans per block\n  \
                    - pages:       PDF page offsets\n\n\
                    Examples:\n  \
                    quire inspect notes.md\n  \
                    quire inspect notes.md pages --extra-base-font-size 14",
                )
                .arg(
                    Arg::new("path")
                        .help("Markdown file to inspect")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply. Defaults to 'model-json'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("generate-css")
                .about("Output the default CSS used for HTML export")
                .long_about(
                    "Outputs the stylesheet embedded in HTML exports.\n\n\
                    Save it, edit it, and point convert.html.custom_css (or\n\
                    --extra-css-path) at the result to extend the default styles.\n\n\
                    Examples:\n  \
                    quire generate-css > custom.css",
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => match inject_default_subcommand(&cleaned_args) {
            Some(injected) => cli
                .try_get_matches_from(&injected)
                .unwrap_or_else(|e2| e2.exit()),
            None => e.exit(),
        },
    };

    init_logging(matches.get_flag("verbose"));

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let result = load_cli_config(matches.get_one::<String>("config").map(String::as_str))
        .and_then(|mut config| {
            apply_config_overrides(&mut config, &mut extra_params)?;
            Ok(config)
        })
        .and_then(|config| match matches.subcommand() {
            Some(("export", sub_matches)) => {
                let input = sub_matches
                    .get_one::<String>("input")
                    .map(String::as_str)
                    .unwrap_or_default();
                let request = ExportRequest {
                    input,
                    to: sub_matches.get_one::<String>("to").map(String::as_str),
                    output: sub_matches.get_one::<String>("output").map(String::as_str),
                    no_styles: sub_matches.get_flag("no-styles"),
                };
                handle_export_command(&request, &extra_params, &config)
            }
            Some(("inspect", sub_matches)) => {
                let path = sub_matches
                    .get_one::<String>("path")
                    .map(String::as_str)
                    .unwrap_or_default();
                let transform = sub_matches
                    .get_one::<String>("transform")
                    .map(String::as_str)
                    .unwrap_or(transforms::DEFAULT_TRANSFORM);
                handle_inspect_command(path, transform, &extra_params, &config)
            }
            Some(("generate-css", _)) => {
                print!("{}", quire_babel::formats::default_css());
                Ok(())
            }
            _ => Err("Unknown subcommand. Use --help for usage information.".to_string()),
        });

    if let Err(message) = result {
        eprintln!("Error: {message}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

struct ExportRequest<'a> {
    input: &'a str,
    to: Option<&'a str>,
    output: Option<&'a str>,
    no_styles: bool,
}

/// Handle the export command
fn handle_export_command(
    request: &ExportRequest<'_>,
    extra_params: &HashMap<String, String>,
    config: &QuireConfig,
) -> Result<(), String> {
    let registry = FormatRegistry::default();
    let to = resolve_target(&registry, request.to, request.output)?;

    if !is_markdown_filename(request.input) {
        log::warn!(
            "'{}' does not have a Markdown extension; reading it as Markdown",
            request.input
        );
    }

    let source = fs::read(request.input)
        .map_err(|e| format!("Error reading file '{}': {e}", request.input))?;

    let mut options = config.convert.options_for(&to);
    if request.no_styles && to == "html" {
        options.insert("include-styles".to_string(), "false".to_string());
    }
    for (key, value) in extra_params {
        options.insert(key.clone(), value.clone());
    }

    let result = export_source(
        &source,
        request.input,
        &to,
        request.output.map(Path::new),
        options,
    )
    .map_err(|e| e.to_string())?;

    match result.artifact {
        PublishArtifact::InMemory(text) => print!("{text}"),
        PublishArtifact::File(path) => eprintln!("Wrote {}", path.display()),
    }
    Ok(())
}

/// The explicit --to wins; otherwise the output extension decides.
fn resolve_target(
    registry: &FormatRegistry,
    to: Option<&str>,
    output: Option<&str>,
) -> Result<String, String> {
    if let Some(format) = to {
        registry.get(format).map_err(|e| e.to_string())?;
        return Ok(format.to_string());
    }
    output
        .and_then(|path| registry.detect_format_from_filename(path))
        .ok_or_else(|| {
            "Could not determine the target format. Pass --to <format> or an -o path with a known extension"
                .to_string()
        })
}

/// Handle the inspect command
fn handle_inspect_command(
    path: &str,
    transform: &str,
    extra_params: &HashMap<String, String>,
    config: &QuireConfig,
) -> Result<(), String> {
    let source =
        fs::read_to_string(path).map_err(|e| format!("Error reading file '{path}': {e}"))?;
    let params = build_inspect_params(config, extra_params);
    let output = transforms::execute_transform(&source, transform, &params)?;
    print!("{output}");
    Ok(())
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::default();
    println!("Export formats:");
    for name in registry.list_formats() {
        if let Ok(format) = registry.get(&name) {
            let extensions = format
                .file_extensions()
                .iter()
                .map(|ext| format!(".{ext}"))
                .collect::<Vec<_>>()
                .join(", ");
            println!("  {name:<6} {}  ({extensions})", format.description());
        }
    }

    println!("\nInspect transforms:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> Result<QuireConfig, String> {
    let loader = Loader::new().with_optional_file(PROJECT_CONFIG_FILE);
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader
        .build()
        .map_err(|err| format!("Failed to load configuration: {err}"))
}

/// Move extras that mirror configuration keys into the config, so they only
/// reach the format they belong to.
fn apply_config_overrides(
    config: &mut QuireConfig,
    extra_params: &mut HashMap<String, String>,
) -> Result<(), String> {
    if let Some(raw) = extra_params.remove("include-styles") {
        config.convert.html.include_styles = parse_bool_arg("include-styles", &raw)?;
    }

    if let Some(path) = take_override(extra_params, &["css", "css-path"]) {
        config.convert.html.custom_css = path;
    }

    if let Some(raw) = extra_params.remove("archiver") {
        config.convert.docx.archiver = match raw.to_lowercase().as_str() {
            "builtin" => ArchiverKind::Builtin,
            "system" => ArchiverKind::System,
            other => {
                return Err(format!(
                    "Invalid value '{other}' for --extra-archiver (expected 'builtin' or 'system')"
                ))
            }
        };
    }

    if let Some(raw) = extra_params.remove("base-font-size") {
        config.convert.pdf.base_font_size = raw
            .parse()
            .map_err(|_| format!("Invalid number '{raw}' for --extra-base-font-size"))?;
    }

    Ok(())
}

fn build_inspect_params(
    config: &QuireConfig,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut params = HashMap::new();
    params.insert(
        "base-font-size".to_string(),
        config.convert.pdf.base_font_size.to_string(),
    );

    for (key, value) in overrides {
        params.insert(key.clone(), value.clone());
    }

    params
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| map.remove(*key))
}

fn parse_bool_arg(flag: &str, raw: &str) -> Result<bool, String> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        other => Err(format!("Invalid boolean value '{other}' for --extra-{flag}")),
    }
}
