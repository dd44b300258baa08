//! Command-line interface for aimd
//! This binary validates aimd documents and dumps what the front end sees in them.
//!
//! Usage:
//!   aimd validate `<path>`                      - Report every diagnostic; exits 1 if invalid
//!   aimd parse `<path>` [--format `<format>`]   - Strict parse, print the typed AST
//!   aimd extract `<path>` [--format `<format>`] - Strict parse, print the flat legacy mapping
//!   aimd tokens `<path>` [--format `<format>`]  - Print the directive token stream
//!
//! Global options: `--config <file>` layers a TOML file over the built-in
//! defaults, `-v/--verbose` turns on debug logging (otherwise `RUST_LOG`, default warn).

use aimd::aimd::ast::format_source_context;
use aimd::aimd::{
    extract_vars, parse_document, tokenize, validate_with_options, Diagnostic, Document, Token,
};
use aimd::config::{AimdConfig, Loader, OutputFormat};
use clap::{Arg, ArgAction, ArgMatches, Command};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the aimd file")
        .required(true)
        .index(1)
}

fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .short('f')
        .help("Output format: json, yaml or text (default: from config)")
        .value_parser(["json", "yaml", "text"])
}

fn main() {
    let matches = Command::new("aimd")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for validating and inspecting aimd files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .help("Enable debug logging on stderr")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("validate")
                .about("Report every problem in a document")
                .arg(path_arg())
                .arg(format_arg()),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse a document and print its AST")
                .arg(path_arg())
                .arg(format_arg()),
        )
        .subcommand(
            Command::new("extract")
                .about("Print the flat legacy extraction of a document")
                .arg(path_arg())
                .arg(format_arg()),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the directive token stream")
                .arg(path_arg())
                .arg(format_arg()),
        )
        .get_matches();

    let (name, sub_matches) = matches
        .subcommand()
        .expect("a subcommand is required by clap");
    init_logging(matches.get_flag("verbose") || sub_matches.get_flag("verbose"));

    let config = load_config(sub_matches);
    let path = sub_matches
        .get_one::<String>("path")
        .expect("path is required by clap");
    let source = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    });
    debug!(path = %path, bytes = source.len(), "read document");

    match name {
        "validate" => handle_validate_command(&source, path, &config),
        "parse" => handle_parse_command(&source, &config),
        "extract" => handle_extract_command(&source, &config),
        "tokens" => handle_tokens_command(&source, &config),
        _ => unreachable!(),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Defaults, then `--config`, then `--format`
fn load_config(matches: &ArgMatches) -> AimdConfig {
    let mut loader = Loader::new();
    if let Some(file) = matches.get_one::<String>("config") {
        loader = loader.with_file(file);
    }

    let result = match matches.get_one::<String>("format") {
        Some(format) => loader
            .set_override("output.format", format.as_str())
            .and_then(Loader::build),
        None => loader.build(),
    };
    result.unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    })
}

fn serialize<T: Serialize>(value: &T, config: &AimdConfig) -> String {
    let rendered = match config.output.format {
        OutputFormat::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
        _ if config.output.pretty => serde_json::to_string_pretty(value)
            .map(|json| json + "\n")
            .map_err(|e| e.to_string()),
        _ => serde_json::to_string(value)
            .map(|json| json + "\n")
            .map_err(|e| e.to_string()),
    };
    rendered.unwrap_or_else(|e| {
        eprintln!("Error formatting output: {}", e);
        std::process::exit(1);
    })
}

#[derive(Serialize)]
struct ValidationReport<'a> {
    valid: bool,
    diagnostics: &'a [Diagnostic],
}

/// Handle the validate command
fn handle_validate_command(source: &str, path: &str, config: &AimdConfig) {
    let (valid, diagnostics) = validate_with_options(source, &config.validation);

    let output = match config.output.format {
        OutputFormat::Text => render_diagnostics_text(source, path, &diagnostics),
        _ => serialize(
            &ValidationReport {
                valid,
                diagnostics: &diagnostics,
            },
            config,
        ),
    };
    print!("{}", output);

    if !valid {
        std::process::exit(1);
    }
}

fn render_diagnostics_text(source: &str, path: &str, diagnostics: &[Diagnostic]) -> String {
    if diagnostics.is_empty() {
        return format!("{}: valid\n", path);
    }

    let mut out = String::new();
    for diagnostic in diagnostics {
        out.push_str(&format!(
            "{}: {} [{}]\n",
            path, diagnostic, diagnostic.code
        ));
        out.push_str(&format_source_context(source, &diagnostic.position));
        out.push('\n');
    }
    out.push_str(&format!("{} problem(s) found\n", diagnostics.len()));
    out
}

/// Handle the parse command
fn handle_parse_command(source: &str, config: &AimdConfig) {
    let doc = parse_document(source).unwrap_or_else(|e| {
        eprintln!("Parse error: {}", e);
        eprint!("{}", format_source_context(source, &e.position()));
        std::process::exit(1);
    });

    let output = match config.output.format {
        OutputFormat::Text => render_document_text(&doc),
        _ => serialize(&doc, config),
    };
    print!("{}", output);
}

fn render_document_text(doc: &Document) -> String {
    let mut out = String::new();
    for decl in &doc.vars {
        let var = decl.base();
        out.push_str(&format!("var {}: {}", var.name, var.effective_type()));
        if let Some(default) = &var.default {
            out.push_str(&format!(" = {}", default));
        }
        if let Some(table) = decl.as_table() {
            let names: Vec<_> = table.subvars.iter().map(|s| s.name.as_str()).collect();
            out.push_str(&format!(" [{}]", names.join(", ")));
        }
        out.push_str(&format!(" ({})\n", var.position));
    }
    for step in &doc.steps {
        out.push_str(&format!(
            "step {} level={} check={} ({})\n",
            step.name, step.level, step.check, step.position
        ));
    }
    for check in &doc.checks {
        out.push_str(&format!("check {} ({})\n", check.name, check.position));
    }
    let references = [
        ("ref_var", &doc.ref_vars),
        ("ref_step", &doc.ref_steps),
        ("ref_fig", &doc.ref_figs),
    ];
    for (label, refs) in references {
        for r in refs.iter() {
            out.push_str(&format!("{} {} ({})\n", label, r.ref_id, r.position));
        }
    }
    for cite in &doc.cites {
        out.push_str(&format!("cite {} ({})\n", cite.ref_ids.join(", "), cite.position));
    }
    out
}

/// Handle the extract command
fn handle_extract_command(source: &str, config: &AimdConfig) {
    if config.output.format == OutputFormat::Text {
        eprintln!("Format 'text' not supported for extract");
        eprintln!("Available formats for extract: json, yaml");
        std::process::exit(1);
    }

    let extracted = extract_vars(source).unwrap_or_else(|e| {
        eprintln!("Parse error: {}", e);
        eprint!("{}", format_source_context(source, &e.position()));
        std::process::exit(1);
    });
    print!("{}", serialize(&extracted, config));
}

/// Handle the tokens command
fn handle_tokens_command(source: &str, config: &AimdConfig) {
    let tokens = tokenize(source);
    let output = match config.output.format {
        OutputFormat::Text => render_tokens_text(&tokens),
        _ => serialize(&tokens, config),
    };
    print!("{}", output);
}

fn render_tokens_text(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| {
            if token.is_end() {
                format!("{} ({})\n", token.kind, token.position)
            } else {
                format!("{} {:?} ({})\n", token.kind, token.payload, token.position)
            }
        })
        .collect()
}
