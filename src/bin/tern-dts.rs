//! CLI for translating TypeScript declaration files into Tern definitions
//!
//! Usage: tern-dts [options] <file.d.ts>...
//!
//! Options:
//!   --full           Also translate interfaces, classes, enums and variables
//!   --pretty         Pretty-print the JSON output
//!   --name <name>    Override the `!name` of a single input file
//!   --verbose        Log translation progress to stderr
//!
//! One JSON document is written to stdout per input file. Logging goes to
//! stderr and honours `RUST_LOG`.

use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tern_dts::{TranslateOptions, translate_with_options};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// CLI configuration
struct Config {
    inputs: Vec<PathBuf>,
    name: Option<String>,
    pretty: bool,
    verbose: bool,
    options: TranslateOptions,
}

fn parse_args() -> Result<Config, String> {
    let args: Vec<String> = env::args().collect();
    let program_name = args.first().map_or("tern-dts", |s| s.as_str());

    let mut inputs = vec![];
    let mut name = None;
    let mut pretty = false;
    let mut verbose = false;
    let mut options = TranslateOptions::default();

    let mut i = 1;
    while i < args.len() {
        let Some(arg) = args.get(i) else {
            break;
        };
        if arg == "--full" {
            options.full_declarations = true;
        } else if arg == "--pretty" {
            pretty = true;
        } else if arg == "--verbose" {
            verbose = true;
        } else if arg == "--name" {
            i += 1;
            name = Some(
                args.get(i)
                    .ok_or_else(|| "--name requires a value".to_string())?
                    .clone(),
            );
        } else if arg.starts_with('-') {
            return Err(format!("Unknown option: {}", arg));
        } else {
            inputs.push(PathBuf::from(arg));
        }
        i += 1;
    }

    if inputs.is_empty() {
        return Err(format!(
            "Usage: {} [--full] [--pretty] [--name <name>] [--verbose] <file.d.ts>...",
            program_name
        ));
    }
    if name.is_some() && inputs.len() > 1 {
        return Err("--name can only be used with a single input file".to_string());
    }

    Ok(Config {
        inputs,
        name,
        pretty,
        verbose,
        options,
    })
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = if verbose {
        EnvFilter::new(default_level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };
    let layer = tracing_subscriber::fmt::Layer::default()
        .with_ansi(false)
        .with_writer(BoxMakeWriter::new(std::io::stderr));
    if let Err(err) = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
    {
        eprintln!("failed to install tracing subscriber: {err}");
    }
}

/// `lodash.d.ts` → `lodash`, `node.ts` → `node`
fn library_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match stem.strip_suffix(".d") {
        Some(name) => name.to_string(),
        None => stem,
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args()?;
    init_tracing(config.verbose);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for input in &config.inputs {
        let source = fs::read_to_string(input)
            .map_err(|e| format!("Cannot read {}: {}", input.display(), e))?;
        let name = config
            .name
            .clone()
            .unwrap_or_else(|| library_name(input));

        debug!(path = %input.display(), name = %name, "read input");
        let doc = translate_with_options(&source, &name, &config.options)
            .map_err(|e| format!("{}: {}", input.display(), e))?;

        let json = if config.pretty {
            doc.to_json_pretty()?
        } else {
            doc.to_json()?
        };
        writeln!(out, "{}", json)?;
        info!(path = %input.display(), "translated");
    }

    Ok(())
}
