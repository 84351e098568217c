//! Holocron CLI entry point.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use holocron_runtime::serialize::save_snapshot;
use holocron_runtime::{Repl, RuntimeConfig, Session, init_logging};

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    config_path: Option<PathBuf>,
    data_path: Option<PathBuf>,
    snapshot_path: Option<PathBuf>,
    save_snapshot: Option<PathBuf>,
    queries: Vec<String>,
    files: Vec<PathBuf>,
    pretty: bool,
    max_depth: Option<usize>,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();
    let mut args = args.into_iter().skip(1);

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .ok_or_else(|| format!("{flag} requires a value"))
        };
        match arg.as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "--pretty" => config.pretty = true,
            "-c" | "--config" => config.config_path = Some(value(arg.as_str())?.into()),
            "-d" | "--data" => config.data_path = Some(value(arg.as_str())?.into()),
            "-s" | "--snapshot" => config.snapshot_path = Some(value(arg.as_str())?.into()),
            "--save-snapshot" => config.save_snapshot = Some(value(arg.as_str())?.into()),
            "-q" | "--query" => config.queries.push(value(arg.as_str())?),
            "-f" | "--file" => config.files.push(value(arg.as_str())?.into()),
            "--max-depth" => {
                let raw = value(arg.as_str())?;
                config.max_depth = Some(
                    raw.parse()
                        .map_err(|_| format!("invalid --max-depth value: {raw}"))?,
                );
            }
            other => return Err(format!("unknown option: {other}").into()),
        }
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let cli = parse_args(args)?;

    if cli.show_help {
        print_help();
        return Ok(());
    }

    if cli.show_version {
        println!("holocron {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut config = match &cli.config_path {
        Some(path) => RuntimeConfig::load(path)?,
        None => RuntimeConfig::default(),
    };
    if let Some(path) = cli.data_path {
        config.data_path = Some(path);
        config.snapshot_path = None;
    }
    if let Some(path) = cli.snapshot_path {
        config.snapshot_path = Some(path);
    }
    if let Some(depth) = cli.max_depth {
        config.engine.max_depth = Some(depth);
    }
    config.pretty |= cli.pretty;

    init_logging(&config.log_filter);
    let session = Session::from_config(&config)?;

    if let Some(path) = &cli.save_snapshot {
        save_snapshot(session.repository(), path)?;
        eprintln!("Saved snapshot to {}", path.display());
    }

    let mut sources = cli.queries;
    for file in &cli.files {
        sources.push(
            fs::read_to_string(file)
                .map_err(|e| format!("failed to read {}: {e}", file.display()))?,
        );
    }

    // Batch mode: answer the given queries and exit.
    if !sources.is_empty() || cli.save_snapshot.is_some() {
        for source in &sources {
            println!("{}", session.query_json(source, config.pretty)?);
        }
        return Ok(());
    }

    Repl::new(session, &config)?.run()?;
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mHolocron\x1b[0m - Query engine over a cross-referenced film universe catalog

\x1b[1mUSAGE:\x1b[0m
    holocron [OPTIONS]

\x1b[1mOPTIONS:\x1b[0m
    -h, --help               Print help information
    -V, --version            Print version information
    -c, --config PATH        Read settings from a TOML file
    -d, --data PATH          Load a JSON seed instead of the bundled one
    -s, --snapshot PATH      Load a MessagePack snapshot
        --save-snapshot PATH Write the loaded catalog as a snapshot
    -q, --query TEXT         Run a query and exit (repeatable)
    -f, --file PATH          Run the query in a file and exit (repeatable)
        --pretty             Pretty-print JSON results
        --max-depth N        Reject selections nested deeper than N

\x1b[1mENVIRONMENT:\x1b[0m
    HOLOCRON_LOG             tracing filter, e.g. holocron_engine=debug

\x1b[1mEXAMPLES:\x1b[0m
    holocron                                      Start interactive REPL
    holocron -q 'people(name: \"Luke\") {{ name }}'   Run one query
    holocron --save-snapshot catalog.msgpack      Snapshot the bundled seed
    holocron -s catalog.msgpack -f report.graphql Query a snapshot

\x1b[1mREPL COMMANDS:\x1b[0m
    .help                Show help
    .schema [kind]       List kinds or describe one
    .stats               Entity and edge counts
    .quit                Exit REPL (or Ctrl+D)"
    );
}
