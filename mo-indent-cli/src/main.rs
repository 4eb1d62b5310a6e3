//! Command-line interface for mo-indent
//! Replays recorded scan passes and answers the questions an editor would ask of them.
//!
//! Usage:
//!   moindent anchors `<script>` [--json]                           - Print the anchor log
//!   moindent query `<script>` --at `<offset>`... [--sink]           - Print the governing anchors
//!   moindent newline `<source>` --events `<script>` --offset `<n>`  - Print the newline edit
//!   moindent convert `<script>` `<output>`                         - Rewrite a script as JSON or YAML

use clap::{ArgAction, Parser, Subcommand};
use mo_indent::indent::auto_edit::{AnchorIndenter, AutoEditPipeline, BlockCloser, DocumentCommand};
use mo_indent::indent::{EventScript, ScriptError, ScriptFormat};
use mo_indent_config::{Loader, MoIndentConfig};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "moindent")]
#[command(about = "Inspect indentation anchors recorded from a scan pass")]
#[command(version)]
struct Cli {
    /// Configuration file layered over the built-in defaults
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Whitespace for one indentation level (overrides the configuration)
    #[arg(long, global = true)]
    indent: Option<String>,

    /// More logging on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an event script and print the anchor log
    Anchors {
        /// Event script (.json, .yaml or .yml)
        script: PathBuf,

        /// Print the log as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the anchor governing each offset
    Query {
        /// Event script (.json, .yaml or .yml)
        script: PathBuf,

        /// Document offsets to look up
        #[arg(long = "at", required = true, num_args = 1..)]
        offsets: Vec<usize>,

        /// Look up sinks instead of regular anchors
        #[arg(long)]
        sink: bool,
    },

    /// Print the edit an editor would make for a newline typed at an offset
    Newline {
        /// Source document the events were recorded from
        source: PathBuf,

        /// Event script (.json, .yaml or .yml)
        #[arg(long)]
        events: PathBuf,

        /// Byte offset the newline is typed at
        #[arg(long)]
        offset: usize,

        /// Print the edited document instead of the edit
        #[arg(long)]
        apply: bool,
    },

    /// Rewrite an event script, picking the output format from its extension
    Convert {
        /// Event script to read (.json, .yaml or .yml)
        script: PathBuf,

        /// Script to write (.json, .yaml or .yml)
        output: PathBuf,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Script(#[from] ScriptError),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid block keywords: {0}")]
    Keywords(#[from] regex::Error),

    #[error("failed to read {}: {source}", .path.display())]
    Source {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to format output: {0}")]
    Output(#[from] serde_json::Error),
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref(), cli.indent.as_deref())?;
    debug!(indent = ?config.indentation.indent_string, "configuration loaded");

    match cli.command {
        Commands::Anchors { script, json } => handle_anchors_command(&script, json),
        Commands::Query {
            script,
            offsets,
            sink,
        } => handle_query_command(&script, &offsets, sink),
        Commands::Newline {
            source,
            events,
            offset,
            apply,
        } => handle_newline_command(&config, &source, &events, offset, apply),
        Commands::Convert { script, output } => handle_convert_command(&script, &output),
    }
}

fn load_config(path: Option<&Path>, indent: Option<&str>) -> Result<MoIndentConfig, CliError> {
    let mut loader = Loader::new();
    if let Some(path) = path {
        loader = loader.with_file(path);
    }
    if let Some(indent) = indent {
        loader = loader.with_indent_string(indent)?;
    }
    Ok(loader.build()?)
}

/// Handle the anchors command
fn handle_anchors_command(script: &Path, json: bool) -> Result<(), CliError> {
    let anchors = EventScript::load(script)?.replay();
    if json {
        println!("{}", serde_json::to_string_pretty(anchors.anchors())?);
    } else {
        for anchor in anchors.anchors() {
            println!("{}", anchor);
        }
    }
    Ok(())
}

/// Handle the query command
fn handle_query_command(script: &Path, offsets: &[usize], sink: bool) -> Result<(), CliError> {
    let anchors = EventScript::load(script)?.replay();
    for &offset in offsets {
        let anchor = if sink {
            anchors.sink_at(offset)
        } else {
            anchors.anchor_at(offset)
        };
        println!("{}: {}", offset, anchor);
    }
    Ok(())
}

/// Handle the newline command
fn handle_newline_command(
    config: &MoIndentConfig,
    source: &Path,
    events: &Path,
    offset: usize,
    apply: bool,
) -> Result<(), CliError> {
    let document = std::fs::read_to_string(source).map_err(|source_error| CliError::Source {
        path: source.to_path_buf(),
        source: source_error,
    })?;
    let anchors = EventScript::load(events)?.replay();
    let style = config.indentation.clone();

    let mut pipeline = AutoEditPipeline::new().then(AnchorIndenter::new(&anchors, style.clone()));
    if config.auto_edit.close_blocks {
        pipeline = pipeline.then(BlockCloser::with_keywords(
            &config.auto_edit.block_keywords,
            style,
        )?);
    }

    let (edited, command) = pipeline.run(&document, DocumentCommand::insert(offset, "\n"));
    if apply {
        print!("{}", edited);
    } else {
        let summary = serde_json::json!({
            "offset": command.offset,
            "length": command.length,
            "text": command.text,
            "caret": command.caret(),
        });
        println!("{}", serde_json::to_string(&summary)?);
    }
    Ok(())
}

/// Handle the convert command
fn handle_convert_command(script: &Path, output: &Path) -> Result<(), CliError> {
    let format = ScriptFormat::from_path(output)?;
    let text = EventScript::load(script)?.render(format)?;
    std::fs::write(output, text).map_err(|source| CliError::Write {
        path: output.to_path_buf(),
        source,
    })?;
    debug!(output = %output.display(), "script written");
    Ok(())
}
