//! spew CLI: write extracted document text and metadata to disk.
//!
//! Commands: write, paths, completions

use std::fs::File;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Args, CommandFactory, Parser};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use spew_core::{Metadata, OutputEncoding, OutputFormat, SpewError, Spewer, SpewerOptions};
use spew_fs::{FileSpewer, OutputPaths};

#[derive(Parser)]
#[command(name = "spew")]
#[command(version)]
#[command(about = "Write extracted document text and metadata to a mirrored directory tree")]
struct Cli {
    /// TOML file with output options; command-line flags override it
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log more (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Log errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Write content and metadata for one source document
    #[command(alias = "w")]
    Write {
        /// Path of the source document, as the extractor saw it
        source: PathBuf,

        /// Read content from this file instead of stdin
        #[arg(long, value_name = "FILE")]
        content: Option<PathBuf>,

        /// Metadata attribute; repeat a key to record several values
        #[arg(short = 'm', long = "meta", value_name = "KEY=VALUE", value_parser = parse_meta)]
        meta: Vec<(String, String)>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print where a source document's output would be written
    Paths {
        /// Path of the source document
        source: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Root of the output tree [default: .]
    #[arg(short = 'o', long, value_name = "DIR")]
    output_directory: Option<PathBuf>,

    /// Format the content was extracted as (text or html)
    #[arg(short = 'f', long, value_name = "FORMAT")]
    output_format: Option<OutputFormat>,

    /// Content file extension; overrides the format's, empty for none
    #[arg(long, value_name = "EXT")]
    output_extension: Option<String>,

    /// Do not write the JSON metadata file
    #[arg(long)]
    no_metadata: bool,

    /// Character encoding for content [default: utf-8]
    #[arg(long, value_name = "LABEL")]
    output_encoding: Option<OutputEncoding>,
}

impl OutputArgs {
    fn to_options(&self) -> SpewerOptions {
        SpewerOptions {
            output_directory: self.output_directory.clone(),
            output_format: self.output_format,
            output_extension: self.output_extension.clone(),
            output_metadata: self.no_metadata.then_some(false),
            output_encoding: self.output_encoding,
        }
    }
}

fn parse_meta(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    if key.trim().is_empty() {
        return Err(format!("empty metadata key in '{s}'"));
    }
    Ok((key.trim().to_string(), value.to_string()))
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn build_spewer(config: Option<&Path>, output: &OutputArgs) -> anyhow::Result<FileSpewer> {
    let base = match config {
        Some(path) => SpewerOptions::load(path)?,
        None => SpewerOptions::default(),
    };
    let options = base.merge(output.to_options());
    tracing::debug!(?options, "resolved output options");
    Ok(FileSpewer::from_options(&options))
}

fn paths_json(paths: &OutputPaths, metadata: bool) -> serde_json::Value {
    json!({
        "content": paths.content.to_string_lossy(),
        "metadata": metadata.then(|| paths.metadata.to_string_lossy()),
    })
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Write {
            source,
            content,
            meta,
            output,
        } => {
            let mut spewer = build_spewer(cli.config.as_deref(), &output)?;
            let metadata: Metadata = meta.into_iter().collect();

            let mut reader: Box<dyn Read> = match &content {
                Some(path) => Box::new(
                    File::open(path)
                        .map_err(SpewError::Content)
                        .with_context(|| {
                            format!("unable to open content file \"{}\"", path.display())
                        })?,
                ),
                None => Box::new(io::stdin().lock()),
            };

            let paths = spewer.paths_for(&source)?;
            spewer.write(&source, &metadata, &mut *reader)?;
            spewer.close()?;

            println!(
                "{}",
                serde_json::to_string_pretty(&paths_json(&paths, spewer.output_metadata()))?
            );
        }
        Commands::Paths { source, output } => {
            let spewer = build_spewer(cli.config.as_deref(), &output)?;
            let paths = spewer.paths_for(&source)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&paths_json(&paths, spewer.output_metadata()))?
            );
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "spew", &mut io::stdout());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            let from_content = err
                .downcast_ref::<SpewError>()
                .is_some_and(SpewError::is_content_error);
            if from_content {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
