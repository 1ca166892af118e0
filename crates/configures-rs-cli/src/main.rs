//! Command-line front end that prints the effective config for an environment.

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use configures_rs::{Document, FileStore, Format, Raw, Retriever, RetrieverOptions};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Command-line options for the config printer.
#[derive(Debug, Parser)]
#[command(name = "configures", version)]
struct Cli {
    /// Config file or directory of config files
    #[arg(long)]
    path: PathBuf,
    /// File name prefix shared by root and override files
    #[arg(long, default_value = "app")]
    prefix: String,
    /// Character separating the prefix from the environment name
    #[arg(long, default_value_t = '.')]
    splitter: char,
    /// Document format (json or yaml); inferred from a single file's extension
    #[arg(long)]
    format: Option<String>,
    /// Environment whose override is merged onto the root
    #[arg(long, default_value = "")]
    active: String,
    /// Path to print instead of the whole document
    #[arg(long)]
    query: Option<String>,
    /// Output rendering
    #[arg(long, value_enum, default_value_t = Output::Json)]
    output: Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    Json,
    Yaml,
}

/// Entry point for the config printer.
fn main() -> ExitCode {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(Some(rendered)) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("no value at {}", cli.query.as_deref().unwrap_or_default());
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Load the config described by `cli` and render the requested value.
///
/// Returns `None` when a query matches nothing.
fn run(cli: &Cli) -> anyhow::Result<Option<String>> {
    let format = resolve_format(cli.format.as_deref(), &cli.path)?;
    info!(
        "loading config (path={}, format={format}, active={})",
        cli.path.display(),
        cli.active
    );
    let store = FileStore::new(&cli.path, cli.prefix.as_str(), cli.splitter)
        .context("invalid store options")?;
    let retriever = Retriever::new(
        RetrieverOptions::new(store)
            .with_format(format.to_string())
            .with_active(cli.active.as_str()),
    )
    .context("invalid retriever options")?;
    let config = retriever.get().context("failed to load config")?;

    let raw = match cli.query.as_deref() {
        Some(query) => {
            debug!("querying config (path={query})");
            match config.get_raw(query).context("query failed")? {
                Some(raw) => raw,
                None => return Ok(None),
            }
        }
        None => config.as_raw().context("failed to read config")?,
    };
    render(&raw, cli.output).map(Some)
}

fn resolve_format(declared: Option<&str>, path: &Path) -> anyhow::Result<Format> {
    if let Some(declared) = declared {
        return declared.parse().context("invalid --format");
    }
    if path.is_file() {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        return match Format::from_extension(&extension) {
            Some(format) => Ok(format),
            None => bail!(
                "cannot infer format from {}; pass --format",
                path.display()
            ),
        };
    }
    Ok(Format::Json)
}

fn render(raw: &Raw, output: Output) -> anyhow::Result<String> {
    match output {
        Output::Json => {
            let value = raw.to_value()?;
            Ok(serde_json::to_string_pretty(&value)?)
        }
        Output::Yaml => {
            let yaml = Format::Yaml.from_json(raw.as_bytes())?;
            Ok(String::from_utf8(yaml)?.trim_end().to_string())
        }
    }
}
