mod logging;
mod settings;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use schemars::schema_for;
use serde_json::Value;
use thiserror::Error;

use mockgrid_core::{Library, Table, Template};
use mockgrid_generate::{
    GenerateOptions, GenerationError, TableGenerator, default_library, load_library_file,
    render_console, write_csv, write_table_csv, write_table_json,
};

use logging::init_logging;
use settings::{CliSettings, OutputFormat, load_settings};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("invalid json in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(name = "mockgrid", version, about = "Template-driven mock data tables")]
struct Cli {
    /// Settings file. Defaults to ./mockgrid.toml when present.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a table from a template file.
    Generate(GenerateArgs),
    /// Print the JSON Schema of the template format.
    Schema,
    /// List library keys and their kind.
    Library(LibraryArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Template JSON file.
    #[arg(long, value_name = "FILE")]
    template: PathBuf,
    /// Library JSON file merged over the built-in library; repeatable, later files win.
    #[arg(long = "library", value_name = "FILE")]
    libraries: Vec<PathBuf>,
    /// Output file. Defaults to stdout.
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
    /// Seed for a reproducible table.
    #[arg(long)]
    seed: Option<u64>,
    /// Append JSON logs to this file instead of stderr.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct LibraryArgs {
    /// Library JSON file merged over the built-in library; repeatable.
    #[arg(long = "library", value_name = "FILE")]
    libraries: Vec<PathBuf>,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Command::Generate(args) => run_generate(args, &settings),
        Command::Schema => run_schema(),
        Command::Library(args) => run_library(args, &settings),
    }
}

fn run_generate(args: GenerateArgs, settings: &CliSettings) -> Result<(), CliError> {
    init_logging(&settings.log_level, args.log_file.as_deref())?;

    let template = read_json(&args.template)?;
    let library = build_library(settings, &args.libraries)?;
    let options = GenerateOptions {
        seed: args.seed.or(settings.seed),
        ..GenerateOptions::default()
    };
    let generator = TableGenerator::new(library).with_options(options);

    let table = generator.generate(&template, None);
    if table.is_error() {
        tracing::warn!(
            template = %args.template.display(),
            errors = table.body().len(),
            "template produced an error table"
        );
    }

    let format = args.format.unwrap_or(settings.default_format);
    match args.out.as_deref() {
        Some(path) => {
            write_file(path, &table, format)?;
            tracing::info!(path = %path.display(), rows = table.len(), "table written");
        }
        None => write_stdout(&table, format)?,
    }
    Ok(())
}

fn run_schema() -> Result<(), CliError> {
    let schema = schema_for!(Template);
    let json = serde_json::to_string_pretty(&schema).map_err(GenerationError::from)?;
    println!("{json}");
    Ok(())
}

fn run_library(args: LibraryArgs, settings: &CliSettings) -> Result<(), CliError> {
    let library = build_library(settings, &args.libraries)?;
    let mut stdout = io::stdout().lock();
    for (key, entry) in library.iter() {
        writeln!(stdout, "{key}\t{}", entry.kind())?;
    }
    Ok(())
}

/// Built-in library, then the settings' library files, then the flags.
fn build_library(settings: &CliSettings, extra: &[PathBuf]) -> Result<Library, CliError> {
    let mut library = default_library()?.clone();
    for path in settings.library_paths.iter().chain(extra) {
        library.merge(load_library_file(path)?);
        tracing::debug!(path = %path.display(), "library merged");
    }
    Ok(library)
}

fn read_json(path: &Path) -> Result<Value, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, table: &Table, format: OutputFormat) -> Result<(), CliError> {
    let write_error = |source| CliError::Write {
        path: path.to_path_buf(),
        source,
    };
    match format {
        OutputFormat::Csv => {
            write_table_csv(path, table)?;
        }
        OutputFormat::Json => {
            let file = File::create(path).map_err(write_error)?;
            write_table_json(BufWriter::new(file), table)?;
        }
        OutputFormat::Table => {
            std::fs::write(path, render_console(table)).map_err(write_error)?;
        }
    }
    Ok(())
}

fn write_stdout(table: &Table, format: OutputFormat) -> Result<(), CliError> {
    let stdout = io::stdout().lock();
    match format {
        OutputFormat::Csv => {
            write_csv(stdout, table)?;
        }
        OutputFormat::Json => write_table_json(stdout, table)?,
        OutputFormat::Table => {
            let mut stdout = stdout;
            stdout.write_all(render_console(table).as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
