//! docsv-export: Flatten nested JSON documents into one CSV table
//!
//! Usage:
//!   # Read a JSON array from a file, write ./export.csv
//!   docsv-export products.json
//!
//!   # Read NDJSON from stdin, write into a directory under a chosen name
//!   cat orders.jsonl | docsv-export --ndjson -o ./exports --file orders.csv
//!
//!   # Print the CSV instead of writing it
//!   docsv-export products.json --stdout
//!
//!   # Keep one column group per array element instead of merging them
//!   docsv-export orders.json --object-arrays indexed

// Use MiMalloc allocator for better performance (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use docsv::{export_csv, read_documents, ExportConfig, LineEnding, ObjectArrayMode};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "docsv-export")]
#[command(about = "Flatten nested JSON documents into one CSV table", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Process newline-delimited JSON (one document per line)
    #[arg(long)]
    ndjson: bool,

    /// Directory the CSV file is exported to
    #[arg(long, short = 'o', default_value = ".")]
    output_dir: PathBuf,

    /// Name of the exported file
    #[arg(long, default_value = "export.csv")]
    file: String,

    /// Print the CSV to stdout instead of writing the file
    #[arg(long)]
    stdout: bool,

    /// JSON file with export settings; flags below override it
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Field delimiter (default: ";")
    #[arg(long)]
    delimiter: Option<char>,

    /// Separator used to join arrays of scalars (default: ",")
    #[arg(long)]
    array_separator: Option<String>,

    /// How arrays of objects are collapsed (default: merge)
    #[arg(long, value_enum)]
    object_arrays: Option<ObjectArraysArg>,

    /// Omit the header row
    #[arg(long)]
    no_header: bool,

    /// Terminate rows with CRLF instead of LF
    #[arg(long)]
    crlf: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ObjectArraysArg {
    Merge,
    Indexed,
}

impl From<ObjectArraysArg> for ObjectArrayMode {
    fn from(arg: ObjectArraysArg) -> Self {
        match arg {
            ObjectArraysArg::Merge => ObjectArrayMode::Merge,
            ObjectArraysArg::Indexed => ObjectArrayMode::Indexed,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;

    let reader = if let Some(path) = &args.input {
        let file = File::open(path)
            .with_context(|| format!("Failed to open input: {}", path.display()))?;
        Box::new(BufReader::new(file)) as Box<dyn Read>
    } else {
        Box::new(std::io::stdin()) as Box<dyn Read>
    };

    let documents = read_documents(reader, args.ndjson)?;
    if documents.is_empty() {
        tracing::warn!("No JSON documents found in input");
    }
    tracing::info!(documents = documents.len(), "Input loaded");

    let artifact = export_csv(&documents, &args.output_dir, &args.file, &config)
        .context("Failed to prepare export")?;

    if args.stdout {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(artifact.text.as_bytes())?;
        stdout.flush()?;
    } else {
        artifact.write_to_disk().context("Failed to write export")?;
    }

    Ok(())
}

/// Defaults, then the config file, then command-line overrides
fn build_config(args: &Args) -> Result<ExportConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Invalid config: {}", path.display()))?
        }
        None => ExportConfig::default(),
    };

    if let Some(delimiter) = args.delimiter {
        config.delimiter = delimiter;
    }
    if let Some(separator) = &args.array_separator {
        config.array_separator = separator.clone();
    }
    if let Some(mode) = args.object_arrays {
        config.object_arrays = mode.into();
    }
    if args.no_header {
        config.include_header = false;
    }
    if args.crlf {
        config.line_ending = LineEnding::Crlf;
    }

    tracing::debug!(?config, "Export configuration");
    Ok(config)
}
