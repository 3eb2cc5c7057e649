//! docgen CLI: generate docstrings for a Python file.
//!
//! Scans the file, asks the model for documentation of every symbol that
//! lacks it (or carries a generated block, with `--regen`), and splices the
//! answer back into the file.

use clap::{Args, Parser, Subcommand};
use std::error::Error;
use std::path::{Path, PathBuf};

use docgen_ai::{parse_response, DocRequester, GeminiClient};
use docgen_core::editor::EditCounts;
use docgen_core::{
    load_docgen_config, DocEditor, DocMap, DocgenConfig, EditMode, EditReport, FileStatus, SourceFile,
    SymbolTable,
};
use tracing::{error, info};

type CliResult<T> = Result<T, Box<dyn Error>>;

/// docgen: AI-written docstrings for Python source.
#[derive(Parser)]
#[command(name = "docgen", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: pyproject.toml, table [tool.docgen])
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct Target {
    /// Path to the Python file
    path: PathBuf,

    /// Regenerate existing generated documentation instead of adding new
    #[arg(long, short)]
    regen: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan, request documentation, and write it into the file
    Run {
        #[command(flatten)]
        target: Target,

        /// Gemini API key
        #[arg(long, short = 'a', env = "GEMINI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },
    /// List the symbols that would be documented
    Scan {
        #[command(flatten)]
        target: Target,

        /// Output as JSON instead of human-readable text
        #[arg(long)]
        json: bool,
    },
    /// Apply a saved model response without contacting the service
    Apply {
        #[command(flatten)]
        target: Target,

        /// File holding the response text (`Name: description` lines)
        #[arg(long)]
        docs: PathBuf,
    },
}

// ---------------------------------------------------------------------------
// Shared steps
// ---------------------------------------------------------------------------

fn check_file(path: &Path) -> CliResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(format!("{} does not exist or is not a file", path.display()).into())
    }
}

fn open_target(target: &Target, config: &DocgenConfig) -> CliResult<(SourceFile, SymbolTable)> {
    println!("Parsing file: {}", target.path.display());
    let file = SourceFile::open(&target.path, &config.doc_style(true))?;
    let (table, purpose) = if target.regen {
        (file.to_regenerate(), "with generated documentation to regenerate")
    } else {
        (file.to_document(), "to document")
    };
    println!("Found {} items of {} {purpose}", table.len(), file.symbols().len());
    Ok((file, table))
}

fn relative<'a>(file: &SourceFile, path: &'a str) -> &'a str {
    path.strip_prefix(file.path()).map_or(path, |rest| rest.trim_start_matches('/'))
}

fn apply_docs(docs: &DocMap, config: &DocgenConfig, regen: bool) -> i32 {
    println!("Applying changes to code...");
    let mode = if regen { EditMode::Regenerate } else { EditMode::Insert };
    let report = DocEditor::new(config.doc_style(true), mode).process_files(docs);
    print_report(&report);
    if report.failed().next().is_some() {
        1
    } else {
        0
    }
}

fn print_report(report: &EditReport) {
    let EditCounts { inserted, replaced, skipped } = report.totals();
    for outcome in report.failed() {
        if let FileStatus::Failed(e) = &outcome.status {
            error!(path = %outcome.path.display(), "{e}");
        }
    }
    if inserted + replaced > 0 {
        println!("Documentation successfully applied! ({inserted} inserted, {replaced} replaced, {skipped} skipped)");
    } else {
        println!("Nothing to change ({skipped} skipped)");
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn run(target: &Target, api_key: Option<String>, config: &DocgenConfig) -> CliResult<i32> {
    check_file(&target.path)?;
    let client = GeminiClient::new(config, api_key.unwrap_or_default())?;
    let (_, table) = open_target(target, config)?;
    if table.is_empty() {
        println!("No objects to doc found");
        return Ok(0);
    }

    println!("Generating documentation with AI...");
    info!(model = config.model.as_str(), symbols = table.len(), "Requesting documentation");
    let docs = DocRequester::new(client, config.max_attempts).request_docs(&table)?;
    println!("Generated documentation for {} items", docs.len());
    Ok(apply_docs(&docs, config, target.regen))
}

fn scan(target: &Target, json: bool, config: &DocgenConfig) -> CliResult<i32> {
    check_file(&target.path)?;
    let (file, table) = open_target(target, config)?;
    if json {
        let out = serde_json::json!({
            "path": file.path(),
            "total": file.symbols().len(),
            "symbols": table,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(0);
    }
    for (path, entry) in table.iter() {
        println!("{:<50} {}", relative(&file, path), entry.position);
    }
    Ok(0)
}

fn apply(target: &Target, docs_path: &Path, config: &DocgenConfig) -> CliResult<i32> {
    check_file(&target.path)?;
    let text = std::fs::read_to_string(docs_path)
        .map_err(|e| format!("Cannot read {}: {e}", docs_path.display()))?;
    let (_, table) = open_target(target, config)?;
    if table.is_empty() {
        println!("No objects to doc found");
        return Ok(0);
    }
    let docs = parse_response(&text, &table);
    println!("Parsed documentation for {} of {} items", docs.len(), table.len());
    Ok(apply_docs(&docs, config, target.regen))
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "docgen=debug" } else { "docgen=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(level.parse().expect("valid log directive")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match dispatch(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn dispatch(cli: Cli) -> CliResult<i32> {
    let config = load_docgen_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Run { target, api_key } => run(&target, api_key, &config),
        Commands::Scan { target, json } => scan(&target, json, &config),
        Commands::Apply { target, docs } => apply(&target, &docs, &config),
    }
}
