//! Projection Code Generator
//!
//! Generates typed Rust data holders from resource schema documents.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use projection_gen::errors::GeneratorError;
use projection_gen::loader::load_schema_files;
use projection_gen::output::{GenerateOptions, GenerationReport, OutputMode, generate_and_write};
use tracing::{Level, debug, info};
use tracing_subscriber::EnvFilter;

/// Projection code generator - turns resource schemas into typed Rust modules
#[derive(Parser, Debug)]
#[command(name = "projection-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Schema document(s) to generate from (YAML or JSON)
    #[arg(short, long = "schema", value_name = "FILE", required = true, num_args = 1..)]
    schema: Vec<PathBuf>,

    /// Output directory for generated code
    #[arg(short, long, default_value = "generated/src")]
    output: PathBuf,

    /// Also write a Cargo.toml with this package name next to the output directory
    #[arg(long)]
    crate_name: Option<String>,

    /// Print generated code without writing files
    #[arg(long, conflicts_with = "check")]
    dry_run: bool,

    /// Fail if the generated files on disk are out of date
    #[arg(long)]
    check: bool,

    /// Keep previously generated modules that are no longer produced
    #[arg(long)]
    no_prune: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> GenerateOptions {
        let mode = if self.dry_run {
            OutputMode::DryRun
        } else if self.check {
            OutputMode::Check
        } else {
            OutputMode::Write
        };

        GenerateOptions {
            output_dir: self.output.clone(),
            crate_name: self.crate_name.clone(),
            mode,
            prune: !self.no_prune,
        }
    }
}

fn run(cli: &Cli) -> Result<GenerationReport, GeneratorError> {
    let options = cli.options();
    info!("Output directory: {}", options.output_dir.display());
    if options.mode == OutputMode::DryRun {
        info!("Dry run mode - no files will be written");
    }

    let schema = load_schema_files(&cli.schema)?;
    for resource in &schema.resources {
        debug!(
            "  - {} ({} fields{})",
            resource.type_tag,
            resource.fields.len(),
            if resource.top_level { ", top-level" } else { "" }
        );
    }

    generate_and_write(&schema, &options)
}

fn print_summary(cli: &Cli, report: &GenerationReport) {
    if cli.dry_run {
        return;
    }

    if cli.check {
        eprintln!(
            "{} {} generated files are up to date",
            "ok:".green().bold(),
            report.files.len()
        );
        return;
    }

    eprintln!(
        "{} {} files in {}",
        "generated:".green().bold(),
        report.files.len(),
        cli.output.display()
    );
    for path in &report.pruned {
        eprintln!("{} {}", "pruned:".yellow().bold(), path.display());
    }
}

/// `RUST_LOG` takes precedence over the `-v` count.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(report) => {
            print_summary(&cli, &report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
