mod config;

use anyhow::Context;
use camino::Utf8PathBuf;
use classfix_core::adapters::FsDocumentPort;
use classfix_core::{BatchEntry, CanonicalizerKind, RunMode, Source, engine_from_settings};
use clap::Parser;
use config::{CliOverrides, ConfigMerger};
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "classfix",
    version,
    about = "Sort the class lists of ERB templates into canonical order."
)]
struct Cli {
    /// Templates to sort. Reads stdin when none are given.
    files: Vec<Utf8PathBuf>,

    /// Rewrite files in place.
    #[arg(long, default_value_t = false, conflicts_with_all = ["check", "diff"])]
    write: bool,

    /// Report files that would change; exit 1 if any would.
    #[arg(long, default_value_t = false, conflicts_with = "diff")]
    check: bool,

    /// Print a unified diff instead of the sorted document.
    #[arg(long, default_value_t = false)]
    diff: bool,

    /// Report format for --check.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Config file (default: ./classfix.toml if present).
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// How to sort a class list (alphabetical, prettier, command).
    #[arg(long)]
    canonicalizer: Option<CanonicalizerKind>,

    /// Documents processed at once.
    #[arg(long)]
    jobs: Option<usize>,

    /// Additional Ruby method whose string argument is a class list.
    #[arg(long = "class-method")]
    class_methods: Vec<String>,

    /// Additional HTML attribute holding a class list.
    #[arg(long = "class-attribute")]
    class_attributes: Vec<String>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    fn mode(&self) -> RunMode {
        if self.write {
            RunMode::Write
        } else if self.check {
            RunMode::Check
        } else if self.diff {
            RunMode::Diff
        } else {
            RunMode::Print
        }
    }

    fn sources(&self) -> anyhow::Result<Vec<Source>> {
        if self.files.is_empty() {
            if self.write {
                anyhow::bail!("cannot use --write when reading from stdin");
            }
            return Ok(vec![Source::Stdin]);
        }
        if self.files.len() > 1 && self.mode() == RunMode::Print {
            anyhow::bail!("cannot process multiple files without --write, --check or --diff");
        }
        Ok(self.files.iter().cloned().map(Source::File).collect())
    }
}

fn main() -> ExitCode {
    match real_main() {
        Ok(code) => code,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(1)
        }
    }
}

fn real_main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let sources = cli.sources()?;

    // Load config file and merge with CLI arguments
    let file_config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::load_or_default(&Utf8PathBuf::from(".")).context("load classfix.toml config")?,
    };
    let mut settings = ConfigMerger::new(file_config).merge_run_args(&CliOverrides {
        canonicalizer: cli.canonicalizer,
        jobs: cli.jobs,
        class_methods: cli.class_methods.clone(),
        class_attributes: cli.class_attributes.clone(),
    });
    settings.mode = cli.mode();
    debug!(
        "merged config: canonicalizer={}, jobs={}, classes={:?}",
        settings.canonicalizer.kind, settings.jobs, settings.class_names
    );

    let engine = engine_from_settings(&settings).context("build pipeline")?;
    let port = Arc::new(FsDocumentPort::new(settings.backup_suffix().map(str::to_string)));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("start runtime")?;
    let entries = runtime.block_on(engine.run_batch(sources, port, settings.mode, settings.jobs));

    emit(&entries, settings.mode, cli.format)?;
    Ok(exit_code(&entries, settings.mode))
}

fn emit(entries: &[BatchEntry], mode: RunMode, format: OutputFormat) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    match mode {
        RunMode::Write => {}
        RunMode::Print => {
            for outcome in entries.iter().filter_map(|e| e.result.as_ref().ok()) {
                out.write_all(outcome.output.as_bytes())?;
            }
        }
        RunMode::Diff => {
            for outcome in entries.iter().filter_map(|e| e.result.as_ref().ok()) {
                out.write_all(outcome.patch().as_bytes())?;
            }
        }
        RunMode::Check => match format {
            OutputFormat::Json => {
                let reports: Vec<_> = entries.iter().map(BatchEntry::report).collect();
                let json = serde_json::to_string_pretty(&reports).context("serialize report")?;
                writeln!(out, "{json}")?;
            }
            OutputFormat::Text => {
                for report in entries.iter().map(BatchEntry::report).filter(|r| r.changed) {
                    writeln!(out, "{}", report.source)?;
                    for span in &report.spans {
                        writeln!(
                            out,
                            "{}:{}: \"{}\" -> \"{}\"",
                            report.source, span.position, span.before, span.after
                        )?;
                    }
                }
            }
        },
    }
    out.flush()?;
    Ok(())
}

fn exit_code(entries: &[BatchEntry], mode: RunMode) -> ExitCode {
    let failed = entries
        .iter()
        .filter_map(|e| e.result.as_ref().err())
        .map(|e| e.exit_code())
        .max();
    if let Some(code) = failed {
        return ExitCode::from(code);
    }
    let would_change = entries
        .iter()
        .any(|e| e.result.as_ref().is_ok_and(|o| o.changed()));
    if mode == RunMode::Check && would_change {
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}
