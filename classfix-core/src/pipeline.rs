//! The class-sorting pipeline, extracted from the CLI.
//!
//! Per document: split, locate (on the blocking pool), reconcile,
//! canonicalize every span concurrently, then one composed rewrite. Nothing
//! is written unless the whole document succeeded.

use crate::ports::{Canonicalizer, DocumentSource, WritePort};
use crate::settings::{RunMode, RunSettings};
use camino::Utf8PathBuf;
use classfix_domain::{LocateError, Locator};
use classfix_edit::{EditError, apply_edits, render_patch, sha256_hex};
use classfix_grammar::{GrammarError, Grammars};
use classfix_types::{DocumentReport, Edit, LineIndex, ResolvedSpan, SpanReport, Stage};
use futures::{StreamExt, TryStreamExt, stream};
use std::fmt;
use std::sync::Arc;
use tracing::{Instrument, debug, error, info, info_span};

/// Where a document comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Source {
    Stdin,
    File(Utf8PathBuf),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Stdin => f.write_str("<stdin>"),
            Source::File(path) => write!(f, "{path}"),
        }
    }
}

/// Error type for one document. Exit code 2 = write refused, 1 = everything else.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("parse failed during {}: {}", .0.stage, .0.source)]
    Parse(#[from] LocateError),

    #[error("canonicalizing {span:?} failed: {source:#}")]
    Canonicalize {
        span: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("rewrite failed: {0}")]
    Rewrite(#[from] EditError),

    #[error("{0:#}")]
    Io(anyhow::Error),

    #[error("blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl DocumentError {
    /// The stage the document was in when it failed.
    pub fn stage(&self) -> Stage {
        match self {
            DocumentError::Parse(e) => e.stage,
            DocumentError::Canonicalize { .. } => Stage::Canonicalizing,
            DocumentError::Rewrite(_) => Stage::Rewriting,
            DocumentError::Io(_) => Stage::Idle,
            DocumentError::Task(_) => Stage::Failed,
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            DocumentError::Rewrite(e) => e.exit_code(),
            _ => 1,
        }
    }
}

/// Result of one document run.
#[derive(Debug, Clone)]
pub struct DocumentOutcome {
    pub source: Source,
    pub original: String,
    pub output: String,

    /// Every class list found, in document order.
    pub spans: Vec<ResolvedSpan>,

    /// Canonical form of each span, index-aligned with `spans`.
    pub canonical: Vec<String>,

    pub written: bool,
    pub backup: Option<String>,
}

impl DocumentOutcome {
    pub fn changed(&self) -> bool {
        self.original != self.output
    }

    /// Spans whose canonical form differs from the original text.
    pub fn changed_spans(&self) -> impl Iterator<Item = (&ResolvedSpan, &str)> {
        self.spans
            .iter()
            .zip(&self.canonical)
            .filter(|(span, canonical)| span.text != **canonical)
            .map(|(span, canonical)| (span, canonical.as_str()))
    }

    pub fn report(&self) -> DocumentReport {
        let index = LineIndex::new(&self.original);
        let mut report = DocumentReport::new(self.source.to_string());
        report.changed = self.changed();
        report.spans_total = self.spans.len() as u64;
        report.spans = self
            .changed_spans()
            .map(|(span, canonical)| SpanReport {
                origin: span.origin,
                range: span.document_range,
                position: index.position(span.document_range.start),
                before: span.text.clone(),
                after: canonical.to_string(),
            })
            .collect();
        report
    }

    pub fn patch(&self) -> String {
        render_patch(&self.source.to_string(), &self.original, &self.output)
    }
}

/// One entry of a batch: the source and how it ended.
#[derive(Debug)]
pub struct BatchEntry {
    pub source: Source,
    pub result: Result<DocumentOutcome, DocumentError>,
}

impl BatchEntry {
    /// Report for `--check`, including failed documents.
    pub fn report(&self) -> DocumentReport {
        match &self.result {
            Ok(outcome) => outcome.report(),
            Err(err) => {
                let mut report = DocumentReport::new(self.source.to_string());
                report.error = Some(err.to_string());
                report
            }
        }
    }
}

/// A configured pipeline: compiled grammars plus a canonicalizer.
#[derive(Clone)]
pub struct Engine {
    locator: Arc<Locator>,
    canonicalizer: Arc<dyn Canonicalizer>,
    canonicalize_concurrency: usize,
}

impl Engine {
    pub fn new(settings: &RunSettings, canonicalizer: Arc<dyn Canonicalizer>) -> Result<Self, GrammarError> {
        let grammars = Grammars::new(&settings.class_names)?;
        Ok(Self::with_locator(
            Locator::new(Arc::new(grammars)),
            canonicalizer,
            settings.canonicalize_concurrency,
        ))
    }

    pub fn with_locator(
        locator: Locator,
        canonicalizer: Arc<dyn Canonicalizer>,
        canonicalize_concurrency: usize,
    ) -> Self {
        Self {
            locator: Arc::new(locator),
            canonicalizer,
            canonicalize_concurrency: canonicalize_concurrency.max(1),
        }
    }

    /// Run one document in memory. Nothing is written.
    pub async fn run_document(&self, source: Source, text: String) -> Result<DocumentOutcome, DocumentError> {
        let locator = Arc::clone(&self.locator);
        let (original, located) = tokio::task::spawn_blocking(move || {
            let located = locator.locate(&text);
            (text, located)
        })
        .await?;
        let spans = located?.spans;
        debug!(stage = %Stage::Canonicalizing, spans = spans.len(), "canonicalizing");

        let canonical: Vec<String> = stream::iter(spans.iter())
            .map(|span| async move {
                self.canonicalizer
                    .canonicalize(&span.text)
                    .await
                    .and_then(|canonical| {
                        anyhow::ensure!(!canonical.trim().is_empty(), "canonicalizer returned no classes");
                        Ok(canonical)
                    })
                    .map_err(|source| DocumentError::Canonicalize {
                        span: span.text.clone(),
                        source,
                    })
            })
            .buffered(self.canonicalize_concurrency)
            .try_collect()
            .await?;

        let edits: Vec<Edit> = spans
            .iter()
            .zip(&canonical)
            .map(|(span, canonical)| Edit::new(span.document_range, canonical.as_str()))
            .collect();
        let output = apply_edits(&original, &edits).map_err(EditError::from)?;
        debug!(stage = %Stage::Done, changed = original != output, "document done");

        Ok(DocumentOutcome {
            source,
            original,
            output,
            spans,
            canonical,
            written: false,
            backup: None,
        })
    }

    /// Read, run and (in [`RunMode::Write`]) write back every source.
    ///
    /// At most `jobs` documents are in flight. Entries come back in input
    /// order, and a failed document never affects the others.
    pub async fn run_batch<P>(&self, sources: Vec<Source>, port: Arc<P>, mode: RunMode, jobs: usize) -> Vec<BatchEntry>
    where
        P: DocumentSource + WritePort + ?Sized + 'static,
    {
        stream::iter(sources)
            .map(|source| {
                let span = info_span!("document", source = %source);
                let port = Arc::clone(&port);
                async move {
                    let result = self.process(&source, port, mode).await;
                    if let Err(err) = &result {
                        error!(stage = %err.stage(), "{err}");
                    }
                    BatchEntry { source, result }
                }
                .instrument(span)
            })
            .buffered(jobs.max(1))
            .collect()
            .await
    }

    async fn process<P>(&self, source: &Source, port: Arc<P>, mode: RunMode) -> Result<DocumentOutcome, DocumentError>
    where
        P: DocumentSource + WritePort + ?Sized + 'static,
    {
        let text = {
            let port = Arc::clone(&port);
            let source = source.clone();
            tokio::task::spawn_blocking(move || port.read(&source)).await?
        }
        .map_err(DocumentError::Io)?;
        let sha = sha256_hex(text.as_bytes());
        let mut outcome = self.run_document(source.clone(), text).await?;

        if mode == RunMode::Write && outcome.changed() {
            if let Source::File(path) = source {
                let target = path.clone();
                let output = outcome.output.clone();
                outcome.backup =
                    tokio::task::spawn_blocking(move || port.write_document(&target, &sha, &output)).await??;
                outcome.written = true;
                info!(%path, spans = outcome.changed_spans().count(), "wrote");
            }
        }
        Ok(outcome)
    }
}

/// Build an engine and its canonicalizer from settings.
pub fn engine_from_settings(settings: &RunSettings) -> anyhow::Result<Engine> {
    let canonicalizer = crate::adapters::build_canonicalizer(&settings.canonicalizer)?;
    Ok(Engine::new(settings, canonicalizer)?)
}
