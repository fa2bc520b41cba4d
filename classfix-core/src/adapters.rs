//! Default port implementations: canonicalizers and document I/O.

use crate::pipeline::Source;
use crate::ports::{Canonicalizer, DocumentSource, WritePort};
use crate::settings::{CanonicalizerKind, CanonicalizerSettings};
use anyhow::{Context, bail};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use classfix_edit::{EditError, EditResult, WriteOptions, sha256_hex, write_if_unchanged};
use fs_err as fs;
use std::collections::BTreeMap;
use std::io::Read;
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Build the canonicalizer selected by `settings.kind`.
pub fn build_canonicalizer(settings: &CanonicalizerSettings) -> anyhow::Result<Arc<dyn Canonicalizer>> {
    let canonicalizer: Arc<dyn Canonicalizer> = match settings.kind {
        CanonicalizerKind::Alphabetical => Arc::new(AlphabeticalCanonicalizer),
        CanonicalizerKind::Prettier => Arc::new(PrettierCanonicalizer::new(&settings.prettier)?),
        CanonicalizerKind::Command => Arc::new(
            CommandCanonicalizer::new(&settings.command)
                .context("canonicalizer kind `command` needs [canonicalizer] command")?,
        ),
    };
    debug!(kind = %settings.kind, "built canonicalizer");
    Ok(canonicalizer)
}

/// Sorts tokens lexicographically and joins them with single spaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlphabeticalCanonicalizer;

#[async_trait]
impl Canonicalizer for AlphabeticalCanonicalizer {
    async fn canonicalize(&self, classes: &str) -> anyhow::Result<String> {
        let mut tokens: Vec<&str> = classes.split_whitespace().collect();
        tokens.sort_unstable();
        Ok(tokens.join(" "))
    }
}

/// Pipes the class list through an external program: stdin in, stdout out.
#[derive(Debug, Clone)]
pub struct CommandCanonicalizer {
    program: String,
    args: Vec<String>,
}

impl CommandCanonicalizer {
    pub fn new(argv: &[String]) -> anyhow::Result<Self> {
        let (program, args) = argv.split_first().context("canonicalizer command is empty")?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

#[async_trait]
impl Canonicalizer for CommandCanonicalizer {
    async fn canonicalize(&self, classes: &str) -> anyhow::Result<String> {
        let out = run_filter(&self.program, &self.args, classes).await?;
        let out = out.trim_end_matches(['\n', '\r']);
        anyhow::ensure!(!out.trim().is_empty(), "`{}` printed no classes", self.program);
        Ok(out.to_string())
    }
}

/// Sorts with prettier and `prettier-plugin-tailwindcss`.
///
/// The class list is formatted as the attribute of a one-element HTML
/// document; prettier resolves the project's own configuration from the
/// working directory.
#[derive(Debug, Clone)]
pub struct PrettierCanonicalizer {
    program: String,
    args: Vec<String>,
}

const PRETTIER_PREFIX: &str = "<div class=\"";
const PRETTIER_SUFFIX: &str = "\"></div>";

impl PrettierCanonicalizer {
    pub fn new(invocation: &[String]) -> anyhow::Result<Self> {
        let (program, base) = invocation.split_first().context("prettier invocation is empty")?;
        let mut args = base.to_vec();
        args.extend(
            [
                "--stdin-filepath",
                "classfix.html",
                "--plugin",
                "prettier-plugin-tailwindcss",
                "--print-width",
                "99999",
            ]
            .map(String::from),
        );
        Ok(Self {
            program: program.clone(),
            args,
        })
    }
}

#[async_trait]
impl Canonicalizer for PrettierCanonicalizer {
    async fn canonicalize(&self, classes: &str) -> anyhow::Result<String> {
        let input = format!("{PRETTIER_PREFIX}{classes}{PRETTIER_SUFFIX}");
        let out = run_filter(&self.program, &self.args, &input).await?;
        unwrap_prettier(&out)
            .map(str::to_string)
            .with_context(|| format!("prettier output lost the class wrapper: {out:?}"))
    }
}

fn unwrap_prettier(out: &str) -> Option<&str> {
    out.trim_end()
        .strip_prefix(PRETTIER_PREFIX)?
        .strip_suffix(PRETTIER_SUFFIX)
}

async fn run_filter(program: &str, args: &[String], input: &str) -> anyhow::Result<String> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("spawn {program}"))?;

    let mut stdin = child.stdin.take().context("child stdin not captured")?;
    let feed = async move {
        let res = stdin.write_all(input.as_bytes()).await;
        drop(stdin);
        res
    };
    let (fed, output) = tokio::join!(feed, child.wait_with_output());
    let output = output.with_context(|| format!("wait for {program}"))?;
    fed.with_context(|| format!("write to {program}"))?;

    if !output.status.success() {
        bail!(
            "{program} exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    String::from_utf8(output.stdout).with_context(|| format!("{program} printed invalid UTF-8"))
}

/// Reads files and stdin; writes files back guarded by their sha256.
#[derive(Debug, Clone, Default)]
pub struct FsDocumentPort {
    pub backup_suffix: Option<String>,
}

impl FsDocumentPort {
    pub fn new(backup_suffix: Option<String>) -> Self {
        Self { backup_suffix }
    }
}

impl DocumentSource for FsDocumentPort {
    fn read(&self, source: &Source) -> anyhow::Result<String> {
        match source {
            Source::Stdin => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("read stdin")?;
                Ok(text)
            }
            Source::File(path) => fs::read_to_string(path).with_context(|| format!("read {}", path)),
        }
    }
}

impl WritePort for FsDocumentPort {
    fn write_document(
        &self,
        path: &Utf8Path,
        expected_sha256: &str,
        contents: &str,
    ) -> EditResult<Option<String>> {
        let opts = WriteOptions {
            backup_suffix: self.backup_suffix.clone(),
        };
        write_if_unchanged(path, expected_sha256, contents, &opts)
    }
}

/// In-memory documents for embedding and testing.
///
/// Stdin is modelled as an optional buffer; files live in a sorted map so
/// listings are deterministic.
#[derive(Debug, Default)]
pub struct InMemoryDocumentPort {
    stdin: Option<String>,
    files: Mutex<BTreeMap<Utf8PathBuf, String>>,
}

impl InMemoryDocumentPort {
    pub fn new(files: impl IntoIterator<Item = (Utf8PathBuf, String)>) -> Self {
        Self {
            stdin: None,
            files: Mutex::new(files.into_iter().collect()),
        }
    }

    pub fn with_stdin(mut self, text: impl Into<String>) -> Self {
        self.stdin = Some(text.into());
        self
    }

    pub fn get(&self, path: &Utf8Path) -> Option<String> {
        self.lock().ok()?.get(path).cloned()
    }

    fn lock(&self) -> anyhow::Result<std::sync::MutexGuard<'_, BTreeMap<Utf8PathBuf, String>>> {
        self.files
            .lock()
            .map_err(|_| anyhow::anyhow!("in-memory document store poisoned"))
    }
}

impl DocumentSource for InMemoryDocumentPort {
    fn read(&self, source: &Source) -> anyhow::Result<String> {
        match source {
            Source::Stdin => self.stdin.clone().context("no stdin configured"),
            Source::File(path) => self
                .lock()?
                .get(path)
                .cloned()
                .with_context(|| format!("read {}: no such document", path)),
        }
    }
}

impl WritePort for InMemoryDocumentPort {
    fn write_document(
        &self,
        path: &Utf8Path,
        expected_sha256: &str,
        contents: &str,
    ) -> EditResult<Option<String>> {
        let mut files = self.lock()?;
        let current = files
            .get(path)
            .with_context(|| format!("write {}: no such document", path))?;
        let actual = sha256_hex(current.as_bytes());
        if actual != expected_sha256 {
            return Err(EditError::PreconditionMismatch {
                path: path.to_string(),
                expected: expected_sha256.to_string(),
                actual,
            });
        }
        files.insert(path.to_path_buf(), contents.to_string());
        Ok(None)
    }
}
