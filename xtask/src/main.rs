use anyhow::Context;
use clap::{Parser, Subcommand};
use classfix_grammar::QuerySources;
use classfix_types::ClassNames;
use fs_err as fs;
use serde::Deserialize;
use std::process::Command as ProcessCommand;

#[derive(Debug, Parser)]
#[command(name = "xtask", about = "Workspace helper tasks")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the tree-sitter queries rendered for a config.
    PrintQueries {
        /// classfix.toml whose [classes] section to render.
        #[arg(long)]
        config: Option<String>,
    },
    /// Print schema identifiers used by classfix.
    PrintSchemas,
    /// Bless golden fixtures (overwrite expected outputs).
    BlessFixtures,
}

/// The part of classfix.toml that shapes the queries.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QueryConfig {
    classes: ClassNames,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::PrintQueries { config } => {
            let names = match config {
                Some(path) => {
                    let text = fs::read_to_string(&path)?;
                    toml::from_str::<QueryConfig>(&text)
                        .with_context(|| format!("parse {path}"))?
                        .classes
                }
                None => ClassNames::default(),
            };
            let sources = QuerySources::render(&names);
            println!(";; directive\n{}", sources.directive);
            match sources.markup {
                Some(markup) => println!(";; markup\n{markup}"),
                None => println!(";; markup: no class attributes configured"),
            }
            println!(";; script\n{}", sources.script);
        }
        Command::PrintSchemas => {
            println!("{}", classfix_types::schema::CLASSFIX_CHECK_V1);
        }
        Command::BlessFixtures => {
            let status = ProcessCommand::new("cargo")
                .args(["test", "-p", "classfix-core", "--test", "golden_fixtures"])
                .env("CLASSFIX_BLESS", "1")
                .status()
                .context("run golden fixture blessing")?;
            if !status.success() {
                anyhow::bail!("bless-fixtures failed");
            }
        }
    }
    Ok(())
}
