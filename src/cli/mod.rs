// Command-line interface
//
// Thin presentation layer over the library core: it owns terminal output,
// file artifacts, and the one-run-at-a-time discipline the pipeline
// documents as a precondition.

mod render;

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use tokio::sync::mpsc;

use crate::analysis::analyze_output;
use crate::catalog::{
    default_catalog, load_defs_from_file, ActiveOption, ActiveOptionSet, CatalogStore, SectionSpec,
};
use crate::config::Settings;
use crate::gateway::{GeminiModel, ScriptModel};
use crate::improve::ImprovementLoop;
use crate::pipeline::{AssemblyEvent, ScriptAssembler};
use crate::selection::SelectionState;

/// Default name for the generated script artifact.
const SCRIPT_FILE_NAME: &str = "hardening.sh";

#[derive(Parser)]
#[command(
    name = "hardshell",
    version,
    about = "AI-assisted Linux hardening script generator"
)]
pub struct Cli {
    /// Load the option catalog from a TOML file instead of the built-in set
    #[arg(long, global = true, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the hardening option catalog
    List,
    /// Generate a hardening script from selected options
    Generate {
        /// Option ids to select; selecting a parent selects its subtree
        #[arg(short = 'O', long = "option", value_name = "ID")]
        options: Vec<String>,
        /// Free-text request appended as a final custom section
        #[arg(long, value_name = "TEXT")]
        custom: Option<String>,
        /// Where to write the script
        #[arg(short, long, default_value = SCRIPT_FILE_NAME)]
        output: PathBuf,
    },
    /// Score captured script-execution output
    Analyze {
        /// File with captured output
        file: PathBuf,
    },
    /// Self-critique a generated script and learn improved prompts
    Improve {
        /// The previously generated script
        #[arg(long)]
        script: PathBuf,
        /// Option ids the script was generated from
        #[arg(short = 'O', long = "option", value_name = "ID")]
        options: Vec<String>,
        /// Regenerate with the improved prompts in the same session
        #[arg(long)]
        regenerate: bool,
        /// Where to write the regenerated script
        #[arg(short, long, default_value = SCRIPT_FILE_NAME)]
        output: PathBuf,
    },
}

pub async fn run(cli: Cli, settings: Settings) -> Result<()> {
    let mut catalog = match &cli.catalog {
        Some(path) => CatalogStore::from_defs(&load_defs_from_file(path)?)?,
        None => default_catalog(),
    };

    match cli.command {
        Command::List => {
            render::print_catalog(&catalog, None);
            Ok(())
        }
        Command::Generate {
            options,
            custom,
            output,
        } => {
            let model = build_model(&settings)?;
            let active = select_active(&catalog, &options, custom.as_deref())?;
            let script = run_pipeline(model, &active).await?;
            write_script(&output, &script.script)?;
            if script.reboot_recommended {
                println!(
                    "{}",
                    "A reboot is recommended after running this script.".yellow()
                );
            }
            println!("Wrote {} ({} steps)", output.display(), script.steps);
            Ok(())
        }
        Command::Analyze { file } => {
            let model = build_model(&settings)?;
            let captured = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let report = analyze_output(model, &captured).await?;
            render::print_analysis(&report);
            Ok(())
        }
        Command::Improve {
            script,
            options,
            regenerate,
            output,
        } => {
            let model = build_model(&settings)?;
            let script_text = fs::read_to_string(&script)
                .with_context(|| format!("Failed to read {}", script.display()))?;
            let active = active_from_ids(&catalog, &options)?;

            let looper = ImprovementLoop::new(model.clone());
            let outcome = looper
                .improve_and_learn(&mut catalog, &script_text, &active)
                .await?;

            for line in &outcome.summary {
                println!("  - {line}");
            }
            if outcome.learned() {
                println!(
                    "{} {}",
                    "Refined prompts for:".green(),
                    outcome.applied_ids.join(", ")
                );
                for id in &outcome.applied_ids {
                    if let Some(node) = catalog.get(id) {
                        println!("\n[{id}]\n{}", node.prompt);
                    }
                }
            } else {
                println!("No prompt refinements were returned.");
            }

            if regenerate {
                let active = select_active(&catalog, &options, None)?;
                let script = run_pipeline(model, &active).await?;
                write_script(&output, &script.script)?;
                println!("Regenerated {}", output.display());
            } else {
                write_script(&output, &outcome.corrected_script)?;
                println!("Wrote corrected script to {}", output.display());
            }
            Ok(())
        }
    }
}

fn build_model(settings: &Settings) -> Result<Arc<dyn ScriptModel>> {
    let mut model = GeminiModel::new(settings.api_key.clone())?;
    if let Some(name) = &settings.model {
        model = model.with_model(name.clone());
    }
    if let Some(url) = &settings.base_url {
        model = model.with_base_url(url.clone());
    }
    Ok(Arc::new(model))
}

/// Toggle the requested ids through the selection engine and capture the
/// active set.
fn select_active(
    catalog: &CatalogStore,
    ids: &[String],
    custom: Option<&str>,
) -> Result<ActiveOptionSet> {
    let mut selection = SelectionState::new(catalog);
    for id in ids {
        // A parent listed before its children may have selected them
        // already; only toggle options that are still off.
        if !selection.is_selected(id) {
            selection.toggle(catalog, id)?;
        }
    }
    Ok(ActiveOptionSet::capture(catalog, &selection, custom))
}

/// Catalog-backed active options for an improvement pass, carrying the
/// catalog's current prompt text.
fn active_from_ids(catalog: &CatalogStore, ids: &[String]) -> Result<Vec<ActiveOption>> {
    let mut active = Vec::new();
    for id in ids {
        let node = match catalog.get(id) {
            Some(node) => node,
            None => bail!("unknown option id: {id}"),
        };
        if node.prompt.trim().is_empty() {
            continue;
        }
        active.push(ActiveOption::Catalog(SectionSpec {
            id: node.id.clone(),
            label: node.label.clone(),
            prompt: node.prompt.clone(),
        }));
    }
    Ok(active)
}

async fn run_pipeline(
    model: Arc<dyn ScriptModel>,
    active: &ActiveOptionSet,
) -> Result<crate::pipeline::AssembledScript> {
    let assembler = ScriptAssembler::new(model);
    let (tx, mut rx) = mpsc::unbounded_channel();

    let bar = render::generation_bar((active.len() + 2) as u64);
    let bar_task = {
        let bar = bar.clone();
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                match event {
                    AssemblyEvent::Step(progress) => {
                        bar.set_position(progress.step as u64 - 1);
                        bar.set_message(progress.message);
                    }
                    AssemblyEvent::ScriptSoFar(text) => {
                        bar.set_position(bar.position() + 1);
                        tracing::debug!(bytes = text.len(), "script accumulated");
                    }
                }
            }
        })
    };

    let result = assembler.generate(active, Some(&tx)).await;
    drop(tx);
    let _ = bar_task.await;
    bar.finish_and_clear();

    Ok(result?)
}

fn write_script(path: &PathBuf, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}
