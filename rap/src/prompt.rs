//! Operator confirmations asked by the sync operation.

use dialoguer::theme::ColorfulTheme;
use eyre::{Context, Result};
use rapper_codegen::drift::{ChangedFile, DependencyUsageRecord};
use tracing::info;

/// A decision the operator has to make before files are overwritten.
#[derive(Debug, Clone, Copy)]
pub enum Question<'a> {
    /// Previously generated files no longer match their markers.
    OverwriteEdits(&'a [ChangedFile]),
    /// Consumer code references interfaces that were removed or changed.
    BreakDependencies(&'a [DependencyUsageRecord]),
}

impl Question<'_> {
    pub fn prompt(&self) -> &'static str {
        match self {
            Question::OverwriteEdits(_) => {
                "These generated files were edited by hand. Overwrite them?"
            }
            Question::BreakDependencies(_) => {
                "These files use interfaces that were removed or changed in Rap. Regenerate anyway?"
            }
        }
    }

    /// One line per finding, shown before the prompt.
    pub fn details(&self) -> Vec<String> {
        match self {
            Question::OverwriteEdits(files) => files
                .iter()
                .map(|file| file.path.display().to_string())
                .collect(),
            Question::BreakDependencies(findings) => findings
                .iter()
                .map(|f| {
                    format!(
                        "{} ({}) at {}:{}:{}",
                        f.interface_key,
                        f.reason,
                        f.file_path.display(),
                        f.line,
                        f.column
                    )
                })
                .collect(),
        }
    }
}

/// Answers [`Question`]s. Returning `false` cancels the run.
pub trait Confirm {
    fn confirm(&mut self, question: &Question<'_>) -> Result<bool>;
}

/// Interactive terminal prompt; `--yes` answers every question up front.
pub struct TerminalConfirm {
    assume_yes: bool,
}

impl TerminalConfirm {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, question: &Question<'_>) -> Result<bool> {
        for line in question.details() {
            eprintln!("  {}", line);
        }

        if self.assume_yes {
            info!(prompt = question.prompt(), "Confirmed by --yes.");
            return Ok(true);
        }

        dialoguer::Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(question.prompt())
            .default(false)
            .interact()
            .wrap_err("Failed to read confirmation")
    }
}
