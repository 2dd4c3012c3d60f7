mod check;
mod completions;
mod init;
mod sync;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use init::InitCommand;
use sync::SyncCommand;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for rapper_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "rapper")]
#[command(version)]
#[command(about = "Generate typed request code from a Rap interface catalog")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RAPPER_LOG overrides it
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn verbose(&self) -> u8 {
        self.verbose
    }

    pub async fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Sync(cmd) => cmd.run().await,
            Commands::Check(cmd) => cmd.run().await,
            Commands::Init(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the catalog and regenerate the request code
    Sync(SyncCommand),

    /// Report drift and version conflicts without writing anything
    Check(CheckCommand),

    /// Write a starter rapper.toml
    Init(InitCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
