use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use rapper_core::Version;
use rapper_manifest::{RapperToml, Style};
use tracing::warn;

use super::UnwrapOrExit;
use crate::{
    catalog::HttpCatalog,
    ops::{self, SyncOptions},
    prompt::TerminalConfirm,
    release::CratesIo,
    reports::{Report, SyncOutcome, TerminalOutput},
};

#[derive(Args)]
pub struct SyncCommand {
    /// Path to rapper.toml (defaults to ./rapper.toml)
    #[arg(short, long, default_value = "rapper.toml")]
    pub config: PathBuf,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Answer yes to every confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Integration style (overrides rapper.toml setting)
    #[arg(short, long)]
    pub style: Option<Style>,

    /// Do not look for a newer rapper release
    #[arg(long)]
    pub skip_update_check: bool,
}

impl SyncCommand {
    pub async fn run(&self) -> Result<()> {
        let rapper_toml = RapperToml::open(&self.config).unwrap_or_exit();
        let root = rapper_toml.root().to_path_buf();
        let mut manifest = rapper_toml.into_manifest();
        if let Some(style) = self.style {
            manifest = manifest.with_style(style);
        }

        let mut out = TerminalOutput::new();
        let running = Version::current();
        if !self.skip_update_check {
            Self::report_upgrade(&running, &mut out).await;
        }

        let catalog = HttpCatalog::new(&manifest.rapper.api_url)?;
        let mut confirm = TerminalConfirm::new(self.yes);
        let opts = SyncOptions {
            root: &root,
            dry_run: self.dry_run,
            version: running,
        };

        let outcome = ops::sync(&manifest, &catalog, &mut confirm, opts)
            .await
            .wrap_err("Sync failed")?;

        outcome.render(&mut out);

        // Partial writes leave a mixed tree; make that visible to scripts.
        if matches!(&outcome, SyncOutcome::Synced(report) if !report.is_complete()) {
            std::process::exit(1);
        }

        Ok(())
    }

    async fn report_upgrade(running: &Version, out: &mut TerminalOutput) {
        let index = match CratesIo::new() {
            Ok(index) => index,
            Err(e) => {
                warn!(error = %e, "Could not check for a newer rapper release.");
                return;
            }
        };
        if let Some(hint) = ops::upgrade_hint(&index, running).await {
            hint.render(out);
        }
    }
}
