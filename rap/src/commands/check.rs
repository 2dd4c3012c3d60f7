use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use rapper_core::Version;
use rapper_manifest::RapperToml;

use super::UnwrapOrExit;
use crate::{
    catalog::HttpCatalog,
    ops::{self, CheckOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to rapper.toml (defaults to ./rapper.toml)
    #[arg(short, long, default_value = "rapper.toml")]
    pub config: PathBuf,

    /// Do not contact the catalog; skips the dependency scan
    #[arg(long)]
    pub offline: bool,
}

impl CheckCommand {
    pub async fn run(&self) -> Result<()> {
        let rapper_toml = RapperToml::open(&self.config).unwrap_or_exit();
        let manifest = rapper_toml.manifest();

        let catalog = HttpCatalog::new(&manifest.rapper.api_url)?;
        let opts = CheckOptions {
            root: rapper_toml.root(),
            offline: self.offline,
            version: Version::current(),
        };
        let report = ops::check(manifest, &catalog, opts)
            .await
            .wrap_err("Check failed")?;

        println!("✓ {} is valid\n", self.config.display());
        report.render(&mut TerminalOutput::new());

        if !report.is_clean() {
            std::process::exit(1);
        }

        Ok(())
    }
}
