use std::path::PathBuf;

use clap::Args;
use dialoguer::{Input, Select, theme::ColorfulTheme};
use eyre::{Context, Result, bail};
use rapper_manifest::{Manifest, Style, starter_manifest};

use super::UnwrapOrExit;

#[derive(Args)]
pub struct InitCommand {
    /// Where to write the manifest
    #[arg(short, long, default_value = "rapper.toml")]
    pub config: PathBuf,

    /// Integration style for generated code
    #[arg(short, long)]
    pub style: Option<Style>,

    /// Rap repository endpoint, e.g. http://rap2api.taobao.org/repository/get?id=3
    #[arg(long)]
    pub api_url: Option<String>,

    /// Overwrite an existing manifest
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    pub fn run(&self) -> Result<()> {
        if self.config.exists() && !self.force {
            bail!(
                "{} already exists; pass --force to overwrite it",
                self.config.display()
            );
        }

        let style = match self.style {
            Some(style) => style,
            None => Self::prompt_style()?,
        };
        let api_url = match &self.api_url {
            Some(url) => url.clone(),
            None => Self::prompt_api_url()?,
        };

        let content = starter_manifest(style, &api_url);
        // Refuse to write a manifest the next sync would reject.
        Manifest::from_str_with_filename(&content, &self.config.display().to_string())
            .unwrap_or_exit();

        if let Some(parent) = self.config.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&self.config, content)
            .wrap_err_with(|| format!("Failed to write {}", self.config.display()))?;

        println!("Created {}", self.config.display());
        println!();
        println!("Next steps:");
        println!("  rapper sync");

        Ok(())
    }

    fn prompt_style() -> Result<Style> {
        let styles = [Style::Normal, Style::Redux];
        let labels = ["normal (typed fetch functions)", "redux (fetch plus redux hooks)"];
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Select an integration style")
            .items(&labels)
            .default(0)
            .interact()
            .wrap_err("Failed to get style selection")?;

        Ok(styles[selection.min(styles.len() - 1)])
    }

    fn prompt_api_url() -> Result<String> {
        Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Rap repository endpoint")
            .interact_text()
            .wrap_err("Failed to read the repository endpoint")
    }
}
