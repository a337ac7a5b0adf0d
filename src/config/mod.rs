pub mod cli;
pub mod toml_config;

use crate::domain::model::{PatchRule, DEFAULT_TARGET};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_single_line,
    Validate,
};

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchSettings {
    pub target: String,
    pub rule: PatchRule,
    pub atomic_write: bool,
}

impl Default for PatchSettings {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            rule: PatchRule::default(),
            atomic_write: false,
        }
    }
}

impl Validate for PatchSettings {
    fn validate(&self) -> Result<()> {
        validate_path("target.path", &self.target)?;
        validate_non_empty_string("rule.comment", &self.rule.comment)?;
        validate_single_line("rule.comment", &self.rule.comment)?;
        validate_single_line("rule.comment_indent", &self.rule.comment_indent)?;
        validate_non_empty_string("rule.malformed_escape", &self.rule.malformed_escape)?;
        validate_non_empty_string("rule.closing_fragment", &self.rule.closing_fragment)?;
        // the window must reach the line above the fragment to see an inserted comment
        validate_positive_number("rule.lookback_lines", self.rule.lookback_lines, 2)?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "jsx-lint-patch")]
#[command(about = "Repairs the exhaustive-deps suppression comment in EmployerView.jsx")]
pub struct CliConfig {
    /// File to patch, relative to the working directory
    #[arg(long)]
    pub path: Option<String>,

    /// TOML file overriding the target and rule literals
    #[arg(long)]
    pub config: Option<String>,

    /// Show what would change without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Write through a temporary file and rename it over the target
    #[arg(long)]
    pub atomic: bool,

    /// Print the patch report as JSON
    #[arg(long)]
    pub json: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Defaults, then the TOML file, then flags.
    pub fn resolve(&self) -> Result<PatchSettings> {
        let mut settings = PatchSettings::default();

        if let Some(config_path) = &self.config {
            tracing::info!("Loading configuration from {}", config_path);
            TomlConfig::from_file(config_path)?.apply_to(&mut settings)?;
        }

        if let Some(path) = &self.path {
            settings.target = path.clone();
        }
        if self.atomic {
            settings.atomic_write = true;
        }

        settings.validate()?;
        Ok(settings)
    }
}
