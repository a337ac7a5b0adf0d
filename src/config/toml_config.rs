use crate::config::PatchSettings;
use crate::utils::error::{PatchError, Result};
use crate::utils::validation::validate_required_field;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub target: Option<TargetConfig>,
    pub rule: Option<RuleConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub comment: Option<String>,
    pub comment_indent: Option<String>,
    pub malformed_escape: Option<String>,
    pub closing_fragment: Option<String>,
    pub lookback_lines: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub atomic_write: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| PatchError::ConfigError {
            message: format!("cannot read config file {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML after expanding `${VAR}` references from the environment.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    // Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PatchError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Overlays the values present in this file onto `settings`.
    pub fn apply_to(&self, settings: &mut PatchSettings) -> Result<()> {
        if let Some(target) = &self.target {
            let path = validate_required_field("target.path", &target.path)?;
            settings.target = path.clone();
        }

        if let Some(rule) = &self.rule {
            if let Some(comment) = &rule.comment {
                settings.rule.comment = comment.clone();
            }
            if let Some(indent) = &rule.comment_indent {
                settings.rule.comment_indent = indent.clone();
            }
            if let Some(escape) = &rule.malformed_escape {
                settings.rule.malformed_escape = escape.clone();
            }
            if let Some(fragment) = &rule.closing_fragment {
                settings.rule.closing_fragment = fragment.clone();
            }
            if let Some(lines) = rule.lookback_lines {
                settings.rule.lookback_lines = lines;
            }
        }

        if let Some(atomic) = self.output.as_ref().and_then(|o| o.atomic_write) {
            settings.atomic_write = atomic;
        }

        Ok(())
    }
}
