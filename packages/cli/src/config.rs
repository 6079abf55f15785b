use serde::{Deserialize, Serialize};
use sprig_parser::ParseOptions;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_CONFIG_NAME: &str = "sprig.config.json";

/// Sprig configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// File extensions treated as sprig sources when checking directories
    #[serde(default = "default_source_extensions")]
    pub source_extensions: Vec<String>,

    /// Default parse options, overridable from the command line
    #[serde(default)]
    pub parse: ParseOptions,
}

fn default_source_extensions() -> Vec<String> {
    ["sprig", "lisp", "scm", "sexp"]
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            info!(path = %config_path.display(), "loaded config");
            Ok(config)
        } else {
            debug!(path = %config_path.display(), "no config file, using defaults");
            Ok(Config::default())
        }
    }

    /// Whether `path` has one of the configured source extensions
    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.source_extensions.iter().any(|known| known == ext))
            .unwrap_or(false)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_extensions: default_source_extensions(),
            parse: ParseOptions::default(),
        }
    }
}
