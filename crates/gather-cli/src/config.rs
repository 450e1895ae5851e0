//! Optional TOML configuration: column layout and authority settings.
//!
//! ```toml
//! [layout]
//! title = 11
//!
//! [authorities]
//! sheet = "combined"
//! identifier_column = 18
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use gather_ingest::AuthoritySource;
use gather_model::FieldLayout;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Settings that may be read from `--config`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GatherConfig {
    pub layout: FieldLayout,
    pub authorities: AuthoritySource,
}

impl GatherConfig {
    /// Parse and validate a configuration document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.layout.validate()?;
        Ok(config)
    }
}

/// Load the configuration at `path`.
///
/// No path, or a path that does not exist, gives the defaults. A file that
/// exists but cannot be read or parsed is an error naming the file.
pub fn load_config(path: Option<&Path>) -> Result<GatherConfig> {
    let Some(path) = path else {
        return Ok(GatherConfig::default());
    };
    match fs::read_to_string(path) {
        Ok(content) => {
            let config = GatherConfig::from_toml(&content)
                .with_context(|| format!("invalid config {}", path.display()))?;
            info!(path = %path.display(), "loaded configuration");
            Ok(config)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(path = %path.display(), "no configuration file, using defaults");
            Ok(GatherConfig::default())
        }
        Err(e) => Err(e).with_context(|| format!("read config {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let config = GatherConfig::from_toml(
            "[layout]\ntitle = 11\n\n[authorities]\nsheet = \"combined\"\n",
        )
        .unwrap();
        assert_eq!(config.layout.title, 11);
        assert_eq!(config.layout.shelfmark, 5);
        assert_eq!(config.authorities.sheet, "combined");
        assert_eq!(config.authorities.identifier_column, 18);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(GatherConfig::from_toml("[layout]\ntitel = 11\n").is_err());
        assert!(GatherConfig::from_toml("[output]\nindent = 2\n").is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = load_config(Some(Path::new("/nonexistent/gather.toml"))).unwrap();
        assert_eq!(config, GatherConfig::default());
    }
}
