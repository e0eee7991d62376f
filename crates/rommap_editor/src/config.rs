//! Editor configuration persisted as JSON

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::layout::DEFAULT_MAX_MAP_CELLS;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Project-independent editor settings.
///
/// Unknown fields in the file are ignored and missing fields take their
/// defaults, so configs survive version skew in both directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Paint 3x3 brushes as self-connecting paths
    pub smart_paths_enabled: bool,
    /// Cap on `width * height` when creating or resizing a map
    pub max_map_cells: usize,
    pub default_border_width: i32,
    pub default_border_height: i32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            smart_paths_enabled: false,
            max_map_cells: DEFAULT_MAX_MAP_CELLS,
            default_border_width: 2,
            default_border_height: 2,
        }
    }
}

impl EditorConfig {
    /// Load from `path`, falling back to defaults when the file is missing
    /// or unreadable
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("could not load config: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert!(!config.smart_paths_enabled);
        assert_eq!(config.max_map_cells, 0x2800);
        assert_eq!(config.default_border_width, 2);
        assert_eq!(config.default_border_height, 2);
    }

    #[test]
    fn test_json_round_trip() {
        let config = EditorConfig {
            smart_paths_enabled: true,
            max_map_cells: 1024,
            default_border_width: 3,
            default_border_height: 4,
        };
        let json = serde_json::to_string_pretty(&config).unwrap();
        let decoded: EditorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, config);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let decoded: EditorConfig =
            serde_json::from_str(r#"{ "smart_paths_enabled": true }"#).unwrap();
        assert!(decoded.smart_paths_enabled);
        assert_eq!(decoded.max_map_cells, DEFAULT_MAX_MAP_CELLS);
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let config = EditorConfig::load(Path::new("/nonexistent/config.json")).unwrap();
        assert_eq!(config, EditorConfig::default());
    }
}
