//! Project config (tilemap.yaml) parsing.
//!
//! The config supplies conversion defaults: cell size, output location and
//! JSON formatting. Command-line flags override anything set here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TilemapError};

/// File name looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE: &str = "tilemap.yaml";

/// Side length of a square cell when nothing else is configured.
pub const DEFAULT_CELL_SIZE: u32 = 16;

/// Conversion settings loaded from tilemap.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Side length of a square cell in pixels.
    pub cell_size: u32,

    /// Directory the map document is written into (created if absent).
    pub output: PathBuf,

    /// Name of the map document inside `output`.
    pub file_name: String,

    /// Classify cells on the rayon thread pool.
    pub parallel: bool,

    /// Pretty-print the JSON instead of writing it on one line.
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            output: PathBuf::from("results"),
            file_name: "map.json".to_string(),
            parallel: false,
            pretty: false,
        }
    }
}

impl Config {
    /// Load config from a tilemap.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| TilemapError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Load `tilemap.yaml` from `dir` if present, defaults otherwise.
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).map_err(|e| TilemapError::Config {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILE)),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.cell_size == 0 {
            return Err(TilemapError::Config {
                message: "Cell size must be non-zero".to_string(),
                help: Some("Set cell_size to a positive number of pixels, e.g. 16".to_string()),
            });
        }
        if self.file_name.is_empty() {
            return Err(TilemapError::Config {
                message: "Output file name must not be empty".to_string(),
                help: Some("Set file_name, e.g. map.json".to_string()),
            });
        }
        Ok(())
    }

    /// Full path of the map document.
    pub fn output_path(&self) -> PathBuf {
        self.output.join(&self.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.cell_size, 16);
        assert_eq!(config.output, PathBuf::from("results"));
        assert_eq!(config.file_name, "map.json");
        assert!(!config.parallel);
        assert!(!config.pretty);
        assert_eq!(config.output_path(), PathBuf::from("results").join("map.json"));
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = Config::parse("cell_size: 8").unwrap();

        assert_eq!(config.cell_size, 8);
        assert_eq!(config.output, PathBuf::from("results"));
        assert_eq!(config.file_name, "map.json");
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
cell_size: 32
output: build/maps
file_name: level1.json
parallel: true
pretty: true
"#;
        let config = Config::parse(yaml).unwrap();

        assert_eq!(config.cell_size, 32);
        assert_eq!(config.output, PathBuf::from("build/maps"));
        assert_eq!(config.file_name, "level1.json");
        assert!(config.parallel);
        assert!(config.pretty);
    }

    #[test]
    fn test_parse_zero_cell_size() {
        let err = Config::parse("cell_size: 0").unwrap_err();
        assert!(matches!(err, TilemapError::Config { .. }));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        assert!(Config::parse("cell_size: [").is_err());
    }

    #[test]
    fn test_parse_wrong_type() {
        assert!(Config::parse("cell_size: big").is_err());
    }

    #[test]
    fn test_discover_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        assert_eq!(Config::discover(dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn test_discover_reads_file() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "cell_size: 24\npretty: true\n").unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.cell_size, 24);
        assert!(config.pretty);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = Config::load(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, TilemapError::Io { .. }));
    }
}
