//! Configuration: where data lives, where the catalog comes from, and how
//! files are parsed.
//!
//! The config file is stored in the platform-specific config folder:
//! - macOS: ~/Library/Application Support/org.data-mapper.Data-Mapper/
//! - Windows: %APPDATA%/data-mapper/Data Mapper/config/
//! - Linux: ~/.config/datamapper/

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use mapper_ingest::IngestOptions;
use mapper_ontology::{CatalogSource, FileCatalogSource, HttpCatalogSource};

use crate::error::{ConfigError, SessionError};
use crate::logging::LogSettings;

const APP_QUALIFIER: &str = "org";
const APP_ORG: &str = "data-mapper";
const APP_NAME: &str = "Data Mapper";
const CONFIG_FILENAME: &str = "config.toml";
const STORE_DIRNAME: &str = "store";

/// Catalog file read when nothing else is configured.
pub const DEFAULT_CATALOG_FILE: &str = "ontology-objects.json";

/// Where the ontology catalog is fetched from on a cache miss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogLocation {
    /// An HTTP(S) URL.
    Url(String),
    /// A local JSON file.
    Path(PathBuf),
}

impl Default for CatalogLocation {
    fn default() -> Self {
        Self::Path(PathBuf::from(DEFAULT_CATALOG_FILE))
    }
}

impl CatalogLocation {
    /// Builds the matching catalog source.
    pub fn source(&self) -> Result<Arc<dyn CatalogSource>, SessionError> {
        let source: Arc<dyn CatalogSource> = match self {
            Self::Url(url) => Arc::new(HttpCatalogSource::new(url.as_str())?),
            Self::Path(path) => Arc::new(FileCatalogSource::new(path)),
        };
        Ok(source)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Root of the local store. Defaults to the platform data directory.
    pub data_dir: Option<PathBuf>,
    pub catalog: CatalogLocation,
    pub ingest: IngestOptions,
    pub log: LogSettings,
}

impl MapperConfig {
    /// Directory the store is opened in.
    pub fn store_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().join(STORE_DIRNAME))
            .ok_or(ConfigError::NoProjectDir { kind: "data" })
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
}

/// Get the path to the config file.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load the config from its default location.
///
/// Returns defaults if the file is missing or unreadable, or if the
/// platform-specific directory cannot be determined.
pub fn load_config() -> MapperConfig {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config path, using defaults");
        return MapperConfig::default();
    };
    load_config_from(&path)
}

/// Load the config from `path`, falling back to defaults on any failure.
pub fn load_config_from(path: &Path) -> MapperConfig {
    match read_config(path) {
        Ok(Some(config)) => {
            tracing::info!("Loaded config from {:?}", path);
            config
        }
        Ok(None) => {
            tracing::info!("No config file found at {:?}, using defaults", path);
            MapperConfig::default()
        }
        Err(e) => {
            tracing::warn!("{}, using defaults", e);
            MapperConfig::default()
        }
    }
}

/// Read and parse the config at `path`. `Ok(None)` if the file does not exist.
pub fn read_config(path: &Path) -> Result<Option<MapperConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Io {
                operation: "read",
                path: path.to_path_buf(),
                source,
            });
        }
    };
    toml::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Save the config to its default location and return the path written.
pub fn save_config(config: &MapperConfig) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoProjectDir { kind: "config" })?;
    save_config_to(config, &path)?;
    Ok(path)
}

/// Save the config to `path`, creating the parent directory if needed.
pub fn save_config_to(config: &MapperConfig, path: &Path) -> Result<(), ConfigError> {
    let io_error = |operation, source| ConfigError::Io {
        operation,
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error("create directory for", e))?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content).map_err(|e| io_error("write", e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_path_exists() {
        assert!(config_path().is_some());
    }

    #[test]
    fn test_parse_url_catalog() {
        let config: MapperConfig = toml::from_str(
            r#"
data_dir = "/var/lib/mapper"

[catalog]
url = "https://example.org/ontology-objects.json"

[ingest]
infer_types = false
"#,
        )
        .unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/var/lib/mapper")));
        assert_eq!(
            config.catalog,
            CatalogLocation::Url("https://example.org/ontology-objects.json".to_string())
        );
        assert!(!config.ingest.infer_types);
        assert_eq!(config.ingest.max_file_bytes, mapper_ingest::MAX_FILE_BYTES);
        assert_eq!(config.store_dir().unwrap(), PathBuf::from("/var/lib/mapper"));
    }

    #[test]
    fn test_save_and_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILENAME);
        let config = MapperConfig {
            data_dir: Some(dir.path().join("data")),
            catalog: CatalogLocation::Path(dir.path().join("catalog.json")),
            ..MapperConfig::default()
        };

        save_config_to(&config, &path).unwrap();
        assert_eq!(read_config(&path).unwrap(), Some(config));
    }

    #[test]
    fn test_missing_and_invalid_files_fall_back() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(read_config(&missing).unwrap().is_none());
        assert_eq!(load_config_from(&missing), MapperConfig::default());

        let invalid = dir.path().join("invalid.toml");
        fs::write(&invalid, "catalog = 3").unwrap();
        assert!(matches!(read_config(&invalid), Err(ConfigError::Parse { .. })));
        assert_eq!(load_config_from(&invalid), MapperConfig::default());
    }
}
