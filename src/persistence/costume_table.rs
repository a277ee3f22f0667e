use crate::config::{ConfigError, CostumeConfig};
use crate::entities::costume::CostumeRow;
use crate::scripting::hooks::CostumeSource;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read costume table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed costume table {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Parses the costume table, a YAML list of rows.
pub fn parse_costume_rows(content: &str, path: &Path) -> Result<Vec<CostumeRow>, CatalogError> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let rows: Option<Vec<CostumeRow>> =
        serde_yaml::from_str(content).map_err(|source| CatalogError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(rows.unwrap_or_default())
}

pub fn load_costume_rows(path: &Path) -> Result<Vec<CostumeRow>, CatalogError> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_costume_rows(&content, path),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(source) => Err(CatalogError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Reads config and costume table from disk on every startup and reload.
#[derive(Debug, Clone)]
pub struct FileSource {
    pub config_path: PathBuf,
    pub catalog_path: PathBuf,
}

impl FileSource {
    pub fn new(config_path: impl Into<PathBuf>, catalog_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            catalog_path: catalog_path.into(),
        }
    }
}

impl CostumeSource for FileSource {
    fn costume_config(&self) -> Result<CostumeConfig, ConfigError> {
        CostumeConfig::load(&self.config_path)
    }

    fn costume_rows(&self) -> Result<Vec<CostumeRow>, CatalogError> {
        load_costume_rows(&self.catalog_path)
    }
}

/// Fixed config and rows, for embedding hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub config: CostumeConfig,
    pub rows: Vec<CostumeRow>,
}

impl StaticSource {
    pub fn new(config: CostumeConfig, rows: Vec<CostumeRow>) -> Self {
        Self { config, rows }
    }
}

impl CostumeSource for StaticSource {
    fn costume_config(&self) -> Result<CostumeConfig, ConfigError> {
        Ok(self.config.clone())
    }

    fn costume_rows(&self) -> Result<Vec<CostumeRow>, CatalogError> {
        Ok(self.rows.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
- item_entry: 5
  display_id: 1000
  sound_id: 8000
  scale: 2.0
  duration: 30
  cooldown: 90
- item_entry: 6
  display_id: 1001
";

    #[test]
    fn rows_fill_in_column_defaults() {
        let rows = parse_costume_rows(TABLE, Path::new("costume.yaml")).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].scale, 2.0);
        assert_eq!(rows[0].cooldown, 90);
        assert_eq!(rows[1], CostumeRow::new(6, 1001));
    }

    #[test]
    fn empty_table_has_no_rows() {
        assert!(parse_costume_rows("", Path::new("costume.yaml")).unwrap().is_empty());
        assert!(parse_costume_rows("~\n", Path::new("costume.yaml")).unwrap().is_empty());
    }

    #[test]
    fn malformed_table_is_an_error() {
        let err = parse_costume_rows("- item_entry: five\n", Path::new("costume.yaml")).unwrap_err();
        assert!(matches!(err, CatalogError::Yaml { .. }));
    }

    #[test]
    fn file_source_reads_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("costumes.yaml");
        let catalog_path = dir.path().join("costume.yaml");
        std::fs::write(&config_path, "spell_id: 1234\n").unwrap();
        std::fs::write(&catalog_path, TABLE).unwrap();
        let source = FileSource::new(&config_path, &catalog_path);
        assert_eq!(source.costume_config().unwrap().spell_id, 1234);
        assert_eq!(source.costume_rows().unwrap().len(), 2);
    }

    #[test]
    fn missing_table_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let rows = load_costume_rows(&dir.path().join("absent.yaml")).unwrap();
        assert!(rows.is_empty());
    }
}
