//! Configuration file loading and database path resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the database location
pub const DATABASE_PATH_ENV: &str = "MLIB_DATABASE_PATH";

/// Database file name used when nothing else is configured
pub const DEFAULT_DATABASE_FILE: &str = "catalog.db";

/// Optional settings read from `config.toml`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Path to the SQLite catalog database
    pub database_path: Option<PathBuf>,
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))
    }
}

/// Database path resolution, in priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_database_path(cli_arg: Option<&Path>, env_var_name: &str) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        debug!("Database path from command line: {}", path.display());
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.is_empty() {
            debug!("Database path from {}: {}", env_var_name, path);
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = config_file_path().filter(|p| p.exists()) {
        match TomlConfig::from_file(&path) {
            Ok(TomlConfig {
                database_path: Some(db_path),
            }) => {
                debug!("Database path from {}", path.display());
                return db_path;
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("Ignoring config file: {}", e),
        }
    }

    // Priority 4: OS-dependent compiled default
    default_database_path()
}

/// Location of the optional `config.toml` for the platform
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mlib").join("config.toml"))
}

/// OS-dependent default database path
fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("mlib"))
        .unwrap_or_else(|| PathBuf::from("./mlib_data"))
        .join(DEFAULT_DATABASE_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_cli_argument_wins() {
        let path = resolve_database_path(Some(Path::new("/tmp/cli.db")), "MLIB_TEST_UNSET_VAR");
        assert_eq!(path, PathBuf::from("/tmp/cli.db"));
    }

    #[test]
    fn test_env_var_used_without_cli() {
        std::env::set_var("MLIB_TEST_DB_PATH_ENV", "/tmp/from-env.db");
        let path = resolve_database_path(None, "MLIB_TEST_DB_PATH_ENV");
        assert_eq!(path, PathBuf::from("/tmp/from-env.db"));
        std::env::remove_var("MLIB_TEST_DB_PATH_ENV");
    }

    #[test]
    fn test_default_ends_with_catalog_db() {
        let path = default_database_path();
        assert!(path.ends_with(DEFAULT_DATABASE_FILE));
    }

    #[test]
    fn test_toml_config_parsing() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "database_path = \"/srv/mlib/catalog.db\"").unwrap();

        let config = TomlConfig::from_file(file.path()).unwrap();
        assert_eq!(
            config.database_path,
            Some(PathBuf::from("/srv/mlib/catalog.db"))
        );
    }

    #[test]
    fn test_toml_config_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "database_path = [not toml").unwrap();

        let err = TomlConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
