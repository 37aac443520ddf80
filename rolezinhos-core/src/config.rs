//! Global configuration at ~/.config/rolezinhos/config.toml

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::baseline::BaselineSource;
use crate::error::{RolezinhosError, RolezinhosResult};
use crate::session::Session;
use crate::storage::FileStorage;

static DEFAULT_DATA_DIR: &str = "~/.local/share/rolezinhos";
const DEFAULT_FEATURED_LIMIT: usize = 3;

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_featured_limit() -> usize {
    DEFAULT_FEATURED_LIMIT
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RolezinhosConfig {
    /// Where local overrides and favorites are stored
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Published site data, fetched on every load
    pub baseline_url: Option<String>,

    /// Local copy of the site data, used when no URL is configured
    pub baseline_file: Option<PathBuf>,

    /// How many featured events the home listing shows
    #[serde(default = "default_featured_limit")]
    pub featured_limit: usize,

    /// Signed-in user's email
    pub user: Option<String>,
}

impl Default for RolezinhosConfig {
    fn default() -> Self {
        RolezinhosConfig {
            data_dir: default_data_dir(),
            baseline_url: None,
            baseline_file: None,
            featured_limit: DEFAULT_FEATURED_LIMIT,
            user: None,
        }
    }
}

impl RolezinhosConfig {
    pub fn config_path() -> RolezinhosResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| RolezinhosError::Config("Could not determine config directory".into()))?
            .join("rolezinhos");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, writing a commented default file on first run.
    pub fn load() -> RolezinhosResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from a specific file, with `ROLEZINHOS_*` environment overrides.
    pub fn load_from(path: &Path) -> RolezinhosResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("ROLEZINHOS"))
            .build()
            .map_err(|e| RolezinhosError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| RolezinhosError::Config(e.to_string()))
    }

    /// Save the current config to ~/.config/rolezinhos/config.toml
    pub fn save(&self) -> RolezinhosResult<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> RolezinhosResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| RolezinhosError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| RolezinhosError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> RolezinhosResult<()> {
        let contents = format!(
            "\
# rolezinhos configuration

# Where local edits and favorites are kept:
# data_dir = \"{}\"

# Published event data (JSON with events + categories):
# baseline_url = \"https://mapadosrolezinhos.web.app/db.json\"
# baseline_file = \"~/rolezinhos/db.json\"

# Featured events shown on the home listing:
# featured_limit = {}

# Signed-in user (stamped on events you create):
# user = \"you@example.com\"
",
            DEFAULT_DATA_DIR, DEFAULT_FEATURED_LIMIT
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                RolezinhosError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| RolezinhosError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn data_path(&self) -> PathBuf {
        expand(&self.data_dir)
    }

    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.data_path())
    }

    /// URL wins over file; with neither, the embedded categories are used.
    pub fn baseline_source(&self) -> BaselineSource {
        match (&self.baseline_url, &self.baseline_file) {
            (Some(url), _) => BaselineSource::Http(url.clone()),
            (None, Some(file)) => BaselineSource::File(expand(file)),
            (None, None) => BaselineSource::Embedded,
        }
    }

    pub fn session(&self) -> Session {
        Session {
            user: self.user.clone(),
        }
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_file_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rolezinhos/config.toml");

        RolezinhosConfig::create_default_config(&path).unwrap();
        let config = RolezinhosConfig::load_from(&path).unwrap();

        assert_eq!(config.data_dir, default_data_dir());
        assert_eq!(config.featured_limit, 3);
        assert_eq!(config.baseline_source(), BaselineSource::Embedded);
        assert_eq!(config.session(), Session::anonymous());
    }

    #[test]
    fn reads_configured_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
data_dir = "/tmp/rolezinhos-data"
baseline_file = "/srv/db.json"
featured_limit = 5
user = "alice@example.com"
"#,
        )
        .unwrap();

        let config = RolezinhosConfig::load_from(&path).unwrap();

        assert_eq!(config.data_path(), PathBuf::from("/tmp/rolezinhos-data"));
        assert_eq!(config.featured_limit, 5);
        assert_eq!(
            config.baseline_source(),
            BaselineSource::File(PathBuf::from("/srv/db.json"))
        );
        assert_eq!(config.session(), Session::signed_in("alice@example.com"));
    }

    #[test]
    fn saved_user_is_loaded_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        RolezinhosConfig::create_default_config(&path).unwrap();

        let mut config = RolezinhosConfig::load_from(&path).unwrap();
        config.user = Some("alice@example.com".to_string());
        config.save_to(&path).unwrap();

        let reloaded = RolezinhosConfig::load_from(&path).unwrap();
        assert_eq!(reloaded.session(), Session::signed_in("alice@example.com"));
        assert_eq!(reloaded.featured_limit, 3);

        config.user = None;
        config.save_to(&path).unwrap();
        let reloaded = RolezinhosConfig::load_from(&path).unwrap();
        assert_eq!(reloaded.session(), Session::anonymous());
    }

    #[test]
    fn url_takes_precedence_over_file() {
        let config = RolezinhosConfig {
            baseline_url: Some("http://localhost:3000/db".to_string()),
            baseline_file: Some(PathBuf::from("db.json")),
            ..Default::default()
        };

        assert_eq!(
            config.baseline_source(),
            BaselineSource::Http("http://localhost:3000/db".to_string())
        );
    }

    #[test]
    fn data_dir_expands_tilde() {
        let config = RolezinhosConfig::default();
        assert!(!config.data_path().to_string_lossy().starts_with('~'));
    }
}
