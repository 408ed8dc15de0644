use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Overrides `publication` when set.
pub const PUBLICATION_ENV: &str = "DRAFTWRIGHT_PUBLICATION";

const DEFAULT_STORE_PATH: &str = "~/.local/share/draftwright/drafts";
const DEFAULT_SECTION_LEVEL: i64 = 3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Publication host (`example.substack.com`) or origin URL.
    pub publication: String,
    /// Directory of stored draft records.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    /// Level of the heading placed before appended sections.
    #[serde(default = "default_section_level")]
    pub section_heading_level: i64,
    /// Whether section headings get a time-of-day suffix.
    #[serde(default = "default_timestamp_sections")]
    pub timestamp_sections: bool,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

fn default_section_level() -> i64 {
    DEFAULT_SECTION_LEVEL
}

fn default_timestamp_sections() -> bool {
    true
}

impl Config {
    pub fn new(publication: impl Into<String>) -> Self {
        Self {
            publication: publication.into(),
            store_path: Self::expand_path(&default_store_path()).unwrap_or_else(default_store_path),
            section_heading_level: DEFAULT_SECTION_LEVEL,
            timestamp_sections: default_timestamp_sections(),
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded store path
        config.store_path = Self::expand_path(&config.store_path).unwrap_or(config.store_path);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/draftwright");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Applies overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides looked up through `lookup`. Empty values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(publication) = lookup(PUBLICATION_ENV).filter(|p| !p.trim().is_empty()) {
            self.publication = publication;
        }
    }

    /// The publication as an origin URL without a trailing slash. A bare host
    /// is served over https.
    pub fn publication_origin(&self) -> String {
        let publication = self.publication.trim().trim_end_matches('/');
        if publication.starts_with("https://") || publication.starts_with("http://") {
            publication.to_string()
        } else {
            format!("https://{publication}")
        }
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/draftwright/config.toml"));
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: Config = toml::from_str(r#"publication = "example.substack.com""#).unwrap();

        assert_eq!(config.section_heading_level, 3);
        assert!(config.timestamp_sections);
        assert_eq!(config.store_path, PathBuf::from(DEFAULT_STORE_PATH));
    }

    #[test]
    fn test_publication_is_required() {
        assert!(toml::from_str::<Config>("section_heading_level = 2").is_err());
    }

    #[test]
    fn test_publication_origin_from_host() {
        let config = Config::new("example.substack.com");
        assert_eq!(config.publication_origin(), "https://example.substack.com");
    }

    #[test]
    fn test_publication_origin_keeps_scheme_and_trims_slash() {
        let config = Config::new("http://localhost:8080/");
        assert_eq!(config.publication_origin(), "http://localhost:8080");
    }

    #[test]
    fn test_env_override_replaces_publication() {
        let mut config = Config::new("from-file.test");
        config.apply_overrides_from(|key| {
            (key == PUBLICATION_ENV).then(|| "from-env.test".to_string())
        });
        assert_eq!(config.publication, "from-env.test");
    }

    #[test]
    fn test_empty_env_override_is_ignored() {
        let mut config = Config::new("from-file.test");
        config.apply_overrides_from(|_| Some("  ".to_string()));
        assert_eq!(config.publication, "from-file.test");
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path);

        assert!(expanded.is_some());
        let expanded = expanded.unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("DRAFTWRIGHT_TEST_VAR", "/test/env/path");
        }

        let path = PathBuf::from("$DRAFTWRIGHT_TEST_VAR/subdir");
        let expanded = Config::expand_path(&path);

        assert_eq!(expanded, Some(PathBuf::from("/test/env/path/subdir")));

        unsafe {
            env::remove_var("DRAFTWRIGHT_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_path_with_relative_path() {
        let path = PathBuf::from("relative/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_toml_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "publication = [").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/config.toml");
        let test_config = Config {
            publication: "example.substack.com".to_string(),
            store_path: PathBuf::from("/tmp/test-drafts"),
            section_heading_level: 4,
            timestamp_sections: false,
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_store_path_with_env_var_in_toml() {
        unsafe {
            env::set_var("DRAFTWRIGHT_DRAFTS_ROOT", "/custom/drafts");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            "publication = \"p.test\"\nstore_path = \"$DRAFTWRIGHT_DRAFTS_ROOT/mine\"\n",
        )
        .unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(config.store_path, PathBuf::from("/custom/drafts/mine"));

        unsafe {
            env::remove_var("DRAFTWRIGHT_DRAFTS_ROOT");
        }
    }
}
