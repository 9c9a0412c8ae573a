use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use url::Url;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "census.toml";

const MAX_PAGE_SIZE: u8 = 100;
const MAX_CONCURRENCY: usize = 64;

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Root of the GitLab REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Projects requested per listing page
    #[serde(default = "default_page_size")]
    pub page_size: u8,

    /// Projects enriched at the same time
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_base_url() -> String {
    "https://gitlab.com/api/v4".to_string()
}

const fn default_page_size() -> u8 {
    MAX_PAGE_SIZE
}

const fn default_concurrency() -> usize {
    1
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `census.toml` in `base_dir` is used if it exists.
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading forge-census configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading forge-census configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url).into_app_err_with(|| format!("base_url '{}' is not a valid URL", self.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(app_err!("base_url must use http or https, got '{}'", url.scheme()));
        }

        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(app_err!("page_size must be between 1 and {MAX_PAGE_SIZE}, got {}", self.page_size));
        }

        if !(1..=MAX_CONCURRENCY).contains(&self.concurrency) {
            return Err(app_err!("concurrency must be between 1 and {MAX_CONCURRENCY}, got {}", self.concurrency));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.base_url, "https://gitlab.com/api/v4");
        assert_eq!(config.page_size, 100);
        assert_eq!(config.concurrency, 1);
    }

    #[test]
    fn test_validate_page_size_zero() {
        let config = Config { page_size: 0, ..Config::default() };
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_validate_page_size_too_large() {
        let config = Config { page_size: 101, ..Config::default() };
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_validate_concurrency_out_of_range() {
        let _ = Config { concurrency: 0, ..Config::default() }.validate().unwrap_err();
        let _ = Config { concurrency: 65, ..Config::default() }.validate().unwrap_err();
    }

    #[test]
    fn test_validate_bad_base_url() {
        let config = Config { base_url: "not a url".into(), ..Config::default() };
        assert!(config.validate().unwrap_err().to_string().contains("not a valid URL"));
    }

    #[test]
    fn test_validate_non_http_base_url() {
        let config = Config { base_url: "ftp://gitlab.example/api/v4".into(), ..Config::default() };
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_partial_file_uses_defaults_for_missing_keys() {
        let config: Config = toml::from_str("page_size = 20").unwrap();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.base_url, "https://gitlab.com/api/v4");
        assert_eq!(config.concurrency, 1);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let _ = toml::from_str::<Config>("token = \"secret\"").unwrap_err();
    }

    #[test]
    fn test_save_default_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let output_path = Utf8PathBuf::try_from(tmp.path().join(CONFIG_FILE_NAME)).unwrap();
        Config::save_default(&output_path).unwrap();
        let loaded = Config::load(&Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap(), Some(&output_path)).unwrap();
        loaded.validate().unwrap();
    }

    #[test]
    fn test_load_picks_up_file_in_base_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let base_dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        fs::write(base_dir.join(CONFIG_FILE_NAME), "base_url = \"https://gitlab.example/api/v4\"\nconcurrency = 4\n").unwrap();

        let config = Config::load(&base_dir, None).unwrap();
        assert_eq!(config.base_url, "https://gitlab.example/api/v4");
        assert_eq!(config.concurrency, 4);
    }

    #[test]
    fn test_load_missing_config_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let base_dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let config = Config::load(&base_dir, None).unwrap();
        config.validate().unwrap();
    }

    #[test]
    fn test_load_invalid_file_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("bad.toml")).unwrap();
        fs::write(&path, "page_size = 0\n").unwrap();
        let _ = Config::load(&Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap(), Some(&path)).unwrap_err();
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let base_dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let path = base_dir.join("absent.toml");
        let _ = Config::load(&base_dir, Some(&path)).unwrap_err();
    }
}
