use config::builder::DefaultState;
use config::ConfigBuilder;
use flightcrew_core::{CoreError, CoreResult, TimestampPolicy};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub amadeus: AmadeusConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AmadeusConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_secret: String,
    /// Host name (`test.api.amadeus.com`) or a full base URL.
    #[serde(default = "default_base_domain")]
    pub base_domain: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for AmadeusConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_secret: String::new(),
            base_domain: default_base_domain(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl AmadeusConfig {
    pub fn base_url(&self) -> String {
        let domain = self.base_domain.trim_end_matches('/');
        if domain.contains("://") {
            domain.to_string()
        } else {
            format!("https://{}", domain)
        }
    }
}

fn default_base_domain() -> String { "test.api.amadeus.com".to_string() }
fn default_timeout_seconds() -> u64 { 30 }

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SearchConfig {
    #[serde(default)]
    pub timestamp_policy: TimestampPolicy,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    #[serde(default = "default_inquiry_path")]
    pub inquiry_path: PathBuf,
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            inquiry_path: default_inquiry_path(),
            output_path: default_output_path(),
        }
    }
}

fn default_inquiry_path() -> PathBuf { PathBuf::from("knowledge/inquiry") }
fn default_output_path() -> PathBuf { PathBuf::from("report.md") }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("config"))
    }

    pub fn load_from(dir: &Path) -> Result<Self, config::ConfigError> {
        let base_domain = env::var("AMADEUS_BASE_DOMAIN").ok().filter(|d| !d.is_empty());

        let s = Self::file_layers(dir)
            // e.g. FLIGHTCREW__AMADEUS__API_KEY
            .add_source(config::Environment::with_prefix("FLIGHTCREW").separator("__"))
            // plain variables from a .env-style setup win over everything
            .set_override_option("amadeus.api_key", env::var("AMADEUS_API_KEY").ok())?
            .set_override_option("amadeus.api_secret", env::var("AMADEUS_API_SECRET").ok())?
            .set_override_option("amadeus.base_domain", base_domain)?
            .build()?;

        s.try_deserialize()
    }

    /// `default`, then `{RUN_MODE}`, then `local`; later files win.
    fn file_layers(dir: &Path) -> ConfigBuilder<DefaultState> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let file = |name: &str| dir.join(name).to_string_lossy().into_owned();

        config::Config::builder()
            .add_source(config::File::with_name(&file("default")).required(false))
            .add_source(config::File::with_name(&file(&run_mode)).required(false))
            // not checked in
            .add_source(config::File::with_name(&file("local")).required(false))
    }

    /// Credentials must be present before any client is built.
    pub fn validate(&self) -> CoreResult<()> {
        if self.amadeus.api_key.trim().is_empty() {
            return Err(CoreError::Configuration(
                "missing Amadeus API key (AMADEUS_API_KEY)".into(),
            ));
        }
        if self.amadeus.api_secret.trim().is_empty() {
            return Err(CoreError::Configuration(
                "missing Amadeus API secret (AMADEUS_API_SECRET)".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_without_any_file() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.amadeus.base_domain, "test.api.amadeus.com");
        assert_eq!(config.amadeus.timeout_seconds, 30);
        assert_eq!(config.search.timestamp_policy, TimestampPolicy::CurrentTime);
        assert_eq!(config.report.output_path, PathBuf::from("report.md"));
    }

    fn write_default(dir: &Path) {
        fs::write(
            dir.join("default.toml"),
            r#"
                [amadeus]
                api_key = "key"
                api_secret = "secret"
                base_domain = "api.amadeus.com"

                [search]
                timestamp_policy = "supplied"

                [report]
                output_path = "out/flights.md"
            "#,
        )
        .unwrap();
    }

    #[test]
    fn test_file_layers_merge() {
        let dir = tempfile::tempdir().unwrap();
        write_default(dir.path());
        fs::write(dir.path().join("local.toml"), "[amadeus]\napi_secret = \"local-secret\"\n")
            .unwrap();

        let config: Config = Config::file_layers(dir.path())
            .build()
            .and_then(|s| s.try_deserialize())
            .expect("config loads");
        assert_eq!(config.amadeus.api_key, "key");
        assert_eq!(config.amadeus.api_secret, "local-secret");
        assert_eq!(config.amadeus.base_url(), "https://api.amadeus.com");
        assert_eq!(config.amadeus.timeout_seconds, 30);
        assert_eq!(config.search.timestamp_policy, TimestampPolicy::Supplied);
        assert_eq!(config.report.output_path, PathBuf::from("out/flights.md"));
        assert_eq!(config.report.inquiry_path, PathBuf::from("knowledge/inquiry"));
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        write_default(dir.path());

        // credentials may come from the environment; the non-credential sections may not
        let config = Config::load_from(dir.path()).expect("config loads");
        assert_eq!(config.search.timestamp_policy, TimestampPolicy::Supplied);
        assert_eq!(config.report.output_path, PathBuf::from("out/flights.md"));
    }

    #[test]
    fn test_validate_requires_credentials() {
        let mut config = Config::default();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, CoreError::Configuration(_)));

        config.amadeus.api_key = "key".into();
        assert!(config.validate().unwrap_err().to_string().contains("secret"));

        config.amadeus.api_secret = "secret".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_base_url_accepts_full_urls() {
        let mut amadeus = AmadeusConfig::default();
        assert_eq!(amadeus.base_url(), "https://test.api.amadeus.com");
        amadeus.base_domain = "http://127.0.0.1:8080/".into();
        assert_eq!(amadeus.base_url(), "http://127.0.0.1:8080");
    }
}
