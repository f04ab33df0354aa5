use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Upstream request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub sources: Sources,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Sources {
    #[serde(default = "default_arbeitnow_url")]
    pub arbeitnow_url: String,
    #[serde(default = "default_devitjobs_url")]
    pub devitjobs_url: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_arbeitnow_url() -> String {
    "https://arbeitnow.com/api/job-board-api".to_string()
}

fn default_devitjobs_url() -> String {
    "https://devitjobs.uk/job_feed.xml".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            request_timeout_secs: default_request_timeout(),
            sources: Sources::default(),
        }
    }
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            arbeitnow_url: default_arbeitnow_url(),
            devitjobs_url: default_devitjobs_url(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Parse config from a TOML string (useful for testing)
    pub fn from_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_config() {
        let content = r#"
            bind_addr = "127.0.0.1:8080"
            request_timeout_secs = 10

            [sources]
            arbeitnow_url = "https://jobs.example.com/api"
            devitjobs_url = "https://feed.example.com/jobs.xml"
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.sources.arbeitnow_url, "https://jobs.example.com/api");
        assert_eq!(config.sources.devitjobs_url, "https://feed.example.com/jobs.xml");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(
            config.sources.arbeitnow_url,
            "https://arbeitnow.com/api/job-board-api"
        );
        assert_eq!(config.sources.devitjobs_url, "https://devitjobs.uk/job_feed.xml");
    }

    #[test]
    fn test_partial_sources_fall_back_to_defaults() {
        let content = r#"
            [sources]
            devitjobs_url = "https://feed.example.com/jobs.xml"
        "#;

        let config = Config::from_str(content).unwrap();

        assert_eq!(config.sources.devitjobs_url, "https://feed.example.com/jobs.xml");
        assert_eq!(
            config.sources.arbeitnow_url,
            "https://arbeitnow.com/api/job-board-api"
        );
    }

    #[test]
    fn test_default_matches_empty_file() {
        let defaulted = Config::default();
        let parsed = Config::from_str("").unwrap();

        assert_eq!(defaulted.bind_addr, parsed.bind_addr);
        assert_eq!(defaulted.request_timeout_secs, parsed.request_timeout_secs);
        assert_eq!(defaulted.sources.arbeitnow_url, parsed.sources.arbeitnow_url);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = Config::load("/nonexistent/path/config.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let content = "this is not valid toml {{{";

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();

        let result = Config::load(temp_file.path());
        assert!(result.is_err());
    }
}
