use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub frontend: FrontendConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        WebConfig {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone, Deserialize)]
pub struct FrontendConfig {
    /// Directory holding `index.html` and the `pages/`, `css/` and `js/` trees.
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        FrontendConfig {
            root: default_root(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from("frontend/src")
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.web.host, self.web.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_firmware_port() {
        let config = Config::default();
        assert_eq!(config.web.port, 8080);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.frontend.root, PathBuf::from("frontend/src"));
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("web:\n  port: 9000\n").unwrap();
        assert_eq!(config.web.port, 9000);
        assert_eq!(config.web.host, "0.0.0.0");
        assert_eq!(config.frontend.root, PathBuf::from("frontend/src"));
    }

    #[test]
    fn frontend_root_is_configurable() {
        let yaml = "web:\n  host: 127.0.0.1\nfrontend:\n  root: ../launchpad/data\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.frontend.root, PathBuf::from("../launchpad/data"));
    }

    #[test]
    fn rejects_malformed_yaml() {
        assert!(matches!(
            Config::from_yaml("web: [port"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            Config::from_file("/nonexistent/dev-server.yaml"),
            Err(ConfigError::Io(_))
        ));
    }
}
