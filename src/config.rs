use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use anyhow::{bail, Context, Result};

/// Output format for the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => bail!("expected 'pretty' or 'json', got '{}'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub service_port: u16,
    pub service_host: String,
    pub static_dir: PathBuf,
    pub content_file: Option<PathBuf>,
    pub cors_allowed_origin: Option<String>,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let service_port = lookup("SERVICE_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = lookup("SERVICE_HOST")
            .unwrap_or_else(|| "0.0.0.0".to_string());

        let static_dir = lookup("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("frontend/dist"));

        let content_file = lookup("CONTENT_FILE")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let cors_allowed_origin = lookup("CORS_ALLOWED_ORIGIN")
            .filter(|v| !v.is_empty());

        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => raw
                .parse::<LogFormat>()
                .context("LOG_FORMAT must be 'pretty' or 'json'")?,
            None => LogFormat::Pretty,
        };

        Ok(Config {
            service_port,
            service_host,
            static_dir,
            content_file,
            cors_allowed_origin,
            log_format,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Static files: {}", self.static_dir.display());
        tracing::info!("  Content source: {}",
            self.content_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in pages".to_string()));
        tracing::info!("  CORS origin: {}",
            self.cors_allowed_origin.as_deref().unwrap_or("any"));
        tracing::info!("  Service listening on: {}", self.bind_address());
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            service_port: 3000,
            service_host: "0.0.0.0".to_string(),
            static_dir: PathBuf::from("frontend/dist"),
            content_file: None,
            cors_allowed_origin: None,
            log_format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_config_with_all_vars() {
        let config = config_from(&[
            ("SERVICE_PORT", "8080"),
            ("SERVICE_HOST", "127.0.0.1"),
            ("STATIC_DIR", "/srv/www"),
            ("CONTENT_FILE", "/etc/pages.json"),
            ("CORS_ALLOWED_ORIGIN", "http://localhost:5173"),
            ("LOG_FORMAT", "JSON"),
        ])
        .unwrap();

        assert_eq!(config.service_port, 8080);
        assert_eq!(config.service_host, "127.0.0.1");
        assert_eq!(config.static_dir, PathBuf::from("/srv/www"));
        assert_eq!(config.content_file, Some(PathBuf::from("/etc/pages.json")));
        assert_eq!(config.cors_allowed_origin.as_deref(), Some("http://localhost:5173"));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_config_with_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.service_port, 3000);
        assert_eq!(config.service_host, "0.0.0.0");
        assert_eq!(config.static_dir, PathBuf::from("frontend/dist"));
        assert_eq!(config.content_file, None);
        assert_eq!(config.cors_allowed_origin, None);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_empty_optional_vars_are_unset() {
        let config = config_from(&[("CONTENT_FILE", ""), ("CORS_ALLOWED_ORIGIN", "")]).unwrap();

        assert_eq!(config.content_file, None);
        assert_eq!(config.cors_allowed_origin, None);
    }

    #[test]
    fn test_invalid_port() {
        let result = config_from(&[("SERVICE_PORT", "not-a-number")]);
        assert!(result.is_err());
        let error = result.unwrap_err();
        assert!(error.to_string().contains("SERVICE_PORT"));
    }

    #[test]
    fn test_port_out_of_range() {
        let result = config_from(&[("SERVICE_PORT", "99999")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_log_format() {
        let result = config_from(&[("LOG_FORMAT", "xml")]);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("LOG_FORMAT"));
    }
}
