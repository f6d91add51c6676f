mod api;
mod defaults;

use crate::api::{Credential, RemoteModelClient, ReqwestTransport, DEFAULT_API_HOST, DEFAULT_API_VERSION};
use crate::cli::{Args, Command};
use crate::error::{ClientError, Result};
use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub use api::{ApiConfig, ModelConfig, OutputConfig, ServerConfig, SessionConfig};
pub use defaults::{default_model, default_models_file, default_port, default_prompt, API_KEY_ENV};

#[derive(Debug, Clone)]
pub struct Config {
    pub api_host: String,
    pub api_version: String,
    pub timeout: Option<Duration>,
    pub model: String,
    pub port: u16,
    pub models_file: String,
    pub verbose: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> Result<Self> {
        let file_config = FileConfig::load().map_err(|e| ClientError::Config(format!("{:#}", e)))?;
        Self::resolve(args, &file_config, |name| env::var(name).ok())
    }

    /// Settings for callers without CLI flags: env vars > config file > defaults.
    pub fn from_env() -> Result<Self> {
        let file_config = FileConfig::load().map_err(|e| ClientError::Config(format!("{:#}", e)))?;
        Self::resolve_env(&file_config, |name| env::var(name).ok())
    }

    pub fn resolve_env<F>(file: &FileConfig, env_lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let args = Args {
            verbose: false,
            api_host: None,
            timeout: None,
            command: Command::Generate {
                model: None,
                prompt: Vec::new(),
            },
        };
        Self::resolve(&args, file, env_lookup)
    }

    /// Merge settings with precedence: CLI args > env vars > config file > defaults.
    pub fn resolve<F>(args: &Args, file: &FileConfig, env_lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_host = args
            .api_host
            .clone()
            .or_else(|| env_lookup("LIFEFLOW_API_HOST"))
            .or(file.api.host.clone())
            .unwrap_or_else(|| DEFAULT_API_HOST.to_string());

        let api_version = env_lookup("LIFEFLOW_API_VERSION")
            .or(file.api.version.clone())
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());
        let api_version = api_version.trim().trim_matches('/').to_string();
        if api_version.is_empty() {
            return Err(ClientError::Config("API version must not be empty".to_string()));
        }

        let timeout_secs = match args.timeout {
            Some(secs) => Some(secs),
            None => match env_lookup("LIFEFLOW_TIMEOUT") {
                Some(v) => Some(v.parse::<u64>().map_err(|_| {
                    ClientError::Config(format!("LIFEFLOW_TIMEOUT is not a number: {}", v))
                })?),
                None => file.api.timeout_secs,
            },
        };

        let cli_model = match &args.command {
            Command::Generate { model, .. } => model.clone(),
            _ => None,
        };
        let model = cli_model
            .or_else(|| env_lookup("LIFEFLOW_MODEL"))
            .or(file.model.default_model.clone())
            .unwrap_or_else(default_model);

        let cli_port = match &args.command {
            Command::Serve { port } => *port,
            _ => None,
        };
        let port = match cli_port {
            Some(port) => port,
            None => match env_lookup("PORT") {
                Some(v) => v
                    .parse::<u16>()
                    .map_err(|_| ClientError::Config(format!("PORT is not a valid port: {}", v)))?,
                None => file.server.port.unwrap_or_else(default_port),
            },
        };

        let cli_output = match &args.command {
            Command::Models { output } => output.clone(),
            _ => None,
        };
        let models_file = cli_output
            .or(file.output.models_file.clone())
            .unwrap_or_else(default_models_file);

        let verbose = args.verbose
            || env_lookup("LIFEFLOW_VERBOSE")
                .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
                .or(file.session.verbose)
                .unwrap_or(false);

        Ok(Config {
            api_host,
            api_version,
            timeout: timeout_secs.filter(|s| *s > 0).map(Duration::from_secs),
            model,
            port,
            models_file,
            verbose,
        })
    }

    /// Build a client using the key from `GEMINI_API_KEY`. The key is never
    /// read from a config file.
    pub fn client(&self) -> Result<RemoteModelClient> {
        let credential = Credential::from_env(API_KEY_ENV)?;
        let transport = ReqwestTransport::with_timeout(self.timeout)?;
        Ok(
            RemoteModelClient::with_transport(&self.api_host, credential, Arc::new(transport))?
                .with_api_version(self.api_version.clone()),
        )
    }
}

impl FileConfig {
    pub fn load() -> anyhow::Result<Self> {
        for path in Self::get_config_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        Ok(FileConfig::default())
    }

    pub fn load_from(path: &std::path::Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let ext = path.extension().and_then(|s| s.to_str());
        let config = if ext == Some("yaml") || ext == Some("yml") {
            serde_yaml::from_str(&contents).with_context(|| {
                format!("Failed to parse YAML config file: {}", path.display())
            })?
        } else {
            serde_json::from_str(&contents).with_context(|| {
                format!("Failed to parse JSON config file: {}", path.display())
            })?
        };

        Ok(config)
    }

    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".lifeflow.yaml"),
            PathBuf::from(".lifeflow.yml"),
            PathBuf::from(".lifeflow.json"),
        ];

        if let Some(home_dir) = dirs::home_dir() {
            let config_dir = home_dir.join(".config").join("lifeflow");
            paths.push(config_dir.join("lifeflow.yaml"));
            paths.push(config_dir.join("lifeflow.yml"));
            paths.push(config_dir.join("lifeflow.json"));
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["lifeflow", "models"]);
        let config = Config::resolve(&args, &FileConfig::default(), lookup(&[])).unwrap();
        assert_eq!(config.api_host, "generativelanguage.googleapis.com");
        assert_eq!(config.api_version, "v1beta");
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.port, 3000);
        assert_eq!(config.models_file, "models_output.json");
        assert!(config.timeout.is_none());
        assert!(!config.verbose);
    }

    #[test]
    fn test_env_port_overrides_file() {
        let args = Args::parse_from(["lifeflow", "serve"]);
        let mut file = FileConfig::default();
        file.server.port = Some(4000);
        let config = Config::resolve(&args, &file, lookup(&[("PORT", "5000")])).unwrap();
        assert_eq!(config.port, 5000);

        let config = Config::resolve(&args, &file, lookup(&[])).unwrap();
        assert_eq!(config.port, 4000);
    }

    #[test]
    fn test_cli_beats_env() {
        let args = Args::parse_from(["lifeflow", "serve", "--port", "7000", "--timeout", "9"]);
        let env = lookup(&[("PORT", "5000"), ("LIFEFLOW_TIMEOUT", "30")]);
        let config = Config::resolve(&args, &FileConfig::default(), env).unwrap();
        assert_eq!(config.port, 7000);
        assert_eq!(config.timeout, Some(Duration::from_secs(9)));
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let args = Args::parse_from(["lifeflow", "serve"]);
        let result = Config::resolve(&args, &FileConfig::default(), lookup(&[("PORT", "abc")]));
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn test_model_precedence() {
        let args = Args::parse_from(["lifeflow", "generate", "hi"]);
        let mut file = FileConfig::default();
        file.model.default_model = Some("gemini-1.5-pro".to_string());
        let config = Config::resolve(&args, &file, lookup(&[])).unwrap();
        assert_eq!(config.model, "gemini-1.5-pro");

        let config =
            Config::resolve(&args, &file, lookup(&[("LIFEFLOW_MODEL", "gemini-2.5-flash")]))
                .unwrap();
        assert_eq!(config.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_env_only_settings_reach_client_config() {
        let env = lookup(&[
            ("LIFEFLOW_API_HOST", "proxy.internal.example"),
            ("LIFEFLOW_API_VERSION", "v1"),
            ("LIFEFLOW_TIMEOUT", "12"),
            ("LIFEFLOW_MODEL", "gemini-1.5-flash"),
        ]);
        let config = Config::resolve_env(&FileConfig::default(), env).unwrap();
        assert_eq!(config.api_host, "proxy.internal.example");
        assert_eq!(config.api_version, "v1");
        assert_eq!(config.timeout, Some(Duration::from_secs(12)));
        assert_eq!(config.model, "gemini-1.5-flash");
    }

    #[test]
    fn test_empty_api_version_rejected() {
        let args = Args::parse_from(["lifeflow", "models"]);
        for version in ["", "/", "  //  "] {
            let result = Config::resolve(
                &args,
                &FileConfig::default(),
                lookup(&[("LIFEFLOW_API_VERSION", version)]),
            );
            assert!(matches!(result, Err(ClientError::Config(_))), "{:?}", version);
        }

        let mut file = FileConfig::default();
        file.api.version = Some("/v1/".to_string());
        let config = Config::resolve(&args, &file, lookup(&[])).unwrap();
        assert_eq!(config.api_version, "v1");
    }

    #[test]
    fn test_load_yaml_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("lifeflow.yaml");
        fs::write(
            &path,
            "api:\n  timeout_secs: 15\nserver:\n  port: 8081\noutput:\n  models_file: out.json\n",
        )
        .unwrap();

        let file = FileConfig::load_from(&path).unwrap();
        assert_eq!(file.api.timeout_secs, Some(15));
        assert_eq!(file.server.port, Some(8081));
        assert_eq!(file.output.models_file.as_deref(), Some("out.json"));
    }

    #[test]
    fn test_load_invalid_json_reports_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("lifeflow.json");
        fs::write(&path, "{ not json").unwrap();

        let err = FileConfig::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("lifeflow.json"));
    }
}
