// IronMQ client settings
// Layered: defaults < ~/.iron.json < ./iron.json < --config < IRON_* < IRON_MQ_* < overrides

use config::{Config, Environment, File, FileFormat, Map};
use ironmq_core::error::{AppError, Result};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_SCHEME: &str = "https";
pub const DEFAULT_HOST: &str = "mq-aws-us-east-1-1.iron.io";
pub const DEFAULT_PORT: u16 = 443;
pub const DEFAULT_API_VERSION: &str = "3";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const HOME_CONFIG_FILE: &str = "~/.iron.json";
const LOCAL_CONFIG_FILE: &str = "iron.json";
const ENV_PREFIX: &str = "IRON";
const PRODUCT_ENV_PREFIX: &str = "IRON_MQ";

/// Connection settings for the IronMQ REST API
#[derive(Clone, PartialEq, Eq)]
pub struct IronMqSettings {
    pub scheme: String,
    pub host: String,
    pub port: u16,
    pub api_version: String,
    pub token: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl IronMqSettings {
    /// Default endpoint with the given token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            api_version: DEFAULT_API_VERSION.to_string(),
            token: token.into(),
            user_agent: default_user_agent(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// `{scheme}://{host}:{port}/{api_version}`
    pub fn base_url(&self) -> String {
        format!(
            "{}://{}:{}/{}",
            self.scheme, self.host, self.port, self.api_version
        )
    }
}

// Token stays out of logs
impl fmt::Debug for IronMqSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IronMqSettings")
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_version", &self.api_version)
            .field("token", &"***")
            .field("user_agent", &self.user_agent)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_user_agent() -> String {
    format!("ironmq-datasource/{}", env!("CARGO_PKG_VERSION"))
}

/// Where settings are read from
#[derive(Debug, Clone, Default)]
pub struct SettingsSources {
    optional_files: Vec<PathBuf>,
    required_file: Option<PathBuf>,
    /// None reads the process environment
    env: Option<Map<String, String>>,
    overrides: Vec<(String, String)>,
}

impl SettingsSources {
    /// `~/.iron.json`, `./iron.json` and the process environment
    pub fn standard() -> Self {
        Self {
            optional_files: vec![
                PathBuf::from(shellexpand::tilde(HOME_CONFIG_FILE).into_owned()),
                PathBuf::from(LOCAL_CONFIG_FILE),
            ],
            ..Default::default()
        }
    }

    /// No files, empty environment
    pub fn isolated() -> Self {
        Self {
            env: Some(Map::new()),
            ..Default::default()
        }
    }

    /// Extra settings file; must exist
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.required_file = Some(path.into());
        self
    }

    /// Replace the environment (keys such as `IRON_TOKEN`)
    pub fn with_env<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.env = Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    /// Highest-precedence value for a settings key (e.g. `token`, `host`)
    pub fn with_override(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.push((key.into(), value.into()));
        self
    }
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    scheme: String,
    host: String,
    port: u16,
    api_version: String,
    token: Option<String>,
    user_agent: Option<String>,
    timeout_secs: u64,
}

/// Load settings from the given sources
///
/// # Errors
/// - AppError::Config if a source cannot be read or parsed, or if no token is configured
pub fn load_settings(sources: &SettingsSources) -> Result<IronMqSettings> {
    let mut builder = Config::builder()
        .set_default("scheme", DEFAULT_SCHEME)
        .and_then(|b| b.set_default("host", DEFAULT_HOST))
        .and_then(|b| b.set_default("port", i64::from(DEFAULT_PORT)))
        .and_then(|b| b.set_default("api_version", DEFAULT_API_VERSION))
        .and_then(|b| b.set_default("timeout_secs", DEFAULT_TIMEOUT_SECS as i64))
        .map_err(config_error)?;

    for path in &sources.optional_files {
        builder = builder.add_source(
            File::from(path.as_path())
                .format(FileFormat::Json)
                .required(false),
        );
    }

    if let Some(path) = &sources.required_file {
        builder = builder.add_source(
            File::from(path.as_path())
                .format(FileFormat::Json)
                .required(true),
        );
    }

    builder = builder
        .add_source(Environment::with_prefix(ENV_PREFIX).source(sources.env.clone()))
        .add_source(Environment::with_prefix(PRODUCT_ENV_PREFIX).source(sources.env.clone()));

    for (key, value) in &sources.overrides {
        builder = builder
            .set_override(key.as_str(), value.as_str())
            .map_err(config_error)?;
    }

    let raw: RawSettings = builder
        .build()
        .and_then(|c| c.try_deserialize())
        .map_err(config_error)?;

    let token = raw
        .token
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| {
            AppError::Config(
                "IronMQ token is not configured (set IRON_TOKEN or \"token\" in iron.json)"
                    .to_string(),
            )
        })?;

    let settings = IronMqSettings {
        scheme: raw.scheme,
        host: raw.host,
        port: raw.port,
        api_version: raw.api_version,
        token,
        user_agent: raw.user_agent.unwrap_or_else(default_user_agent),
        timeout_secs: raw.timeout_secs,
    };

    tracing::debug!(settings = ?settings, "IronMQ settings loaded");

    Ok(settings)
}

fn config_error(e: config::ConfigError) -> AppError {
    AppError::Config(e.to_string())
}
