use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub form: FormConfig,
}

/// Analysis endpoint configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Unset means the request may hang forever, same as the browser form.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Where rendered analysis documents go
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// When false every window open is refused, like a popup blocker.
    #[serde(default = "default_true")]
    pub allow_windows: bool,
}

/// Initial values for the day-count fields
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FormConfig {
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,

    #[serde(default = "default_crossover_days")]
    pub crossover_days: u32,
}

// ── Defaults ─────────────────────────────────────────────────────────────────

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}
fn default_endpoint() -> String {
    "/analyze".to_string()
}
fn default_user_agent() -> String {
    concat!("analyze-form/", env!("CARGO_PKG_VERSION")).to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("reports")
}
fn default_true() -> bool {
    true
}
fn default_lookback_days() -> u32 {
    365
}
fn default_crossover_days() -> u32 {
    180
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            endpoint: default_endpoint(),
            timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            allow_windows: true,
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            lookback_days: default_lookback_days(),
            crossover_days: default_crossover_days(),
        }
    }
}

impl ClientConfig {
    /// Full URL of the analysis endpoint. Joins without doubling slashes.
    pub fn analyze_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.endpoint.trim_start_matches('/')
        )
    }
}

// ── Loader ───────────────────────────────────────────────────────────────────

impl AppConfig {
    /// Load configuration from file + environment overrides
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::load_with(config::Environment::with_prefix("ANALYZE").separator("__"))
    }

    /// Layer the config files under `env`. A value that fails to deserialize
    /// is an error; it never falls back to defaults.
    pub fn load_with(env: config::Environment) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(
                config::File::with_name("config/default")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(
                config::File::with_name("config/local")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(env)
            .build()?;

        cfg.try_deserialize()
            .context("Invalid configuration (config/*.toml or ANALYZE__* variables)")
    }
}
