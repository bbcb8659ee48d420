//! Configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub tables: TablesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Default number of recommendations returned
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablesConfig {
    #[serde(default = "default_jobs_table")]
    pub jobs: String,

    #[serde(default = "default_courses_table")]
    pub courses: String,

    #[serde(default = "default_applications_table")]
    pub applications: String,

    #[serde(default = "default_profiles_table")]
    pub profiles: String,

    #[serde(default = "default_careers_table")]
    pub careers: String,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_top_n() -> usize {
    3
}

fn default_base_url() -> String {
    "http://localhost:54321/rest/v1".to_string()
}

fn default_api_key_env() -> String {
    "SILVERWORK_API_KEY".to_string()
}

fn default_jobs_table() -> String {
    "job_postings".to_string()
}

fn default_courses_table() -> String {
    "courses".to_string()
}

fn default_applications_table() -> String {
    "job_applications".to_string()
}

fn default_profiles_table() -> String {
    "profiles".to_string()
}

fn default_careers_table() -> String {
    "careers".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            top_n: default_top_n(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            jobs: default_jobs_table(),
            courses: default_courses_table(),
            applications: default_applications_table(),
            profiles: default_profiles_table(),
            careers: default_careers_table(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Try default config path if none specified
        let default_path = PathBuf::from("./config.toml");
        let path = config_path.unwrap_or(&default_path);

        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        } else if config_path.is_some() {
            // User specified a path that doesn't exist
            anyhow::bail!("Config file not found: {}", path.display());
        }

        // Add environment variable overrides
        builder = builder.add_source(
            config::Environment::with_prefix("SILVERWORK")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Generate example configuration as TOML string
    pub fn example_toml() -> String {
        r#"# silverwork configuration

[general]
log_level = "info"
# Default number of recommendations returned
top_n = 3

[backend]
# PostgREST-style row endpoint of the hosted backend
base_url = "http://localhost:54321/rest/v1"
api_key_env = "SILVERWORK_API_KEY"

[tables]
jobs = "job_postings"
courses = "courses"
applications = "job_applications"
profiles = "profiles"
careers = "careers"
"#
        .to_string()
    }
}
