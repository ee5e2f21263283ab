use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

/// Model used when the caller does not name one.
pub const DEFAULT_MODEL: &str = "black-forest-labs/flux.2-klein-4b";

const DEFAULT_TIMEOUT_SECS: u64 = 45;

/// Origins permitted in production when no override is configured.
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "https://faiz786-lada.github.io",
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://localhost:10000",
];

/// Host suffixes trusted in production (static hosting and PaaS domains).
const DEFAULT_TRUSTED_SUFFIXES: &[&str] = &["github.io", "onrender.com"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    10000
}

#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub trusted_suffixes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub environment: Environment,
    pub openrouter: OpenRouterConfig,
    pub cors: CorsConfig,
    pub static_dir: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        // PORT comes through the config crate so an optional configuration
        // file can override it the same way as the environment.
        let server: ServerConfig = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::default())
            .build()?
            .try_deserialize()?;

        let environment = parse_environment(env::var("ENVIRONMENT").ok().as_deref());

        Ok(AppConfig {
            server,
            environment,
            openrouter: OpenRouterConfig {
                api_key: get_env("OPENROUTER_API_KEY", None)?,
                model: get_env("OPENROUTER_MODEL", Some(DEFAULT_MODEL))?,
                timeout_secs: get_env(
                    "OPENROUTER_TIMEOUT_SECS",
                    Some(&DEFAULT_TIMEOUT_SECS.to_string()),
                )?
                .parse()
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            },
            cors: CorsConfig {
                allowed_origins: parse_list(
                    env::var("CORS_ALLOWED_ORIGINS").ok().as_deref(),
                    DEFAULT_ALLOWED_ORIGINS,
                ),
                trusted_suffixes: parse_list(
                    env::var("CORS_TRUSTED_SUFFIXES").ok().as_deref(),
                    DEFAULT_TRUSTED_SUFFIXES,
                ),
            },
            static_dir: get_env("STATIC_DIR", Some("frontend"))?,
        })
    }
}

fn parse_environment(value: Option<&str>) -> Environment {
    match value {
        Some(v) if v.eq_ignore_ascii_case("production") || v.eq_ignore_ascii_case("prod") => {
            Environment::Production
        }
        _ => Environment::Development,
    }
}

/// Comma-separated override, falling back to the built-in list.
fn parse_list(value: Option<&str>, defaults: &[&str]) -> Vec<String> {
    match value {
        Some(raw) if !raw.trim().is_empty() => raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        _ => defaults.iter().map(|s| s.to_string()).collect(),
    }
}

fn get_env(key: &str, default: Option<&str>) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) if !val.trim().is_empty() => Ok(val),
        _ => {
            if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::Config(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
