//! Shared configuration for the QuickPoll CLI.
//!
//! TOML file plus `QUICKPOLL_*` environment overlay, translated to a
//! `quickpoll_core::SessionConfig`. The core crates never read config
//! files -- whoever owns the process builds the session and hands it in.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use quickpoll_core::SessionConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config ──────────────────────────────────────────────────────────

/// On-disk configuration, merged with `QUICKPOLL_*` env vars.
///
/// Precedence, lowest to highest: built-in defaults, the TOML file,
/// environment variables. CLI flags override all of it (the CLI applies
/// those itself).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Poll service base URL.
    pub service: Option<String>,

    /// Bearer token to authenticate with, if already obtained.
    pub token: Option<String>,

    /// Seconds between live-result refresh ticks.
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Default participant identity for the `vote` command.
    pub email: Option<String>,
    pub name: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: None,
            token: None,
            refresh_secs: default_refresh_secs(),
            timeout_secs: default_timeout_secs(),
            email: None,
            name: None,
        }
    }
}

fn default_refresh_secs() -> u64 {
    4
}
fn default_timeout_secs() -> u64 {
    30
}

/// Default config file location (`quickpoll.toml` under the platform
/// config directory).
pub fn config_path() -> PathBuf {
    ProjectDirs::from("app", "quickpoll", "quickpoll")
        .map(|dirs| dirs.config_dir().join("quickpoll.toml"))
        .unwrap_or_else(|| PathBuf::from("quickpoll.toml"))
}

/// Load configuration from `path` (or the default location) merged
/// with the environment. A missing file is fine -- defaults apply.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = path.map_or_else(config_path, Path::to_path_buf);

    let config: Config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(file))
        .merge(Env::prefixed("QUICKPOLL_"))
        .extract()?;

    config.validate()?;
    Ok(config)
}

impl Config {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_secs == 0 {
            return Err(ConfigError::Validation {
                field: "refresh_secs".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation {
                field: "timeout_secs".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Translate to a `SessionConfig`, requiring a service URL from
    /// some layer (file, env, or the CLI override passed here).
    pub fn session_config(
        &self,
        service_override: Option<&str>,
        token_override: Option<&str>,
    ) -> Result<SessionConfig, ConfigError> {
        let service = service_override
            .or(self.service.as_deref())
            .ok_or_else(|| ConfigError::Validation {
                field: "service".into(),
                reason: "no poll service URL configured (set QUICKPOLL_SERVICE, \
                         add `service` to quickpoll.toml, or pass --service)"
                    .into(),
            })?;

        let service_url = service.parse().map_err(|e| ConfigError::Validation {
            field: "service".into(),
            reason: format!("invalid URL '{service}': {e}"),
        })?;

        let token = token_override
            .or(self.token.as_deref())
            .map(|t| SecretString::from(t.to_owned()));

        Ok(SessionConfig {
            service_url,
            token,
            timeout: Duration::from_secs(self.timeout_secs),
            refresh_interval: Duration::from_secs(self.refresh_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_apply_without_a_file() {
        figment::Jail::expect_with(|jail| {
            jail.clear_env();
            let config = load(Some(Path::new("missing.toml"))).expect("defaults load");
            assert_eq!(config.refresh_secs, 4);
            assert_eq!(config.timeout_secs, 30);
            assert!(config.service.is_none());
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file(
                "quickpoll.toml",
                r#"
                    service = "http://file.example/api/quickpolls/"
                    refresh_secs = 10
                "#,
            )?;
            jail.set_env("QUICKPOLL_SERVICE", "http://env.example/api/quickpolls/");

            let config = load(Some(Path::new("quickpoll.toml"))).expect("config loads");
            assert_eq!(
                config.service.as_deref(),
                Some("http://env.example/api/quickpolls/")
            );
            assert_eq!(config.refresh_secs, 10);
            Ok(())
        });
    }

    #[test]
    fn zero_refresh_interval_is_rejected() {
        figment::Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file("quickpoll.toml", "refresh_secs = 0")?;
            let err = load(Some(Path::new("quickpoll.toml")))
                .err()
                .expect("zero interval rejected");
            assert!(matches!(err, ConfigError::Validation { .. }));
            Ok(())
        });
    }

    #[test]
    fn session_config_requires_a_service_url() {
        let config = Config::default();
        let err = config
            .session_config(None, None)
            .err()
            .expect("missing service URL rejected");
        assert!(matches!(err, ConfigError::Validation { .. }));

        let session = config
            .session_config(Some("http://flag.example/api/quickpolls/"), Some("tok"))
            .expect("override satisfies the requirement");
        assert_eq!(
            session.service_url.as_str(),
            "http://flag.example/api/quickpolls/"
        );
        assert!(session.token.is_some());
        assert_eq!(session.refresh_interval, Duration::from_secs(4));
    }
}
