//! Configuration for the uniflux poller.
//!
//! One controller per config file. Values are layered defaults → TOML file →
//! `UNIFLUX_*` environment, and the password is resolved separately through
//! an env/keyring/plaintext chain so it never has to live in the file.

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
use tracing::debug;
use url::Url;

use uniflux_api::{ControllerPlatform, TlsMode, TransportConfig};

/// Service name for keyring entries; the account is the username.
pub const KEYRING_SERVICE: &str = "uniflux";

/// Environment variable consulted for the password when `password_env`
/// is unset or empty.
pub const PASSWORD_ENV: &str = "UNIFLUX_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for controller '{controller}'")]
    NoCredentials { controller: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config ──────────────────────────────────────────────────────────

/// Which login flow the controller speaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    /// Detect the controller platform before logging in.
    #[default]
    Auto,
    UnifiOs,
    Classic,
}

impl Platform {
    /// The fixed platform, or `None` when it must be detected.
    pub fn fixed(self) -> Option<ControllerPlatform> {
        match self {
            Self::Auto => None,
            Self::UnifiOs => Some(ControllerPlatform::UnifiOs),
            Self::Classic => Some(ControllerPlatform::ClassicController),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Controller base URL (e.g., "https://192.168.1.1").
    pub controller: String,

    /// Site short name, not the display name.
    pub site: String,

    pub platform: Platform,

    pub username: Option<String>,

    /// Password in plaintext. Prefer `password_env` or the keyring.
    pub password: Option<String>,

    /// Name of an environment variable holding the password.
    pub password_env: Option<String>,

    /// PEM file with the controller's CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Skip certificate verification entirely.
    pub insecure: bool,

    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            controller: "https://127.0.0.1".into(),
            site: "default".into(),
            platform: Platform::Auto,
            username: None,
            password: None,
            password_env: None,
            ca_cert: None,
            insecure: false,
            timeout: 30,
        }
    }
}

/// Default config file location per platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "uniflux", "uniflux").map_or_else(
        || PathBuf::from("uniflux.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

impl Config {
    /// Layered provider: defaults, then `path`, then `UNIFLUX_*` variables.
    ///
    /// `UNIFLUX_PASSWORD` is left out here; [`Config::resolve_credentials`]
    /// reads it as one step of the password chain.
    pub fn figment(path: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("UNIFLUX_").ignore(&["password"]))
    }

    /// Load from `path`, or from [`config_path`] when `None`. A missing
    /// file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map_or_else(config_path, Path::to_path_buf);
        debug!(path = %path.display(), "loading config");
        let config: Self = Self::figment(&path).extract()?;
        Ok(config)
    }

    /// Check the values that would otherwise fail late, at connect time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.controller_url()?;

        if self.site.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "site".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least one second".into(),
            });
        }
        Ok(())
    }

    pub fn controller_url(&self) -> Result<Url, ConfigError> {
        let url: Url = self
            .controller
            .parse()
            .map_err(|e| ConfigError::Validation {
                field: "controller".into(),
                reason: format!("invalid URL '{}': {e}", self.controller),
            })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::Validation {
                field: "controller".into(),
                reason: format!("unsupported scheme '{other}', expected http or https"),
            }),
        }
    }

    /// TLS mode and timeout for the controller session.
    pub fn transport(&self) -> TransportConfig {
        let tls = if self.insecure {
            TlsMode::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.ca_cert {
            TlsMode::CustomCa(ca_path.clone())
        } else {
            TlsMode::System
        };

        TransportConfig {
            tls,
            timeout: Duration::from_secs(self.timeout),
        }
    }

    // ── Credential resolution ───────────────────────────────────────

    /// Resolve username and password from the process environment, the
    /// system keyring and the config itself.
    pub fn resolve_credentials(&self) -> Result<(String, SecretString), ConfigError> {
        self.resolve_credentials_with(|name| std::env::var(name).ok(), keyring_password)
    }

    /// Resolution with the environment and keyring lookups supplied.
    ///
    /// Order: `password_env` variable → `UNIFLUX_PASSWORD` → keyring entry
    /// `uniflux/<username>` → plaintext `password`.
    pub fn resolve_credentials_with<E, K>(
        &self,
        env: E,
        keyring: K,
    ) -> Result<(String, SecretString), ConfigError>
    where
        E: Fn(&str) -> Option<String>,
        K: FnOnce(&str) -> Option<String>,
    {
        let no_credentials = || ConfigError::NoCredentials {
            controller: self.controller.clone(),
        };

        let username = self
            .username
            .clone()
            .filter(|u| !u.is_empty())
            .ok_or_else(no_credentials)?;

        // 1. Configured env var
        if let Some(ref name) = self.password_env {
            if let Some(pw) = env(name) {
                debug!(source = %name, "password from environment");
                return Ok((username, SecretString::from(pw)));
            }
        }

        // 2. Default env var
        if let Some(pw) = env(PASSWORD_ENV) {
            debug!(source = PASSWORD_ENV, "password from environment");
            return Ok((username, SecretString::from(pw)));
        }

        // 3. Keyring
        if let Some(pw) = keyring(&username) {
            debug!("password from keyring");
            return Ok((username, SecretString::from(pw)));
        }

        // 4. Plaintext in config
        if let Some(ref pw) = self.password {
            debug!("password from config file");
            return Ok((username, SecretString::from(pw.clone())));
        }

        Err(no_credentials())
    }
}

fn keyring_password(username: &str) -> Option<String> {
    keyring::Entry::new(KEYRING_SERVICE, username)
        .and_then(|entry| entry.get_password())
        .ok()
}
