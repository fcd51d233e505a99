//! CLI error types with miette diagnostics.
//!
//! Maps api and config errors into user-facing errors with help text.

use miette::Diagnostic;
use thiserror::Error;

use uniflux_api::DecodeError;
use uniflux_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const DECODE: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to controller at {url}")]
    #[diagnostic(
        code(uniflux::connection_failed),
        help(
            "Check that the controller is running and accessible.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("TLS setup failed: {message}")]
    #[diagnostic(
        code(uniflux::tls_error),
        help("Use --insecure (-k) to accept a self-signed certificate, or set ca_cert in the config.")
    )]
    Tls { message: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(uniflux::auth_failed),
        help("Verify the username and password for this controller.")
    )]
    AuthFailed { message: String },

    #[error("No credentials configured for controller '{controller}'")]
    #[diagnostic(
        code(uniflux::no_credentials),
        help(
            "Set `username` in the config file and provide the password via\n\
             UNIFLUX_PASSWORD, `password_env`, the system keyring or `password`."
        )
    )]
    NoCredentials { controller: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error: {message}")]
    #[diagnostic(code(uniflux::api_error))]
    Api { message: String },

    // ── Data ─────────────────────────────────────────────────────────
    #[error("Could not decode {file}")]
    #[diagnostic(
        code(uniflux::decode),
        help("The document is valid JSON but a field has a type no decoder accepts.")
    )]
    Decode {
        file: String,
        #[source]
        source: DecodeError,
    },

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(uniflux::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    // ── Configuration ────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(uniflux::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(code(uniflux::config))]
    Config(Box<figment::Error>),

    // ── IO ───────────────────────────────────────────────────────────
    #[error("Could not read {path}")]
    #[diagnostic(code(uniflux::io))]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::Tls { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Validation { .. } | Self::Config(_) => exit_code::USAGE,
            Self::Decode { .. } | Self::Json(_) => exit_code::DECODE,
            _ => exit_code::GENERAL,
        }
    }

    /// A decode failure in `origin` (a file or URL). Bytes that are not JSON
    /// at all get the JSON diagnostic; a bad field keeps its path.
    pub fn decode(origin: &str, err: DecodeError) -> Self {
        match err {
            DecodeError::Syntax(e) => Self::Json(e),
            field @ DecodeError::Field { .. } => Self::Decode {
                file: origin.to_owned(),
                source: field,
            },
        }
    }

    /// Attach the controller URL to a transport-layer error.
    pub fn from_api(err: uniflux_api::Error, url: &str) -> Self {
        use uniflux_api::Error;

        if err.is_connect() {
            return Self::ConnectionFailed {
                url: url.to_owned(),
                source: Box::new(err),
            };
        }

        match err {
            Error::Authentication { message } => Self::AuthFailed { message },
            Error::Tls(message) => Self::Tls { message },
            Error::InvalidUrl(e) => Self::Validation {
                field: "controller".into(),
                reason: e.to_string(),
            },
            Error::Transport(e) => Self::ConnectionFailed {
                url: url.to_owned(),
                source: Box::new(e),
            },
            Error::LegacyApi { message } | Error::Deserialization { message, .. } => {
                Self::Api { message }
            }
            Error::Decode(source) => Self::decode(url, source),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::NoCredentials { controller } => Self::NoCredentials { controller },
            ConfigError::Figment(e) => Self::Config(e),
        }
    }
}
