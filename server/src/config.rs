//! Server configuration module.
//!
//! This module provides configuration loading for the API server from
//! environment variables.
//!
//! # Environment Variables
//!
//! - `SECRET_KEY`: Secret used to sign and verify session tokens (required
//!   outside development)
//! - `ACCESS_TOKEN_EXPIRE_MINUTES`: Token lifetime in minutes (default: `30`)
//! - `DATABASE_URL`: Connection string for the credential store
//!   (default: `sqlite://app.db?mode=rwc`)
//! - `PORT`: Port to listen on (default: `8000`)
//! - `ALLOWED_ORIGINS`: Comma-separated CORS origin list, or `*` for any
//!   (default: `*`)
//! - `ENVIRONMENT`: `development` or `production` (default: `production`)
//!
//! # Invariants
//!
//! - `listen_port` is always a valid port number (1-65535)
//! - `signing_secret` is never empty
//! - `token_lifetime` is always a positive duration
//! - An ephemeral signing secret is only ever generated in development, and
//!   never silently: tokens minted under it die with the process

use std::time::Duration;

use rand::Rng;

/// Deployment environment the server believes it is running in.
///
/// Anything other than an explicit `development` is treated as production:
/// the conservative reading for a value that gates whether a missing signing
/// secret is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Local development. An ephemeral signing secret may be generated.
    Development,
    /// Production-like. The signing secret must be supplied externally.
    Production,
}

impl Environment {
    /// Parse an `ENVIRONMENT` value. Absent or unrecognized values are
    /// treated as production.
    fn from_value(value: Option<&str>) -> Self {
        match value {
            Some("development") => Self::Development,
            _ => Self::Production,
        }
    }

    /// Human-readable name, used by the info endpoint.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

/// Secret key material used to sign and verify session tokens.
///
/// # Invariants
/// - The secret bytes are never empty.
/// - `ephemeral` is true only when the secret was generated at startup
///   rather than supplied via `SECRET_KEY`.
#[derive(Debug, Clone)]
pub struct SigningSecret {
    bytes: Vec<u8>,
    /// Whether the secret was generated at startup. Tokens signed with an
    /// ephemeral secret do not survive a process restart.
    pub ephemeral: bool,
}

impl SigningSecret {
    /// The raw secret bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Construct a secret from externally supplied bytes.
    ///
    /// # Errors
    /// Returns an error if `bytes` is empty.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ConfigError> {
        if bytes.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "SECRET_KEY".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(Self {
            bytes,
            ephemeral: false,
        })
    }

    /// Generate a random secret for development use.
    fn generate_ephemeral() -> Self {
        let bytes: [u8; 32] = rand::rng().random();
        Self {
            bytes: bytes.to_vec(),
            ephemeral: true,
        }
    }
}

/// CORS origin policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    /// Any origin is allowed. Credentials are not, per CORS rules.
    Any,
    /// Only the listed origins are allowed.
    List(Vec<String>),
}

impl AllowedOrigins {
    /// Parse an `ALLOWED_ORIGINS` value: `*` (or absent) means any origin,
    /// otherwise a comma-separated origin list. Surrounding whitespace and
    /// empty entries are discarded.
    fn from_value(value: Option<&str>) -> Self {
        match value {
            None | Some("*") => Self::Any,
            Some(list) => {
                let origins: Vec<String> = list
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(ToString::to_string)
                    .collect();
                if origins.is_empty() {
                    Self::Any
                } else {
                    Self::List(origins)
                }
            }
        }
    }
}

/// Server configuration.
///
/// Contains all configuration parameters needed to run the API server.
///
/// # Post-conditions
///
/// - `listen_port` is always in the valid range (1-65535)
/// - `signing_secret` is non-empty, and ephemeral only in development
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on for HTTP connections.
    pub listen_port: u16,
    /// Connection string for the credential store.
    pub database_url: String,
    /// Secret used to sign and verify session tokens.
    pub signing_secret: SigningSecret,
    /// How long an issued token remains valid.
    pub token_lifetime: Duration,
    /// CORS origin policy.
    pub allowed_origins: AllowedOrigins,
    /// Deployment environment.
    pub environment: Environment,
}

/// Error returned when loading configuration fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable is missing.
    MissingEnvVar(String),
    /// An environment variable has an invalid value.
    InvalidValue { name: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEnvVar(name) => {
                write!(f, "missing required environment variable: {name}")
            }
            Self::InvalidValue { name, message } => {
                write!(f, "invalid value for {name}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ServerConfig {
    /// Default port for the server.
    pub const DEFAULT_PORT: u16 = 8000;
    /// Default credential store location.
    pub const DEFAULT_DATABASE_URL: &'static str = "sqlite://app.db?mode=rwc";
    /// Default token lifetime in minutes.
    pub const DEFAULT_TOKEN_LIFETIME_MINUTES: u64 = 30;

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `SECRET_KEY` is not set outside development, or is set but empty
    /// - `ACCESS_TOKEN_EXPIRE_MINUTES` is set but not a positive integer
    /// - `PORT` is set but not a valid port number
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_value(env_var("ENVIRONMENT").as_deref());
        let signing_secret = Self::resolve_signing_secret(environment, env_var("SECRET_KEY"))?;
        let token_lifetime =
            Self::parse_token_lifetime(env_var("ACCESS_TOKEN_EXPIRE_MINUTES").as_deref())?;
        let listen_port = Self::parse_listen_port(env_var("PORT").as_deref())?;
        let database_url =
            env_var("DATABASE_URL").unwrap_or_else(|| Self::DEFAULT_DATABASE_URL.to_string());
        let allowed_origins = AllowedOrigins::from_value(env_var("ALLOWED_ORIGINS").as_deref());

        Ok(Self {
            listen_port,
            database_url,
            signing_secret,
            token_lifetime,
            allowed_origins,
            environment,
        })
    }

    /// Resolve the signing secret against the environment policy.
    ///
    /// A missing secret is startup-fatal outside development: tokens signed
    /// with a generated key become universally invalid on restart, so the
    /// fallback must never be silent and never apply where tokens have to
    /// survive the process.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret is absent outside development, or is
    /// present but empty.
    fn resolve_signing_secret(
        environment: Environment,
        value: Option<String>,
    ) -> Result<SigningSecret, ConfigError> {
        match value {
            Some(secret) => SigningSecret::from_bytes(secret.into_bytes()),
            None => match environment {
                Environment::Development => {
                    tracing::warn!(
                        "SECRET_KEY is not set; generated an ephemeral signing key. \
                         All issued tokens will be invalid after a restart."
                    );
                    Ok(SigningSecret::generate_ephemeral())
                }
                Environment::Production => {
                    Err(ConfigError::MissingEnvVar("SECRET_KEY".to_string()))
                }
            },
        }
    }

    /// Parse the token lifetime in minutes. Returns the default if not set.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is set but not a positive integer.
    fn parse_token_lifetime(value: Option<&str>) -> Result<Duration, ConfigError> {
        let minutes = match value {
            Some(raw) => match raw.parse::<u64>() {
                Ok(minutes) if minutes > 0 => minutes,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "ACCESS_TOKEN_EXPIRE_MINUTES".to_string(),
                        message: format!("'{raw}' is not a positive number of minutes"),
                    });
                }
            },
            None => Self::DEFAULT_TOKEN_LIFETIME_MINUTES,
        };
        Ok(Duration::from_secs(minutes * 60))
    }

    /// Parse the listen port. Returns the default if not set.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is set but not a valid port number.
    fn parse_listen_port(value: Option<&str>) -> Result<u16, ConfigError> {
        match value {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                name: "PORT".to_string(),
                message: format!("'{raw}' is not a valid port number (must be 1-65535)"),
            }),
            None => Ok(Self::DEFAULT_PORT),
        }
    }
}

/// Read an environment variable, treating "unset" and "not unicode" alike.
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(ServerConfig::DEFAULT_PORT, 8000);
        assert_eq!(
            ServerConfig::DEFAULT_DATABASE_URL,
            "sqlite://app.db?mode=rwc"
        );
        assert_eq!(ServerConfig::DEFAULT_TOKEN_LIFETIME_MINUTES, 30);
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_value(Some("development")),
            Environment::Development
        );
        assert_eq!(
            Environment::from_value(Some("production")),
            Environment::Production
        );
        assert_eq!(
            Environment::from_value(Some("staging")),
            Environment::Production
        );
        assert_eq!(Environment::from_value(None), Environment::Production);
    }

    #[test]
    fn test_missing_secret_is_fatal_in_production() {
        let result = ServerConfig::resolve_signing_secret(Environment::Production, None);
        assert_eq!(
            result.map(|_| ()),
            Err(ConfigError::MissingEnvVar("SECRET_KEY".to_string()))
        );
    }

    #[test]
    fn test_missing_secret_generates_ephemeral_key_in_development() {
        let secret = ServerConfig::resolve_signing_secret(Environment::Development, None)
            .expect("development must fall back to an ephemeral key");
        assert!(secret.ephemeral);
        assert!(!secret.as_bytes().is_empty());
    }

    #[test]
    fn test_supplied_secret_is_not_ephemeral() {
        let secret = ServerConfig::resolve_signing_secret(
            Environment::Production,
            Some("super-secret".to_string()),
        )
        .expect("supplied secret must be accepted");
        assert!(!secret.ephemeral);
        assert_eq!(secret.as_bytes(), b"super-secret");
    }

    #[test]
    fn test_empty_secret_rejected() {
        let result =
            ServerConfig::resolve_signing_secret(Environment::Production, Some(String::new()));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_token_lifetime_default_and_parse() {
        assert_eq!(
            ServerConfig::parse_token_lifetime(None),
            Ok(Duration::from_secs(30 * 60))
        );
        assert_eq!(
            ServerConfig::parse_token_lifetime(Some("5")),
            Ok(Duration::from_secs(5 * 60))
        );
    }

    #[test]
    fn test_token_lifetime_rejects_zero_and_garbage() {
        assert!(ServerConfig::parse_token_lifetime(Some("0")).is_err());
        assert!(ServerConfig::parse_token_lifetime(Some("soon")).is_err());
    }

    #[test]
    fn test_allowed_origins_parsing() {
        assert_eq!(AllowedOrigins::from_value(None), AllowedOrigins::Any);
        assert_eq!(AllowedOrigins::from_value(Some("*")), AllowedOrigins::Any);
        assert_eq!(
            AllowedOrigins::from_value(Some("http://localhost:5173, http://localhost:3000")),
            AllowedOrigins::List(vec![
                "http://localhost:5173".to_string(),
                "http://localhost:3000".to_string(),
            ])
        );
        assert_eq!(AllowedOrigins::from_value(Some(" , ")), AllowedOrigins::Any);
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::MissingEnvVar("SECRET_KEY".to_string());
        assert_eq!(
            error.to_string(),
            "missing required environment variable: SECRET_KEY"
        );

        let error = ConfigError::InvalidValue {
            name: "PORT".to_string(),
            message: "bad value".to_string(),
        };
        assert_eq!(error.to_string(), "invalid value for PORT: bad value");
    }
}
