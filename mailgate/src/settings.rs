use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

use serde::de::DeserializeOwned;
use serde::Deserialize;

pub use config::ConfigError;

/// Load a deserializable type from environment variables.
///
/// Keys are matched case-insensitively, so `SENDER_EMAIL` fills a `sender_email` field.
pub trait EnvConfig: Sized {
    fn from_env() -> Result<Self, ConfigError>;
    fn from_env_with_prefix(prefix: &str) -> Result<Self, ConfigError>;
}

impl<D> EnvConfig for D
where
    D: DeserializeOwned,
{
    fn from_env() -> Result<Self, ConfigError> {
        load(config::Environment::default())
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self, ConfigError> {
        load(config::Environment::with_prefix(prefix))
    }
}

fn load<D: DeserializeOwned>(source: config::Environment) -> Result<D, ConfigError> {
    // A missing .env file is normal outside local development
    dotenvy::dotenv().ok();

    config::Config::builder()
        .add_source(source)
        .build()?
        .try_deserialize()
}

/// Process-wide settings, read once at startup and never mutated.
#[derive(Clone, Deserialize)]
pub struct Settings {
    /// Mailbox that authenticates to the relay and appears in `From`.
    #[serde(default)]
    pub sender_email: String,

    /// Application password for `sender_email`.
    #[serde(default)]
    pub app_password: String,

    /// Interface the HTTP listener binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: IpAddr,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    /// Implicit TLS port of the relay.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
}

fn default_bind_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_port() -> u16 {
    5000
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    465
}

impl Settings {
    /// Read settings from the process environment and reject blank sender credentials.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env()?.require_credentials()
    }

    /// Same as [`Settings::load`] with every variable name prefixed, e.g. `MAILGATE_SENDER_EMAIL`.
    pub fn load_with_prefix(prefix: &str) -> Result<Self, ConfigError> {
        Self::from_env_with_prefix(prefix)?.require_credentials()
    }

    fn require_credentials(self) -> Result<Self, ConfigError> {
        let missing: Vec<&str> = [
            ("SENDER_EMAIL", &self.sender_email),
            ("APP_PASSWORD", &self.app_password),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Message(format!(
                "missing environment variables: {}",
                missing.join(", ")
            )))
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("sender_email", &self.sender_email)
            .field("app_password", &"<redacted>")
            .field("bind_address", &self.bind_address)
            .field("port", &self.port)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .finish()
    }
}
