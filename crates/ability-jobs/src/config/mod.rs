use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub backend: BackendConfig,
    pub voice: VoiceConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            backend: BackendConfig::from_env()?,
            voice: VoiceConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Managed backend selection. Without a remote the in-memory demo backend is used.
#[derive(Debug, Clone, Default)]
pub struct BackendConfig {
    pub remote: Option<RemoteBackendConfig>,
}

impl BackendConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = env::var("SUPABASE_URL")
            .ok()
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty());

        let Some(url) = url else {
            return Ok(Self::default());
        };

        let anon_key = env::var("SUPABASE_ANON_KEY")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingBackendKey)?;
        let resume_bucket = env::var("RESUME_BUCKET").unwrap_or_else(|_| "resumes".to_string());

        Ok(Self {
            remote: Some(RemoteBackendConfig {
                url,
                anon_key,
                resume_bucket,
            }),
        })
    }
}

/// Connection details for the hosted REST and storage endpoints.
#[derive(Clone)]
pub struct RemoteBackendConfig {
    pub url: String,
    pub anon_key: String,
    pub resume_bucket: String,
}

impl fmt::Debug for RemoteBackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteBackendConfig")
            .field("url", &self.url)
            .field("anon_key", &"<redacted>")
            .field("resume_bucket", &self.resume_bucket)
            .finish()
    }
}

/// Speech parameters and first-load timing for voice mode.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceConfig {
    pub locale: String,
    pub rate: f32,
    pub pitch: f32,
    pub first_load_delay: Duration,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            rate: 0.9,
            pitch: 1.0,
            first_load_delay: Duration::from_millis(1000),
        }
    }
}

impl VoiceConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let locale = env::var("VOICE_LOCALE").unwrap_or(defaults.locale);
        let rate = parse_var("VOICE_RATE")?.unwrap_or(defaults.rate);
        let pitch = parse_var("VOICE_PITCH")?.unwrap_or(defaults.pitch);
        let first_load_delay = parse_var::<u64>("VOICE_FIRST_LOAD_DELAY_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.first_load_delay);

        Ok(Self {
            locale,
            rate,
            pitch,
            first_load_delay,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { name }),
        Err(_) => Ok(None),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { name: &'static str },
    MissingBackendKey,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { name } => write!(f, "{name} must be a valid number"),
            ConfigError::MissingBackendKey => {
                write!(f, "SUPABASE_ANON_KEY is required when SUPABASE_URL is set")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::MissingBackendKey => None,
        }
    }
}
