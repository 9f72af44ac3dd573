use std::env;
use std::fmt;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::workflows::inquiry::{DeliveryRoute, EvaluationConfig, FallbackContact, ProfileError};

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
    pub intake: IntakeConfig,
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
            intake: IntakeConfig::load()?,
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Scoring profile, delivery routing, and fallback contact for the inquiry workflow.
#[derive(Debug, Clone, Default)]
pub struct IntakeConfig {
    pub evaluation: EvaluationConfig,
    pub delivery: DeliveryRoute,
    pub fallback: FallbackContact,
}

impl IntakeConfig {
    /// Build from a preset (or JSON profile file) with per-field environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut evaluation = match env::var("LEAD_SCORING_FILE") {
            Ok(path) => load_profile_file(PathBuf::from(path))?,
            Err(_) => {
                let name =
                    env::var("LEAD_SCORING_PROFILE").unwrap_or_else(|_| "standard".to_string());
                EvaluationConfig::preset(&name).ok_or(ConfigError::UnknownProfile(name))?
            }
        };

        if let Some(high) = parse_var::<u32>("LEAD_HIGH_THRESHOLD")? {
            evaluation.thresholds.high = high;
        }
        if let Some(medium) = parse_var::<u32>("LEAD_MEDIUM_THRESHOLD")? {
            evaluation.thresholds.medium = medium;
        }
        if let Some(offset) = parse_var::<i32>("LEAD_DISPLAY_UTC_OFFSET_MINUTES")? {
            evaluation.messages.display_utc_offset_minutes = offset;
        }
        if let Ok(zone) = env::var("LEAD_DISPLAY_ZONE") {
            evaluation.messages.display_zone_label = zone;
        }
        if let Ok(owner) = env::var("LEAD_OWNER_EMAIL") {
            evaluation.messages.owner_email = owner;
        }

        evaluation.validate().map_err(ConfigError::Profile)?;

        let defaults = DeliveryRoute::default();
        let delivery = DeliveryRoute {
            service_id: env::var("NOTIFY_SERVICE_ID").unwrap_or(defaults.service_id),
            acknowledgement_template: env::var("NOTIFY_ACK_TEMPLATE")
                .unwrap_or(defaults.acknowledgement_template),
            internal_alert_template: env::var("NOTIFY_ALERT_TEMPLATE")
                .unwrap_or(defaults.internal_alert_template),
        };

        let defaults = FallbackContact::default();
        let fallback = FallbackContact {
            phone: env::var("FALLBACK_PHONE").unwrap_or(defaults.phone),
            email: env::var("FALLBACK_EMAIL").unwrap_or(defaults.email),
        };

        Ok(Self {
            evaluation,
            delivery,
            fallback,
        })
    }
}

fn load_profile_file(path: PathBuf) -> Result<EvaluationConfig, ConfigError> {
    let raw = fs::read_to_string(&path).map_err(|source| ConfigError::ProfileFile {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::ProfileFormat { path, source })
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
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidNumber {
        name: &'static str,
    },
    UnknownProfile(String),
    ProfileFile {
        path: PathBuf,
        source: std::io::Error,
    },
    ProfileFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
    Profile(ProfileError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { name } => write!(f, "{name} must be a valid integer"),
            ConfigError::UnknownProfile(name) => write!(
                f,
                "LEAD_SCORING_PROFILE '{name}' is not one of: standard, quote-desk"
            ),
            ConfigError::ProfileFile { path, .. } => {
                write!(f, "unable to read scoring profile {}", path.display())
            }
            ConfigError::ProfileFormat { path, .. } => {
                write!(f, "scoring profile {} is not valid JSON", path.display())
            }
            ConfigError::Profile(err) => write!(f, "invalid scoring profile: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::UnknownProfile(_) => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::ProfileFile { source, .. } => Some(source),
            ConfigError::ProfileFormat { source, .. } => Some(source),
            ConfigError::Profile(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for name in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "LEAD_SCORING_FILE",
            "LEAD_SCORING_PROFILE",
            "LEAD_HIGH_THRESHOLD",
            "LEAD_MEDIUM_THRESHOLD",
            "LEAD_DISPLAY_UTC_OFFSET_MINUTES",
            "LEAD_DISPLAY_ZONE",
            "LEAD_OWNER_EMAIL",
            "NOTIFY_SERVICE_ID",
            "NOTIFY_ACK_TEMPLATE",
            "NOTIFY_ALERT_TEMPLATE",
            "FALLBACK_PHONE",
            "FALLBACK_EMAIL",
        ] {
            env::remove_var(name);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.intake.evaluation, EvaluationConfig::standard());
        assert_eq!(config.intake.delivery, DeliveryRoute::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn threshold_overrides_apply_to_preset() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("LEAD_SCORING_PROFILE", "quote-desk");
        env::set_var("LEAD_MEDIUM_THRESHOLD", "30");
        env::set_var("NOTIFY_ALERT_TEMPLATE", "owner_alert");

        let config = IntakeConfig::load().expect("intake config loads");
        assert_eq!(config.evaluation.thresholds.high, 40);
        assert_eq!(config.evaluation.thresholds.medium, 30);
        assert_eq!(config.delivery.internal_alert_template, "owner_alert");
        reset_env();
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("LEAD_HIGH_THRESHOLD", "20");

        match IntakeConfig::load() {
            Err(ConfigError::Profile(ProfileError::ThresholdOrder { high, medium })) => {
                assert_eq!((high, medium), (20, 25));
            }
            other => panic!("expected threshold order error, got {other:?}"),
        }
        reset_env();
    }

    #[test]
    fn rejects_unknown_profile_names() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("LEAD_SCORING_PROFILE", "handyman");

        assert!(matches!(
            IntakeConfig::load(),
            Err(ConfigError::UnknownProfile(name)) if name == "handyman"
        ));
        reset_env();
    }

    #[test]
    fn loads_profile_from_json_file() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();

        let mut profile = EvaluationConfig::standard();
        profile.thresholds.high = 50;
        let path = env::temp_dir().join(format!("lead-profile-{}.json", std::process::id()));
        fs::write(
            &path,
            serde_json::to_string(&profile).expect("profile serializes"),
        )
        .expect("profile written");
        env::set_var("LEAD_SCORING_FILE", &path);

        let config = IntakeConfig::load().expect("profile file loads");
        assert_eq!(config.evaluation.thresholds.high, 50);

        fs::remove_file(&path).ok();
        reset_env();
    }
}
