use crate::advisor::{RecommenderConfig, SelectionStrategy};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_CATALOG_TTL_SECS: u64 = 6 * 60 * 60;
pub const DEFAULT_PRODUCT_NAME: &str = "DriveLens";

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
    pub catalog: CatalogConfig,
    pub recommender: RecommenderConfig,
    pub narration: NarrationConfig,
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

        let catalog_path = env::var("APP_CATALOG_PATH")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        let ttl_secs = match env::var("APP_CATALOG_TTL_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidCatalogTtl)?,
            Err(_) => DEFAULT_CATALOG_TTL_SECS,
        };

        let strategy = match env::var("APP_RECOMMENDER_STRATEGY") {
            Ok(raw) => SelectionStrategy::parse(&raw)
                .ok_or(ConfigError::InvalidStrategy { value: raw })?,
            Err(_) => SelectionStrategy::default(),
        };
        let limit = match env::var("APP_RECOMMENDER_LIMIT") {
            Ok(raw) => match raw.trim().parse::<usize>() {
                Ok(value) if value > 0 => value,
                _ => return Err(ConfigError::InvalidRecommenderLimit),
            },
            Err(_) => RecommenderConfig::default().limit,
        };

        let product_name = env::var("APP_PRODUCT_NAME")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_PRODUCT_NAME.to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            catalog: CatalogConfig {
                path: catalog_path,
                ttl_secs,
            },
            recommender: RecommenderConfig { strategy, limit },
            narration: NarrationConfig { product_name },
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

/// Where the inventory comes from and how long a loaded copy stays fresh.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// JSON or CSV file; `None` serves the bundled catalogs.
    pub path: Option<PathBuf>,
    pub ttl_secs: u64,
}

impl CatalogConfig {
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::try_from(self.ttl_secs).unwrap_or(i64::MAX / 1_000))
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            ttl_secs: DEFAULT_CATALOG_TTL_SECS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NarrationConfig {
    pub product_name: String,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            product_name: DEFAULT_PRODUCT_NAME.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidCatalogTtl,
    InvalidStrategy { value: String },
    InvalidRecommenderLimit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidCatalogTtl => {
                write!(f, "APP_CATALOG_TTL_SECS must be a whole number of seconds")
            }
            ConfigError::InvalidStrategy { value } => write!(
                f,
                "APP_RECOMMENDER_STRATEGY must be 'diverse' or 'top-n', got '{}'",
                value
            ),
            ConfigError::InvalidRecommenderLimit => {
                write!(f, "APP_RECOMMENDER_LIMIT must be a positive integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
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
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_CATALOG_PATH",
            "APP_CATALOG_TTL_SECS",
            "APP_RECOMMENDER_STRATEGY",
            "APP_RECOMMENDER_LIMIT",
            "APP_PRODUCT_NAME",
        ] {
            env::remove_var(key);
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
        assert!(config.catalog.path.is_none());
        assert_eq!(config.catalog.ttl_secs, 21_600);
        assert_eq!(config.recommender.limit, 5);
        assert!(matches!(
            config.recommender.strategy,
            SelectionStrategy::Diverse { max_per_model: 2 }
        ));
        assert_eq!(config.narration.product_name, "DriveLens");
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_catalog_and_recommender_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_CATALOG_PATH", "/srv/catalog.csv");
        env::set_var("APP_CATALOG_TTL_SECS", "60");
        env::set_var("APP_RECOMMENDER_STRATEGY", "top-n");
        env::set_var("APP_RECOMMENDER_LIMIT", "3");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.catalog.path, Some(PathBuf::from("/srv/catalog.csv")));
        assert_eq!(config.catalog.ttl(), chrono::Duration::seconds(60));
        assert_eq!(config.recommender.strategy, SelectionStrategy::TopN);
        assert_eq!(config.recommender.limit, 3);
        reset_env();
    }

    #[test]
    fn rejects_unknown_strategy_and_zero_limit() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_RECOMMENDER_STRATEGY", "random");
        let err = AppConfig::load().expect_err("strategy rejected");
        assert!(matches!(err, ConfigError::InvalidStrategy { .. }));

        reset_env();
        env::set_var("APP_RECOMMENDER_LIMIT", "0");
        let err = AppConfig::load().expect_err("limit rejected");
        assert!(matches!(err, ConfigError::InvalidRecommenderLimit));
        reset_env();
    }
}
