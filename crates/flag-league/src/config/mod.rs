use std::env;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::league::stats::DEFAULT_LEADER_LIMIT;
use crate::league::CategoryRuleBook;

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
    pub league: LeagueConfig,
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

        let leader_limit = match env::var("APP_LEADER_LIMIT") {
            Ok(raw) => match raw.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => limit,
                _ => return Err(ConfigError::InvalidLeaderLimit),
            },
            Err(_) => DEFAULT_LEADER_LIMIT,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            league: LeagueConfig {
                snapshot_path: env::var_os("APP_LEAGUE_SNAPSHOT").map(PathBuf::from),
                category_rules_path: env::var_os("APP_CATEGORY_RULES").map(PathBuf::from),
                leader_limit,
            },
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

/// Where league data and category rules come from.
#[derive(Debug, Clone)]
pub struct LeagueConfig {
    pub snapshot_path: Option<PathBuf>,
    pub category_rules_path: Option<PathBuf>,
    pub leader_limit: usize,
}

impl LeagueConfig {
    /// The configured rule book, or the built-in table when none is set.
    pub fn rule_book(&self) -> Result<CategoryRuleBook, ConfigError> {
        let Some(path) = &self.category_rules_path else {
            return Ok(CategoryRuleBook::standard());
        };

        let file = File::open(path).map_err(|source| ConfigError::CategoryRulesUnreadable {
            path: path.clone(),
            source,
        })?;
        CategoryRuleBook::from_json_reader(BufReader::new(file)).map_err(|source| {
            ConfigError::CategoryRulesInvalid {
                path: path.clone(),
                source,
            }
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidLeaderLimit,
    CategoryRulesUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    CategoryRulesInvalid {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidLeaderLimit => {
                write!(f, "APP_LEADER_LIMIT must be a positive integer")
            }
            ConfigError::CategoryRulesUnreadable { path, .. } => {
                write!(f, "unable to read category rules from {}", path.display())
            }
            ConfigError::CategoryRulesInvalid { path, .. } => {
                write!(f, "category rules in {} are not valid JSON", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidLeaderLimit => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::CategoryRulesUnreadable { source, .. } => Some(source),
            ConfigError::CategoryRulesInvalid { source, .. } => Some(source),
        }
    }
}
