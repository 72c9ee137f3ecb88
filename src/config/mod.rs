use sqlx::postgres::PgConnectOptions;
use std::env;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Development,
    Production,
}

impl RunMode {
    fn parse(raw: Option<&str>) -> Self {
        match raw.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "development" || v == "dev" => RunMode::Development,
            _ => RunMode::Production,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    MissingPassword,
    InvalidPort(String),
    InvalidDatabaseUrl(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingPassword => write!(f, "DB_PASSWORD environment variable must be set"),
            ConfigError::InvalidPort(port) => write!(f, "DB_PORT is not a valid port: {}", port),
            ConfigError::InvalidDatabaseUrl(msg) => write!(f, "DATABASE_URL is invalid: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Where the relational connection comes from.
#[derive(Debug, Clone)]
pub enum DbConfig {
    Url(String),
    Parts {
        host: String,
        port: u16,
        database: String,
        user: String,
        password: String,
    },
}

impl DbConfig {
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        match self {
            DbConfig::Url(url) => PgConnectOptions::from_str(url)
                .map_err(|err| ConfigError::InvalidDatabaseUrl(err.to_string())),
            DbConfig::Parts { host, port, database, user, password } => Ok(PgConnectOptions::new()
                .host(host)
                .port(*port)
                .database(database)
                .username(user)
                .password(password)),
        }
    }

    /// Connection target with the secret left out, for logging.
    pub fn describe(&self) -> String {
        match self {
            DbConfig::Url(_) => "DATABASE_URL".to_string(),
            DbConfig::Parts { host, port, database, user, .. } => {
                format!("{}@{}:{}/{}", user, host, port, database)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub run_mode: RunMode,
    pub bind_address: String,
    pub database: Option<DbConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let run_mode = RunMode::parse(lookup("APP_ENV").as_deref());
        let bind_address = non_empty(lookup("BIND_ADDRESS"))
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let database = match run_mode {
            RunMode::Development => None,
            RunMode::Production => Some(db_config(&lookup)?),
        };

        Ok(AppConfig { run_mode, bind_address, database })
    }
}

fn db_config<F>(lookup: &F) -> Result<DbConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = non_empty(lookup("DATABASE_URL")) {
        let config = DbConfig::Url(url);
        config.connect_options()?;
        return Ok(config);
    }

    let password = non_empty(lookup("DB_PASSWORD")).ok_or(ConfigError::MissingPassword)?;
    let raw_port = non_empty(lookup("DB_PORT")).unwrap_or_else(|| "5432".to_string());
    let port = raw_port
        .parse::<u16>()
        .map_err(|_| ConfigError::InvalidPort(raw_port.clone()))?;

    Ok(DbConfig::Parts {
        host: non_empty(lookup("DB_HOST")).unwrap_or_else(|| "localhost".to_string()),
        port,
        database: non_empty(lookup("DB_NAME")).unwrap_or_else(|| "k8s_assignment".to_string()),
        user: non_empty(lookup("DB_USER")).unwrap_or_else(|| "postgres".to_string()),
        password,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
