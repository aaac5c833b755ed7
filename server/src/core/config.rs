//! Server configuration
//!
//! Every setting can be overridden through environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | WORK_DIR | ./data | Working directory (database, logs) |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | JWT_SECRET | generated | Token signing secret (>= 32 chars) |
//! | JWT_EXPIRATION_MINUTES | 1440 | Token lifetime |
//! | LOW_STOCK_SCAN_SECS | 3600 | Low-stock scan interval |
//! | ALERT_WINDOW_SECS | 86400 | Alert suppression window |
//! | LOG_LEVEL | info | Tracing filter |
//! | ENVIRONMENT | development | development \| production |

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// JWT signing secret
    pub jwt_secret: String,
    /// Token lifetime in minutes
    pub jwt_expiration_minutes: i64,
    /// Interval between low-stock scans
    pub low_stock_scan_interval: Duration,
    /// Suppression window for repeated low-stock alerts
    pub alert_window: Duration,
    /// Tracing filter directive
    pub log_level: String,
    /// development | production
    pub environment: String,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: env_parse("HTTP_PORT", 3000),
            jwt_secret: load_jwt_secret(),
            jwt_expiration_minutes: env_parse("JWT_EXPIRATION_MINUTES", 1440),
            low_stock_scan_interval: Duration::from_secs(env_parse("LOW_STOCK_SCAN_SECS", 3600)),
            alert_window: Duration::from_secs(env_parse("ALERT_WINDOW_SECS", 86_400)),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    pub fn database_path(&self) -> String {
        format!("{}/inventory.db", self.work_dir)
    }

    pub fn log_dir(&self) -> String {
        format!("{}/logs", self.work_dir)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Load the JWT secret, refusing short values. Without one, production
/// aborts; development gets a random per-process secret (logins do not
/// survive a restart).
fn load_jwt_secret() -> String {
    match std::env::var("JWT_SECRET") {
        Ok(secret) if secret.len() >= 32 => secret,
        Ok(_) => {
            panic!("JWT_SECRET must be at least 32 characters long");
        }
        Err(_) => {
            let production = std::env::var("ENVIRONMENT")
                .map(|e| e == "production")
                .unwrap_or(false);
            if production {
                panic!("JWT_SECRET must be set in production");
            }
            tracing::warn!("JWT_SECRET not set, generating a temporary development secret");
            format!("{}{}", uuid::Uuid::new_v4().simple(), uuid::Uuid::new_v4().simple())
        }
    }
}
