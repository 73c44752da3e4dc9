use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use log::{info, warn};

const DEFAULT_SESSION_SECRET: &str = "hospital_secret_key";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub port: u16,
    pub session_secret: String,
    pub session_ttl_secs: i64,
    pub admin_username: String,
    pub admin_password: String,
    pub static_dir: PathBuf,
}

impl Config {
    /// Reads the environment (after `.env`), falling back to defaults for unset keys.
    pub fn load() -> Result<Self, String> {
        dotenv::dotenv().ok();
        let session_secret: String = try_load("SESSION_SECRET", DEFAULT_SESSION_SECRET)?;
        if session_secret == DEFAULT_SESSION_SECRET {
            warn!("SESSION_SECRET is the built-in default, set it for any shared deployment");
        }
        Ok(Self {
            database_url: try_load("DATABASE_URL", "sqlite://booking.db")?,
            bind_addr: try_load("BIND_ADDR", "127.0.0.1")?,
            port: try_load("PORT", "8080")?,
            session_secret,
            session_ttl_secs: try_load("SESSION_TTL_SECS", "2678400")?,
            admin_username: try_load("ADMIN_USERNAME", "admin")?,
            admin_password: try_load("ADMIN_PASSWORD", "admin123")?,
            static_dir: try_load("STATIC_DIR", "static")?,
        })
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.static_dir.join(crate::service::upload::UPLOADS_SUBDIR)
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, String>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.parse().map_err(|e| format!("invalid {key} value {raw:?}: {e}"))
}
