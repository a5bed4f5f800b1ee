//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use betal_game::domain::rules::{DEFAULT_CURSE_DURATION_MS, DEFAULT_RETURN_DELAY_MS, GameRules};

use crate::error::AppError;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

/// Everything the server needs to start.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Directory holding the persisted game state; in-memory when unset.
    pub state_dir: Option<PathBuf>,
    /// JSON or YAML story catalog; the bundled catalog when unset.
    pub catalog_path: Option<PathBuf>,
    /// Generated media metadata overlaid on the catalog.
    pub generated_media_path: Option<PathBuf>,
    /// Curse and result-pause durations.
    pub rules: GameRules,
}

impl AppConfig {
    /// Reads `HOST`, `PORT`, `BETAL_STATE_DIR`, `BETAL_CATALOG`,
    /// `BETAL_GENERATED_MEDIA`, `BETAL_CURSE_DURATION_MS` and
    /// `BETAL_RETURN_DELAY_MS`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a value does not parse or is out of
    /// range.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a value does not parse or is out of
    /// range.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = non_empty("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = match non_empty("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => DEFAULT_PORT,
        };
        let curse_ms = parse_millis(
            non_empty("BETAL_CURSE_DURATION_MS"),
            "BETAL_CURSE_DURATION_MS",
            DEFAULT_CURSE_DURATION_MS,
        )?;
        let return_ms = parse_millis(
            non_empty("BETAL_RETURN_DELAY_MS"),
            "BETAL_RETURN_DELAY_MS",
            DEFAULT_RETURN_DELAY_MS,
        )?;
        let rules = GameRules::from_millis(curse_ms, return_ms)
            .map_err(|e| AppError::Config(e.to_string()))?;

        Ok(Self {
            host,
            port,
            state_dir: non_empty("BETAL_STATE_DIR").map(PathBuf::from),
            catalog_path: non_empty("BETAL_CATALOG").map(PathBuf::from),
            generated_media_path: non_empty("BETAL_GENERATED_MEDIA").map(PathBuf::from),
            rules,
        })
    }

    /// The address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `host:port` is not a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parse_millis(raw: Option<String>, key: &str, default: i64) -> Result<i64, AppError> {
    raw.map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} must be an integer: {e}")))
    })
}
