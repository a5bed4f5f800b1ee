//! Shared application state.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use betal_content::application::catalog::{InMemoryCatalog, StoryCatalog};
use betal_content::application::loader;
use betal_core::clock::{Clock, SystemClock};
use betal_core::error::DomainError;
use betal_core::rng::{DeterministicRng, StdDeterministicRng};
use betal_core::storage::KeyValueStorage;
use betal_game::application::controller::GameEngine;
use betal_game::application::store::GameStateStore;
use betal_state_store::file_storage::FileStorage;
use betal_state_store::memory_storage::MemoryStorage;
use tracing::info;

use crate::config::AppConfig;
use crate::error::AppError;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The single player's game. Never held across an `.await`.
    pub engine: Arc<Mutex<GameEngine>>,
    /// Story source.
    pub catalog: Arc<dyn StoryCatalog>,
    /// Randomness for story selection.
    pub rng: Arc<Mutex<dyn DeterministicRng>>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        engine: GameEngine,
        catalog: Arc<dyn StoryCatalog>,
        rng: Arc<Mutex<dyn DeterministicRng>>,
    ) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            catalog,
            rng,
        }
    }

    /// Wires storage, catalog, clock and RNG as `config` describes.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the state directory cannot be opened or
    /// a catalog or media file cannot be loaded.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let storage: Arc<dyn KeyValueStorage> = match &config.state_dir {
            Some(dir) => Arc::new(FileStorage::open(dir).map_err(config_error)?),
            None => Arc::new(MemoryStorage::new()),
        };
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let store = GameStateStore::open(storage, clock);

        let catalog = load_catalog(config)?;
        info!(stories = catalog.len(), themes = ?catalog.themes(), "catalog loaded");

        Ok(Self::new(
            GameEngine::new(store, config.rules),
            Arc::new(catalog),
            Arc::new(Mutex::new(StdDeterministicRng::from_os())),
        ))
    }

    /// Locks the engine.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if a handler panicked while
    /// holding the lock.
    pub fn engine(&self) -> Result<MutexGuard<'_, GameEngine>, DomainError> {
        self.engine
            .lock()
            .map_err(|_| DomainError::Infrastructure("game engine lock poisoned".to_owned()))
    }
}

fn load_catalog(config: &AppConfig) -> Result<InMemoryCatalog, AppError> {
    let catalog = match &config.catalog_path {
        Some(path) => loader::load_catalog_file(path).map_err(config_error)?,
        None => InMemoryCatalog::builtin().map_err(config_error)?,
    };
    let Some(media_path) = &config.generated_media_path else {
        return Ok(catalog);
    };
    let generated = read_generated_media(media_path)?;
    info!(entries = generated.len(), "overlaying generated media");
    Ok(InMemoryCatalog::new(loader::overlay_generated_media(
        catalog.stories().to_vec(),
        &generated,
    )))
}

fn read_generated_media(path: &Path) -> Result<Vec<loader::GeneratedMedia>, AppError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        AppError::Config(format!("cannot read generated media {}: {e}", path.display()))
    })?;
    loader::parse_generated_media_json(&raw).map_err(config_error)
}

#[allow(clippy::needless_pass_by_value)]
fn config_error(err: DomainError) -> AppError {
    AppError::Config(err.to_string())
}
