use std::sync::Arc;
use crate::config::Config;
use crate::crypto::token::TokenService;
use crate::error::Result;
use crate::repositories::{memory::MemoryStore, store::{ChatStore, PgStore}};

/// The application's state.
///
/// Cloned into every handler; the store handle is the only shared resource.
#[derive(Clone)]
pub struct AppState {
    /// The user, session and message store.
    pub store: Arc<dyn ChatStore>,
    /// Issues and validates bearer tokens.
    pub tokens: TokenService,
    /// The application's configuration.
    pub config: Config,
}

impl AppState {
    /// Creates a new `AppState`, connecting to the configured store.
    ///
    /// # Arguments
    ///
    /// * `config` - The application's configuration.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AppState`.
    pub async fn new(config: &Config) -> Result<Self> {
        let store: Arc<dyn ChatStore> = if config.uses_memory_store() {
            tracing::warn!("⚠️ Using the in-process store, data will not survive a restart");
            Arc::new(MemoryStore::new())
        } else {
            let pool = crate::db::create_pool(&config.database_url, config.db_pool_max_size)?;
            crate::db::ensure_schema(&pool).await?;
            tracing::info!(
                "✅ PostgreSQL pool initialized (max {} connections)",
                config.db_pool_max_size
            );
            Arc::new(PgStore::new(pool))
        };

        Ok(Self::with_store(store, config))
    }

    /// Builds the state around an already constructed store.
    pub fn with_store(store: Arc<dyn ChatStore>, config: &Config) -> Self {
        let tokens = TokenService::new(
            config.jwt_secret.as_bytes(),
            chrono::Duration::minutes(config.access_token_expire_minutes),
        );
        tracing::info!("✅ Token service initialized");

        AppState {
            store,
            tokens,
            config: config.clone(),
        }
    }
}
