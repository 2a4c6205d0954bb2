#![allow(dead_code)]

use std::sync::Arc;

use chatvault::{
    config::Config,
    repositories::memory::MemoryStore,
    router,
    state::AppState,
};
use zeroize::Zeroizing;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

pub fn test_config() -> Config {
    Config {
        database_url: "memory://".to_string(),
        db_pool_max_size: 1,
        jwt_secret: Zeroizing::new(TEST_SECRET.to_string()),
        access_token_expire_minutes: 30,
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        cors_origins: vec!["http://localhost:3000".to_string()],
    }
}

/// A fresh application backed by an empty in-process store.
pub fn test_app() -> axum::Router {
    let state = AppState::with_store(Arc::new(MemoryStore::new()), &test_config());
    router(state)
}
