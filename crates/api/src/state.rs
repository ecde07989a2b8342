//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;

use crate::config::ApiConfig;
use crate::models::Meal;
use crate::services::klarna::{KlarnaClient, KlarnaError};

/// Cache key for the public meal listing.
pub const MEALS_CACHE_KEY: &str = "meals:active";

/// How long the public meal listing may be served from cache.
const MEALS_CACHE_TTL: Duration = Duration::from_secs(60);

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the database pool, configuration, the Klarna
/// client, and the meal-listing cache.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    pool: PgPool,
    klarna: KlarnaClient,
    meal_cache: Cache<&'static str, Arc<Vec<Meal>>>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the Klarna HTTP client fails to build.
    pub fn new(config: ApiConfig, pool: PgPool) -> Result<Self, KlarnaError> {
        let klarna = KlarnaClient::new(&config.klarna)?;
        let meal_cache = Cache::builder()
            .max_capacity(8)
            .time_to_live(MEALS_CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                klarna,
                meal_cache,
            }),
        })
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the Klarna API client.
    #[must_use]
    pub fn klarna(&self) -> &KlarnaClient {
        &self.inner.klarna
    }

    /// Get a reference to the meal-listing cache.
    #[must_use]
    pub fn meal_cache(&self) -> &Cache<&'static str, Arc<Vec<Meal>>> {
        &self.inner.meal_cache
    }

    /// Drop the cached meal listing. Called after admin catalog mutations.
    pub async fn invalidate_meal_cache(&self) {
        self.inner.meal_cache.invalidate(MEALS_CACHE_KEY).await;
    }
}
