pub mod models;
pub mod routes;
pub mod seed;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use reel_kernel::{InitCtx, Module};
use utoipa::OpenApi;

pub use models::{Director, Movie, MovieError, MovieInput};
pub use store::MovieStore;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::list_movies,
        routes::get_movie,
        routes::create_movie,
        routes::replace_movie,
        routes::delete_movie
    ),
    components(schemas(Movie, Director, MovieInput)),
    tags((name = "Movies", description = "In-memory movie directory"))
)]
struct MoviesApi;

/// Movie directory: CRUD over an in-memory, insertion-ordered collection
pub struct MoviesModule {
    store: MovieStore,
}

impl MoviesModule {
    pub fn new(store: MovieStore) -> Self {
        Self { store }
    }

    /// Handle to the collection served by this module
    pub fn store(&self) -> &MovieStore {
        &self.store
    }
}

#[async_trait]
impl Module for MoviesModule {
    fn name(&self) -> &'static str {
        "movies"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        if ctx.settings.movies.seed && self.store.is_empty().await {
            self.store.extend(seed::sample_movies()).await;
        }

        let movies = self.store.len().await;
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            movies,
            "movies module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        match serde_json::to_value(MoviesApi::openapi()) {
            Ok(spec) => Some(spec),
            Err(err) => {
                tracing::warn!(module = self.name(), error = %err, "failed to render OpenAPI");
                None
            }
        }
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "movies module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        let movies = self.store.len().await;
        tracing::info!(
            module = self.name(),
            movies,
            "movies module stopped; collection discarded"
        );
        Ok(())
    }
}

/// Create a new instance of the movies module with an empty collection
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(MoviesModule::new(MovieStore::new()))
}
