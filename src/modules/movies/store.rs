use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{Movie, MovieError, MovieInput};

/// Ordered in-memory movie collection shared by all request handlers.
///
/// Reads take the shared lock, mutations the exclusive one. Lookups are a
/// linear scan for the first record with a matching id.
#[derive(Clone, Default)]
pub struct MovieStore {
    movies: Arc<RwLock<Vec<Movie>>>,
}

impl MovieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the whole collection in insertion order
    pub async fn list(&self) -> Vec<Movie> {
        self.movies.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.movies.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.movies.read().await.is_empty()
    }

    pub async fn get(&self, id: &str) -> Result<Movie, MovieError> {
        let movies = self.movies.read().await;
        movies
            .iter()
            .find(|movie| movie.id == id)
            .cloned()
            .ok_or(MovieError::NotFound)
    }

    /// Append a new record under a freshly generated id
    pub async fn create(&self, input: MovieInput) -> Movie {
        let mut movies = self.movies.write().await;
        let movie = input.into_movie(unused_id(&movies));
        movies.push(movie.clone());

        tracing::info!(movie_id = %movie.id, title = %movie.title, "movie created");
        movie
    }

    /// Append several records, each under its own generated id
    pub async fn extend(&self, inputs: impl IntoIterator<Item = MovieInput>) {
        let mut movies = self.movies.write().await;
        for input in inputs {
            let id = unused_id(&movies);
            movies.push(input.into_movie(id));
        }
    }

    /// Overwrite the record with `id` in place.
    ///
    /// The id is looked up before `decode` runs, so an unknown id reports
    /// `NotFound` even when the payload is malformed.
    pub async fn replace<F>(&self, id: &str, decode: F) -> Result<Movie, MovieError>
    where
        F: FnOnce() -> Result<MovieInput, MovieError>,
    {
        let mut movies = self.movies.write().await;
        let slot = movies
            .iter_mut()
            .find(|movie| movie.id == id)
            .ok_or(MovieError::NotFound)?;

        let movie = decode()?.into_movie(id.to_string());
        *slot = movie.clone();

        tracing::info!(movie_id = %movie.id, title = %movie.title, "movie replaced");
        Ok(movie)
    }

    /// Remove the record with `id`, returning what remains
    pub async fn delete(&self, id: &str) -> Result<Vec<Movie>, MovieError> {
        let mut movies = self.movies.write().await;
        let index = movies
            .iter()
            .position(|movie| movie.id == id)
            .ok_or(MovieError::NotFound)?;
        movies.remove(index);

        tracing::info!(movie_id = %id, remaining = movies.len(), "movie deleted");
        Ok(movies.clone())
    }
}

fn unused_id(movies: &[Movie]) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if !movies.iter().any(|movie| movie.id == id) {
            return id;
        }
    }
}
