//! HTTP handlers for `/movies` and `/movies/{id}`.
//!
//! Request bodies are taken as raw bytes so that every undecodable payload,
//! whatever its content type, is reported as `400 Invalid movie data`.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use reel_http::AppError;

use super::models::{Movie, MovieInput};
use super::store::MovieStore;

pub fn router(store: MovieStore) -> Router {
    Router::new()
        .route("/movies", get(list_movies).post(create_movie))
        .route(
            "/movies/{id}",
            get(get_movie).put(replace_movie).delete(delete_movie),
        )
        .with_state(store)
}

/// GET /movies
#[utoipa::path(
    get,
    path = "/movies",
    tag = "Movies",
    responses(
        (status = 200, description = "Every movie in insertion order", body = [Movie])
    )
)]
pub async fn list_movies(State(store): State<MovieStore>) -> Json<Vec<Movie>> {
    Json(store.list().await)
}

/// GET /movies/{id}
#[utoipa::path(
    get,
    path = "/movies/{id}",
    tag = "Movies",
    params(("id" = String, Path, description = "Movie identifier")),
    responses(
        (status = 200, description = "The movie", body = Movie),
        (status = 404, description = "Movie not found", body = String, content_type = "text/plain")
    )
)]
pub async fn get_movie(
    State(store): State<MovieStore>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, AppError> {
    Ok(Json(store.get(&id).await?))
}

/// POST /movies
#[utoipa::path(
    post,
    path = "/movies",
    tag = "Movies",
    request_body = MovieInput,
    responses(
        (status = 201, description = "Stored movie with its generated id", body = Movie),
        (status = 400, description = "Invalid movie data", body = String, content_type = "text/plain")
    )
)]
pub async fn create_movie(
    State(store): State<MovieStore>,
    body: Bytes,
) -> Result<(StatusCode, Json<Movie>), AppError> {
    let input = MovieInput::from_json(&body)?;
    let movie = store.create(input).await;
    Ok((StatusCode::CREATED, Json(movie)))
}

/// PUT /movies/{id}
///
/// An unknown id wins over a malformed body and yields 404.
#[utoipa::path(
    put,
    path = "/movies/{id}",
    tag = "Movies",
    params(("id" = String, Path, description = "Movie identifier")),
    request_body = MovieInput,
    responses(
        (status = 200, description = "Updated movie", body = Movie),
        (status = 400, description = "Invalid movie data", body = String, content_type = "text/plain"),
        (status = 404, description = "Movie not found", body = String, content_type = "text/plain")
    )
)]
pub async fn replace_movie(
    State(store): State<MovieStore>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Movie>, AppError> {
    let movie = store.replace(&id, || MovieInput::from_json(&body)).await?;
    Ok(Json(movie))
}

/// DELETE /movies/{id}
#[utoipa::path(
    delete,
    path = "/movies/{id}",
    tag = "Movies",
    params(("id" = String, Path, description = "Movie identifier")),
    responses(
        (status = 200, description = "Remaining movies", body = [Movie]),
        (status = 404, description = "Movie not found", body = String, content_type = "text/plain")
    )
)]
pub async fn delete_movie(
    State(store): State<MovieStore>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Movie>>, AppError> {
    Ok(Json(store.delete(&id).await?))
}
