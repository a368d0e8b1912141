use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use reel_http::AppError;

/// Person credited as director. Only ever embedded in a [`Movie`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Director {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub firstname: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub lastname: String,
}

impl Director {
    pub fn new(firstname: impl Into<String>, lastname: impl Into<String>) -> Self {
        Self {
            firstname: firstname.into(),
            lastname: lastname.into(),
        }
    }
}

/// A stored movie record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Movie {
    /// Server-assigned identifier (UUID v4)
    pub id: String,
    /// Free-form ISBN, not checked for format or uniqueness
    pub isbn: String,
    pub title: String,
    pub director: Option<Director>,
}

/// Request body for creating or replacing a movie.
///
/// Absent or `null` text fields decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct MovieInput {
    /// Ignored; the server always decides the identifier
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub isbn: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub director: Option<Director>,
}

impl MovieInput {
    /// Decode the first JSON value of a raw request body.
    ///
    /// Anything after that value is left unread, and a bare `null` is an
    /// empty movie.
    pub fn from_json(body: &[u8]) -> Result<Self, MovieError> {
        let first = serde_json::Deserializer::from_slice(body)
            .into_iter::<Option<MovieInput>>()
            .next();

        match first {
            Some(Ok(input)) => Ok(input.unwrap_or_default()),
            Some(Err(err)) => {
                tracing::debug!(error = %err, "rejecting movie payload");
                Err(MovieError::InvalidInput)
            }
            None => {
                tracing::debug!("rejecting empty movie payload");
                Err(MovieError::InvalidInput)
            }
        }
    }

    /// Turn the payload into a record carrying `id`, discarding any client id.
    pub fn into_movie(self, id: String) -> Movie {
        Movie {
            id,
            isbn: self.isbn,
            title: self.title,
            director: self.director,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Failures of the movie directory operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MovieError {
    #[error("Invalid movie data")]
    InvalidInput,
    #[error("Movie not found")]
    NotFound,
}

impl From<MovieError> for AppError {
    fn from(err: MovieError) -> Self {
        match err {
            MovieError::InvalidInput => AppError::bad_request(err.to_string()),
            MovieError::NotFound => AppError::not_found(err.to_string()),
        }
    }
}
