use super::models::{Director, MovieInput};

/// The sample catalogue loaded at startup, in insertion order.
pub fn sample_movies() -> Vec<MovieInput> {
    [
        ("123456", "Inception", "Christopher", "Nolan"),
        ("654321", "The Godfather", "Francis", "Coppola"),
        ("112233", "Pulp Fiction", "Quentin", "Tarantino"),
        ("334455", "The Dark Knight", "Christopher", "Nolan"),
        ("556677", "Fight Club", "David", "Fincher"),
        ("778899", "Forrest Gump", "Robert", "Zemeckis"),
    ]
    .into_iter()
    .map(|(isbn, title, firstname, lastname)| MovieInput {
        id: None,
        isbn: isbn.to_string(),
        title: title.to_string(),
        director: Some(Director::new(firstname, lastname)),
    })
    .collect()
}
