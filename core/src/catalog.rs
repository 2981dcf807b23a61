use alloc::string::{String, ToString};
use core::future::Future;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

/// The catalog has no random endpoint, rounds pick from this list instead.
pub const POPULAR_TITLES: [&str; 20] = [
    "The Shawshank Redemption",
    "The Godfather",
    "The Dark Knight",
    "Pulp Fiction",
    "Fight Club",
    "Forrest Gump",
    "Inception",
    "The Matrix",
    "Interstellar",
    "The Lord of the Rings",
    "Star Wars",
    "The Avengers",
    "Jurassic Park",
    "Titanic",
    "Avatar",
    "Gladiator",
    "The Lion King",
    "Finding Nemo",
    "Toy Story",
    "Up",
];

/// Placeholder the catalog uses for missing fields.
const NOT_AVAILABLE: &str = "N/A";

/// Uniform pick from [`POPULAR_TITLES`].
pub fn pick_title(seed: u64) -> &'static str {
    let mut rng = SmallRng::seed_from_u64(seed);
    POPULAR_TITLES[rng.random_range(0..POPULAR_TITLES.len())]
}

/// Anything that can produce the secret for a new round.
pub trait SecretSource {
    fn fetch_random_secret(&self) -> impl Future<Output = core::result::Result<Secret, FetchError>>;
}

/// Movie record as returned by the OMDb-style catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CatalogMovie {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub plot: Option<String>,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(rename = "imdbID", default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl CatalogMovie {
    pub fn into_secret(self) -> core::result::Result<Secret, FetchError> {
        if self.response.as_deref() == Some("False") {
            return Err(FetchError::NotFound(
                self.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        Secret::new(
            self.title,
            available(self.plot),
            available(self.poster).unwrap_or_default(),
            available(self.year),
        )
    }
}

fn available(field: Option<String>) -> Option<String> {
    field.filter(|value| value.trim() != NOT_AVAILABLE)
}

/// Decodes a catalog response body into a [`Secret`].
pub fn decode_movie(json: &str) -> core::result::Result<Secret, FetchError> {
    serde_json::from_str::<CatalogMovie>(json)
        .map_err(|err| FetchError::Decode(err.to_string()))?
        .into_secret()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;

    struct FixedSource(&'static str);

    impl SecretSource for FixedSource {
        fn fetch_random_secret(
            &self,
        ) -> impl Future<Output = core::result::Result<Secret, FetchError>> {
            let result = decode_movie(self.0);
            async move { result }
        }
    }

    #[test]
    fn decodes_full_record() {
        let secret = decode_movie(
            r#"{"Title":"Up","Year":"2009","Plot":"An old man flies his house.","Poster":"https://img/up.jpg","imdbID":"tt1049413","Response":"True"}"#,
        )
        .unwrap();

        assert_eq!(secret.title(), "Up");
        assert_eq!(secret.year(), Some("2009"));
        assert_eq!(secret.plot(), Some("An old man flies his house."));
        assert_eq!(secret.poster_url(), "https://img/up.jpg");
    }

    #[test]
    fn not_available_fields_become_absent() {
        let secret =
            decode_movie(r#"{"Title":"Avatar","Plot":"N/A","Poster":"N/A","Response":"True"}"#)
                .unwrap();

        assert_eq!(secret.plot(), None);
        assert_eq!(secret.poster_url(), "");
        assert_eq!(secret.year(), None);
    }

    #[test]
    fn negative_response_is_not_found() {
        assert_eq!(
            decode_movie(r#"{"Response":"False","Error":"Movie not found!"}"#),
            Err(FetchError::NotFound("Movie not found!".to_string()))
        );
    }

    #[test]
    fn malformed_body_is_decode_error() {
        assert!(matches!(
            decode_movie("<html>"),
            Err(FetchError::Decode(_))
        ));
    }

    #[test]
    fn missing_title_is_rejected() {
        assert_eq!(
            decode_movie(r#"{"Response":"True"}"#),
            Err(FetchError::EmptyTitle)
        );
    }

    #[test]
    fn pick_title_is_deterministic_and_from_the_list() {
        assert_eq!(pick_title(5), pick_title(5));
        assert!((0..64).all(|seed| POPULAR_TITLES.contains(&pick_title(seed))));
    }

    #[test]
    fn source_feeds_a_session() {
        let source = FixedSource(r#"{"Title":"Toy Story","Response":"True"}"#);
        let mut session = Session::default();

        let result = source
            .fetch_random_secret()
            .now_or_never()
            .expect("fixed source resolves immediately");
        session.finish_loading(session.round(), result, 0).unwrap();

        assert_eq!(session.game().unwrap().slot_count(), 8);
    }
}
