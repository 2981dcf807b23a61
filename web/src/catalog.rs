use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;

use cinemystery_core as game;
use game::{FetchError, Secret};
use gloo::net::http::Request;

use crate::utils::js_random_seed;

pub(crate) const OMDB_API_URL: &str = "https://www.omdbapi.com/";

/// Movie catalog client, looks titles up with `plot=full`.
///
/// Lookups by title are cached for the lifetime of the page; random picks still choose a fresh title each round.
#[derive(Debug)]
pub(crate) struct OmdbSource {
    api_url: String,
    api_key: String,
    forced_title: Option<String>,
    cache: RefCell<HashMap<String, Secret>>,
}

impl OmdbSource {
    pub(crate) fn new(api_url: String, api_key: String, forced_title: Option<String>) -> Self {
        if api_key.is_empty() {
            log::warn!("No catalog API key configured, requests will likely fail");
        }
        Self {
            api_url,
            api_key,
            forced_title,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub(crate) async fn fetch_by_title(&self, title: &str) -> Result<Secret, FetchError> {
        let key = cache_key(title);
        if let Some(secret) = self.cache.borrow().get(&key) {
            log::debug!("catalog cache hit: {}", key);
            return Ok(secret.clone());
        }

        let response = Request::get(&self.api_url)
            .query([
                ("t", title),
                ("plot", "full"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|err| FetchError::Network(err.to_string()))?;

        if !response.ok() {
            return Err(FetchError::Network(format!(
                "HTTP {} {}",
                response.status(),
                response.status_text()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|err| FetchError::Network(err.to_string()))?;
        let secret = game::decode_movie(&body)?;

        self.cache.borrow_mut().insert(key, secret.clone());
        Ok(secret)
    }

    fn next_title(&self) -> String {
        self.forced_title
            .clone()
            .unwrap_or_else(|| game::pick_title(js_random_seed()).to_string())
    }
}

impl game::SecretSource for OmdbSource {
    fn fetch_random_secret(&self) -> impl Future<Output = Result<Secret, FetchError>> {
        async move {
            let title = self.next_title();
            log::debug!("fetching secret");
            self.fetch_by_title(&title).await
        }
    }
}

fn cache_key(title: &str) -> String {
    format!("title:{}", title.trim().to_lowercase())
}
