//! reqwest-backed catalog client

use crate::client::CatalogClient;
use crate::error::CatalogError;
use crate::records::{MoveRecord, NamePage, PokemonRecord, SpeciesRecord};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

/// HTTP client for a PokeAPI-shaped catalog
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpCatalog {
    /// Create client for `base_url`, e.g. `https://pokeapi.co/api/v2`
    pub fn new(base_url: &str) -> Result<Self, CatalogError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create client reusing an existing reqwest client
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self, CatalogError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| CatalogError::Transport(format!("invalid base url {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::Transport(format!(
                "base url {base_url} cannot carry a path"
            )));
        }
        Ok(Self { http, base_url })
    }

    /// Get base URL
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/{resource}/{name}`, with `name` percent-encoded as one segment
    fn resource_url(&self, resource: &str, name: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(resource).push(name);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        name: &str,
        url: Url,
    ) -> Result<T, CatalogError> {
        tracing::debug!(%url, "catalog request");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CatalogError::not_found(resource, name));
        }

        let response = response
            .error_for_status()
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::Decode(format!("{resource} '{name}': {e}")))
    }
}

#[async_trait]
impl CatalogClient for HttpCatalog {
    async fn pokemon(&self, name: &str) -> Result<PokemonRecord, CatalogError> {
        let url = self.resource_url("pokemon", name);
        self.get_json("pokemon", name, url).await
    }

    async fn species(&self, name: &str) -> Result<SpeciesRecord, CatalogError> {
        let url = self.resource_url("pokemon-species", name);
        self.get_json("pokemon-species", name, url).await
    }

    async fn move_record(&self, name: &str) -> Result<MoveRecord, CatalogError> {
        let url = self.resource_url("move", name);
        self.get_json("move", name, url).await
    }

    async fn page(&self, offset: u32, limit: u32) -> Result<Vec<String>, CatalogError> {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("pokemon");
        }
        url.query_pairs_mut()
            .append_pair("offset", &offset.to_string())
            .append_pair("limit", &limit.to_string());

        let page: NamePage = self.get_json("pokemon page", "", url).await?;
        Ok(page.results.into_iter().map(|r| r.name).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_urls() {
        let catalog = HttpCatalog::new("https://pokeapi.co/api/v2").unwrap();
        assert_eq!(
            catalog.resource_url("pokemon", "mr-mime").as_str(),
            "https://pokeapi.co/api/v2/pokemon/mr-mime"
        );
        assert_eq!(
            catalog.resource_url("pokemon-species", "pikachu").as_str(),
            "https://pokeapi.co/api/v2/pokemon-species/pikachu"
        );
    }

    #[test]
    fn trailing_slash_base() {
        let catalog = HttpCatalog::new("http://localhost:9000/api/v2/").unwrap();
        assert_eq!(
            catalog.resource_url("move", "tackle").as_str(),
            "http://localhost:9000/api/v2/move/tackle"
        );
    }

    #[test]
    fn names_cannot_escape_the_path() {
        let catalog = HttpCatalog::new("https://pokeapi.co/api/v2").unwrap();
        let url = catalog.resource_url("pokemon", "../berry?x=1");
        assert!(url.path().starts_with("/api/v2/pokemon/"));
        assert!(url.query().is_none());
    }

    #[test]
    fn invalid_base_rejected() {
        assert!(HttpCatalog::new("not a url").is_err());
        assert!(HttpCatalog::new("mailto:ash@example.com").is_err());
    }
}
