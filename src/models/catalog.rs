use crate::error::ProxyError;
use crate::services::query::FilterSet;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Treats an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Person {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// A book record as returned by the catalog API. Fields not used by the
/// proxy are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogBook {
    pub id: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub authors: Vec<Person>,
    #[serde(default)]
    pub languages: Option<Vec<String>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub formats: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: usize,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<CatalogBook>,
}

#[async_trait]
pub trait CatalogBackend {
    async fn search_books(&self, filters: &FilterSet) -> Result<CatalogPage, ProxyError>;
    /// `Ok(None)` when the catalog reports the book as not found.
    async fn get_book(&self, book_id: u32) -> Result<Option<CatalogBook>, ProxyError>;
    /// Raw bytes of a file on the mirror. Any non-2xx status is an
    /// `UpstreamStatus` error.
    async fn fetch_file(&self, url: &str) -> Result<Bytes, ProxyError>;
}

pub type Backend = Arc<dyn CatalogBackend + Send + Sync>;

/// Catalog access over HTTP against a Gutendex-compatible API.
pub struct GutendexBackend {
    client: Client,
    base_url: String,
}

impl GutendexBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ProxyError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn book_url(&self, book_id: u32) -> String {
        format!("{}/{}", self.base_url, book_id)
    }
}

fn status_error(url: &str, status: StatusCode) -> ProxyError {
    ProxyError::UpstreamStatus {
        url: url.to_string(),
        status: status.as_u16(),
    }
}

#[async_trait]
impl CatalogBackend for GutendexBackend {
    async fn search_books(&self, filters: &FilterSet) -> Result<CatalogPage, ProxyError> {
        info!("Querying catalog {} with {:?}", self.base_url, filters);

        let response = self
            .client
            .get(&self.base_url)
            .query(filters)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(&self.base_url, response.status()));
        }

        Ok(response.json().await?)
    }

    async fn get_book(&self, book_id: u32) -> Result<Option<CatalogBook>, ProxyError> {
        let url = self.book_url(book_id);
        info!("Fetching metadata for book {} from {}", book_id, url);

        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(status_error(&url, response.status()));
        }

        Ok(Some(response.json().await?))
    }

    async fn fetch_file(&self, url: &str) -> Result<Bytes, ProxyError> {
        info!("Downloading file from {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(status_error(url, response.status()));
        }

        Ok(response.bytes().await?)
    }
}
