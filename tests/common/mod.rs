#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use bytes::Bytes;
use catalog_proxy_service::config::Config;
use catalog_proxy_service::error::ProxyError;
use catalog_proxy_service::models::catalog::{CatalogBackend, CatalogBook, CatalogPage, Person};
use catalog_proxy_service::services::query::FilterSet;
use catalog_proxy_service::{build_router, AppState};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// In-memory catalog: every search returns all books, files are keyed by URL.
#[derive(Default)]
pub struct StaticCatalog {
    pub books: Vec<CatalogBook>,
    pub files: HashMap<String, Vec<u8>>,
    pub file_status: Option<u16>,
    pub searches: Mutex<Vec<FilterSet>>,
}

impl StaticCatalog {
    pub fn with_books(books: Vec<CatalogBook>) -> Self {
        Self {
            books,
            ..Self::default()
        }
    }

    pub fn file(mut self, url: &str, data: &[u8]) -> Self {
        self.files.insert(url.to_string(), data.to_vec());
        self
    }
}

#[async_trait]
impl CatalogBackend for StaticCatalog {
    async fn search_books(&self, filters: &FilterSet) -> Result<CatalogPage, ProxyError> {
        self.searches.lock().unwrap().push(filters.clone());
        Ok(CatalogPage {
            count: self.books.len(),
            results: self.books.clone(),
        })
    }

    async fn get_book(&self, book_id: u32) -> Result<Option<CatalogBook>, ProxyError> {
        Ok(self.books.iter().find(|book| book.id == book_id).cloned())
    }

    async fn fetch_file(&self, url: &str) -> Result<Bytes, ProxyError> {
        if let Some(status) = self.file_status {
            return Err(ProxyError::UpstreamStatus {
                url: url.to_string(),
                status,
            });
        }
        match self.files.get(url) {
            Some(data) => Ok(Bytes::from(data.clone())),
            None => Err(ProxyError::UpstreamStatus {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

pub fn book(id: u32, title: &str, authors: &[&str], formats: &[(&str, &str)]) -> CatalogBook {
    CatalogBook {
        id,
        title: title.to_string(),
        authors: authors
            .iter()
            .map(|name| Person {
                name: name.to_string(),
            })
            .collect(),
        languages: Some(vec!["en".to_string()]),
        formats: formats
            .iter()
            .map(|(mime, url)| (mime.to_string(), url.to_string()))
            .collect(),
    }
}

pub fn app(catalog: Arc<StaticCatalog>) -> Router {
    let config = Config {
        mirror_url_template: "https://mirror.test/ebooks/{id}.epub.images".to_string(),
        ..Config::default()
    };
    build_router(Arc::new(AppState {
        backend: catalog,
        config,
    }))
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, HashMap<String, String>, Bytes) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_str().unwrap_or("").to_string()))
        .collect();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, headers, body)
}

pub fn search_uri(q: &str) -> String {
    format!("/search?q={}", urlencoding::encode(q))
}
