use std::time::Duration;
use tracing::warn;

pub const DEFAULT_PORT: &str = "5000";
pub const DEFAULT_CATALOG_API_URL: &str = "https://gutendex.com/books";
pub const DEFAULT_MIRROR_URL_TEMPLATE: &str = "https://www.gutenberg.org/ebooks/{id}.epub.images";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SEARCH_RESULT_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: String,
    pub catalog_api_url: String,
    /// `{id}` is replaced with the book id.
    pub mirror_url_template: String,
    pub upstream_timeout: Duration,
    pub search_result_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT.to_string(),
            catalog_api_url: DEFAULT_CATALOG_API_URL.to_string(),
            mirror_url_template: DEFAULT_MIRROR_URL_TEMPLATE.to_string(),
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            search_result_limit: DEFAULT_SEARCH_RESULT_LIMIT,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            port: lookup("PORT").unwrap_or(defaults.port),
            catalog_api_url: lookup("CATALOG_API_URL").unwrap_or(defaults.catalog_api_url),
            mirror_url_template: lookup("MIRROR_URL_TEMPLATE")
                .unwrap_or(defaults.mirror_url_template),
            upstream_timeout: Duration::from_secs(parse_or(
                &lookup,
                "UPSTREAM_TIMEOUT_SECS",
                DEFAULT_UPSTREAM_TIMEOUT_SECS,
            )),
            search_result_limit: parse_or(
                &lookup,
                "SEARCH_RESULT_LIMIT",
                defaults.search_result_limit,
            ),
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid value '{}' for {}, using default", raw, key);
            default
        }),
        None => default,
    }
}
