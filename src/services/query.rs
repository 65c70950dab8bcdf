use crate::models::formats::{default_target_formats, find_format, FileFormat};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

static KEY_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w+)=").unwrap());

/// Parameters forwarded to the catalog search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_year_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_year_end: Option<String>,
}

impl FilterSet {
    pub fn free_text(raw: &str) -> Self {
        Self {
            search: Some(raw.to_string()),
            ..Self::default()
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct QueryToken<'a> {
    pub key: String,
    pub value: &'a str,
}

#[derive(Debug, PartialEq, Eq)]
pub struct TokenizedQuery<'a> {
    /// Text before the first `key=` marker. Not interpreted.
    pub leading: &'a str,
    pub tokens: Vec<QueryToken<'a>>,
}

#[derive(Debug)]
pub struct ParsedQuery {
    pub filters: FilterSet,
    pub targets: Vec<&'static FileFormat>,
}

impl ParsedQuery {
    pub fn target_codes(&self) -> Vec<&'static str> {
        self.targets.iter().map(|format| format.code).collect()
    }
}

/// Splits `key=value key=value ...` text into pairs. A value runs until the
/// next whitespace-separated `word=` or the end of the input. Keys are
/// lowercased, values are trimmed, and pairs with an empty value are skipped.
pub fn tokenize(raw: &str) -> TokenizedQuery<'_> {
    // (key, start of key, start of value)
    let mut markers: Vec<(&str, usize, usize)> = Vec::new();

    for caps in KEY_MARKER.captures_iter(raw) {
        let (Some(whole), Some(key)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        let at_boundary = markers.is_empty()
            || raw[..whole.start()]
                .chars()
                .next_back()
                .map_or(false, char::is_whitespace);

        if at_boundary {
            markers.push((key.as_str(), whole.start(), whole.end()));
        }
    }

    let leading = markers
        .first()
        .map_or(raw, |&(_, key_start, _)| &raw[..key_start])
        .trim();

    let tokens = markers
        .iter()
        .enumerate()
        .filter_map(|(i, &(key, _, value_start))| {
            let value_end = markers
                .get(i + 1)
                .map_or(raw.len(), |&(_, next_start, _)| next_start);
            let value = raw[value_start..value_end].trim();

            (!value.is_empty()).then(|| QueryToken {
                key: key.to_lowercase(),
                value,
            })
        })
        .collect();

    TokenizedQuery { leading, tokens }
}

/// Applies tokens to a filter set and target format list, in input order.
pub fn reduce(tokens: &[QueryToken<'_>]) -> ParsedQuery {
    let mut filters = FilterSet::default();
    let mut targets = default_target_formats();
    let mut search_terms: Vec<&str> = Vec::new();

    for token in tokens {
        match token.key.as_str() {
            "title" | "author" | "search" => search_terms.push(token.value),
            "lang" | "language" => {
                filters.languages = Some(token.value.chars().take(2).collect());
            }
            "year" => {
                filters.author_year_start = Some(token.value.to_string());
                filters.author_year_end = Some(token.value.to_string());
            }
            "topic" => filters.topic = Some(token.value.to_string()),
            "format" => match find_format(token.value) {
                Some(format) => {
                    filters.mime_type = Some(format.primary_mime().to_string());
                    targets = vec![format];
                }
                None => debug!("Ignoring unknown format '{}'", token.value),
            },
            other => debug!("Ignoring unknown query key '{}'", other),
        }
    }

    if !search_terms.is_empty() {
        filters.search = Some(search_terms.join(" "));
    }

    ParsedQuery { filters, targets }
}

/// Translates a raw search string. Input without any `key=value` pair is a
/// plain free-text search.
pub fn parse_query(raw: &str) -> ParsedQuery {
    let tokenized = tokenize(raw);

    if tokenized.tokens.is_empty() {
        return ParsedQuery {
            filters: FilterSet::free_text(raw),
            targets: default_target_formats(),
        };
    }

    if !tokenized.leading.is_empty() {
        debug!("Dropping text before first key: '{}'", tokenized.leading);
    }

    reduce(&tokenized.tokens)
}
