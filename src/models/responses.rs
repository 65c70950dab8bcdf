use crate::services::query::FilterSet;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug)]
pub struct HealthResponse {
    pub service: String,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct FormatLink {
    pub format: String,
    pub download: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct BookSummary {
    pub id: u32,
    pub title: String,
    pub authors: String,
    pub languages: Vec<String>,
    pub formats: Vec<FormatLink>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub count: usize,
    pub filters_applied: FilterSet,
    pub results: Vec<BookSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
