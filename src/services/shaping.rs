use crate::models::catalog::{CatalogBook, CatalogPage};
use crate::models::formats::FileFormat;
use crate::models::responses::{BookSummary, FormatLink};

pub const UNKNOWN_AUTHOR: &str = "Unknown";

pub fn author_display(book: &CatalogBook) -> String {
    if book.authors.is_empty() {
        return UNKNOWN_AUTHOR.to_string();
    }

    book.authors
        .iter()
        .map(|author| author.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn download_link(book_id: u32, code: &str) -> String {
    format!("/download/{}/{}", book_id, code)
}

/// Target formats the book offers, in target order.
pub fn available_formats(book: &CatalogBook, targets: &[&'static FileFormat]) -> Vec<FormatLink> {
    targets
        .iter()
        .filter(|format| {
            format
                .first_match(|mime| book.formats.contains_key(mime))
                .is_some()
        })
        .map(|format| FormatLink {
            format: format.code.to_string(),
            download: download_link(book.id, format.code),
        })
        .collect()
}

/// Takes the first `limit` catalog entries in upstream order and keeps those
/// offering at least one target format.
pub fn shape_results(
    page: CatalogPage,
    targets: &[&'static FileFormat],
    limit: usize,
) -> Vec<BookSummary> {
    page.results
        .into_iter()
        .take(limit)
        .filter_map(|book| {
            let formats = available_formats(&book, targets);
            if formats.is_empty() {
                return None;
            }

            Some(BookSummary {
                id: book.id,
                authors: author_display(&book),
                title: book.title,
                languages: book.languages.unwrap_or_default(),
                formats,
            })
        })
        .collect()
}
