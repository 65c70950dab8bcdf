use crate::error::ProxyError;
use crate::models::catalog::{Backend, CatalogBook};
use crate::models::formats::{find_format, FileFormat};
use crate::utils::filename::download_filename;
use bytes::Bytes;
use tracing::info;

pub const EPUB_MIME: &str = "application/epub+zip";

#[derive(Debug)]
pub struct FileDownload {
    pub filename: String,
    pub content_type: &'static str,
    pub data: Bytes,
}

/// URL of the first acceptable MIME type, in the format's preference order,
/// that the book offers.
pub fn resolve_source<'a>(book: &'a CatalogBook, format: &FileFormat) -> Option<&'a str> {
    format
        .first_match(|mime| book.formats.contains_key(mime))
        .and_then(|mime| book.formats.get(mime))
        .map(String::as_str)
}

pub async fn relay_format(
    backend: &Backend,
    book_id: u32,
    format_code: &str,
) -> Result<FileDownload, ProxyError> {
    let format =
        find_format(format_code).ok_or_else(|| ProxyError::UnknownFormat(format_code.to_string()))?;

    let book = backend
        .get_book(book_id)
        .await?
        .ok_or(ProxyError::BookNotFound(book_id))?;

    let source = resolve_source(&book, format).ok_or_else(|| ProxyError::FormatUnavailable {
        id: book_id,
        format: format.code.to_string(),
    })?;

    let data = backend.fetch_file(source).await?;
    let filename = download_filename(&book, format.code);

    info!(
        "Relaying book {} as {} ({} bytes)",
        book_id,
        filename,
        data.len()
    );

    Ok(FileDownload {
        filename,
        content_type: format.primary_mime(),
        data,
    })
}

pub fn mirror_url(template: &str, book_id: u32) -> String {
    template.replace("{id}", &book_id.to_string())
}

/// Fetches the EPUB straight from the mirror without a metadata lookup.
pub async fn relay_mirror_epub(
    backend: &Backend,
    mirror_template: &str,
    book_id: u32,
) -> Result<FileDownload, ProxyError> {
    let url = mirror_url(mirror_template, book_id);

    let data = backend.fetch_file(&url).await.map_err(|e| match e {
        ProxyError::UpstreamStatus { url, status: 404 } => ProxyError::MirrorNotFound(url),
        other => other,
    })?;

    Ok(FileDownload {
        filename: format!("{}.epub", book_id),
        content_type: EPUB_MIME,
        data,
    })
}
