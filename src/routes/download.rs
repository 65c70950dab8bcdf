use crate::error::ProxyError;
use crate::services::relay::{relay_format, relay_mirror_epub, FileDownload};
use crate::utils::filename::content_disposition;
use crate::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::error;

fn path_params<T>(params: Result<Path<T>, PathRejection>) -> Result<T, ProxyError> {
    params
        .map(|Path(value)| value)
        .map_err(|rejection| ProxyError::InvalidPath(rejection.body_text()))
}

fn attachment(download: FileDownload) -> Result<Response, ProxyError> {
    let disposition = HeaderValue::from_str(&content_disposition(&download.filename))
        .map_err(|e| ProxyError::Internal(format!("invalid filename header: {}", e)))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(download.content_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        download.data,
    )
        .into_response())
}

pub async fn download_epub(
    params: Result<Path<u32>, PathRejection>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ProxyError> {
    let book_id = path_params(params)?;
    match relay_mirror_epub(&state.backend, &state.config.mirror_url_template, book_id).await {
        Ok(download) => attachment(download),
        Err(e) => {
            error!("Failed to download book {}: {}", book_id, e);
            Err(e)
        }
    }
}

pub async fn download_format(
    params: Result<Path<(u32, String)>, PathRejection>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ProxyError> {
    let (book_id, format) = path_params(params)?;
    match relay_format(&state.backend, book_id, &format).await {
        Ok(download) => attachment(download),
        Err(e) => {
            error!("Failed to download book {} as {}: {}", book_id, format, e);
            Err(e)
        }
    }
}
