//! Frontend routes: the entry document served for every application route,
//! and the static asset trees next to it.

use axum::{
    body::Body,
    extract::{rejection::PathRejection, Path as UrlPath, Request, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use super::api::error::{sized_response, ApiError, ApiResult};
use super::server::AppState;

pub const ENTRY_DOCUMENT: &str = "index.html";

/// Application routes the frontend router handles client-side.
pub const INDEX_ROUTES: [&str; 5] = ["/", "/launch", "/flight-data", "/flight-data-list", "/debug"];

/// Directories under the root served as-is.
pub const STATIC_PREFIXES: [&str; 3] = ["pages", "css", "js"];

pub const FAVICON: &str = "favicon.ico";

/// Serves the entry document regardless of the requested path.
pub async fn serve_index(State(state): State<AppState>) -> ApiResult<Response> {
    let path = state.root.join(ENTRY_DOCUMENT);
    let content = tokio::fs::read(&path).await.map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            log::error!("Entry document {} not found", path.display());
            ApiError::NotFound(format!("{} not found", ENTRY_DOCUMENT))
        } else {
            ApiError::Internal(format!("failed to read {}: {}", path.display(), e))
        }
    })?;

    Ok(sized_response(
        StatusCode::OK,
        "text/html; charset=UTF-8",
        content,
    ))
}

/// Catch-all for paths no route claims. Answers 200 with the entry
/// document so deep links into the client-side router keep working.
pub async fn spa_fallback(state: State<AppState>, uri: Uri) -> ApiResult<Response> {
    log::warn!(
        "404: client requested {} which does not exist, serving {} instead",
        uri.path(),
        ENTRY_DOCUMENT
    );
    serve_index(state).await
}

/// Streams `relative` (already percent-decoded, relative to the root) once
/// it resolves to a regular file inside the root.
pub async fn serve_asset(state: AppState, relative: String, request: Request) -> Response {
    let path = match resolve_asset(&state.root, &relative).await {
        Ok(path) => path,
        Err(e) => return e.into_response(),
    };

    match ServeFile::new(path).oneshot(request).await {
        Ok(response) => response.map(Body::new),
        Err(never) => match never {},
    }
}

/// Serves the file below one of the static prefixes. Tails that do not
/// decode to UTF-8 cannot name a file and answer 404.
pub async fn serve_prefixed(
    state: AppState,
    prefix: &'static str,
    tail: Result<UrlPath<String>, PathRejection>,
    request: Request,
) -> Response {
    match tail {
        Ok(UrlPath(tail)) => serve_asset(state, format!("{}/{}", prefix, tail), request).await,
        Err(e) => {
            log::debug!("Undecodable static path {}: {}", request.uri().path(), e);
            ApiError::NotFound(format!("{} not found", request.uri().path())).into_response()
        }
    }
}

/// Maps a request path onto a file under `root`.
///
/// Only plain path segments are accepted. The joined path is canonicalised
/// and must still lie under the canonical root, which also rules out
/// symlinks pointing elsewhere.
pub async fn resolve_asset(root: &Path, relative: &str) -> ApiResult<PathBuf> {
    let not_found = || ApiError::NotFound(format!("/{} not found", relative));

    let candidate = Path::new(relative.trim_start_matches('/'));
    let plain = candidate
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !plain || relative.contains('\\') || relative.contains('\0') {
        log::warn!("Path traversal attempt blocked: {}", relative);
        return Err(not_found());
    }

    let root = tokio::fs::canonicalize(root).await.map_err(|e| {
        log::warn!(
            "Static directory not found or inaccessible '{}': {}",
            root.display(),
            e
        );
        not_found()
    })?;

    let resolved = match tokio::fs::canonicalize(root.join(candidate)).await {
        Ok(path) => path,
        Err(_) => {
            log::debug!("Static file not found: /{}", relative);
            return Err(not_found());
        }
    };

    if !resolved.starts_with(&root) {
        log::warn!(
            "Path traversal attempt blocked: {} -> {}",
            relative,
            resolved.display()
        );
        return Err(not_found());
    }

    if !is_regular_file(&resolved).await {
        log::debug!("Static path is not a file: /{}", relative);
        return Err(not_found());
    }

    Ok(resolved)
}

async fn is_regular_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}
