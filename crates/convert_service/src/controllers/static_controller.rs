//! Serves the browser front end from the located public directory.
use std::path::{Component, Path, PathBuf};

use actix_web::{web, HttpRequest, HttpResponse};
use anyhow::Context;

use crate::error::AppError;
use crate::server::AppState;

const STATIC_EXTENSIONS: &[&str] = &[".js", ".css", ".png", ".jpg", ".jpeg", ".gif", ".svg", ".ico", ".html"];

fn is_static_file_request(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    STATIC_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "application/javascript; charset=utf-8",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

/// Request path relative to the public directory, or `None` when it would
/// escape it.
fn relative_asset_path(request_path: &str) -> Option<PathBuf> {
    let trimmed = request_path.trim_start_matches('/');
    let trimmed = trimmed.strip_prefix("static/").unwrap_or(trimmed);
    let relative = PathBuf::from(trimmed);
    let safe = relative
        .components()
        .all(|component| matches!(component, Component::Normal(_)));
    (safe && !trimmed.is_empty()).then_some(relative)
}

async fn serve_index(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let Some(index) = state.assets.index_path() else {
        tracing::error!("could not find index.html in any location");
        return Err(AppError::AssetsUnavailable);
    };

    let content = tokio::fs::read(&index)
        .await
        .with_context(|| format!("failed to read {}", index.display()))?;
    tracing::debug!(path = %index.display(), "serving index.html");
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(content))
}

async fn serve_path(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let request_path = req.path();
    if !is_static_file_request(request_path) {
        return serve_index(state).await;
    }

    let not_found = || AppError::AssetNotFound(request_path.to_string());
    let relative = relative_asset_path(request_path).ok_or_else(not_found)?;
    let public_dir = state.assets.locate().ok_or_else(not_found)?;
    let full_path = public_dir.join(relative);

    match tokio::fs::read(&full_path).await {
        Ok(content) => Ok(HttpResponse::Ok()
            .content_type(content_type_for(&full_path))
            .body(content)),
        Err(err) => {
            tracing::debug!(path = %full_path.display(), error = %err, "file not found");
            Err(not_found())
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(serve_index)))
        .service(web::resource("/{tail:.*}").route(web::get().to(serve_path)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_static_extensions() {
        assert!(is_static_file_request("/script.js"));
        assert!(is_static_file_request("/static/LOGO.PNG"));
        assert!(!is_static_file_request("/about"));
    }

    #[test]
    fn strips_static_prefix_and_rejects_traversal() {
        assert_eq!(
            relative_asset_path("/static/css/app.css"),
            Some(PathBuf::from("css/app.css"))
        );
        assert_eq!(relative_asset_path("/app.js"), Some(PathBuf::from("app.js")));
        assert_eq!(relative_asset_path("/../secret.js"), None);
        assert_eq!(relative_asset_path("/"), None);
    }

    #[test]
    fn maps_content_types() {
        assert_eq!(content_type_for(Path::new("a/b.css")), "text/css; charset=utf-8");
        assert_eq!(content_type_for(Path::new("x.JPEG")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("x.bin")), "application/octet-stream");
    }
}
