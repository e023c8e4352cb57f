use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use std::fs;
use std::path::{Component, Path, PathBuf};

pub const STATIC_DIR: &str = "static";

/// Serves `static/<rel>`. Anything that is not a plain relative path is a 404.
pub fn serve_static(rel: &str) -> ResultResp {
    let path = resolve(Path::new(STATIC_DIR), rel).ok_or(ServerError::NotFound)?;
    let bytes = fs::read(&path).map_err(|_| ServerError::NotFound)?;

    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", content_type(&path).as_ref())
        .header("Cache-Control", "public, max-age=3600")
        .body(Body::from(bytes))
        .map_err(|_| ServerError::InternalError)
}

fn resolve(root: &Path, rel: &str) -> Option<PathBuf> {
    if rel.is_empty() {
        return None;
    }
    let rel = Path::new(rel);
    if !rel.components().all(|c| matches!(c, Component::Normal(_))) {
        return None;
    }
    Some(root.join(rel))
}

fn content_type(path: &Path) -> mime::Mime {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("css") => mime::TEXT_CSS_UTF_8,
        Some("js") => mime::APPLICATION_JAVASCRIPT_UTF_8,
        Some("svg") => mime::IMAGE_SVG,
        Some("png") => mime::IMAGE_PNG,
        Some("jpg") | Some("jpeg") => mime::IMAGE_JPEG,
        Some("webp") => "image/webp".parse().unwrap_or(mime::APPLICATION_OCTET_STREAM),
        Some("ico") => "image/x-icon".parse().unwrap_or(mime::APPLICATION_OCTET_STREAM),
        Some("txt") => mime::TEXT_PLAIN_UTF_8,
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}
