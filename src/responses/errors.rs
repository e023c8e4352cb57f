use crate::errors::ServerError;
use crate::templates::pages::error_page;
use astra::{Body, Response, ResponseBuilder};
use serde_json::json;

/// Renders a handler error. JSON callers get `{"error": "..."}`, everyone
/// else the HTML error page. Both carry the error's status.
pub fn error_to_response(err: &ServerError, wants_json: bool, site_name: &str) -> Response {
    let status = err.status();
    let message = err.public_message();

    let (content_type, body) = if wants_json {
        ("application/json", json!({ "error": message }).to_string())
    } else {
        (
            "text/html; charset=utf-8",
            error_page(site_name, status, &message).into_string(),
        )
    };

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", content_type)
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::empty()))
}
