pub mod cookies;
pub mod form;
pub mod multipart;

use crate::errors::ServerError;
use astra::Request;
use std::io::Read;

pub use form::FormData;

/// Default cap for url-encoded form bodies.
pub const MAX_FORM_BYTES: u64 = 64 * 1024;

/// Buffers the request body, failing when it exceeds `limit` bytes.
pub fn read_body(req: &mut Request, limit: u64) -> Result<Vec<u8>, ServerError> {
    let mut buf = Vec::new();
    req.body_mut()
        .reader()
        .take(limit + 1)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("failed to read body: {e}")))?;

    if buf.len() as u64 > limit {
        return Err(ServerError::BadRequest(format!(
            "request body exceeds {limit} bytes"
        )));
    }
    Ok(buf)
}

pub fn read_form(req: &mut Request) -> Result<FormData, ServerError> {
    let body = read_body(req, MAX_FORM_BYTES)?;
    Ok(FormData::parse(&body))
}

pub fn query(req: &Request) -> FormData {
    FormData::from_query(req.uri().query())
}

pub fn header<'a>(req: &'a Request, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

/// htmx marks its requests so handlers can answer with a fragment.
pub fn is_htmx(req: &Request) -> bool {
    header(req, "hx-request") == Some("true")
}
