use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use serde::Serialize;

pub fn json_response<T: Serialize>(status: u16, value: &T) -> ResultResp {
    let body = serde_json::to_vec(value).map_err(|e| {
        tracing::error!(error = %e, "failed to serialize JSON response");
        ServerError::InternalError
    })?;

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Cache-Control", "no-store")
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}
