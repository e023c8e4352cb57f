pub mod admin;
pub mod api;
pub mod inbox;
pub mod leads;
pub mod photos;
pub mod public;

use crate::errors::ServerError;

pub fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Numeric path segment. Anything else is treated as a missing page.
pub fn parse_id(segment: &str) -> Result<i64, ServerError> {
    segment
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or(ServerError::NotFound)
}
