pub mod errors;
pub mod html;
pub mod json;
pub mod static_files;
pub mod xlsx;

pub use crate::errors::ResultResp;
pub use errors::error_to_response;
pub use html::{html_response, html_response_status, redirect, redirect_permanent, redirect_with_cookie, text_response};
pub use json::json_response;
pub use static_files::serve_static;
pub use xlsx::xlsx_response;
