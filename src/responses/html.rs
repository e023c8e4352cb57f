use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use maud::Markup;

pub fn html_response(markup: Markup) -> ResultResp {
    html_response_status(200, markup)
}

/// HTML with a non-200 status, e.g. 422 for a form that failed validation.
pub fn html_response_status(status: u16, markup: Markup) -> ResultResp {
    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Body::from(markup.into_string()))
        .map_err(|_| ServerError::InternalError)
}

pub fn text_response(status: u16, text: &'static str) -> ResultResp {
    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Body::from(text))
        .map_err(|_| ServerError::InternalError)
}

/// 302 after a form POST.
pub fn redirect(location: &str) -> ResultResp {
    redirect_status(302, location, None)
}

/// 301 to a canonical URL.
pub fn redirect_permanent(location: &str) -> ResultResp {
    redirect_status(301, location, None)
}

pub fn redirect_with_cookie(location: &str, cookie: &str) -> ResultResp {
    redirect_status(302, location, Some(cookie))
}

fn redirect_status(status: u16, location: &str, cookie: Option<&str>) -> ResultResp {
    let mut builder = ResponseBuilder::new()
        .status(status)
        .header("Location", location);
    if let Some(cookie) = cookie {
        builder = builder.header("Set-Cookie", cookie);
    }
    builder
        .body(Body::empty())
        .map_err(|_| ServerError::InternalError)
}
