//! Thin clients for the third-party services the site proxies to.
//! Each concern is a trait so the router can run against fakes in tests
//! and against a disabled stand-in when credentials are missing.

pub mod images;
pub mod indicators;
pub mod mailer;
pub mod social;

use serde::Serialize;
use thiserror::Error;

use crate::domain::lead::Lead;

#[derive(Debug, Error)]
pub enum IntegrationError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for IntegrationError {
    fn from(e: reqwest::Error) -> Self {
        IntegrationError::Network(e.to_string())
    }
}

/// Turns a non-2xx response into `IntegrationError::Api`.
pub(crate) fn check_status(
    resp: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, IntegrationError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_else(|_| "Unknown error".to_string());
    Err(IntegrationError::Api {
        status: status.as_u16(),
        body,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct HostedImage {
    pub url: String,
    pub public_id: String,
}

pub trait ImageHost: Send + Sync {
    fn upload(
        &self,
        bytes: &[u8],
        filename: &str,
        content_type: &str,
    ) -> Result<HostedImage, IntegrationError>;

    fn destroy(&self, public_id: &str) -> Result<(), IntegrationError>;

    fn enabled(&self) -> bool {
        true
    }
}

pub trait SocialPoster: Send + Sync {
    /// Network name stored alongside each post.
    fn network(&self) -> &'static str;

    /// Publishes `message` linking to `link`; returns the network's post id.
    fn post(&self, message: &str, link: &str) -> Result<String, IntegrationError>;

    fn enabled(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Indicator {
    pub code: u32,
    pub name: String,
    /// Reference date as published (`dd/mm/yyyy`).
    pub date: String,
    /// Percent value.
    pub value: f64,
}

pub trait IndicatorSource: Send + Sync {
    fn latest(&self, code: u32, name: &str) -> Result<Indicator, IntegrationError>;
}

pub trait LeadNotifier: Send + Sync {
    fn notify(&self, lead: &Lead) -> Result<(), IntegrationError>;
}

/// Stand-in used when a service has no credentials configured.
#[derive(Debug, Clone, Copy)]
pub struct Disabled(pub &'static str);

impl ImageHost for Disabled {
    fn upload(&self, _: &[u8], _: &str, _: &str) -> Result<HostedImage, IntegrationError> {
        Err(IntegrationError::NotConfigured(self.0))
    }

    fn destroy(&self, _: &str) -> Result<(), IntegrationError> {
        Err(IntegrationError::NotConfigured(self.0))
    }

    fn enabled(&self) -> bool {
        false
    }
}

impl SocialPoster for Disabled {
    fn network(&self) -> &'static str {
        self.0
    }

    fn post(&self, _: &str, _: &str) -> Result<String, IntegrationError> {
        Err(IntegrationError::NotConfigured(self.0))
    }

    fn enabled(&self) -> bool {
        false
    }
}

impl LeadNotifier for Disabled {
    fn notify(&self, _: &Lead) -> Result<(), IntegrationError> {
        Err(IntegrationError::NotConfigured(self.0))
    }
}
