use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub folder: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FacebookConfig {
    pub page_id: String,
    pub access_token: String,
}

#[derive(Debug, Clone)]
pub struct BrevoConfig {
    pub api_key: String,
    pub sender_email: String,
    pub sender_name: String,
    /// Inbox that receives new-lead notifications.
    pub notify_email: String,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub schema_path: String,
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    pub admin_password: String,
    pub session_ttl_secs: i64,
    pub site_url: String,
    pub site_name: String,
    pub whatsapp_number: Option<String>,
    pub max_upload_bytes: u64,
    pub cloudinary: Option<CloudinaryConfig>,
    pub facebook: Option<FacebookConfig>,
    pub brevo: Option<BrevoConfig>,
    pub indicators_base_url: String,
    pub indicators_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: "imobiliaria.sqlite3".to_string(),
            schema_path: "sql/schema.sql".to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_workers: 8,
            admin_password: "admin".to_string(),
            session_ttl_secs: 60 * 60 * 24 * 7,
            site_url: "http://localhost:3000".to_string(),
            site_name: "Imobiliária".to_string(),
            whatsapp_number: None,
            max_upload_bytes: 10 * 1024 * 1024,
            cloudinary: None,
            facebook: None,
            brevo: None,
            indicators_base_url: "https://api.bcb.gov.br/dados/serie".to_string(),
            indicators_ttl_secs: 60 * 60,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();
        let defaults = Config::default();
        let site_name = env::var("SITE_NAME").unwrap_or(defaults.site_name);
        let brevo = brevo_config(optional, &site_name);

        Ok(Self {
            database_path: env::var("DATABASE_PATH").unwrap_or(defaults.database_path),
            schema_path: env::var("SCHEMA_PATH").unwrap_or(defaults.schema_path),
            bind_addr: match env::var("BIND_ADDR") {
                Ok(v) => v.parse().context("BIND_ADDR must be a socket address")?,
                Err(_) => defaults.bind_addr,
            },
            max_workers: parse_or("MAX_WORKERS", defaults.max_workers)?,
            admin_password: env::var("ADMIN_PASSWORD")
                .ok()
                .filter(|p| !p.is_empty())
                .context("ADMIN_PASSWORD must be set")?,
            session_ttl_secs: parse_or("SESSION_TTL_SECS", defaults.session_ttl_secs)?,
            site_url: env::var("SITE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.site_url),
            site_name,
            whatsapp_number: optional("WHATSAPP_NUMBER"),
            max_upload_bytes: parse_or("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            cloudinary: match (
                optional("CLOUDINARY_CLOUD_NAME"),
                optional("CLOUDINARY_API_KEY"),
                optional("CLOUDINARY_API_SECRET"),
            ) {
                (Some(cloud_name), Some(api_key), Some(api_secret)) => Some(CloudinaryConfig {
                    cloud_name,
                    api_key,
                    api_secret,
                    folder: optional("CLOUDINARY_FOLDER"),
                }),
                _ => None,
            },
            facebook: match (optional("FACEBOOK_PAGE_ID"), optional("FACEBOOK_ACCESS_TOKEN")) {
                (Some(page_id), Some(access_token)) => Some(FacebookConfig {
                    page_id,
                    access_token,
                }),
                _ => None,
            },
            brevo,
            indicators_base_url: env::var("INDICATORS_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.indicators_base_url),
            indicators_ttl_secs: parse_or("INDICATORS_TTL_SECS", defaults.indicators_ttl_secs)?,
        })
    }
}

/// Brevo settings; the sender name defaults to the site name.
fn brevo_config(lookup: impl Fn(&str) -> Option<String>, site_name: &str) -> Option<BrevoConfig> {
    Some(BrevoConfig {
        api_key: lookup("BREVO_API_KEY")?,
        sender_email: lookup("BREVO_SENDER_EMAIL")?,
        notify_email: lookup("LEAD_NOTIFY_EMAIL")?,
        sender_name: lookup("BREVO_SENDER_NAME").unwrap_or_else(|| site_name.to_string()),
    })
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional(key) {
        Some(v) => v
            .parse()
            .with_context(|| format!("{key} must be a valid number")),
        None => Ok(default),
    }
}
