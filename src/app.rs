// app.rs
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::db::Database;
use crate::integrations::images::CloudinaryHost;
use crate::integrations::indicators::{BcbIndicators, IndicatorService};
use crate::integrations::mailer::BrevoMailer;
use crate::integrations::social::FacebookPoster;
use crate::integrations::{Disabled, ImageHost, LeadNotifier, SocialPoster};

/// Everything a request handler needs, shared by all worker threads.
pub struct App {
    pub db: Database,
    pub config: Config,
    pub images: Box<dyn ImageHost>,
    pub social: Box<dyn SocialPoster>,
    pub indicators: IndicatorService,
    /// `None` when e-mail notifications are not configured.
    pub notifier: Option<Arc<dyn LeadNotifier>>,
}

impl App {
    /// Wires the real integrations for whatever credentials `config` carries.
    pub fn from_config(config: Config) -> Result<Self> {
        let db = Database::new(config.database_path.clone());

        let images: Box<dyn ImageHost> = match config.cloudinary.clone() {
            Some(cfg) => Box::new(CloudinaryHost::new(cfg).context("building Cloudinary client")?),
            None => {
                tracing::warn!("Cloudinary not configured; photo uploads disabled");
                Box::new(Disabled("cloudinary"))
            }
        };

        let social: Box<dyn SocialPoster> = match config.facebook.clone() {
            Some(cfg) => Box::new(FacebookPoster::new(cfg).context("building Facebook client")?),
            None => {
                tracing::warn!("Facebook not configured; social posting disabled");
                Box::new(Disabled("facebook"))
            }
        };

        let notifier: Option<Arc<dyn LeadNotifier>> = match config.brevo.clone() {
            Some(cfg) => Some(Arc::new(
                BrevoMailer::new(cfg, config.site_name.clone()).context("building Brevo client")?,
            )),
            None => {
                tracing::warn!("Brevo not configured; lead notifications disabled");
                None
            }
        };

        let source = BcbIndicators::new(config.indicators_base_url.clone())
            .context("building indicators client")?;
        let indicators = IndicatorService::new(
            Box::new(source),
            Duration::from_secs(config.indicators_ttl_secs),
        );

        Ok(Self {
            db,
            config,
            images,
            social,
            indicators,
            notifier,
        })
    }

    /// Absolute URL for a site path, used in shared links.
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.config.site_url.trim_end_matches('/'), path)
    }
}
