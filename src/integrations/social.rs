// src/integrations/social.rs
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::FacebookConfig;
use crate::domain::format::{format_area, format_price_label};
use crate::domain::listing::Listing;
use crate::integrations::{check_status, IntegrationError, SocialPoster};

const GRAPH_API: &str = "https://graph.facebook.com/v19.0";

/// Posts to a Facebook page feed through the Graph API.
pub struct FacebookPoster {
    cfg: FacebookConfig,
    client: Client,
}

#[derive(Serialize)]
struct FeedPost<'a> {
    message: &'a str,
    link: &'a str,
    access_token: &'a str,
}

#[derive(Deserialize)]
struct FeedResponse {
    id: String,
}

impl FacebookPoster {
    pub fn new(cfg: FacebookConfig) -> Result<Self, IntegrationError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self { cfg, client })
    }
}

impl SocialPoster for FacebookPoster {
    fn network(&self) -> &'static str {
        "facebook"
    }

    fn post(&self, message: &str, link: &str) -> Result<String, IntegrationError> {
        let url = format!("{GRAPH_API}/{}/feed", self.cfg.page_id);
        let payload = FeedPost {
            message,
            link,
            access_token: &self.cfg.access_token,
        };

        let resp = self.client.post(url).form(&payload).send()?;
        let body: FeedResponse = check_status(resp)?
            .json()
            .map_err(|e| IntegrationError::Decode(e.to_string()))?;

        Ok(body.id)
    }
}

/// Post text for a listing: title, price, headline specs and location.
pub fn listing_message(listing: &Listing) -> String {
    let mut specs = Vec::new();
    if listing.bedrooms > 0 {
        specs.push(format!("{} quarto(s)", listing.bedrooms));
    }
    if listing.parking_spaces > 0 {
        specs.push(format!("{} vaga(s)", listing.parking_spaces));
    }
    if let Some(area) = listing.area_m2 {
        specs.push(format_area(area));
    }

    let mut lines = vec![
        format!("{} para {}", listing.title, listing.purpose.label().to_lowercase()),
        format_price_label(listing),
    ];
    if !specs.is_empty() {
        lines.push(specs.join(" · "));
    }
    lines.push(format!("📍 {}", listing.location_label()));
    lines.join("\n")
}
