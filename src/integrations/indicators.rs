// src/integrations/indicators.rs
use rand::Rng;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::integrations::{check_status, Indicator, IndicatorSource, IntegrationError};

/// Banco Central SGS series shown on the site.
pub const SERIES: [(u32, &str); 4] = [
    (432, "Selic"),
    (433, "IPCA"),
    (189, "IGP-M"),
    (192, "INCC"),
];

/// Client for the public SGS API (`bcdata.sgs.{code}/dados/ultimos/1`).
pub struct BcbIndicators {
    base_url: String,
    client: Client,
}

#[derive(Deserialize)]
struct SgsPoint {
    data: String,
    valor: String,
}

impl BcbIndicators {
    pub fn new(base_url: impl Into<String>) -> Result<Self, IntegrationError> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn try_fetch(&self, code: u32) -> Result<SgsPoint, IntegrationError> {
        let url = format!("{}/bcdata.sgs.{code}/dados/ultimos/1", self.base_url);
        let resp = self
            .client
            .get(url)
            .query(&[("formato", "json")])
            .send()?;
        let points: Vec<SgsPoint> = check_status(resp)?
            .json()
            .map_err(|e| IntegrationError::Decode(e.to_string()))?;
        points
            .into_iter()
            .last()
            .ok_or_else(|| IntegrationError::Decode(format!("series {code} returned no data")))
    }
}

impl IndicatorSource for BcbIndicators {
    fn latest(&self, code: u32, name: &str) -> Result<Indicator, IntegrationError> {
        const MAX_ATTEMPTS: u64 = 3;
        const JITTER_MAX_MS: u64 = 250;

        let mut last_err = None;
        for attempt in 1..=MAX_ATTEMPTS {
            match self.try_fetch(code) {
                Ok(point) => return parse_point(code, name, point),
                Err(e) => {
                    tracing::warn!(code, attempt, error = %e, "indicator fetch failed");
                    last_err = Some(e);
                    if attempt < MAX_ATTEMPTS {
                        let jitter = rand::thread_rng().gen_range(0..=JITTER_MAX_MS);
                        std::thread::sleep(Duration::from_millis(500 * attempt + jitter));
                    }
                }
            }
        }

        Err(last_err.unwrap_or_else(|| IntegrationError::Network("retry loop failed".into())))
    }
}

fn parse_point(code: u32, name: &str, point: SgsPoint) -> Result<Indicator, IntegrationError> {
    let value = point
        .valor
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|e| IntegrationError::Decode(format!("series {code} value {:?}: {e}", point.valor)))?;

    Ok(Indicator {
        code,
        name: name.to_string(),
        date: point.data,
        value,
    })
}

/// Caches the full indicator set. A failed refresh keeps serving the stale
/// set when there is one, and the next attempt waits another `ttl`.
pub struct IndicatorService {
    source: Box<dyn IndicatorSource>,
    ttl: Duration,
    cache: Mutex<Option<(Instant, Vec<Indicator>)>>,
}

impl IndicatorService {
    pub fn new(source: Box<dyn IndicatorSource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            cache: Mutex::new(None),
        }
    }

    pub fn current(&self) -> Result<Vec<Indicator>, IntegrationError> {
        // Held across the fetch so concurrent requests share one refresh.
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());

        if let Some((fetched_at, values)) = cache.as_ref() {
            if fetched_at.elapsed() < self.ttl {
                return Ok(values.clone());
            }
        }

        let fresh: Result<Vec<Indicator>, IntegrationError> = SERIES
            .iter()
            .map(|(code, name)| self.source.latest(*code, name))
            .collect();

        match fresh {
            Ok(values) => {
                *cache = Some((Instant::now(), values.clone()));
                Ok(values)
            }
            Err(e) => match cache.take() {
                Some((_, stale)) => {
                    tracing::warn!(error = %e, "serving stale indicators");
                    *cache = Some((Instant::now(), stale.clone()));
                    Ok(stale)
                }
                None => Err(e),
            },
        }
    }
}
