// src/integrations/images.rs
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::time::Duration;

use crate::config::CloudinaryConfig;
use crate::integrations::{check_status, HostedImage, ImageHost, IntegrationError};

const API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Cloudinary signed uploads.
pub struct CloudinaryHost {
    cfg: CloudinaryConfig,
    client: Client,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Deserialize)]
struct DestroyResponse {
    result: String,
}

impl CloudinaryHost {
    pub fn new(cfg: CloudinaryConfig) -> Result<Self, IntegrationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self { cfg, client })
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{API_BASE}/{}/image/{action}", self.cfg.cloud_name)
    }

    fn timestamp() -> String {
        chrono::Utc::now().timestamp().to_string()
    }
}

/// Cloudinary request signature: parameters sorted by name, joined as
/// `k=v&k=v`, secret appended, SHA-256 as lowercase hex.
pub fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted: Vec<&(&str, &str)> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

impl ImageHost for CloudinaryHost {
    fn upload(
        &self,
        bytes: &[u8],
        filename: &str,
        content_type: &str,
    ) -> Result<HostedImage, IntegrationError> {
        let timestamp = Self::timestamp();
        let folder = self.cfg.folder.clone().unwrap_or_default();
        let signature = sign_params(
            &[("folder", folder.as_str()), ("timestamp", timestamp.as_str())],
            &self.cfg.api_secret,
        );

        let file = Part::bytes(bytes.to_vec())
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(|e| IntegrationError::Decode(format!("invalid content type: {e}")))?;

        let mut form = Form::new()
            .part("file", file)
            .text("api_key", self.cfg.api_key.clone())
            .text("timestamp", timestamp)
            .text("signature", signature)
            .text("signature_algorithm", "sha256");
        if !folder.is_empty() {
            form = form.text("folder", folder);
        }

        let resp = self.client.post(self.endpoint("upload")).multipart(form).send()?;
        let body: UploadResponse = check_status(resp)?
            .json()
            .map_err(|e| IntegrationError::Decode(e.to_string()))?;

        tracing::info!(public_id = %body.public_id, "image uploaded");
        Ok(HostedImage {
            url: body.secure_url,
            public_id: body.public_id,
        })
    }

    fn destroy(&self, public_id: &str) -> Result<(), IntegrationError> {
        let timestamp = Self::timestamp();
        let signature = sign_params(
            &[("public_id", public_id), ("timestamp", timestamp.as_str())],
            &self.cfg.api_secret,
        );

        let params = [
            ("public_id", public_id),
            ("timestamp", timestamp.as_str()),
            ("api_key", self.cfg.api_key.as_str()),
            ("signature", signature.as_str()),
            ("signature_algorithm", "sha256"),
        ];

        let resp = self.client.post(self.endpoint("destroy")).form(&params).send()?;
        let body: DestroyResponse = check_status(resp)?
            .json()
            .map_err(|e| IntegrationError::Decode(e.to_string()))?;

        // "not found" means it is already gone.
        match body.result.as_str() {
            "ok" | "not found" => Ok(()),
            other => Err(IntegrationError::Decode(format!("destroy returned {other:?}"))),
        }
    }
}
