// src/integrations/mailer.rs

use maud::html;
use reqwest::blocking::Client;
use serde::Serialize;
use std::time::Duration;

use crate::config::BrevoConfig;
use crate::domain::format::{format_brl, format_datetime};
use crate::domain::lead::{Lead, LeadKind};
use crate::integrations::{check_status, IntegrationError, LeadNotifier};

const BREVO_SEND_URL: &str = "https://api.brevo.com/v3/smtp/email";

/// New-lead notifications through Brevo transactional e-mail.
pub struct BrevoMailer {
    cfg: BrevoConfig,
    site_name: String,
    client: Client,
}

#[derive(Serialize)]
struct BrevoSender<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
struct BrevoRecipient<'a> {
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoPayload<'a> {
    sender: BrevoSender<'a>,
    to: Vec<BrevoRecipient<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<BrevoRecipient<'a>>,
    subject: String,
    html_content: String,
}

impl BrevoMailer {
    pub fn new(cfg: BrevoConfig, site_name: impl Into<String>) -> Result<Self, IntegrationError> {
        let client = Client::builder().timeout(Duration::from_secs(20)).build()?;
        Ok(Self {
            cfg,
            site_name: site_name.into(),
            client,
        })
    }
}

impl LeadNotifier for BrevoMailer {
    fn notify(&self, lead: &Lead) -> Result<(), IntegrationError> {
        let payload = BrevoPayload {
            sender: BrevoSender {
                name: &self.cfg.sender_name,
                email: &self.cfg.sender_email,
            },
            to: vec![BrevoRecipient {
                email: &self.cfg.notify_email,
            }],
            reply_to: lead
                .email
                .as_deref()
                .map(|email| BrevoRecipient { email }),
            subject: notification_subject(&self.site_name, lead),
            html_content: notification_body(lead),
        };

        let resp = self
            .client
            .post(BREVO_SEND_URL)
            .header("api-key", &self.cfg.api_key)
            .json(&payload)
            .send()?;
        check_status(resp)?;

        tracing::info!(lead_id = lead.id, "lead notification sent");
        Ok(())
    }
}

pub fn notification_subject(site_name: &str, lead: &Lead) -> String {
    match lead.kind {
        LeadKind::Contact => match &lead.listing_title {
            Some(title) => format!("[{site_name}] Novo contato sobre {title}"),
            None => format!("[{site_name}] Novo contato de {}", lead.name),
        },
        LeadKind::ListProperty => format!("[{site_name}] {} quer anunciar um imóvel", lead.name),
    }
}

fn notification_body(lead: &Lead) -> String {
    let offer = &lead.offer;
    html! {
        h2 { (lead.kind.label()) " recebido em " (format_datetime(lead.created_at)) }
        p {
            strong { "Nome: " } (lead.name) br;
            @if let Some(email) = &lead.email { strong { "E-mail: " } (email) br; }
            @if let Some(phone) = &lead.phone { strong { "Telefone: " } (phone) br; }
            @if let Some(title) = &lead.listing_title { strong { "Imóvel: " } (title) br; }
        }
        @if lead.kind == LeadKind::ListProperty {
            ul {
                @if let Some(p) = offer.purpose { li { "Finalidade: " (p.label()) } }
                @if let Some(t) = offer.property_type { li { "Tipo: " (t.label()) } }
                @if let Some(n) = &offer.neighborhood { li { "Bairro: " (n) } }
                @if let Some(c) = &offer.city { li { "Cidade: " (c) } }
                @if let Some(price) = offer.price_cents { li { "Valor pretendido: " (format_brl(price)) } }
            }
        }
        @for line in lead.message.lines() {
            p { (line) }
        }
    }
    .into_string()
}
