// src/domain/lead.rs

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

use crate::domain::format::parse_brl;
use crate::domain::listing::{PropertyType, Purpose};
use crate::requests::FormData;

pub const MAX_NAME_CHARS: usize = 120;
pub const MAX_MESSAGE_CHARS: usize = 4000;

/// Hidden form field that humans leave empty.
pub const HONEYPOT_FIELD: &str = "website";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadKind {
    /// "Fale conosco" or an inquiry about a specific listing.
    Contact,
    /// "Anuncie seu imóvel": an owner offering a property.
    ListProperty,
}

impl LeadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadKind::Contact => "contact",
            LeadKind::ListProperty => "list_property",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LeadKind::Contact => "Contato",
            LeadKind::ListProperty => "Anúncio",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "contact" => Some(LeadKind::Contact),
            "list_property" => Some(LeadKind::ListProperty),
            _ => None,
        }
    }
}

impl ToSql for LeadKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for LeadKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        LeadKind::parse(s).ok_or_else(|| FromSqlError::Other(format!("unknown lead kind {s:?}").into()))
    }
}

/// What an owner wants to list, for `LeadKind::ListProperty`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyOffer {
    pub purpose: Option<Purpose>,
    pub property_type: Option<PropertyType>,
    pub city: Option<String>,
    pub neighborhood: Option<String>,
    pub price_cents: Option<i64>,
}

/// A validated submission ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLead {
    pub kind: LeadKind,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: String,
    pub listing_id: Option<i64>,
    pub offer: PropertyOffer,
}

/// A stored lead as shown in the admin inbox.
#[derive(Debug, Clone)]
pub struct Lead {
    pub id: i64,
    pub kind: LeadKind,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: String,
    pub listing_id: Option<i64>,
    pub listing_title: Option<String>,
    pub offer: PropertyOffer,
    pub created_at: i64,
    pub read_at: Option<i64>,
}

impl Lead {
    pub fn is_unread(&self) -> bool {
        self.read_at.is_none()
    }

    pub fn contact_line(&self) -> String {
        match (&self.email, &self.phone) {
            (Some(e), Some(p)) => format!("{e} · {p}"),
            (Some(e), None) => e.clone(),
            (None, Some(p)) => p.clone(),
            (None, None) => String::new(),
        }
    }
}

/// Outcome of reading a public lead form.
#[derive(Debug)]
pub enum Submission {
    Valid(NewLead),
    /// Honeypot filled in: acknowledge, store nothing.
    Spam,
    Invalid(Vec<String>),
}

/// Trim + lowercase, minimal sanity check.
pub fn normalize_email(email: &str) -> Option<String> {
    let e = email.trim().to_lowercase();
    let (local, domain) = e.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') || !domain.contains('.') {
        return None;
    }
    if e.chars().any(char::is_whitespace) {
        return None;
    }
    Some(e)
}

/// Digits only; Brazilian numbers have 10 to 13 digits with area and
/// country codes.
pub fn normalize_phone(phone: &str) -> Option<String> {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    (10..=13).contains(&digits.len()).then_some(digits)
}

struct Contact {
    name: String,
    email: Option<String>,
    phone: Option<String>,
}

fn read_contact(form: &FormData, errors: &mut Vec<String>) -> Contact {
    let name = match form.text("name") {
        Some(n) if n.chars().count() > MAX_NAME_CHARS => {
            errors.push(format!("Nome deve ter no máximo {MAX_NAME_CHARS} caracteres"));
            String::new()
        }
        Some(n) => n.to_string(),
        None => {
            errors.push("Informe seu nome".to_string());
            String::new()
        }
    };

    let email = match form.text("email") {
        Some(raw) => {
            let e = normalize_email(raw);
            if e.is_none() {
                errors.push("E-mail inválido".to_string());
            }
            e
        }
        None => None,
    };

    let phone = match form.text("phone") {
        Some(raw) => {
            let p = normalize_phone(raw);
            if p.is_none() {
                errors.push("Telefone inválido (inclua o DDD)".to_string());
            }
            p
        }
        None => None,
    };

    if form.text("email").is_none() && form.text("phone").is_none() {
        errors.push("Informe um e-mail ou telefone para contato".to_string());
    }

    Contact { name, email, phone }
}

fn read_message(form: &FormData, required: bool, errors: &mut Vec<String>) -> String {
    match form.text("message") {
        Some(m) if m.chars().count() > MAX_MESSAGE_CHARS => {
            errors.push(format!("Mensagem deve ter no máximo {MAX_MESSAGE_CHARS} caracteres"));
            String::new()
        }
        Some(m) => m.replace("\r\n", "\n"),
        None if required => {
            errors.push("Escreva uma mensagem".to_string());
            String::new()
        }
        None => String::new(),
    }
}

fn is_spam(form: &FormData) -> bool {
    form.text(HONEYPOT_FIELD).is_some()
}

impl NewLead {
    /// Contact form; `listing_id` comes from the hidden field on detail pages.
    pub fn from_contact_form(form: &FormData) -> Submission {
        if is_spam(form) {
            return Submission::Spam;
        }
        let mut errors = Vec::new();
        let contact = read_contact(form, &mut errors);
        let message = read_message(form, true, &mut errors);

        if !errors.is_empty() {
            return Submission::Invalid(errors);
        }

        Submission::Valid(NewLead {
            kind: LeadKind::Contact,
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            message,
            listing_id: form
                .text("listing_id")
                .and_then(|v| v.parse().ok())
                .filter(|id: &i64| *id > 0),
            offer: PropertyOffer::default(),
        })
    }

    /// "Anuncie seu imóvel" form.
    pub fn from_offer_form(form: &FormData) -> Submission {
        if is_spam(form) {
            return Submission::Spam;
        }
        let mut errors = Vec::new();
        let contact = read_contact(form, &mut errors);
        let message = read_message(form, false, &mut errors);

        let purpose = form.text("purpose").and_then(Purpose::parse);
        let property_type = form.text("property_type").and_then(PropertyType::parse);
        if purpose.is_none() {
            errors.push("Escolha venda ou aluguel".to_string());
        }
        if property_type.is_none() {
            errors.push("Escolha o tipo de imóvel".to_string());
        }
        let city = form.text("city").map(str::to_string);
        if city.is_none() {
            errors.push("Informe a cidade do imóvel".to_string());
        }

        let price_cents = match form.text("price") {
            Some(raw) => match parse_brl(raw) {
                Some(p) => Some(p),
                None => {
                    errors.push("Valor pretendido inválido".to_string());
                    None
                }
            },
            None => None,
        };

        if !errors.is_empty() {
            return Submission::Invalid(errors);
        }

        Submission::Valid(NewLead {
            kind: LeadKind::ListProperty,
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            message,
            listing_id: None,
            offer: PropertyOffer {
                purpose,
                property_type,
                city,
                neighborhood: form.text("neighborhood").map(str::to_string),
                price_cents,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(s: &str) -> FormData {
        FormData::parse(s.as_bytes())
    }

    #[test]
    fn normalize_email_trims_and_lowercases() {
        assert_eq!(
            normalize_email("  Maria@Example.COM "),
            Some("maria@example.com".to_string())
        );
    }

    #[test]
    fn normalize_email_rejects_invalid() {
        assert!(normalize_email("").is_none());
        assert!(normalize_email("no-at-symbol").is_none());
        assert!(normalize_email("@example.com").is_none());
        assert!(normalize_email("test@").is_none());
        assert!(normalize_email("a@b@c.com").is_none());
        assert!(normalize_email("a b@c.com").is_none());
    }

    #[test]
    fn phone_keeps_digits() {
        assert_eq!(normalize_phone("(19) 99876-5432"), Some("19998765432".to_string()));
        assert_eq!(normalize_phone("+55 19 99876-5432"), Some("5519998765432".to_string()));
        assert_eq!(normalize_phone("+55 19 99876-5432"), normalize_phone("55 (19) 99876-5432"));
        assert_eq!(normalize_phone("9876-5432"), None);
    }

    #[test]
    fn contact_requires_email_or_phone() {
        match NewLead::from_contact_form(&form("name=Ana&message=Oi")) {
            Submission::Invalid(errors) => {
                assert!(errors.iter().any(|e| e.contains("e-mail ou telefone")))
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn contact_with_listing_reference() {
        match NewLead::from_contact_form(&form(
            "name=Ana&email=ANA%40mail.com&message=Quero+visitar&listing_id=7",
        )) {
            Submission::Valid(lead) => {
                assert_eq!(lead.kind, LeadKind::Contact);
                assert_eq!(lead.email.as_deref(), Some("ana@mail.com"));
                assert_eq!(lead.listing_id, Some(7));
                assert_eq!(lead.message, "Quero visitar");
            }
            other => panic!("expected Valid, got {other:?}"),
        }
    }

    #[test]
    fn honeypot_marks_spam() {
        let f = form("name=Bot&email=bot%40spam.com&message=buy&website=http%3A%2F%2Fspam");
        assert!(matches!(NewLead::from_contact_form(&f), Submission::Spam));
        assert!(matches!(NewLead::from_offer_form(&f), Submission::Spam));
    }

    #[test]
    fn offer_form_reads_property_details() {
        let f = form(
            "name=Jo%C3%A3o&phone=19998765432&purpose=aluguel&property_type=apartamento\
             &city=Campinas&neighborhood=Centro&price=2.500",
        );
        match NewLead::from_offer_form(&f) {
            Submission::Valid(lead) => {
                assert_eq!(lead.kind, LeadKind::ListProperty);
                assert_eq!(lead.offer.purpose, Some(Purpose::Rent));
                assert_eq!(lead.offer.property_type, Some(PropertyType::Apartment));
                assert_eq!(lead.offer.price_cents, Some(250_000));
                assert_eq!(lead.message, "");
            }
            other => panic!("expected Valid, got {other:?}"),
        }
    }

    #[test]
    fn offer_form_requires_city_and_type() {
        match NewLead::from_offer_form(&form("name=Jo&phone=19998765432")) {
            Submission::Invalid(errors) => assert_eq!(errors.len(), 3),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }
}
