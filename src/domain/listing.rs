use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

use crate::domain::format::parse_brl;
use crate::requests::FormData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Purpose {
    Sale,
    Rent,
}

impl Purpose {
    pub const ALL: [Purpose; 2] = [Purpose::Sale, Purpose::Rent];

    /// Stored value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Purpose::Sale => "sale",
            Purpose::Rent => "rent",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Purpose::Sale => "Venda",
            Purpose::Rent => "Aluguel",
        }
    }

    /// Word used in URLs and query strings.
    pub fn slug(&self) -> &'static str {
        match self {
            Purpose::Sale => "venda",
            Purpose::Rent => "aluguel",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sale" | "venda" => Some(Purpose::Sale),
            "rent" | "aluguel" | "locacao" | "locação" => Some(Purpose::Rent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyType {
    House,
    Apartment,
    Penthouse,
    Land,
    Commercial,
    Rural,
}

impl PropertyType {
    pub const ALL: [PropertyType; 6] = [
        PropertyType::House,
        PropertyType::Apartment,
        PropertyType::Penthouse,
        PropertyType::Land,
        PropertyType::Commercial,
        PropertyType::Rural,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::House => "house",
            PropertyType::Apartment => "apartment",
            PropertyType::Penthouse => "penthouse",
            PropertyType::Land => "land",
            PropertyType::Commercial => "commercial",
            PropertyType::Rural => "rural",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::House => "Casa",
            PropertyType::Apartment => "Apartamento",
            PropertyType::Penthouse => "Cobertura",
            PropertyType::Land => "Terreno",
            PropertyType::Commercial => "Comercial",
            PropertyType::Rural => "Rural",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            PropertyType::House => "casa",
            PropertyType::Apartment => "apartamento",
            PropertyType::Penthouse => "cobertura",
            PropertyType::Land => "terreno",
            PropertyType::Commercial => "comercial",
            PropertyType::Rural => "rural",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s || t.slug() == s)
    }
}

macro_rules! sql_text_enum {
    ($ty:ty) => {
        impl ToSql for $ty {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_str()))
            }
        }

        impl FromSql for $ty {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                let s = value.as_str()?;
                <$ty>::parse(s).ok_or_else(|| FromSqlError::Other(format!("unknown value {s:?}").into()))
            }
        }
    };
}

sql_text_enum!(Purpose);
sql_text_enum!(PropertyType);

/// A listing as stored, with its cover photo joined in.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub purpose: Purpose,
    pub property_type: PropertyType,
    pub price_cents: i64,
    pub condo_fee_cents: Option<i64>,
    pub iptu_cents: Option<i64>,
    pub bedrooms: i64,
    pub suites: i64,
    pub bathrooms: i64,
    pub parking_spaces: i64,
    pub area_m2: Option<f64>,
    pub lot_area_m2: Option<f64>,
    pub address: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub amenities: Vec<String>,
    pub featured: bool,
    pub published: bool,
    pub views: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub cover_url: Option<String>,
}

impl Listing {
    /// Description split into paragraphs on blank lines.
    pub fn paragraphs(&self) -> Vec<&str> {
        self.description
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect()
    }

    pub fn location_label(&self) -> String {
        format!("{}, {} - {}", self.neighborhood, self.city, self.state)
    }
}

#[derive(Debug, Clone)]
pub struct Photo {
    pub id: i64,
    pub listing_id: i64,
    pub url: String,
    pub public_id: String,
    pub position: i64,
    pub created_at: i64,
}

/// Validated admin form for creating or updating a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingInput {
    pub title: String,
    pub description: String,
    pub purpose: Purpose,
    pub property_type: PropertyType,
    pub price_cents: i64,
    pub condo_fee_cents: Option<i64>,
    pub iptu_cents: Option<i64>,
    pub bedrooms: i64,
    pub suites: i64,
    pub bathrooms: i64,
    pub parking_spaces: i64,
    pub area_m2: Option<f64>,
    pub lot_area_m2: Option<f64>,
    pub address: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub amenities: Vec<String>,
    pub featured: bool,
    pub published: bool,
}

pub const MAX_TITLE_CHARS: usize = 140;

impl ListingInput {
    /// Validates the admin form, collecting every field error.
    pub fn from_form(form: &FormData) -> Result<Self, Vec<String>> {
        let mut errors = Vec::new();

        let title = match form.text("title") {
            Some(t) if t.chars().count() > MAX_TITLE_CHARS => {
                errors.push(format!("Título deve ter no máximo {MAX_TITLE_CHARS} caracteres"));
                String::new()
            }
            Some(t) => t.to_string(),
            None => {
                errors.push("Título é obrigatório".to_string());
                String::new()
            }
        };

        let purpose = form.text("purpose").and_then(Purpose::parse);
        if purpose.is_none() {
            errors.push("Finalidade inválida".to_string());
        }

        let property_type = form.text("property_type").and_then(PropertyType::parse);
        if property_type.is_none() {
            errors.push("Tipo de imóvel inválido".to_string());
        }

        let price_cents = match form.text("price").map(parse_brl) {
            Some(Some(p)) if p > 0 => p,
            Some(_) => {
                errors.push("Preço inválido".to_string());
                0
            }
            None => {
                errors.push("Preço é obrigatório".to_string());
                0
            }
        };

        let condo_fee_cents = optional_money(form, "condo_fee", "Condomínio", &mut errors);
        let iptu_cents = optional_money(form, "iptu", "IPTU", &mut errors);

        let bedrooms = count(form, "bedrooms", "Quartos", &mut errors);
        let suites = count(form, "suites", "Suítes", &mut errors);
        let bathrooms = count(form, "bathrooms", "Banheiros", &mut errors);
        let parking_spaces = count(form, "parking_spaces", "Vagas", &mut errors);

        let area_m2 = optional_area(form, "area_m2", "Área útil", &mut errors);
        let lot_area_m2 = optional_area(form, "lot_area_m2", "Área do terreno", &mut errors);

        let neighborhood = required(form, "neighborhood", "Bairro", &mut errors);
        let city = required(form, "city", "Cidade", &mut errors);

        let state = match form.text("state") {
            Some(s) if s.len() == 2 && s.chars().all(|c| c.is_ascii_alphabetic()) => {
                s.to_ascii_uppercase()
            }
            _ => {
                errors.push("UF deve ter duas letras".to_string());
                String::new()
            }
        };

        match (purpose, property_type) {
            (Some(purpose), Some(property_type)) if errors.is_empty() => Ok(Self {
                title,
                description: form.text("description").unwrap_or("").replace("\r\n", "\n"),
                purpose,
                property_type,
                price_cents,
                condo_fee_cents,
                iptu_cents,
                bedrooms,
                suites,
                bathrooms,
                parking_spaces,
                area_m2,
                lot_area_m2,
                address: form.text("address").map(str::to_string),
                neighborhood,
                city,
                state,
                amenities: parse_amenities(form.get("amenities").unwrap_or("")),
                featured: form.flag("featured"),
                published: form.flag("published"),
            }),
            _ => Err(errors),
        }
    }
}

impl From<&Listing> for ListingInput {
    fn from(l: &Listing) -> Self {
        Self {
            title: l.title.clone(),
            description: l.description.clone(),
            purpose: l.purpose,
            property_type: l.property_type,
            price_cents: l.price_cents,
            condo_fee_cents: l.condo_fee_cents,
            iptu_cents: l.iptu_cents,
            bedrooms: l.bedrooms,
            suites: l.suites,
            bathrooms: l.bathrooms,
            parking_spaces: l.parking_spaces,
            area_m2: l.area_m2,
            lot_area_m2: l.lot_area_m2,
            address: l.address.clone(),
            neighborhood: l.neighborhood.clone(),
            city: l.city.clone(),
            state: l.state.clone(),
            amenities: l.amenities.clone(),
            featured: l.featured,
            published: l.published,
        }
    }
}

/// One amenity per line or comma-separated; trimmed, de-duplicated
/// case-insensitively, first spelling wins.
pub fn parse_amenities(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in raw.split(['\n', ',']) {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        if !out.iter().any(|a| a.to_lowercase() == item.to_lowercase()) {
            out.push(item.to_string());
        }
    }
    out
}

fn required(form: &FormData, key: &str, label: &str, errors: &mut Vec<String>) -> String {
    match form.text(key) {
        Some(v) => v.to_string(),
        None => {
            errors.push(format!("{label} é obrigatório"));
            String::new()
        }
    }
}

fn count(form: &FormData, key: &str, label: &str, errors: &mut Vec<String>) -> i64 {
    match form.text(key) {
        None => 0,
        Some(v) => match v.parse::<i64>() {
            Ok(n) if n >= 0 => n,
            _ => {
                errors.push(format!("{label} deve ser um número inteiro não negativo"));
                0
            }
        },
    }
}

fn optional_money(
    form: &FormData,
    key: &str,
    label: &str,
    errors: &mut Vec<String>,
) -> Option<i64> {
    let raw = form.text(key)?;
    match parse_brl(raw) {
        Some(v) => Some(v),
        None => {
            errors.push(format!("{label}: valor inválido"));
            None
        }
    }
}

fn optional_area(form: &FormData, key: &str, label: &str, errors: &mut Vec<String>) -> Option<f64> {
    let raw = form.text(key)?;
    let normalized = if raw.contains(',') {
        raw.replace('.', "").replace(',', ".")
    } else {
        raw.to_string()
    };
    match normalized.parse::<f64>() {
        Ok(v) if v > 0.0 && v.is_finite() => Some(v),
        _ => {
            errors.push(format!("{label}: valor inválido"));
            None
        }
    }
}
