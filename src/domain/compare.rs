// src/domain/compare.rs

use crate::domain::format::{format_area, format_brl, format_price_label, price_per_m2};
use crate::domain::listing::Listing;
use crate::requests::FormData;

pub const MAX_COMPARE: usize = 4;

/// Ids from `ids=1&ids=2` or `ids=1,2`, de-duplicated in first-seen order and
/// capped at `MAX_COMPARE`.
pub fn parse_compare_ids(q: &FormData) -> Vec<i64> {
    let mut ids = Vec::new();
    for raw in q.get_all("ids") {
        for part in raw.split(',') {
            if let Ok(id) = part.trim().parse::<i64>() {
                if id > 0 && !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }
    }
    ids.truncate(MAX_COMPARE);
    ids
}

#[derive(Debug, PartialEq)]
pub struct CompareRow {
    pub label: String,
    pub values: Vec<String>,
}

fn row(listings: &[&Listing], label: &str, f: impl Fn(&Listing) -> String) -> CompareRow {
    CompareRow {
        label: label.to_string(),
        values: listings.iter().map(|&l| f(l)).collect(),
    }
}

fn dash() -> String {
    "—".to_string()
}

/// One row per attribute, one column per listing.
pub fn comparison_rows(listings: &[&Listing]) -> Vec<CompareRow> {
    let mut rows = vec![
        row(listings, "Preço", format_price_label),
        row(listings, "Finalidade", |l| l.purpose.label().to_string()),
        row(listings, "Tipo", |l| l.property_type.label().to_string()),
        row(listings, "Localização", |l| l.location_label()),
        row(listings, "Área útil", |l| {
            l.area_m2.map(format_area).unwrap_or_else(dash)
        }),
        row(listings, "Quartos", |l| l.bedrooms.to_string()),
        row(listings, "Suítes", |l| l.suites.to_string()),
        row(listings, "Banheiros", |l| l.bathrooms.to_string()),
        row(listings, "Vagas", |l| l.parking_spaces.to_string()),
        row(listings, "Condomínio", |l| {
            l.condo_fee_cents.map(format_brl).unwrap_or_else(dash)
        }),
        row(listings, "IPTU", |l| {
            l.iptu_cents.map(format_brl).unwrap_or_else(dash)
        }),
        row(listings, "Preço por m²", |l| {
            price_per_m2(l).map(format_brl).unwrap_or_else(dash)
        }),
    ];

    // Union of amenities, in first-seen order.
    let mut amenities: Vec<&str> = Vec::new();
    for l in listings {
        for a in &l.amenities {
            if !amenities.iter().any(|x| x.eq_ignore_ascii_case(a)) {
                amenities.push(a.as_str());
            }
        }
    }
    for amenity in amenities {
        rows.push(row(listings, amenity, |l| {
            if l.amenities.iter().any(|a| a.eq_ignore_ascii_case(amenity)) {
                "✓".to_string()
            } else {
                dash()
            }
        }));
    }

    rows
}
