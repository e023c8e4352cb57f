// src/domain/format.rs

use chrono::DateTime;

use crate::domain::listing::{Listing, Purpose};

/// Formats centavos as Brazilian reais: `R$ 1.250.000,00`.
pub fn format_brl(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let reais = group_thousands(abs / 100);
    format!("{sign}R$ {reais},{:02}", abs % 100)
}

/// Parses user-entered money into centavos.
///
/// Accepts `1.250.000,00`, `1250000`, `R$ 2.500`, `2500,5`. Dots are only
/// valid as thousands separators (groups of three digits).
pub fn parse_brl(input: &str) -> Option<i64> {
    let s = input.trim();
    let s = s.strip_prefix("R$").unwrap_or(s).trim();
    if s.is_empty() {
        return None;
    }

    let (int_part, frac_part) = match s.split_once(',') {
        Some((i, f)) => (i, Some(f)),
        None => (s, None),
    };

    let groups: Vec<&str> = int_part.split('.').collect();
    if groups.iter().any(|g| g.is_empty() || !g.chars().all(|c| c.is_ascii_digit())) {
        return None;
    }
    if groups.len() > 1 && (groups[0].len() > 3 || groups[1..].iter().any(|g| g.len() != 3)) {
        return None;
    }
    let reais: i64 = groups.concat().parse().ok()?;

    let centavos = match frac_part {
        None => 0,
        Some(f) if f.is_empty() || f.len() > 2 || !f.chars().all(|c| c.is_ascii_digit()) => {
            return None
        }
        Some(f) if f.len() == 1 => f.parse::<i64>().ok()? * 10,
        Some(f) => f.parse::<i64>().ok()?,
    };

    reais.checked_mul(100)?.checked_add(centavos)
}

/// `120 m²` or `120,5 m²`.
pub fn format_area(m2: f64) -> String {
    let rounded = (m2 * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{} m²", group_thousands(rounded as u64))
    } else {
        let text = format!("{rounded:.2}");
        let text = text.trim_end_matches('0').replace('.', ",");
        format!("{text} m²")
    }
}

/// Price with the rental suffix when the listing is for rent.
pub fn format_price_label(listing: &Listing) -> String {
    let price = format_brl(listing.price_cents);
    match listing.purpose {
        Purpose::Rent => format!("{price}/mês"),
        Purpose::Sale => price,
    }
}

/// Price per square metre in centavos, when the listing has an area.
pub fn price_per_m2(listing: &Listing) -> Option<i64> {
    listing
        .area_m2
        .filter(|a| *a > 0.0)
        .map(|a| (listing.price_cents as f64 / a).round() as i64)
}

pub fn format_datetime(ts: i64) -> String {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn listing_reference(id: i64) -> String {
    format!("REF-{id:04}")
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}
