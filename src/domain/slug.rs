// src/domain/slug.rs

use crate::domain::listing::Listing;

/// Folds Portuguese diacritics to ASCII. Other characters pass through.
pub fn fold_accents(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ç' => 'c',
        'Ç' => 'C',
        'ñ' => 'n',
        'Ñ' => 'N',
        other => other,
    }
}

/// Lower-case, accent-free form used for comparisons and search.
pub fn normalize(text: &str) -> String {
    text.trim()
        .chars()
        .map(fold_accents)
        .flat_map(char::to_lowercase)
        .collect()
}

/// `"Apartamento no Cambuí!"` -> `"apartamento-no-cambui"`.
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars().map(fold_accents).flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }

    out
}

/// Canonical detail-page slug, always ending with the listing id:
/// `casa-venda-3-quartos-cambui-campinas-42`.
pub fn listing_slug(listing: &Listing) -> String {
    let mut parts = vec![
        listing.property_type.slug().to_string(),
        listing.purpose.slug().to_string(),
    ];
    match listing.bedrooms {
        0 => {}
        1 => parts.push("1-quarto".to_string()),
        n => parts.push(format!("{n}-quartos")),
    }
    parts.push(slugify(&listing.neighborhood));
    parts.push(slugify(&listing.city));
    parts.push(listing.id.to_string());

    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

pub fn listing_path(listing: &Listing) -> String {
    format!("/imovel/{}", listing_slug(listing))
}

/// Listing id from the trailing `-<digits>` segment (or a bare number).
pub fn parse_slug_id(slug: &str) -> Option<i64> {
    let tail = slug.rsplit('-').next()?;
    if tail.is_empty() || !tail.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    tail.parse().ok().filter(|id| *id > 0)
}
