// src/domain/search.rs

use std::cmp::Ordering;

use crate::domain::listing::{Listing, PropertyType, Purpose};
use crate::domain::slug::normalize;
use crate::requests::FormData;

pub const PER_PAGE: usize = 12;

/// Search criteria from the listing search form. Unset fields match
/// everything; invalid query values are dropped rather than rejected.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ListingFilter {
    pub purpose: Option<Purpose>,
    pub property_type: Option<PropertyType>,
    pub city: Option<String>,
    pub neighborhood: Option<String>,
    /// Whole reais.
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub min_bedrooms: Option<i64>,
    pub min_parking: Option<i64>,
    pub text: Option<String>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    AreaDesc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::Newest,
        SortOrder::PriceAsc,
        SortOrder::PriceDesc,
        SortOrder::AreaDesc,
    ];

    pub fn as_param(&self) -> &'static str {
        match self {
            SortOrder::Newest => "recentes",
            SortOrder::PriceAsc => "menor_preco",
            SortOrder::PriceDesc => "maior_preco",
            SortOrder::AreaDesc => "maior_area",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Newest => "Mais recentes",
            SortOrder::PriceAsc => "Menor preço",
            SortOrder::PriceDesc => "Maior preço",
            SortOrder::AreaDesc => "Maior área",
        }
    }

    pub fn parse(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|o| o.as_param() == s)
            .unwrap_or_default()
    }
}

fn whole_number(form: &FormData, key: &str) -> Option<i64> {
    form.text(key)
        .map(|v| v.replace('.', ""))
        .and_then(|v| v.parse::<i64>().ok())
        .filter(|n| *n >= 0)
}

impl ListingFilter {
    pub fn from_query(q: &FormData) -> Self {
        Self {
            purpose: q.text("finalidade").and_then(Purpose::parse),
            property_type: q.text("tipo").and_then(PropertyType::parse),
            city: q.text("cidade").map(str::to_string),
            neighborhood: q.text("bairro").map(str::to_string),
            min_price: whole_number(q, "preco_min"),
            max_price: whole_number(q, "preco_max"),
            min_bedrooms: whole_number(q, "quartos"),
            min_parking: whole_number(q, "vagas"),
            text: q.text("q").map(str::to_string),
        }
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        if self.purpose.is_some_and(|p| p != listing.purpose) {
            return false;
        }
        if self.property_type.is_some_and(|t| t != listing.property_type) {
            return false;
        }
        if let Some(city) = &self.city {
            if normalize(city) != normalize(&listing.city) {
                return false;
            }
        }
        if let Some(neighborhood) = &self.neighborhood {
            if normalize(neighborhood) != normalize(&listing.neighborhood) {
                return false;
            }
        }
        if self
            .min_price
            .is_some_and(|min| listing.price_cents < min.saturating_mul(100))
        {
            return false;
        }
        if self
            .max_price
            .is_some_and(|max| listing.price_cents > max.saturating_mul(100))
        {
            return false;
        }
        if self.min_bedrooms.is_some_and(|n| listing.bedrooms < n) {
            return false;
        }
        if self.min_parking.is_some_and(|n| listing.parking_spaces < n) {
            return false;
        }
        if let Some(text) = &self.text {
            let needle = normalize(text);
            let haystacks = [
                &listing.title,
                &listing.description,
                &listing.neighborhood,
                &listing.city,
            ];
            if !haystacks.iter().any(|h| normalize(h).contains(&needle)) {
                return false;
            }
        }
        true
    }
}

fn newest_first(a: &Listing, b: &Listing) -> Ordering {
    b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id))
}

/// Listings matching `filter`, ordered by `sort`. Ties fall back to newest
/// first; listings without an area sort last under `AreaDesc`.
pub fn apply<'a>(listings: &'a [Listing], filter: &ListingFilter, sort: SortOrder) -> Vec<&'a Listing> {
    let mut out: Vec<&Listing> = listings.iter().filter(|l| filter.matches(l)).collect();

    out.sort_by(|a, b| {
        let primary = match sort {
            SortOrder::Newest => Ordering::Equal,
            SortOrder::PriceAsc => a.price_cents.cmp(&b.price_cents),
            SortOrder::PriceDesc => b.price_cents.cmp(&a.price_cents),
            SortOrder::AreaDesc => match (a.area_m2, b.area_m2) {
                (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        };
        primary.then_with(|| newest_first(a, b))
    });

    out
}

#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Slices one page out of `items`. Out-of-range pages clamp to the last one.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total_items);

    Page {
        items: items[start.min(end)..end].to_vec(),
        page,
        total_pages,
        total_items,
    }
}

/// Distinct values for the filter selects.
#[derive(Debug, Default)]
pub struct FilterOptions {
    pub cities: Vec<String>,
    pub neighborhoods: Vec<String>,
}

impl FilterOptions {
    pub fn from_listings(listings: &[Listing]) -> Self {
        Self {
            cities: distinct(listings.iter().map(|l| l.city.as_str())),
            neighborhoods: distinct(listings.iter().map(|l| l.neighborhood.as_str())),
        }
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<(String, String)> = Vec::new();
    for v in values {
        let key = normalize(v);
        if key.is_empty() || seen.iter().any(|(k, _)| *k == key) {
            continue;
        }
        seen.push((key, v.trim().to_string()));
    }
    seen.sort_by(|a, b| a.0.cmp(&b.0));
    seen.into_iter().map(|(_, v)| v).collect()
}
