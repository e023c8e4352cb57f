use crate::domain::format::{format_area, format_price_label};
use crate::domain::listing::Listing;
use crate::domain::slug::listing_path;
use maud::{html, Markup};

/// Search-result card. `compare` adds the checkbox that feeds `/comparar`.
pub fn listing_card(listing: &Listing, compare: bool) -> Markup {
    let path = listing_path(listing);
    html! {
        article class="listing-card" {
            a href=(path) class="cover" {
                @if let Some(url) = &listing.cover_url {
                    img src=(url) alt=(listing.title) loading="lazy";
                } @else {
                    div class="no-photo" { "Sem foto" }
                }
                span class="badge" { (listing.purpose.label()) }
            }
            div class="listing-card-body" {
                h3 { a href=(path) { (listing.title) } }
                p class="muted" { (listing.property_type.label()) " · " (listing.location_label()) }
                p class="price" { (format_price_label(listing)) }
                ul class="specs" {
                    @if let Some(area) = listing.area_m2 { li { (format_area(area)) } }
                    @if listing.bedrooms > 0 { li { (listing.bedrooms) " quartos" } }
                    @if listing.parking_spaces > 0 { li { (listing.parking_spaces) " vagas" } }
                }
                @if compare {
                    label class="compare-toggle" {
                        input type="checkbox" name="ids" value=(listing.id) form="compare-form";
                        " Comparar"
                    }
                }
            }
        }
    }
}
