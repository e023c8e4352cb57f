use crate::domain::format::{format_area, format_brl, format_datetime, format_price_label, listing_reference, price_per_m2};
use crate::domain::listing::{Listing, Photo};
use crate::requests::FormData;
use crate::templates::components::{contact_form, whatsapp_link};
use crate::templates::{site_layout, SiteInfo};
use maud::{html, Markup};

pub struct DetailVm<'a> {
    pub listing: &'a Listing,
    pub photos: &'a [Photo],
    pub form_values: FormData,
    pub form_errors: Vec<String>,
}

fn spec(label: &str, value: impl maud::Render) -> Markup {
    html! {
        div class="spec" {
            dt { (label) }
            dd { (value) }
        }
    }
}

fn gallery(listing: &Listing, photos: &[Photo]) -> Markup {
    html! {
        @if photos.is_empty() {
            div class="gallery empty" { div class="no-photo" { "Sem fotos" } }
        } @else {
            div class="gallery" {
                @for (i, photo) in photos.iter().enumerate() {
                    img src=(photo.url)
                        alt=(format!("{} - foto {}", listing.title, i + 1))
                        loading=(if i == 0 { "eager" } else { "lazy" });
                }
            }
        }
    }
}

pub fn detail_page(site: SiteInfo<'_>, vm: &DetailVm<'_>) -> Markup {
    let l = vm.listing;
    let reference = listing_reference(l.id);
    let city_href = format!("/imoveis?{}", FormData::default().to_query_with("cidade", &l.city));

    site_layout(
        site,
        &l.title,
        html! {
            main class="container detail" {
                p class="breadcrumbs" {
                    a href="/imoveis" { "Imóveis" } " / "
                    a href=(city_href) { (l.city) } " / "
                    (l.neighborhood)
                }

                (gallery(l, vm.photos))

                div class="detail-grid" {
                    article {
                        h1 { (l.title) }
                        p class="muted" {
                            (l.property_type.label()) " para " (l.purpose.label().to_lowercase())
                            " · " (l.location_label())
                        }
                        @if let Some(address) = &l.address { p { (address) } }

                        dl class="specs-grid" {
                            @if let Some(a) = l.area_m2 { (spec("Área útil", format_area(a))) }
                            @if let Some(a) = l.lot_area_m2 { (spec("Terreno", format_area(a))) }
                            (spec("Quartos", l.bedrooms))
                            @if l.suites > 0 { (spec("Suítes", l.suites)) }
                            (spec("Banheiros", l.bathrooms))
                            (spec("Vagas", l.parking_spaces))
                        }

                        @if !l.amenities.is_empty() {
                            h2 { "Características" }
                            ul class="amenities" {
                                @for a in &l.amenities { li { (a) } }
                            }
                        }

                        @let paragraphs = l.paragraphs();
                        @if !paragraphs.is_empty() {
                            h2 { "Descrição" }
                            @for para in paragraphs { p { (para) } }
                        }

                        p class="muted small" {
                            "Código " (reference) " · atualizado em " (format_datetime(l.updated_at))
                        }
                    }

                    aside class="card price-box" {
                        p class="price" { (format_price_label(l)) }
                        @if let Some(fee) = l.condo_fee_cents { p { "Condomínio: " (format_brl(fee)) } }
                        @if let Some(iptu) = l.iptu_cents { p { "IPTU: " (format_brl(iptu)) } }
                        @if let Some(ppm) = price_per_m2(l) { p class="muted" { (format_brl(ppm)) "/m²" } }

                        @if let Some(number) = site.whatsapp {
                            p {
                                (whatsapp_link(
                                    number,
                                    &format!("Olá! Tenho interesse no imóvel {reference}: {}", l.title),
                                    "Conversar no WhatsApp",
                                ))
                            }
                        }

                        h3 { "Tenho interesse" }
                        (contact_form(&vm.form_values, &vm.form_errors, Some(l)))

                        p {
                            a href=(format!("/comparar?ids={}", l.id)) { "Comparar com outros imóveis" }
                        }
                    }
                }
            }
        },
    )
}
