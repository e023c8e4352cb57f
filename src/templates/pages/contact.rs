use crate::domain::lead::LeadKind;
use crate::domain::listing::Listing;
use crate::requests::FormData;
use crate::templates::components::{contact_form, offer_form, thanks_message};
use crate::templates::{site_layout, SiteInfo};
use maud::{html, Markup};

/// `listing` is set when an inquiry from a detail page failed validation
/// without htmx.
pub fn contact_page(
    site: SiteInfo<'_>,
    values: &FormData,
    errors: &[String],
    listing: Option<&Listing>,
) -> Markup {
    site_layout(
        site,
        "Fale conosco",
        html! {
            main class="container narrow" {
                h1 { "Fale conosco" }
                @if let Some(l) = listing {
                    p class="lead" { "Sobre o imóvel " strong { (l.title) } }
                } @else {
                    p class="lead" { "Dúvidas, visitas ou propostas: mande uma mensagem." }
                }
                (contact_form(values, errors, listing))
            }
        },
    )
}

pub fn offer_page(site: SiteInfo<'_>, values: &FormData, errors: &[String]) -> Markup {
    site_layout(
        site,
        "Anuncie seu imóvel",
        html! {
            main class="container narrow" {
                h1 { "Anuncie seu imóvel" }
                p class="lead" { "Conte sobre o imóvel e entraremos em contato para a avaliação." }
                (offer_form(values, errors))
            }
        },
    )
}

pub fn thanks_page(site: SiteInfo<'_>, kind: LeadKind) -> Markup {
    site_layout(
        site,
        "Obrigado",
        html! {
            main class="container narrow" {
                (thanks_message(kind))
                p { a href="/imoveis" { "Continuar vendo imóveis" } }
            }
        },
    )
}
