// templates/pages/home.rs

use crate::domain::listing::{Listing, PropertyType, Purpose};
use crate::templates::components::listing_card;
use crate::templates::{site_layout, SiteInfo};
use maud::{html, Markup};

pub fn home_page(site: SiteInfo<'_>, highlights: &[&Listing], cities: &[String]) -> Markup {
    site_layout(
        site,
        "Imóveis à venda e para alugar",
        html! {
            section class="hero" {
                h1 { "Encontre o imóvel certo para você" }
                form class="quick-search" method="get" action="/imoveis" {
                    select name="finalidade" {
                        @for p in Purpose::ALL {
                            option value=(p.slug()) { (p.label()) }
                        }
                    }
                    select name="tipo" {
                        option value="" { "Todos os tipos" }
                        @for t in PropertyType::ALL {
                            option value=(t.slug()) { (t.label()) }
                        }
                    }
                    select name="cidade" {
                        option value="" { "Todas as cidades" }
                        @for c in cities {
                            option value=(c) { (c) }
                        }
                    }
                    button type="submit" class="primary" { "Buscar" }
                }
            }

            main class="container" {
                section {
                    h2 { "Destaques" }
                    @if highlights.is_empty() {
                        p class="muted" { "Nenhum imóvel publicado no momento." }
                    } @else {
                        div class="listing-grid" {
                            @for l in highlights {
                                (listing_card(l, false))
                            }
                        }
                        p { a href="/imoveis" { "Ver todos os imóveis →" } }
                    }
                }

                div hx-get="/indicadores" hx-trigger="load" hx-swap="outerHTML" {
                    p class="muted" { "Carregando indicadores…" }
                }

                section class="card cta" {
                    h2 { "Quer vender ou alugar seu imóvel?" }
                    p { "Anuncie com a gente e fale com compradores e inquilinos qualificados." }
                    a href="/anuncie" class="button primary" { "Anuncie seu imóvel" }
                }
            }
        },
    )
}
