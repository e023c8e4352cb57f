use crate::domain::compare::{CompareRow, MAX_COMPARE};
use crate::domain::listing::Listing;
use crate::domain::slug::listing_path;
use crate::templates::{site_layout, SiteInfo};
use maud::{html, Markup};

pub fn compare_page(site: SiteInfo<'_>, listings: &[&Listing], rows: &[CompareRow]) -> Markup {
    site_layout(
        site,
        "Comparar imóveis",
        html! {
            main class="container" {
                h1 { "Comparar imóveis" }

                @if listings.len() < 2 {
                    p class="hint" {
                        "Selecione de 2 a " (MAX_COMPARE) " imóveis na "
                        a href="/imoveis" { "busca" }
                        " para ver a comparação lado a lado."
                    }
                } @else {
                    div class="table-scroll" {
                        table class="compare" {
                            thead {
                                tr {
                                    th {}
                                    @for l in listings {
                                        th {
                                            @if let Some(url) = &l.cover_url {
                                                img src=(url) alt=(l.title) class="thumb";
                                            }
                                            a href=(listing_path(l)) { (l.title) }
                                        }
                                    }
                                }
                            }
                            tbody {
                                @for row in rows {
                                    tr {
                                        th scope="row" { (row.label) }
                                        @for v in &row.values { td { (v) } }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
