use crate::domain::listing::Listing;
use crate::domain::search::{FilterOptions, ListingFilter, Page, SortOrder};
use crate::requests::FormData;
use crate::templates::components::{filter_form, listing_card};
use crate::templates::{site_layout, SiteInfo};
use maud::{html, Markup};

pub struct SearchVm<'a> {
    pub filter: ListingFilter,
    pub sort: SortOrder,
    pub options: FilterOptions,
    pub results: Page<&'a Listing>,
    /// Raw query, kept so pagination links preserve the filters.
    pub query: FormData,
}

fn pagination(vm: &SearchVm<'_>) -> Markup {
    let page = vm.results.page;
    html! {
        @if vm.results.total_pages > 1 {
            nav class="pagination" aria-label="Paginação" {
                @if page > 1 {
                    a href=(format!("/imoveis?{}", vm.query.to_query_with("pagina", &(page - 1).to_string()))) { "← Anterior" }
                }
                span { "Página " (page) " de " (vm.results.total_pages) }
                @if page < vm.results.total_pages {
                    a href=(format!("/imoveis?{}", vm.query.to_query_with("pagina", &(page + 1).to_string()))) { "Próxima →" }
                }
            }
        }
    }
}

pub fn search_page(site: SiteInfo<'_>, vm: &SearchVm<'_>) -> Markup {
    let total = vm.results.total_items;
    site_layout(
        site,
        "Buscar imóveis",
        html! {
            main class="container" {
                h1 { "Imóveis" }
                (filter_form(&vm.filter, vm.sort, &vm.options))

                p class="result-count" {
                    @match total {
                        0 => "Nenhum imóvel encontrado.",
                        1 => "1 imóvel encontrado",
                        n => { (n) " imóveis encontrados" }
                    }
                }

                @if total > 0 {
                    form id="compare-form" method="get" action="/comparar" class="compare-bar" {
                        span class="muted" { "Selecione até 4 imóveis para comparar." }
                        button type="submit" { "Comparar selecionados" }
                    }
                    div class="listing-grid" {
                        @for l in &vm.results.items {
                            (listing_card(l, true))
                        }
                    }
                    (pagination(vm))
                }
            }
        },
    )
}
