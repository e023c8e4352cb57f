use crate::domain::listing::{PropertyType, Purpose};
use crate::domain::search::{FilterOptions, ListingFilter, SortOrder};
use crate::templates::components::select;
use maud::{html, Markup};

fn pairs(values: &[String]) -> Vec<(String, String)> {
    values.iter().map(|v| (v.clone(), v.clone())).collect()
}

pub fn filter_form(filter: &ListingFilter, sort: SortOrder, options: &FilterOptions) -> Markup {
    let purposes: Vec<(String, String)> = Purpose::ALL
        .iter()
        .map(|p| (p.slug().to_string(), p.label().to_string()))
        .collect();
    let types: Vec<(String, String)> = PropertyType::ALL
        .iter()
        .map(|t| (t.slug().to_string(), t.label().to_string()))
        .collect();
    let sorts: Vec<(String, String)> = SortOrder::ALL
        .iter()
        .map(|s| (s.as_param().to_string(), s.label().to_string()))
        .collect();

    html! {
        form class="filter-form" method="get" action="/imoveis" {
            input type="search" name="q" placeholder="Buscar por bairro, cidade ou palavra-chave"
                value=[filter.text.as_deref()];
            (select("finalidade", "Comprar ou alugar", &purposes, filter.purpose.map(|p| p.slug())))
            (select("tipo", "Todos os tipos", &types, filter.property_type.map(|t| t.slug())))
            (select("cidade", "Todas as cidades", &pairs(&options.cities), filter.city.as_deref()))
            (select("bairro", "Todos os bairros", &pairs(&options.neighborhoods), filter.neighborhood.as_deref()))
            input type="number" name="preco_min" min="0" placeholder="Preço mínimo (R$)" value=[filter.min_price];
            input type="number" name="preco_max" min="0" placeholder="Preço máximo (R$)" value=[filter.max_price];
            input type="number" name="quartos" min="0" placeholder="Quartos (mín.)" value=[filter.min_bedrooms];
            input type="number" name="vagas" min="0" placeholder="Vagas (mín.)" value=[filter.min_parking];
            select name="ordem" {
                @for (value, label) in &sorts {
                    option value=(value) selected[value == sort.as_param()] { (label) }
                }
            }
            button type="submit" class="primary" { "Buscar" }
        }
    }
}
