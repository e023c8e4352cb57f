use crate::db::social_posts::SocialPost;
use crate::domain::format::{format_brl, format_datetime, listing_reference};
use crate::domain::listing::{Listing, PropertyType, Purpose};
use crate::requests::FormData;
use crate::templates::admin_layout;
use crate::templates::components::form_errors;
use maud::{html, Markup};

pub struct ListingFormVm {
    /// `None` when creating.
    pub listing_id: Option<i64>,
    pub values: FormData,
    pub errors: Vec<String>,
    pub social_posts: Vec<SocialPost>,
    pub social_network: Option<&'static str>,
}

fn area_text(m2: f64) -> String {
    m2.to_string().replace('.', ",")
}

/// Form values for editing an existing listing.
pub fn listing_form_values(l: &Listing) -> FormData {
    let mut pairs = vec![
        ("title", l.title.clone()),
        ("description", l.description.clone()),
        ("purpose", l.purpose.as_str().to_string()),
        ("property_type", l.property_type.as_str().to_string()),
        ("price", format_brl(l.price_cents)),
        ("bedrooms", l.bedrooms.to_string()),
        ("suites", l.suites.to_string()),
        ("bathrooms", l.bathrooms.to_string()),
        ("parking_spaces", l.parking_spaces.to_string()),
        ("neighborhood", l.neighborhood.clone()),
        ("city", l.city.clone()),
        ("state", l.state.clone()),
        ("amenities", l.amenities.join("\n")),
    ];
    if let Some(v) = l.condo_fee_cents {
        pairs.push(("condo_fee", format_brl(v)));
    }
    if let Some(v) = l.iptu_cents {
        pairs.push(("iptu", format_brl(v)));
    }
    if let Some(v) = l.area_m2 {
        pairs.push(("area_m2", area_text(v)));
    }
    if let Some(v) = l.lot_area_m2 {
        pairs.push(("lot_area_m2", area_text(v)));
    }
    if let Some(v) = &l.address {
        pairs.push(("address", v.clone()));
    }
    if l.featured {
        pairs.push(("featured", "1".to_string()));
    }
    if l.published {
        pairs.push(("published", "1".to_string()));
    }
    FormData::from_pairs(pairs)
}

fn text_input(values: &FormData, name: &str, label: &str, required: bool) -> Markup {
    html! {
        label for=(name) { (label) }
        input type="text" id=(name) name=(name) required[required] value=[values.get(name)];
    }
}

fn number_input(values: &FormData, name: &str, label: &str) -> Markup {
    html! {
        label for=(name) { (label) }
        input type="number" id=(name) name=(name) min="0" value=(values.get(name).unwrap_or("0"));
    }
}

pub fn listing_form_page(site_name: &str, vm: &ListingFormVm) -> Markup {
    let v = &vm.values;
    let purpose = v.get("purpose").and_then(Purpose::parse);
    let property_type = v.get("property_type").and_then(PropertyType::parse);
    let (title, action) = match vm.listing_id {
        Some(id) => (format!("Editar {}", listing_reference(id)), format!("/admin/imoveis/{id}")),
        None => ("Novo imóvel".to_string(), "/admin/imoveis".to_string()),
    };

    admin_layout(
        site_name,
        &title,
        html! {
            h1 { (title) }
            @if let Some(id) = vm.listing_id {
                p { a href=(format!("/admin/imoveis/{id}/fotos")) { "Gerenciar fotos →" } }
            }

            (form_errors(&vm.errors))

            form method="post" action=(action) class="card listing-form" {
                (text_input(v, "title", "Título", true))

                label for="description" { "Descrição" }
                textarea id="description" name="description" rows="8" { (v.get("description").unwrap_or("")) }

                div class="row" {
                    div {
                        label for="purpose" { "Finalidade" }
                        select id="purpose" name="purpose" required {
                            @for p in Purpose::ALL {
                                option value=(p.as_str()) selected[purpose == Some(p)] { (p.label()) }
                            }
                        }
                    }
                    div {
                        label for="property_type" { "Tipo" }
                        select id="property_type" name="property_type" required {
                            @for t in PropertyType::ALL {
                                option value=(t.as_str()) selected[property_type == Some(t)] { (t.label()) }
                            }
                        }
                    }
                }

                div class="row" {
                    div { (text_input(v, "price", "Preço (R$)", true)) }
                    div { (text_input(v, "condo_fee", "Condomínio (R$)", false)) }
                    div { (text_input(v, "iptu", "IPTU (R$)", false)) }
                }

                div class="row" {
                    div { (number_input(v, "bedrooms", "Quartos")) }
                    div { (number_input(v, "suites", "Suítes")) }
                    div { (number_input(v, "bathrooms", "Banheiros")) }
                    div { (number_input(v, "parking_spaces", "Vagas")) }
                }

                div class="row" {
                    div { (text_input(v, "area_m2", "Área útil (m²)", false)) }
                    div { (text_input(v, "lot_area_m2", "Área do terreno (m²)", false)) }
                }

                (text_input(v, "address", "Endereço", false))
                div class="row" {
                    div { (text_input(v, "neighborhood", "Bairro", true)) }
                    div { (text_input(v, "city", "Cidade", true)) }
                    div { (text_input(v, "state", "UF", true)) }
                }

                label for="amenities" { "Características (uma por linha)" }
                textarea id="amenities" name="amenities" rows="5" { (v.get("amenities").unwrap_or("")) }

                label class="inline" {
                    input type="checkbox" name="published" value="1" checked[v.flag("published")];
                    " Publicado"
                }
                label class="inline" {
                    input type="checkbox" name="featured" value="1" checked[v.flag("featured")];
                    " Destaque na página inicial"
                }

                button type="submit" class="primary" { "Salvar" }
            }

            @if let Some(id) = vm.listing_id {
                section class="card" {
                    h3 { "Redes sociais" }
                    @match vm.social_network {
                        Some(network) => {
                            form method="post" action=(format!("/admin/imoveis/{id}/redes")) {
                                button type="submit" { "Publicar no " (network) }
                            }
                        }
                        None => p class="muted" { "Publicação em redes sociais não configurada." },
                    }
                    @if !vm.social_posts.is_empty() {
                        ul {
                            @for post in &vm.social_posts {
                                li { (post.network) " · " (format_datetime(post.posted_at)) " · " code { (post.external_id) } }
                            }
                        }
                    }
                }

                form method="post" action=(format!("/admin/imoveis/{id}/excluir"))
                    onsubmit="return confirm('Excluir este imóvel e todas as fotos?');"
                {
                    button type="submit" class="danger" { "Excluir imóvel" }
                }
            }
        },
    )
}
