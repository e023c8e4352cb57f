use crate::domain::format::{format_datetime, format_price_label, listing_reference};
use crate::domain::lead::Lead;
use crate::domain::listing::Listing;
use crate::domain::slug::listing_path;
use crate::templates::admin_layout;
use maud::{html, Markup};

pub struct DashboardVm {
    pub listings: Vec<Listing>,
    pub unread_leads: i64,
    pub leads_this_month: i64,
    pub recent_leads: Vec<Lead>,
}

fn toggle(action: String, on: bool, on_label: &str, off_label: &str) -> Markup {
    html! {
        form method="post" action=(action) class="inline" {
            button type="submit" class=(if on { "pill on" } else { "pill" }) {
                (if on { on_label } else { off_label })
            }
        }
    }
}

pub fn dashboard_page(site_name: &str, vm: &DashboardVm) -> Markup {
    let published = vm.listings.iter().filter(|l| l.published).count();

    admin_layout(
        site_name,
        "Painel",
        html! {
            h1 { "Painel" }

            div class="stats" {
                div class="stat" { strong { (vm.listings.len()) } span { "imóveis" } }
                div class="stat" { strong { (published) } span { "publicados" } }
                div class="stat" { strong { (vm.unread_leads) } span { a href="/admin/mensagens?nao_lidas=1" { "mensagens não lidas" } } }
                div class="stat" { strong { (vm.leads_this_month) } span { "contatos neste mês" } }
            }

            section class="card" {
                h3 { "Mensagens recentes" }
                @if vm.recent_leads.is_empty() {
                    p class="muted" { "Nenhuma mensagem ainda." }
                } @else {
                    ul class="lead-list" {
                        @for lead in &vm.recent_leads {
                            li class=(if lead.is_unread() { "unread" } else { "" }) {
                                a href=(format!("/admin/mensagens/{}", lead.id)) { (lead.name) }
                                " · " (lead.kind.label()) " · " (format_datetime(lead.created_at))
                            }
                        }
                    }
                }
            }

            section class="card" {
                div class="card-header" {
                    h3 { "Imóveis" }
                    a href="/admin/imoveis/novo" class="button primary" { "Novo imóvel" }
                }
                div class="table-scroll" {
                    table {
                        thead {
                            tr {
                                th { "Código" }
                                th { "Título" }
                                th { "Preço" }
                                th { "Visitas" }
                                th { "Publicado" }
                                th { "Destaque" }
                                th { "Ações" }
                            }
                        }
                        tbody {
                            @for l in &vm.listings {
                                tr {
                                    td { (listing_reference(l.id)) }
                                    td {
                                        (l.title)
                                        br;
                                        small class="muted" { (l.location_label()) }
                                    }
                                    td { (format_price_label(l)) }
                                    td { (l.views) }
                                    td { (toggle(format!("/admin/imoveis/{}/publicar", l.id), l.published, "Publicado", "Rascunho")) }
                                    td { (toggle(format!("/admin/imoveis/{}/destaque", l.id), l.featured, "Destaque", "Normal")) }
                                    td class="actions" {
                                        a href=(format!("/admin/imoveis/{}/editar", l.id)) { "Editar" }
                                        a href=(format!("/admin/imoveis/{}/fotos", l.id)) { "Fotos" }
                                        @if l.published {
                                            a href=(listing_path(l)) target="_blank" { "Ver" }
                                        }
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
