use crate::domain::format::{format_brl, format_datetime};
use crate::domain::lead::{Lead, LeadKind};
use crate::domain::slug::slugify;
use crate::templates::admin_layout;
use maud::{html, Markup};

pub fn inbox_page(site_name: &str, leads: &[Lead], unread_only: bool) -> Markup {
    admin_layout(
        site_name,
        "Mensagens",
        html! {
            div class="card-header" {
                h1 { "Mensagens" }
                a href="/admin/mensagens/exportar" class="button" { "Exportar XLSX" }
            }
            nav class="tabs" {
                a href="/admin/mensagens" class=(if unread_only { "" } else { "active" }) { "Todas" }
                a href="/admin/mensagens?nao_lidas=1" class=(if unread_only { "active" } else { "" }) { "Não lidas" }
            }

            @if leads.is_empty() {
                p class="muted" { "Nenhuma mensagem." }
            } @else {
                table class="inbox" {
                    thead {
                        tr {
                            th { "Recebida" }
                            th { "Tipo" }
                            th { "Nome" }
                            th { "Contato" }
                            th { "Assunto" }
                        }
                    }
                    tbody {
                        @for lead in leads {
                            tr class=(if lead.is_unread() { "unread" } else { "" }) {
                                td { (format_datetime(lead.created_at)) }
                                td { (lead.kind.label()) }
                                td { a href=(format!("/admin/mensagens/{}", lead.id)) { (lead.name) } }
                                td { (lead.contact_line()) }
                                td {
                                    @match (&lead.listing_title, lead.kind) {
                                        (Some(title), _) => (title),
                                        (None, LeadKind::ListProperty) => "Quer anunciar",
                                        (None, LeadKind::Contact) => "Contato geral",
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

pub fn message_page(site_name: &str, lead: &Lead) -> Markup {
    let offer = &lead.offer;
    admin_layout(
        site_name,
        &format!("Mensagem de {}", lead.name),
        html! {
            p { a href="/admin/mensagens" { "← Mensagens" } }
            h1 { (lead.kind.label()) " de " (lead.name) }
            p class="muted" { "Recebida em " (format_datetime(lead.created_at)) }

            dl class="card" {
                @if let Some(email) = &lead.email {
                    dt { "E-mail" }
                    dd { a href=(format!("mailto:{email}")) { (email) } }
                }
                @if let Some(phone) = &lead.phone {
                    dt { "Telefone" }
                    dd {
                        (phone) " · "
                        a href=(format!("https://wa.me/{}", phone.trim_start_matches('+'))) target="_blank" { "WhatsApp" }
                    }
                }
                @if let (Some(id), Some(title)) = (lead.listing_id, &lead.listing_title) {
                    dt { "Imóvel" }
                    dd { a href=(format!("/imovel/{}-{id}", slugify(title))) target="_blank" { (title) } }
                }
                @if lead.kind == LeadKind::ListProperty {
                    @if let Some(p) = offer.purpose { dt { "Finalidade" } dd { (p.label()) } }
                    @if let Some(t) = offer.property_type { dt { "Tipo" } dd { (t.label()) } }
                    @if let Some(c) = &offer.city { dt { "Cidade" } dd { (c) } }
                    @if let Some(n) = &offer.neighborhood { dt { "Bairro" } dd { (n) } }
                    @if let Some(price) = offer.price_cents { dt { "Valor pretendido" } dd { (format_brl(price)) } }
                }
            }

            @if !lead.message.is_empty() {
                section class="card message" {
                    @for line in lead.message.lines() { p { (line) } }
                }
            }

            div class="actions" {
                form method="post" action=(format!("/admin/mensagens/{}/nao-lida", lead.id)) class="inline" {
                    button type="submit" { "Marcar como não lida" }
                }
                form method="post" action=(format!("/admin/mensagens/{}/excluir", lead.id)) class="inline"
                    onsubmit="return confirm('Excluir esta mensagem?');"
                {
                    button type="submit" class="danger" { "Excluir" }
                }
            }
        },
    )
}
