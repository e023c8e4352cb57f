use crate::domain::lead::{LeadKind, HONEYPOT_FIELD};
use crate::domain::listing::{Listing, PropertyType, Purpose};
use crate::requests::FormData;
use crate::templates::components::form_errors;
use maud::{html, Markup};

/// Off-screen field bots fill in and people never see.
fn honeypot() -> Markup {
    html! {
        div class="hp" aria-hidden="true" {
            label for=(HONEYPOT_FIELD) { "Não preencha" }
            input type="text" name=(HONEYPOT_FIELD) id=(HONEYPOT_FIELD) tabindex="-1" autocomplete="off";
        }
    }
}

fn contact_fields(values: &FormData) -> Markup {
    html! {
        label for="name" { "Nome" }
        input type="text" id="name" name="name" required maxlength="120" value=[values.get("name")];

        label for="email" { "E-mail" }
        input type="email" id="email" name="email" autocomplete="email" value=[values.get("email")];

        label for="phone" { "Telefone / WhatsApp" }
        input type="tel" id="phone" name="phone" placeholder="(19) 99999-9999" value=[values.get("phone")];
    }
}

/// Contact form. On a detail page `listing` prefills the message and
/// links the lead to the listing.
pub fn contact_form(values: &FormData, errors: &[String], listing: Option<&Listing>) -> Markup {
    let default_message = listing
        .map(|l| format!("Olá! Tenho interesse no imóvel \"{}\". Aguardo contato.", l.title))
        .unwrap_or_default();
    let message = values.get("message").map(str::to_string).unwrap_or(default_message);

    html! {
        div id="lead-form" class="lead-form" {
            (form_errors(errors))
            form method="post" action="/contato"
                hx-post="/contato" hx-target="#lead-form" hx-swap="outerHTML" hx-disabled-elt="button"
            {
                @if let Some(l) = listing {
                    input type="hidden" name="listing_id" value=(l.id);
                }
                (contact_fields(values))
                label for="message" { "Mensagem" }
                textarea id="message" name="message" rows="5" required maxlength="4000" { (message) }
                (honeypot())
                button type="submit" class="primary" { "Enviar mensagem" }
            }
        }
    }
}

/// "Anuncie seu imóvel" form.
pub fn offer_form(values: &FormData, errors: &[String]) -> Markup {
    let purpose = values.get("purpose").and_then(Purpose::parse);
    let property_type = values.get("property_type").and_then(PropertyType::parse);

    html! {
        div id="lead-form" class="lead-form" {
            (form_errors(errors))
            form method="post" action="/anuncie"
                hx-post="/anuncie" hx-target="#lead-form" hx-swap="outerHTML" hx-disabled-elt="button"
            {
                (contact_fields(values))

                fieldset {
                    legend { "Finalidade" }
                    @for p in Purpose::ALL {
                        label class="inline" {
                            input type="radio" name="purpose" value=(p.slug()) checked[purpose == Some(p)];
                            " " (p.label())
                        }
                    }
                }

                label for="property_type" { "Tipo de imóvel" }
                select id="property_type" name="property_type" {
                    option value="" { "Selecione" }
                    @for t in PropertyType::ALL {
                        option value=(t.slug()) selected[property_type == Some(t)] { (t.label()) }
                    }
                }

                label for="city" { "Cidade" }
                input type="text" id="city" name="city" value=[values.get("city")];

                label for="neighborhood" { "Bairro" }
                input type="text" id="neighborhood" name="neighborhood" value=[values.get("neighborhood")];

                label for="price" { "Valor pretendido (R$)" }
                input type="text" id="price" name="price" inputmode="decimal" placeholder="450.000,00" value=[values.get("price")];

                label for="message" { "Detalhes" }
                textarea id="message" name="message" rows="4" maxlength="4000" { (values.get("message").unwrap_or("")) }

                (honeypot())
                button type="submit" class="primary" { "Quero anunciar" }
            }
        }
    }
}

/// Replaces the form after a successful submission.
pub fn thanks_message(kind: LeadKind) -> Markup {
    html! {
        div id="lead-form" class="lead-form thanks" {
            h3 { "Obrigado!" }
            @match kind {
                LeadKind::Contact => p { "Recebemos sua mensagem e entraremos em contato em breve." },
                LeadKind::ListProperty => p { "Recebemos os dados do seu imóvel. Um corretor vai falar com você em breve." },
            }
        }
    }
}
