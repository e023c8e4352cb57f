use crate::templates::components::whatsapp_link;
use crate::templates::SiteInfo;
use maud::{html, Markup, DOCTYPE};

pub const HTMX_SRC: &str = "https://unpkg.com/htmx.org@2.0.4";

/// Lets htmx swap 422 responses so forms can show their errors in place.
pub const HTMX_CONFIG: &str = r#"{"responseHandling":[{"code":"204","swap":false},{"code":"[23]..","swap":true},{"code":"422","swap":true},{"code":"[45]..","swap":false,"error":true}]}"#;

pub fn site_layout(site: SiteInfo<'_>, title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="pt-BR" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " | " (site.name) }
                meta name="htmx-config" content=(HTMX_CONFIG);
                link rel="stylesheet" href="/static/main.css";
                script src=(HTMX_SRC) defer {};
            }
            body {
                header class="site-header" {
                    a href="/" class="brand" { (site.name) }
                    nav {
                        ul {
                            li { a href="/imoveis?finalidade=venda" { "Comprar" } }
                            li { a href="/imoveis?finalidade=aluguel" { "Alugar" } }
                            li { a href="/anuncie" { "Anuncie seu imóvel" } }
                            li { a href="/contato" { "Contato" } }
                        }
                    }
                }
                (content)
                footer class="site-footer" {
                    p { "© " (site.name) }
                    @if let Some(number) = site.whatsapp {
                        p { (whatsapp_link(number, "Olá! Vim pelo site.", "Fale pelo WhatsApp")) }
                    }
                }
            }
        }
    }
}
