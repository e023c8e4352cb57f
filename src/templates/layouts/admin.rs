use crate::templates::layouts::site::HTMX_SRC;
use maud::{html, Markup, DOCTYPE};

pub fn admin_layout(site_name: &str, title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="pt-BR" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="robots" content="noindex";
                title { (title) " | Admin " (site_name) }
                link rel="stylesheet" href="/static/main.css";
                script src=(HTMX_SRC) defer {};
            }
            body class="admin" {
                header class="site-header" {
                    a href="/admin" class="brand" { (site_name) " · Admin" }
                    nav {
                        ul {
                            li { a href="/admin" { "Painel" } }
                            li { a href="/admin/imoveis/novo" { "Novo imóvel" } }
                            li { a href="/admin/mensagens" { "Mensagens" } }
                            li { a href="/" target="_blank" { "Ver site" } }
                            li {
                                form method="post" action="/admin/logout" class="inline" {
                                    button type="submit" class="link" { "Sair" }
                                }
                            }
                        }
                    }
                }
                main class="container" { (content) }
            }
        }
    }
}
