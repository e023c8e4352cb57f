use maud::{html, Markup, DOCTYPE};

pub fn login_page(site_name: &str, failed: bool) -> Markup {
    html! {
        (DOCTYPE)
        html lang="pt-BR" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="robots" content="noindex";
                title { "Entrar | " (site_name) }
                link rel="stylesheet" href="/static/main.css";
            }
            body {
                main class="container narrow" {
                    h1 { (site_name) " · Admin" }
                    @if failed {
                        div class="form-errors" role="alert" { "Senha incorreta." }
                    }
                    form method="post" action="/admin/login" class="card" {
                        label for="password" { "Senha" }
                        input type="password" id="password" name="password" autocomplete="current-password" required autofocus;
                        button type="submit" class="primary" { "Entrar" }
                    }
                }
            }
        }
    }
}
