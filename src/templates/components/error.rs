use maud::{html, Markup};

pub fn error_block(status: u16, message: &str) -> Markup {
    html! {
        main class="container narrow error-page" {
            h1 { "Erro " (status) }
            p { (message) }
            p { a href="/" { "← Voltar para o início" } }
        }
    }
}

/// Validation messages above a form.
pub fn form_errors(errors: &[String]) -> Markup {
    html! {
        @if !errors.is_empty() {
            div class="form-errors" role="alert" {
                ul {
                    @for e in errors { li { (e) } }
                }
            }
        }
    }
}
