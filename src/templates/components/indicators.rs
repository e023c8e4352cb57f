use crate::integrations::Indicator;
use maud::{html, Markup};

/// Fragment loaded into the home page by htmx.
pub fn indicators_widget(indicators: Option<&[Indicator]>) -> Markup {
    html! {
        section class="indicators" {
            h3 { "Indicadores econômicos" }
            @match indicators {
                Some(list) => {
                    dl {
                        @for ind in list {
                            dt { (ind.name) }
                            dd {
                                (format!("{:.2}", ind.value).replace('.', ",")) "%"
                                small class="muted" { " em " (ind.date) }
                            }
                        }
                    }
                    p class="muted" { "Fonte: Banco Central do Brasil" }
                }
                None => p class="muted" { "Indicadores indisponíveis no momento." },
            }
        }
    }
}
