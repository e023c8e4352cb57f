use serde::Serialize;

use crate::app::App;
use crate::integrations::Indicator;
use crate::responses::{html_response, json_response, ResultResp};
use crate::templates::components::indicators_widget;

#[derive(Serialize)]
struct IndicatorsBody<'a> {
    source: &'static str,
    indicators: &'a [Indicator],
}

/// `GET /api/indicadores`. Upstream failures become a 502 JSON error.
pub fn indicators_json(app: &App) -> ResultResp {
    let indicators = app.indicators.current()?;
    json_response(
        200,
        &IndicatorsBody {
            source: "Banco Central do Brasil (SGS)",
            indicators: &indicators,
        },
    )
}

/// `GET /indicadores`, the home page widget. Degrades to a notice instead
/// of failing the fragment.
pub fn indicators_fragment(app: &App) -> ResultResp {
    match app.indicators.current() {
        Ok(list) => html_response(indicators_widget(Some(&list))),
        Err(e) => {
            tracing::warn!(error = %e, "indicators unavailable");
            html_response(indicators_widget(None))
        }
    }
}
