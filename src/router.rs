use astra::{Request, Response};
use std::time::Instant;

use crate::app::App;
use crate::auth;
use crate::errors::ServerError;
use crate::handlers::{admin, api, inbox, leads, now_unix, parse_id, photos, public};
use crate::responses::{error_to_response, redirect, serve_static, text_response, ResultResp};

/// Handles one request end to end: routing, error pages and the access log.
pub fn respond(req: Request, app: &App) -> Response {
    let started = Instant::now();
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    let resp = match handle(req, app) {
        Ok(resp) => resp,
        Err(err) => {
            match &err {
                ServerError::NotFound | ServerError::BadRequest(_) => {
                    tracing::warn!(%method, %path, error = %err, "request rejected")
                }
                _ => tracing::error!(%method, %path, error = %err, "request failed"),
            }
            error_to_response(&err, path.starts_with("/api/"), &app.config.site_name)
        }
    };

    tracing::debug!(
        %method,
        %path,
        status = resp.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    resp
}

fn is_public_admin_path(segments: &[&str]) -> bool {
    matches!(segments, ["admin", "login"])
}

pub fn handle(mut req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if segments.first() == Some(&"admin")
        && !is_public_admin_path(&segments)
        && auth::admin_session(&req, app, now_unix())?.is_none()
    {
        return redirect("/admin/login");
    }

    match (method.as_str(), segments.as_slice()) {
        // Public site
        ("GET", []) => public::home(app),
        ("GET", ["imoveis"]) => public::search(&req, app),
        ("GET", ["imovel", slug]) => public::detail(app, slug),
        ("GET", ["comparar"]) => public::compare(&req, app),
        ("GET", ["contato"]) => leads::contact_page(app),
        ("POST", ["contato"]) => leads::submit_contact(&mut req, app),
        ("GET", ["anuncie"]) => leads::offer_page(app),
        ("POST", ["anuncie"]) => leads::submit_offer(&mut req, app),
        ("GET", ["indicadores"]) => api::indicators_fragment(app),
        ("GET", ["api", "indicadores"]) => api::indicators_json(app),
        ("GET", ["health"]) => text_response(200, "ok"),
        ("GET", ["static", rest @ ..]) => serve_static(&rest.join("/")),

        // Admin auth
        ("GET", ["admin", "login"]) => admin::login_page(&req, app),
        ("POST", ["admin", "login"]) => admin::login(&mut req, app),
        ("POST", ["admin", "logout"]) => admin::logout(&req, app),

        // Listings
        ("GET", ["admin"]) => admin::dashboard(app),
        ("GET", ["admin", "imoveis", "novo"]) => admin::new_listing(app),
        ("POST", ["admin", "imoveis"]) => admin::create_listing(&mut req, app),
        ("GET", ["admin", "imoveis", id, "editar"]) => admin::edit_listing(app, parse_id(id)?),
        ("POST", ["admin", "imoveis", id]) => admin::update_listing(&mut req, app, parse_id(id)?),
        ("POST", ["admin", "imoveis", id, "excluir"]) => admin::delete_listing(app, parse_id(id)?),
        ("POST", ["admin", "imoveis", id, "publicar"]) => admin::toggle_published(app, parse_id(id)?),
        ("POST", ["admin", "imoveis", id, "destaque"]) => admin::toggle_featured(app, parse_id(id)?),
        ("POST", ["admin", "imoveis", id, "redes"]) => admin::post_to_social(app, parse_id(id)?),

        // Photos
        ("GET", ["admin", "imoveis", id, "fotos"]) => photos::photos_page(app, parse_id(id)?),
        ("POST", ["admin", "imoveis", id, "fotos"]) => photos::upload_photo(&mut req, app, parse_id(id)?),
        ("POST", ["admin", "fotos", id, "excluir"]) => photos::delete_photo(app, parse_id(id)?),
        ("POST", ["admin", "fotos", id, "capa"]) => photos::make_cover(app, parse_id(id)?),

        // Inbox
        ("GET", ["admin", "mensagens"]) => inbox::inbox(&req, app),
        ("GET", ["admin", "mensagens", "exportar"]) => inbox::export(app),
        ("GET", ["admin", "mensagens", id]) => inbox::message(app, parse_id(id)?),
        ("POST", ["admin", "mensagens", id, "nao-lida"]) => inbox::mark_unread(app, parse_id(id)?),
        ("POST", ["admin", "mensagens", id, "excluir"]) => inbox::delete(app, parse_id(id)?),

        _ => Err(ServerError::NotFound),
    }
}
