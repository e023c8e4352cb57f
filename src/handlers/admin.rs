use astra::Request;

use crate::app::App;
use crate::auth;
use crate::db::{leads, listings, photos, social_posts, ListingScope};
use crate::domain::listing::{Listing, ListingInput};
use crate::domain::slug::listing_path;
use crate::errors::ServerError;
use crate::handlers::now_unix;
use crate::integrations::social::listing_message;
use crate::requests::cookies::{clear_session_cookie, session_cookie};
use crate::requests::{self, FormData};
use crate::responses::{html_response, html_response_status, redirect, redirect_with_cookie, ResultResp};
use crate::templates::pages::{self, listing_form_values, DashboardVm, ListingFormVm};

const RECENT_LEADS: usize = 5;

pub fn login_page(req: &Request, app: &App) -> ResultResp {
    if auth::admin_session(req, app, now_unix())?.is_some() {
        return redirect("/admin");
    }
    html_response(pages::login_page(&app.config.site_name, false))
}

pub fn login(req: &mut Request, app: &App) -> ResultResp {
    let form = requests::read_form(req)?;
    let password = form.get("password").unwrap_or("");

    match auth::login(app, password, now_unix())? {
        Some(token) => redirect_with_cookie(
            "/admin",
            &session_cookie(&token, app.config.session_ttl_secs),
        ),
        None => html_response_status(401, pages::login_page(&app.config.site_name, true)),
    }
}

pub fn logout(req: &Request, app: &App) -> ResultResp {
    auth::logout(req, app, now_unix())?;
    tracing::info!("admin logged out");
    redirect_with_cookie("/admin/login", &clear_session_cookie())
}

pub fn dashboard(app: &App) -> ResultResp {
    let now = now_unix();
    let vm = app.db.with_conn(|conn| {
        let mut recent_leads = leads::list_leads(conn, false)?;
        recent_leads.truncate(RECENT_LEADS);
        Ok(DashboardVm {
            listings: listings::list_listings(conn, ListingScope::All)?,
            unread_leads: leads::count_unread(conn)?,
            leads_this_month: leads::count_leads_this_month(conn, now)?,
            recent_leads,
        })
    })?;
    html_response(pages::dashboard_page(&app.config.site_name, &vm))
}

fn find_listing(app: &App, id: i64) -> Result<Listing, ServerError> {
    app.db
        .with_conn(|conn| listings::get_listing(conn, id))?
        .ok_or(ServerError::NotFound)
}

fn render_form(app: &App, status: u16, vm: ListingFormVm) -> ResultResp {
    html_response_status(status, pages::listing_form_page(&app.config.site_name, &vm))
}

fn social_network(app: &App) -> Option<&'static str> {
    app.social.enabled().then(|| app.social.network())
}

pub fn new_listing(app: &App) -> ResultResp {
    let vm = ListingFormVm {
        listing_id: None,
        values: FormData::from_pairs([("bedrooms", "0"), ("published", "1")]),
        errors: Vec::new(),
        social_posts: Vec::new(),
        social_network: None,
    };
    render_form(app, 200, vm)
}

pub fn create_listing(req: &mut Request, app: &App) -> ResultResp {
    let form = requests::read_form(req)?;
    let input = match ListingInput::from_form(&form) {
        Ok(input) => input,
        Err(errors) => {
            let vm = ListingFormVm {
                listing_id: None,
                values: form,
                errors,
                social_posts: Vec::new(),
                social_network: None,
            };
            return render_form(app, 422, vm);
        }
    };

    let id = app
        .db
        .with_conn(|conn| listings::insert_listing(conn, &input, now_unix()))?;
    tracing::info!(listing_id = id, title = %input.title, "listing created");
    redirect(&format!("/admin/imoveis/{id}/fotos"))
}

pub fn edit_listing(app: &App, id: i64) -> ResultResp {
    let listing = find_listing(app, id)?;
    let posts = app
        .db
        .with_conn(|conn| social_posts::list_social_posts(conn, id))?;
    let vm = ListingFormVm {
        listing_id: Some(id),
        values: listing_form_values(&listing),
        errors: Vec::new(),
        social_posts: posts,
        social_network: social_network(app),
    };
    render_form(app, 200, vm)
}

pub fn update_listing(req: &mut Request, app: &App, id: i64) -> ResultResp {
    let form = requests::read_form(req)?;
    let input = match ListingInput::from_form(&form) {
        Ok(input) => input,
        Err(errors) => {
            let posts = app
                .db
                .with_conn(|conn| social_posts::list_social_posts(conn, id))?;
            let vm = ListingFormVm {
                listing_id: Some(id),
                values: form,
                errors,
                social_posts: posts,
                social_network: social_network(app),
            };
            return render_form(app, 422, vm);
        }
    };

    let updated = app
        .db
        .with_conn(|conn| listings::update_listing(conn, id, &input, now_unix()))?;
    if !updated {
        return Err(ServerError::NotFound);
    }
    tracing::info!(listing_id = id, "listing updated");
    redirect("/admin")
}

/// Removes hosted photos first; a host failure is logged and the rows are
/// deleted anyway.
pub fn delete_listing(app: &App, id: i64) -> ResultResp {
    let photos = app.db.with_conn(|conn| photos::list_photos(conn, id))?;
    for photo in &photos {
        if let Err(e) = app.images.destroy(&photo.public_id) {
            tracing::warn!(listing_id = id, public_id = %photo.public_id, error = %e, "failed to delete hosted photo");
        }
    }

    let deleted = app.db.with_conn(|conn| listings::delete_listing(conn, id))?;
    if !deleted {
        return Err(ServerError::NotFound);
    }
    tracing::info!(listing_id = id, photos = photos.len(), "listing deleted");
    redirect("/admin")
}

pub fn toggle_published(app: &App, id: i64) -> ResultResp {
    let listing = find_listing(app, id)?;
    app.db
        .with_conn(|conn| listings::set_published(conn, id, !listing.published, now_unix()))?;
    tracing::info!(listing_id = id, published = !listing.published, "publish toggled");
    redirect("/admin")
}

pub fn toggle_featured(app: &App, id: i64) -> ResultResp {
    let listing = find_listing(app, id)?;
    app.db
        .with_conn(|conn| listings::set_featured(conn, id, !listing.featured, now_unix()))?;
    redirect("/admin")
}

pub fn post_to_social(app: &App, id: i64) -> ResultResp {
    let listing = find_listing(app, id)?;
    if !listing.published {
        return Err(ServerError::BadRequest(
            "Publique o imóvel antes de divulgá-lo nas redes sociais".into(),
        ));
    }

    let link = app.absolute_url(&listing_path(&listing));
    let external_id = app.social.post(&listing_message(&listing), &link)?;

    let network = app.social.network();
    app.db.with_conn(|conn| {
        social_posts::record_social_post(conn, id, network, &external_id, now_unix())
    })?;
    tracing::info!(listing_id = id, network, external_id = %external_id, "listing shared");
    redirect(&format!("/admin/imoveis/{id}/editar"))
}
