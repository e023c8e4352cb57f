use astra::Request;

use crate::app::App;
use crate::db::{leads, listings};
use crate::domain::lead::{Lead, LeadKind, NewLead, Submission};
use crate::domain::listing::Listing;
use crate::errors::ServerError;
use crate::handlers::now_unix;
use crate::requests::{self, FormData};
use crate::responses::{html_response, html_response_status, ResultResp};
use crate::templates::components::{contact_form, offer_form, thanks_message};
use crate::templates::pages;
use crate::templates::SiteInfo;

const UNPROCESSABLE: u16 = 422;

pub fn contact_page(app: &App) -> ResultResp {
    html_response(pages::contact_page(
        SiteInfo::from_config(&app.config),
        &FormData::default(),
        &[],
        None,
    ))
}

pub fn offer_page(app: &App) -> ResultResp {
    html_response(pages::offer_page(
        SiteInfo::from_config(&app.config),
        &FormData::default(),
        &[],
    ))
}

/// Stores the lead and hands it to the notifier on its own thread.
fn store(app: &App, lead: &NewLead) -> Result<i64, ServerError> {
    let now = now_unix();
    let (id, stored) = app.db.with_conn(|conn| {
        let id = leads::insert_lead(conn, lead, now)?;
        Ok((id, leads::get_lead(conn, id)?))
    })?;
    tracing::info!(lead_id = id, kind = lead.kind.as_str(), "lead stored");

    if let Some(stored) = stored {
        notify_in_background(app, stored);
    }
    Ok(id)
}

fn notify_in_background(app: &App, lead: Lead) {
    let Some(notifier) = app.notifier.clone() else {
        return;
    };
    std::thread::spawn(move || {
        if let Err(e) = notifier.notify(&lead) {
            tracing::warn!(lead_id = lead.id, error = %e, "lead notification failed");
        }
    });
}

fn thanks(req: &Request, app: &App, kind: LeadKind) -> ResultResp {
    if requests::is_htmx(req) {
        html_response(thanks_message(kind))
    } else {
        html_response(pages::thanks_page(SiteInfo::from_config(&app.config), kind))
    }
}

fn inquiry_listing(app: &App, form: &FormData) -> Result<Option<Listing>, ServerError> {
    let Some(id) = form.text("listing_id").and_then(|v| v.parse::<i64>().ok()) else {
        return Ok(None);
    };
    let listing = app.db.with_conn(|conn| listings::get_listing(conn, id))?;
    Ok(listing.filter(|l| l.published))
}

pub fn submit_contact(req: &mut Request, app: &App) -> ResultResp {
    let form = requests::read_form(req)?;

    match NewLead::from_contact_form(&form) {
        Submission::Valid(lead) => {
            store(app, &lead)?;
            thanks(req, app, LeadKind::Contact)
        }
        Submission::Spam => {
            tracing::info!("contact honeypot triggered; submission dropped");
            thanks(req, app, LeadKind::Contact)
        }
        Submission::Invalid(errors) => {
            let listing = inquiry_listing(app, &form)?;
            let markup = if requests::is_htmx(req) {
                contact_form(&form, &errors, listing.as_ref())
            } else {
                pages::contact_page(
                    SiteInfo::from_config(&app.config),
                    &form,
                    &errors,
                    listing.as_ref(),
                )
            };
            html_response_status(UNPROCESSABLE, markup)
        }
    }
}

pub fn submit_offer(req: &mut Request, app: &App) -> ResultResp {
    let form = requests::read_form(req)?;

    match NewLead::from_offer_form(&form) {
        Submission::Valid(lead) => {
            store(app, &lead)?;
            thanks(req, app, LeadKind::ListProperty)
        }
        Submission::Spam => {
            tracing::info!("offer honeypot triggered; submission dropped");
            thanks(req, app, LeadKind::ListProperty)
        }
        Submission::Invalid(errors) => {
            let markup = if requests::is_htmx(req) {
                offer_form(&form, &errors)
            } else {
                pages::offer_page(SiteInfo::from_config(&app.config), &form, &errors)
            };
            html_response_status(UNPROCESSABLE, markup)
        }
    }
}
