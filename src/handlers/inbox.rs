use astra::Request;

use crate::app::App;
use crate::db::leads;
use crate::errors::ServerError;
use crate::handlers::now_unix;
use crate::requests;
use crate::responses::{html_response, redirect, ResultResp};
use crate::spreadsheets::export_leads_xlsx;
use crate::templates::pages;

pub fn inbox(req: &Request, app: &App) -> ResultResp {
    let unread_only = requests::query(req).flag("nao_lidas");
    let list = app.db.with_conn(|conn| leads::list_leads(conn, unread_only))?;
    html_response(pages::inbox_page(&app.config.site_name, &list, unread_only))
}

/// Opening a message marks it read.
pub fn message(app: &App, id: i64) -> ResultResp {
    let lead = app.db.with_conn(|conn| {
        let Some(lead) = leads::get_lead(conn, id)? else {
            return Ok(None);
        };
        if lead.is_unread() {
            leads::mark_read(conn, id, now_unix())?;
        }
        Ok(Some(lead))
    })?;
    let lead = lead.ok_or(ServerError::NotFound)?;
    html_response(pages::message_page(&app.config.site_name, &lead))
}

pub fn mark_unread(app: &App, id: i64) -> ResultResp {
    if !app.db.with_conn(|conn| leads::mark_unread(conn, id))? {
        return Err(ServerError::NotFound);
    }
    redirect("/admin/mensagens")
}

pub fn delete(app: &App, id: i64) -> ResultResp {
    if !app.db.with_conn(|conn| leads::delete_lead(conn, id))? {
        return Err(ServerError::NotFound);
    }
    tracing::info!(lead_id = id, "lead deleted");
    redirect("/admin/mensagens")
}

pub fn export(app: &App) -> ResultResp {
    let all = app.db.with_conn(|conn| leads::list_leads(conn, false))?;
    tracing::info!(count = all.len(), "exporting leads");
    export_leads_xlsx(&all, now_unix())
}
