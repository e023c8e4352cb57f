pub mod credential;
pub mod sessions;

use crate::app::App;
use crate::errors::ServerError;
use crate::requests::cookies::{get_cookie, SESSION_COOKIE};
use astra::Request;

/// Session id of the logged-in admin, if the request carries a valid cookie.
pub fn admin_session(req: &Request, app: &App, now: i64) -> Result<Option<i64>, ServerError> {
    let Some(token) = get_cookie(req, SESSION_COOKIE) else {
        return Ok(None);
    };
    app.db
        .with_conn(|conn| sessions::find_active_session(conn, &token, now))
}

/// Logs in with the shared credential. Returns the raw session token.
pub fn login(app: &App, password: &str, now: i64) -> Result<Option<String>, ServerError> {
    if !credential::verify_admin_password(password, &app.config.admin_password) {
        tracing::warn!("admin login rejected");
        return Ok(None);
    }

    let token = app.db.with_conn(|conn| {
        let purged = sessions::purge_sessions(conn, now)?;
        if purged > 0 {
            tracing::debug!(purged, "purged stale admin sessions");
        }
        sessions::create_session(conn, now, app.config.session_ttl_secs)
    })?;

    tracing::info!("admin logged in");
    Ok(Some(token))
}

pub fn logout(req: &Request, app: &App, now: i64) -> Result<(), ServerError> {
    if let Some(token) = get_cookie(req, SESSION_COOKIE) {
        app.db
            .with_conn(|conn| sessions::revoke_session(conn, &token, now))?;
    }
    Ok(())
}
