// src/auth/sessions.rs
use crate::auth::credential::digest;
use crate::errors::ServerError;
use base64::Engine;
use rand::{rngs::OsRng, RngCore};
use rusqlite::{params, Connection, OptionalExtension};

pub const TOKEN_BYTES: usize = 32;

/// Random URL-safe token (32 bytes -> 43 chars, no padding).
pub fn generate_token<R: RngCore>(rng: &mut R) -> String {
    let mut raw = [0u8; TOKEN_BYTES];
    rng.fill_bytes(&mut raw);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(raw)
}

/// Creates an admin session and returns the raw token for the cookie.
/// Only the token's hash is stored.
pub fn create_session(conn: &Connection, now: i64, ttl_secs: i64) -> Result<String, ServerError> {
    let raw_token = generate_token(&mut OsRng);
    let hash = digest(&raw_token);

    conn.execute(
        r#"
        insert into admin_sessions (token_hash, created_at, expires_at)
        values (?, ?, ?)
        "#,
        params![hash.as_slice(), now, now + ttl_secs],
    )
    .map_err(|e| ServerError::DbError(format!("create session failed: {e}")))?;

    Ok(raw_token)
}

/// Session id when the token is known, unexpired and not revoked.
pub fn find_active_session(
    conn: &Connection,
    raw_token: &str,
    now: i64,
) -> Result<Option<i64>, ServerError> {
    let hash = digest(raw_token);

    conn.query_row(
        r#"
        select id
        from admin_sessions
        where token_hash = ?
          and expires_at > ?
          and revoked_at is null
        "#,
        params![hash.as_slice(), now],
        |row| row.get(0),
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("session lookup failed: {e}")))
}

pub fn revoke_session(conn: &Connection, raw_token: &str, now: i64) -> Result<(), ServerError> {
    let hash = digest(raw_token);
    conn.execute(
        "update admin_sessions set revoked_at = ? where token_hash = ? and revoked_at is null",
        params![now, hash.as_slice()],
    )
    .map_err(|e| ServerError::DbError(format!("revoke session failed: {e}")))?;
    Ok(())
}

/// Drops expired and revoked sessions; returns how many were removed.
pub fn purge_sessions(conn: &Connection, now: i64) -> Result<usize, ServerError> {
    conn.execute(
        "delete from admin_sessions where expires_at <= ? or revoked_at is not null",
        params![now],
    )
    .map_err(|e| ServerError::DbError(format!("purge sessions failed: {e}")))
}
