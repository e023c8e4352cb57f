use crate::domain::lead::{Lead, NewLead, PropertyOffer};
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension, Row};
use time::OffsetDateTime;

const SELECT_LEAD: &str = r#"
    SELECT
        d.id, d.kind, d.name, d.email, d.phone, d.message,
        d.listing_id, l.title,
        d.offer_purpose, d.offer_property_type, d.offer_city,
        d.offer_neighborhood, d.offer_price_cents,
        d.created_at, d.read_at
    FROM leads d
    LEFT JOIN listings l ON l.id = d.listing_id
"#;

fn map_lead(row: &Row<'_>) -> rusqlite::Result<Lead> {
    Ok(Lead {
        id: row.get(0)?,
        kind: row.get(1)?,
        name: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        message: row.get(5)?,
        listing_id: row.get(6)?,
        listing_title: row.get(7)?,
        offer: PropertyOffer {
            purpose: row.get(8)?,
            property_type: row.get(9)?,
            city: row.get(10)?,
            neighborhood: row.get(11)?,
            price_cents: row.get(12)?,
        },
        created_at: row.get(13)?,
        read_at: row.get(14)?,
    })
}

/// Stores a lead. A `listing_id` that no longer exists is stored as NULL.
pub fn insert_lead(conn: &Connection, lead: &NewLead, now: i64) -> Result<i64, ServerError> {
    conn.execute(
        r#"
        INSERT INTO leads (
            kind, name, email, phone, message, listing_id,
            offer_purpose, offer_property_type, offer_city, offer_neighborhood, offer_price_cents,
            created_at
        ) VALUES (
            ?1, ?2, ?3, ?4, ?5,
            (SELECT id FROM listings WHERE id = ?6),
            ?7, ?8, ?9, ?10, ?11,
            ?12
        )
        "#,
        params![
            lead.kind,
            lead.name,
            lead.email,
            lead.phone,
            lead.message,
            lead.listing_id,
            lead.offer.purpose,
            lead.offer.property_type,
            lead.offer.city,
            lead.offer.neighborhood,
            lead.offer.price_cents,
            now,
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert lead failed: {e}")))?;

    Ok(conn.last_insert_rowid())
}

/// Newest first.
pub fn list_leads(conn: &Connection, unread_only: bool) -> Result<Vec<Lead>, ServerError> {
    let filter = if unread_only { "WHERE d.read_at IS NULL" } else { "" };
    let mut stmt = conn
        .prepare(&format!(
            "{SELECT_LEAD} {filter} ORDER BY d.created_at DESC, d.id DESC"
        ))
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map([], map_lead)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut leads = Vec::new();
    for r in rows {
        leads.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(leads)
}

pub fn get_lead(conn: &Connection, id: i64) -> Result<Option<Lead>, ServerError> {
    conn.query_row(&format!("{SELECT_LEAD} WHERE d.id = ?"), params![id], map_lead)
        .optional()
        .map_err(|e| ServerError::DbError(format!("select lead failed: {e}")))
}

/// Keeps the first read time.
pub fn mark_read(conn: &Connection, id: i64, now: i64) -> Result<(), ServerError> {
    conn.execute(
        "UPDATE leads SET read_at = COALESCE(read_at, ?) WHERE id = ?",
        params![now, id],
    )
    .map_err(|e| ServerError::DbError(format!("mark read failed: {e}")))?;
    Ok(())
}

pub fn mark_unread(conn: &Connection, id: i64) -> Result<bool, ServerError> {
    let changed = conn
        .execute("UPDATE leads SET read_at = NULL WHERE id = ?", params![id])
        .map_err(|e| ServerError::DbError(format!("mark unread failed: {e}")))?;
    Ok(changed > 0)
}

pub fn delete_lead(conn: &Connection, id: i64) -> Result<bool, ServerError> {
    let changed = conn
        .execute("DELETE FROM leads WHERE id = ?", params![id])
        .map_err(|e| ServerError::DbError(format!("delete lead failed: {e}")))?;
    Ok(changed > 0)
}

pub fn count_unread(conn: &Connection) -> Result<i64, ServerError> {
    conn.query_row("SELECT COUNT(*) FROM leads WHERE read_at IS NULL", [], |r| r.get(0))
        .map_err(|e| ServerError::DbError(format!("count unread failed: {e}")))
}

/// Counts leads received in the current calendar month (UTC).
pub fn count_leads_this_month(conn: &Connection, now: i64) -> Result<i64, ServerError> {
    let dt = OffsetDateTime::from_unix_timestamp(now).unwrap_or_else(|_| OffsetDateTime::now_utc());

    let start_of_month = dt
        .replace_day(1)
        .unwrap_or(dt)
        .replace_time(time::Time::MIDNIGHT)
        .unix_timestamp();

    conn.query_row(
        "SELECT COUNT(*) FROM leads WHERE created_at >= ?",
        params![start_of_month],
        |r| r.get(0),
    )
    .map_err(|e| ServerError::DbError(format!("count leads failed: {e}")))
}
