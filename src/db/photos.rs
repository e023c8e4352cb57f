use crate::domain::listing::Photo;
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension, Row};

fn map_photo(row: &Row<'_>) -> rusqlite::Result<Photo> {
    Ok(Photo {
        id: row.get(0)?,
        listing_id: row.get(1)?,
        url: row.get(2)?,
        public_id: row.get(3)?,
        position: row.get(4)?,
        created_at: row.get(5)?,
    })
}

/// Appends a photo after the listing's current last position.
pub fn insert_photo(
    conn: &Connection,
    listing_id: i64,
    url: &str,
    public_id: &str,
    now: i64,
) -> Result<i64, ServerError> {
    conn.execute(
        r#"
        INSERT INTO listing_photos (listing_id, url, public_id, position, created_at)
        VALUES (
            ?1, ?2, ?3,
            (SELECT COALESCE(MAX(position) + 1, 0) FROM listing_photos WHERE listing_id = ?1),
            ?4
        )
        "#,
        params![listing_id, url, public_id, now],
    )
    .map_err(|e| ServerError::DbError(format!("insert photo failed: {e}")))?;

    Ok(conn.last_insert_rowid())
}

/// Ordered by position; the first photo is the cover.
pub fn list_photos(conn: &Connection, listing_id: i64) -> Result<Vec<Photo>, ServerError> {
    let mut stmt = conn
        .prepare(
            "SELECT id, listing_id, url, public_id, position, created_at
             FROM listing_photos
             WHERE listing_id = ?
             ORDER BY position, id",
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![listing_id], map_photo)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut photos = Vec::new();
    for r in rows {
        photos.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(photos)
}

pub fn get_photo(conn: &Connection, id: i64) -> Result<Option<Photo>, ServerError> {
    conn.query_row(
        "SELECT id, listing_id, url, public_id, position, created_at
         FROM listing_photos WHERE id = ?",
        params![id],
        map_photo,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select photo failed: {e}")))
}

pub fn delete_photo(conn: &Connection, id: i64) -> Result<bool, ServerError> {
    let changed = conn
        .execute("DELETE FROM listing_photos WHERE id = ?", params![id])
        .map_err(|e| ServerError::DbError(format!("delete photo failed: {e}")))?;
    Ok(changed > 0)
}

/// Moves `photo_id` to position 0 and renumbers the rest in their
/// existing order.
pub fn make_cover(conn: &mut Connection, listing_id: i64, photo_id: i64) -> Result<bool, ServerError> {
    let tx = conn
        .transaction()
        .map_err(|e| ServerError::DbError(format!("begin tx failed: {e}")))?;

    let ids: Vec<i64> = {
        let mut stmt = tx
            .prepare("SELECT id FROM listing_photos WHERE listing_id = ? ORDER BY position, id")
            .map_err(|e| ServerError::DbError(e.to_string()))?;
        let rows = stmt
            .query_map(params![listing_id], |r| r.get(0))
            .map_err(|e| ServerError::DbError(e.to_string()))?;
        let mut ids = Vec::new();
        for r in rows {
            ids.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
        }
        ids
    };

    if !ids.contains(&photo_id) {
        return Ok(false);
    }

    let ordered = std::iter::once(photo_id).chain(ids.into_iter().filter(|id| *id != photo_id));
    for (position, id) in ordered.enumerate() {
        tx.execute(
            "UPDATE listing_photos SET position = ? WHERE id = ?",
            params![position as i64, id],
        )
        .map_err(|e| ServerError::DbError(format!("reorder photos failed: {e}")))?;
    }

    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit failed: {e}")))?;
    Ok(true)
}
