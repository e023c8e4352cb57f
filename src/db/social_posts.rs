use crate::errors::ServerError;
use rusqlite::{params, Connection};

#[derive(Debug, Clone)]
pub struct SocialPost {
    pub id: i64,
    pub listing_id: i64,
    pub network: String,
    pub external_id: String,
    pub posted_at: i64,
}

pub fn record_social_post(
    conn: &Connection,
    listing_id: i64,
    network: &str,
    external_id: &str,
    now: i64,
) -> Result<i64, ServerError> {
    conn.execute(
        "INSERT INTO social_posts (listing_id, network, external_id, posted_at) VALUES (?, ?, ?, ?)",
        params![listing_id, network, external_id, now],
    )
    .map_err(|e| ServerError::DbError(format!("record social post failed: {e}")))?;
    Ok(conn.last_insert_rowid())
}

/// Newest first.
pub fn list_social_posts(conn: &Connection, listing_id: i64) -> Result<Vec<SocialPost>, ServerError> {
    let mut stmt = conn
        .prepare(
            "SELECT id, listing_id, network, external_id, posted_at
             FROM social_posts WHERE listing_id = ?
             ORDER BY posted_at DESC, id DESC",
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![listing_id], |row| {
            Ok(SocialPost {
                id: row.get(0)?,
                listing_id: row.get(1)?,
                network: row.get(2)?,
                external_id: row.get(3)?,
                posted_at: row.get(4)?,
            })
        })
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut posts = Vec::new();
    for r in rows {
        posts.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(posts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::test_conn;
    use crate::db::listings::{insert_listing, tests::sample_input};

    #[test]
    fn posts_listed_newest_first() {
        let conn = test_conn();
        let id = insert_listing(&conn, &sample_input("A"), 1).unwrap();
        record_social_post(&conn, id, "facebook", "111_1", 10).unwrap();
        record_social_post(&conn, id, "facebook", "111_2", 20).unwrap();

        let posts = list_social_posts(&conn, id).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].external_id, "111_2");
        assert_eq!(posts[0].listing_id, id);
    }
}
