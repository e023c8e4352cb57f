use crate::domain::listing::{Listing, ListingInput};
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension, Row};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingScope {
    Published,
    All,
}

const SELECT_LISTING: &str = r#"
    SELECT
        l.id,                -- 0
        l.title,             -- 1
        l.description,       -- 2
        l.purpose,           -- 3
        l.property_type,     -- 4
        l.price_cents,       -- 5
        l.condo_fee_cents,   -- 6
        l.iptu_cents,        -- 7
        l.bedrooms,          -- 8
        l.suites,            -- 9
        l.bathrooms,         -- 10
        l.parking_spaces,    -- 11
        l.area_m2,           -- 12
        l.lot_area_m2,       -- 13
        l.address,           -- 14
        l.neighborhood,      -- 15
        l.city,              -- 16
        l.state,             -- 17
        l.amenities,         -- 18
        l.featured,          -- 19
        l.published,         -- 20
        l.views,             -- 21
        l.created_at,        -- 22
        l.updated_at,        -- 23
        (SELECT p.url FROM listing_photos p
          WHERE p.listing_id = l.id
          ORDER BY p.position, p.id
          LIMIT 1)           -- 24
    FROM listings l
"#;

fn map_listing(row: &Row<'_>) -> rusqlite::Result<Listing> {
    let amenities: String = row.get(18)?;
    Ok(Listing {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        purpose: row.get(3)?,
        property_type: row.get(4)?,
        price_cents: row.get(5)?,
        condo_fee_cents: row.get(6)?,
        iptu_cents: row.get(7)?,
        bedrooms: row.get(8)?,
        suites: row.get(9)?,
        bathrooms: row.get(10)?,
        parking_spaces: row.get(11)?,
        area_m2: row.get(12)?,
        lot_area_m2: row.get(13)?,
        address: row.get(14)?,
        neighborhood: row.get(15)?,
        city: row.get(16)?,
        state: row.get(17)?,
        amenities: amenities
            .lines()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .collect(),
        featured: row.get(19)?,
        published: row.get(20)?,
        views: row.get(21)?,
        created_at: row.get(22)?,
        updated_at: row.get(23)?,
        cover_url: row.get(24)?,
    })
}

pub fn insert_listing(conn: &Connection, input: &ListingInput, now: i64) -> Result<i64, ServerError> {
    conn.execute(
        r#"
        INSERT INTO listings (
            title, description, purpose, property_type,
            price_cents, condo_fee_cents, iptu_cents,
            bedrooms, suites, bathrooms, parking_spaces,
            area_m2, lot_area_m2,
            address, neighborhood, city, state,
            amenities, featured, published,
            created_at, updated_at
        ) VALUES (
            ?1, ?2, ?3, ?4,
            ?5, ?6, ?7,
            ?8, ?9, ?10, ?11,
            ?12, ?13,
            ?14, ?15, ?16, ?17,
            ?18, ?19, ?20,
            ?21, ?21
        )
        "#,
        params![
            input.title,
            input.description,
            input.purpose,
            input.property_type,
            input.price_cents,
            input.condo_fee_cents,
            input.iptu_cents,
            input.bedrooms,
            input.suites,
            input.bathrooms,
            input.parking_spaces,
            input.area_m2,
            input.lot_area_m2,
            input.address,
            input.neighborhood,
            input.city,
            input.state,
            input.amenities.join("\n"),
            input.featured,
            input.published,
            now,
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert listing failed: {e}")))?;

    Ok(conn.last_insert_rowid())
}

/// Returns false when the listing does not exist.
pub fn update_listing(
    conn: &Connection,
    id: i64,
    input: &ListingInput,
    now: i64,
) -> Result<bool, ServerError> {
    let changed = conn
        .execute(
            r#"
            UPDATE listings SET
                title = ?2, description = ?3, purpose = ?4, property_type = ?5,
                price_cents = ?6, condo_fee_cents = ?7, iptu_cents = ?8,
                bedrooms = ?9, suites = ?10, bathrooms = ?11, parking_spaces = ?12,
                area_m2 = ?13, lot_area_m2 = ?14,
                address = ?15, neighborhood = ?16, city = ?17, state = ?18,
                amenities = ?19, featured = ?20, published = ?21,
                updated_at = ?22
            WHERE id = ?1
            "#,
            params![
                id,
                input.title,
                input.description,
                input.purpose,
                input.property_type,
                input.price_cents,
                input.condo_fee_cents,
                input.iptu_cents,
                input.bedrooms,
                input.suites,
                input.bathrooms,
                input.parking_spaces,
                input.area_m2,
                input.lot_area_m2,
                input.address,
                input.neighborhood,
                input.city,
                input.state,
                input.amenities.join("\n"),
                input.featured,
                input.published,
                now,
            ],
        )
        .map_err(|e| ServerError::DbError(format!("update listing failed: {e}")))?;

    Ok(changed > 0)
}

/// Photos and social posts cascade.
pub fn delete_listing(conn: &Connection, id: i64) -> Result<bool, ServerError> {
    let changed = conn
        .execute("DELETE FROM listings WHERE id = ?", params![id])
        .map_err(|e| ServerError::DbError(format!("delete listing failed: {e}")))?;
    Ok(changed > 0)
}

pub fn get_listing(conn: &Connection, id: i64) -> Result<Option<Listing>, ServerError> {
    conn.query_row(
        &format!("{SELECT_LISTING} WHERE l.id = ?"),
        params![id],
        map_listing,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select listing failed: {e}")))
}

/// Newest first.
pub fn list_listings(conn: &Connection, scope: ListingScope) -> Result<Vec<Listing>, ServerError> {
    let filter = match scope {
        ListingScope::Published => "WHERE l.published = 1",
        ListingScope::All => "",
    };
    let mut stmt = conn
        .prepare(&format!(
            "{SELECT_LISTING} {filter} ORDER BY l.created_at DESC, l.id DESC"
        ))
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map([], map_listing)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(results)
}

pub fn set_published(conn: &Connection, id: i64, published: bool, now: i64) -> Result<bool, ServerError> {
    let changed = conn
        .execute(
            "UPDATE listings SET published = ?, updated_at = ? WHERE id = ?",
            params![published, now, id],
        )
        .map_err(|e| ServerError::DbError(format!("set published failed: {e}")))?;
    Ok(changed > 0)
}

pub fn set_featured(conn: &Connection, id: i64, featured: bool, now: i64) -> Result<bool, ServerError> {
    let changed = conn
        .execute(
            "UPDATE listings SET featured = ?, updated_at = ? WHERE id = ?",
            params![featured, now, id],
        )
        .map_err(|e| ServerError::DbError(format!("set featured failed: {e}")))?;
    Ok(changed > 0)
}

pub fn increment_views(conn: &Connection, id: i64) -> Result<(), ServerError> {
    conn.execute("UPDATE listings SET views = views + 1 WHERE id = ?", params![id])
        .map_err(|e| ServerError::DbError(format!("increment views failed: {e}")))?;
    Ok(())
}
