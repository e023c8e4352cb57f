use astra::Request;

use crate::app::App;
use crate::db::{listings, photos};
use crate::domain::listing::Listing;
use crate::errors::ServerError;
use crate::handlers::now_unix;
use crate::requests::{self, multipart};
use crate::responses::{html_response_status, redirect, ResultResp};
use crate::templates::pages::{self, PhotosVm};

pub const ACCEPTED_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];
const PHOTO_FIELD: &str = "photo";

fn render(app: &App, status: u16, listing: &Listing, errors: Vec<String>) -> ResultResp {
    let photos = app
        .db
        .with_conn(|conn| photos::list_photos(conn, listing.id))?;
    let vm = PhotosVm {
        listing,
        photos: &photos,
        errors,
        uploads_enabled: app.images.enabled(),
        max_upload_bytes: app.config.max_upload_bytes,
    };
    html_response_status(status, pages::photos_page(&app.config.site_name, &vm))
}

fn find_listing(app: &App, id: i64) -> Result<Listing, ServerError> {
    app.db
        .with_conn(|conn| listings::get_listing(conn, id))?
        .ok_or(ServerError::NotFound)
}

pub fn photos_page(app: &App, listing_id: i64) -> ResultResp {
    let listing = find_listing(app, listing_id)?;
    render(app, 200, &listing, Vec::new())
}

/// An uploaded image file, validated.
struct Upload {
    filename: String,
    content_type: String,
    data: Vec<u8>,
}

fn size_label(bytes: u64) -> String {
    const MB: u64 = 1024 * 1024;
    if bytes >= MB {
        format!("{} MB", bytes / MB)
    } else {
        format!("{} KB", bytes.div_ceil(1024))
    }
}

fn read_upload(req: &mut Request, max_bytes: u64) -> Result<Upload, String> {
    let boundary = requests::header(req, "content-type")
        .and_then(multipart::boundary)
        .ok_or_else(|| "Envie o formulário como multipart/form-data".to_string())?;

    let body = requests::read_body(req, max_bytes)
        .map_err(|_| format!("A foto deve ter no máximo {}", size_label(max_bytes)))?;

    let part = multipart::parse(&body, &boundary)
        .map_err(|e| e.public_message())?
        .into_iter()
        .find(|p| p.name == PHOTO_FIELD && p.filename.is_some())
        .ok_or_else(|| "Selecione uma foto".to_string())?;

    if part.data.is_empty() {
        return Err("Selecione uma foto".to_string());
    }

    let content_type = part
        .content_type
        .as_deref()
        .map(|c| c.trim().to_ascii_lowercase())
        .unwrap_or_default();
    if !ACCEPTED_TYPES.contains(&content_type.as_str()) {
        return Err("Formato não suportado: use JPEG, PNG ou WebP".to_string());
    }

    Ok(Upload {
        filename: part.filename.unwrap_or_default(),
        content_type,
        data: part.data,
    })
}

pub fn upload_photo(req: &mut Request, app: &App, listing_id: i64) -> ResultResp {
    let listing = find_listing(app, listing_id)?;

    let upload = match read_upload(req, app.config.max_upload_bytes) {
        Ok(u) => u,
        Err(msg) => return render(app, 400, &listing, vec![msg]),
    };

    let hosted = match app
        .images
        .upload(&upload.data, &upload.filename, &upload.content_type)
    {
        Ok(h) => h,
        Err(e) => {
            tracing::error!(listing_id, error = %e, "photo upload failed");
            return render(app, 502, &listing, vec![format!("Falha ao enviar a foto: {e}")]);
        }
    };

    let photo_id = app.db.with_conn(|conn| {
        photos::insert_photo(conn, listing_id, &hosted.url, &hosted.public_id, now_unix())
    })?;
    tracing::info!(listing_id, photo_id, bytes = upload.data.len(), "photo added");
    redirect(&format!("/admin/imoveis/{listing_id}/fotos"))
}

pub fn delete_photo(app: &App, photo_id: i64) -> ResultResp {
    let photo = app
        .db
        .with_conn(|conn| photos::get_photo(conn, photo_id))?
        .ok_or(ServerError::NotFound)?;

    if let Err(e) = app.images.destroy(&photo.public_id) {
        tracing::warn!(photo_id, public_id = %photo.public_id, error = %e, "failed to delete hosted photo");
    }
    app.db.with_conn(|conn| photos::delete_photo(conn, photo_id))?;
    redirect(&format!("/admin/imoveis/{}/fotos", photo.listing_id))
}

pub fn make_cover(app: &App, photo_id: i64) -> ResultResp {
    let photo = app
        .db
        .with_conn(|conn| photos::get_photo(conn, photo_id))?
        .ok_or(ServerError::NotFound)?;

    app.db
        .with_conn(|conn| photos::make_cover(conn, photo.listing_id, photo_id))?;
    redirect(&format!("/admin/imoveis/{}/fotos", photo.listing_id))
}
