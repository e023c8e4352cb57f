use crate::db::photos::{insert_photo, list_photos};
use crate::router::handle;
use crate::tests::utils::{
    body_string, disabled_env, failing_images_env, get_with_cookie, listing_input, location, login,
    post_form, seed_listing, test_env, TestEnv,
};
use astra::{Body, Request};
use http::Method;

const BOUNDARY: &str = "----imobiliariaTestBoundary";

fn upload_request(uri: &str, cookie: &str, filename: &str, content_type: &str, data: &[u8]) -> Request {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"photo\"; filename=\"{filename}\"\r\n").as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    http::Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Cookie", cookie)
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn photo_urls(env: &TestEnv, listing_id: i64) -> Vec<String> {
    env.app
        .db
        .with_conn(|conn| list_photos(conn, listing_id))
        .unwrap()
        .into_iter()
        .map(|p| p.url)
        .collect()
}

#[test]
fn upload_stores_hosted_photo() {
    let env = test_env();
    let cookie = login(&env);
    let id = seed_listing(&env, &listing_input("Casa"), 1_000);
    let uri = format!("/admin/imoveis/{id}/fotos");

    let resp = handle(upload_request(&uri, &cookie, "sala.jpg", "image/jpeg", b"\xff\xd8\xff\xe0fake"), &env.app)
        .expect("Handler failed");
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), uri);

    assert_eq!(env.images.all(), vec!["upload:sala.jpg:image/jpeg:8".to_string()]);
    assert_eq!(photo_urls(&env, id), vec!["https://img.test/1.jpg".to_string()]);

    let resp = handle(get_with_cookie(&uri, &cookie), &env.app).expect("Handler failed");
    let body = body_string(resp);
    assert!(body.contains("https://img.test/1.jpg"));
    assert!(body.contains("Capa"));
}

#[test]
fn upload_rejects_unsupported_type() {
    let env = test_env();
    let cookie = login(&env);
    let id = seed_listing(&env, &listing_input("Casa"), 1_000);

    let resp = handle(
        upload_request(&format!("/admin/imoveis/{id}/fotos"), &cookie, "planta.pdf", "application/pdf", b"%PDF"),
        &env.app,
    )
    .expect("Handler failed");
    assert_eq!(resp.status(), 400);
    assert!(body_string(resp).contains("Formato não suportado"));
    assert!(env.images.all().is_empty());
    assert!(photo_urls(&env, id).is_empty());
}

#[test]
fn upload_requires_multipart_body() {
    let env = test_env();
    let cookie = login(&env);
    let id = seed_listing(&env, &listing_input("Casa"), 1_000);

    let resp = handle(post_form(&format!("/admin/imoveis/{id}/fotos"), "photo=x", Some(&cookie)), &env.app)
        .expect("Handler failed");
    assert_eq!(resp.status(), 400);
}

#[test]
fn upload_over_size_limit_is_rejected() {
    let mut env = test_env();
    env.app.config.max_upload_bytes = 1024;
    let cookie = login(&env);
    let id = seed_listing(&env, &listing_input("Casa"), 1_000);

    let big = vec![0xffu8; 4096];
    let resp = handle(
        upload_request(&format!("/admin/imoveis/{id}/fotos"), &cookie, "grande.jpg", "image/jpeg", &big),
        &env.app,
    )
    .expect("Handler failed");
    assert_eq!(resp.status(), 400);
    assert!(body_string(resp).contains("A foto deve ter no máximo 1 KB"));
    assert!(env.images.all().is_empty());
    assert!(photo_urls(&env, id).is_empty());
}

#[test]
fn host_failure_reports_bad_gateway() {
    let env = failing_images_env();
    let cookie = login(&env);
    let id = seed_listing(&env, &listing_input("Casa"), 1_000);

    let resp = handle(
        upload_request(&format!("/admin/imoveis/{id}/fotos"), &cookie, "sala.png", "image/png", b"png"),
        &env.app,
    )
    .expect("Handler failed");
    assert_eq!(resp.status(), 502);
    assert!(body_string(resp).contains("Falha ao enviar a foto"));
    assert!(photo_urls(&env, id).is_empty());
}

#[test]
fn cover_and_delete() {
    let env = test_env();
    let cookie = login(&env);
    let id = seed_listing(&env, &listing_input("Casa"), 1_000);
    let (_first, second) = env
        .app
        .db
        .with_conn(|conn| {
            let a = insert_photo(conn, id, "https://img.test/a.jpg", "imoveis/a", 1_000)?;
            let b = insert_photo(conn, id, "https://img.test/b.jpg", "imoveis/b", 1_001)?;
            Ok((a, b))
        })
        .unwrap();

    let resp = handle(post_form(&format!("/admin/fotos/{second}/capa"), "", Some(&cookie)), &env.app)
        .expect("Handler failed");
    assert_eq!(location(&resp), format!("/admin/imoveis/{id}/fotos"));
    assert_eq!(
        photo_urls(&env, id),
        vec!["https://img.test/b.jpg".to_string(), "https://img.test/a.jpg".to_string()]
    );

    handle(post_form(&format!("/admin/fotos/{second}/excluir"), "", Some(&cookie)), &env.app)
        .expect("Handler failed");
    assert_eq!(env.images.all(), vec!["destroy:imoveis/b".to_string()]);
    assert_eq!(photo_urls(&env, id), vec!["https://img.test/a.jpg".to_string()]);
}

#[test]
fn upload_form_hidden_when_host_not_configured() {
    let env = disabled_env();
    let cookie = login(&env);
    let id = seed_listing(&env, &listing_input("Casa"), 1_000);

    let resp = handle(get_with_cookie(&format!("/admin/imoveis/{id}/fotos"), &cookie), &env.app)
        .expect("Handler failed");
    let body = body_string(resp);
    assert!(body.contains("Envio de fotos não configurado."));
    assert!(!body.contains("type=\"file\""));
}
