use crate::db::listings::get_listing;
use crate::db::photos::insert_photo;
use crate::db::social_posts::list_social_posts;
use crate::domain::listing::Purpose;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{
    body_string, disabled_env, get_with_cookie, listing_input, location, login, post_form,
    seed_listing, test_env,
};

const VALID_FORM: &str = "title=Casa+com+piscina&purpose=venda&property_type=casa\
    &price=850.000%2C00&bedrooms=3&suites=1&bathrooms=2&parking_spaces=2&area_m2=180%2C5\
    &neighborhood=Taquaral&city=Campinas&state=sp&amenities=Piscina&published=on";

#[test]
fn dashboard_lists_every_listing() {
    let env = test_env();
    let cookie = login(&env);
    seed_listing(&env, &listing_input("Casa Alfa"), 1_000);
    let mut draft = listing_input("Casa Beta");
    draft.published = false;
    seed_listing(&env, &draft, 2_000);

    let resp = handle(get_with_cookie("/admin", &cookie), &env.app).expect("Handler failed");
    let body = body_string(resp);
    assert!(body.contains("Casa Alfa"));
    assert!(body.contains("Casa Beta"));
}

#[test]
fn create_listing_redirects_to_photos() {
    let env = test_env();
    let cookie = login(&env);

    let resp = handle(get_with_cookie("/admin/imoveis/novo", &cookie), &env.app).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let resp = handle(post_form("/admin/imoveis", VALID_FORM, Some(&cookie)), &env.app)
        .expect("Handler failed");
    assert_eq!(resp.status(), 302);
    let target = location(&resp);
    assert!(target.starts_with("/admin/imoveis/") && target.ends_with("/fotos"));

    let id: i64 = target
        .trim_start_matches("/admin/imoveis/")
        .trim_end_matches("/fotos")
        .parse()
        .unwrap();
    let listing = env.app.db.with_conn(|conn| get_listing(conn, id)).unwrap().unwrap();
    assert_eq!(listing.title, "Casa com piscina");
    assert_eq!(listing.price_cents, 85_000_000);
    assert_eq!(listing.state, "SP");
    assert!(listing.published);
}

#[test]
fn invalid_listing_form_is_rerendered() {
    let env = test_env();
    let cookie = login(&env);

    let resp = handle(
        post_form("/admin/imoveis", "title=&purpose=venda&city=Campinas", Some(&cookie)),
        &env.app,
    )
    .expect("Handler failed");
    assert_eq!(resp.status(), 422);
    let body = body_string(resp);
    assert!(body.contains("Título é obrigatório"));
    assert!(body.contains("value=\"Campinas\""));
}

#[test]
fn update_listing_saves_changes() {
    let env = test_env();
    let cookie = login(&env);
    let id = seed_listing(&env, &listing_input("Antigo"), 1_000);

    let resp = handle(get_with_cookie(&format!("/admin/imoveis/{id}/editar"), &cookie), &env.app)
        .expect("Handler failed");
    assert!(body_string(resp).contains("value=\"Antigo\""));

    let body = VALID_FORM.replace("purpose=venda", "purpose=aluguel");
    let resp = handle(post_form(&format!("/admin/imoveis/{id}"), &body, Some(&cookie)), &env.app)
        .expect("Handler failed");
    assert_eq!(location(&resp), "/admin");

    let listing = env.app.db.with_conn(|conn| get_listing(conn, id)).unwrap().unwrap();
    assert_eq!(listing.title, "Casa com piscina");
    assert_eq!(listing.purpose, Purpose::Rent);
}

#[test]
fn update_unknown_listing_is_not_found() {
    let env = test_env();
    let cookie = login(&env);
    let result = handle(post_form("/admin/imoveis/999", VALID_FORM, Some(&cookie)), &env.app);
    assert!(matches!(result, Err(ServerError::NotFound)));
}

#[test]
fn toggles_flip_flags() {
    let env = test_env();
    let cookie = login(&env);
    let id = seed_listing(&env, &listing_input("Casa"), 1_000);

    handle(post_form(&format!("/admin/imoveis/{id}/publicar"), "", Some(&cookie)), &env.app)
        .expect("Handler failed");
    handle(post_form(&format!("/admin/imoveis/{id}/destaque"), "", Some(&cookie)), &env.app)
        .expect("Handler failed");

    let listing = env.app.db.with_conn(|conn| get_listing(conn, id)).unwrap().unwrap();
    assert!(!listing.published);
    assert!(listing.featured);
}

#[test]
fn delete_listing_removes_hosted_photos() {
    let env = test_env();
    let cookie = login(&env);
    let id = seed_listing(&env, &listing_input("Casa"), 1_000);
    env.app
        .db
        .with_conn(|conn| {
            insert_photo(conn, id, "https://img.test/a.jpg", "imoveis/a", 1_000)?;
            insert_photo(conn, id, "https://img.test/b.jpg", "imoveis/b", 1_001)
        })
        .unwrap();

    let resp = handle(post_form(&format!("/admin/imoveis/{id}/excluir"), "", Some(&cookie)), &env.app)
        .expect("Handler failed");
    assert_eq!(location(&resp), "/admin");
    assert_eq!(
        env.images.all(),
        vec!["destroy:imoveis/a".to_string(), "destroy:imoveis/b".to_string()]
    );
    assert!(env.app.db.with_conn(|conn| get_listing(conn, id)).unwrap().is_none());
}

#[test]
fn share_posts_link_and_records_it() {
    let env = test_env();
    let cookie = login(&env);
    let id = seed_listing(&env, &listing_input("Casa"), 1_000);

    let resp = handle(post_form(&format!("/admin/imoveis/{id}/redes"), "", Some(&cookie)), &env.app)
        .expect("Handler failed");
    assert_eq!(location(&resp), format!("/admin/imoveis/{id}/editar"));

    let calls = env.social.all();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].starts_with(&format!(
        "post:http://localhost:3000/imovel/apartamento-venda-2-quartos-cambui-campinas-{id}:"
    )));

    let posts = env.app.db.with_conn(|conn| list_social_posts(conn, id)).unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].network, "facebook");
    assert_eq!(posts[0].external_id, "page_123");

    let resp = handle(get_with_cookie(&format!("/admin/imoveis/{id}/editar"), &cookie), &env.app)
        .expect("Handler failed");
    assert!(body_string(resp).contains("page_123"));
}

#[test]
fn share_refuses_unpublished_listing() {
    let env = test_env();
    let cookie = login(&env);
    let mut draft = listing_input("Rascunho");
    draft.published = false;
    let id = seed_listing(&env, &draft, 1_000);

    let result = handle(post_form(&format!("/admin/imoveis/{id}/redes"), "", Some(&cookie)), &env.app);
    assert!(matches!(result, Err(ServerError::BadRequest(_))));
    assert!(env.social.all().is_empty());
}

#[test]
fn share_fails_when_not_configured() {
    let env = disabled_env();
    let cookie = login(&env);
    let id = seed_listing(&env, &listing_input("Casa"), 1_000);

    let result = handle(post_form(&format!("/admin/imoveis/{id}/redes"), "", Some(&cookie)), &env.app);
    assert!(result.is_err());
    let posts = env.app.db.with_conn(|conn| list_social_posts(conn, id)).unwrap();
    assert!(posts.is_empty());
}
