use crate::db::listings::get_listing;
use crate::domain::listing::{PropertyType, Purpose};
use crate::errors::ServerError;
use crate::router::{handle, respond};
use crate::tests::utils::{body_string, get, listing_input, location, seed_listing, test_env};

#[test]
fn home_shows_published_highlights_only() {
    let env = test_env();
    seed_listing(&env, &listing_input("Apartamento no Cambuí"), 1_000);
    let mut draft = listing_input("Rascunho secreto");
    draft.published = false;
    seed_listing(&env, &draft, 2_000);

    let resp = handle(get("/"), &env.app).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Apartamento no Cambuí"));
    assert!(!body.contains("Rascunho secreto"));
    assert!(body.contains("hx-get=\"/indicadores\""));
}

#[test]
fn search_filters_and_counts() {
    let env = test_env();
    seed_listing(&env, &listing_input("Apartamento à venda"), 1_000);

    let mut rent = listing_input("Casa para alugar");
    rent.purpose = Purpose::Rent;
    rent.property_type = PropertyType::House;
    rent.price_cents = 350_000;
    seed_listing(&env, &rent, 2_000);

    let resp = handle(get("/imoveis?finalidade=aluguel"), &env.app).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("1 imóvel encontrado"));
    assert!(body.contains("Casa para alugar"));
    assert!(!body.contains("Apartamento à venda"));

    let resp = handle(get("/imoveis?q=xyz-nada"), &env.app).expect("Handler failed");
    assert!(body_string(resp).contains("Nenhum imóvel encontrado"));
}

#[test]
fn search_paginates_with_filters_kept() {
    let env = test_env();
    for i in 0..14 {
        seed_listing(&env, &listing_input(&format!("Imóvel {i}")), 1_000 + i);
    }

    let body = body_string(handle(get("/imoveis?cidade=Campinas"), &env.app).unwrap());
    assert!(body.contains("14 imóveis encontrados"));
    assert!(body.contains("Página 1 de 2"));
    assert!(body.contains("cidade=Campinas&amp;pagina=2"));

    let body = body_string(handle(get("/imoveis?cidade=Campinas&pagina=9"), &env.app).unwrap());
    assert!(body.contains("Página 2 de 2"));
}

#[test]
fn detail_page_renders_and_counts_views() {
    let env = test_env();
    let id = seed_listing(&env, &listing_input("Apartamento no Cambuí"), 1_000);
    let slug = format!("apartamento-venda-2-quartos-cambui-campinas-{id}");

    let resp = handle(get(&format!("/imovel/{slug}")), &env.app).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Apartamento no Cambuí"));
    assert!(body.contains(&format!("REF-{id:04}")));
    assert!(body.contains("R$ 450.000,00"));
    assert!(body.contains(&format!("name=\"listing_id\" value=\"{id}\"")));

    let views = env
        .app
        .db
        .with_conn(|conn| get_listing(conn, id))
        .unwrap()
        .unwrap()
        .views;
    assert_eq!(views, 1);
}

#[test]
fn stale_slug_redirects_to_canonical() {
    let env = test_env();
    let id = seed_listing(&env, &listing_input("Apartamento"), 1_000);

    let resp = handle(get(&format!("/imovel/titulo-antigo-{id}")), &env.app).expect("Handler failed");
    assert_eq!(resp.status(), 301);
    assert_eq!(
        location(&resp),
        format!("/imovel/apartamento-venda-2-quartos-cambui-campinas-{id}")
    );
}

#[test]
fn unpublished_or_unknown_listing_is_not_found() {
    let env = test_env();
    let mut draft = listing_input("Rascunho");
    draft.published = false;
    let id = seed_listing(&env, &draft, 1_000);

    let err = handle(get(&format!("/imovel/rascunho-{id}")), &env.app).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));

    let err = handle(get("/imovel/sem-numero"), &env.app).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));
}

#[test]
fn compare_needs_two_listings() {
    let env = test_env();
    let a = seed_listing(&env, &listing_input("Primeiro"), 1_000);
    let b = seed_listing(&env, &listing_input("Segundo"), 2_000);

    let body = body_string(handle(get(&format!("/comparar?ids={a}")), &env.app).unwrap());
    assert!(body.contains("Selecione de 2 a 4"));

    let body = body_string(handle(get(&format!("/comparar?ids={a}&ids={b}&ids=999")), &env.app).unwrap());
    assert!(body.contains("Primeiro"));
    assert!(body.contains("Segundo"));
    assert!(body.contains("Área útil"));
}

#[test]
fn unknown_route_renders_error_page() {
    let env = test_env();
    let resp = respond(get("/nao-existe"), &env.app);
    assert_eq!(resp.status(), 404);
    assert!(body_string(resp).contains("Página não encontrada"));
}

#[test]
fn health_and_static_traversal() {
    let env = test_env();
    let resp = handle(get("/health"), &env.app).unwrap();
    assert_eq!(body_string(resp), "ok");

    let resp = handle(get("/static/main.css"), &env.app).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap().to_str().unwrap(),
        "text/css; charset=utf-8"
    );

    let err = handle(get("/static/../Cargo.toml"), &env.app).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));
}
