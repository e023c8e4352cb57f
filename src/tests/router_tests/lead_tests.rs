use crate::db::leads::{count_unread, list_leads};
use crate::domain::lead::LeadKind;
use crate::router::handle;
use crate::tests::utils::{body_string, disabled_env, get, listing_input, post_form, seed_listing, test_env};
use astra::Body;
use http::Method;

fn htmx_post(uri: &str, body: &str) -> astra::Request {
    http::Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .header("HX-Request", "true")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[test]
fn contact_page_loads() {
    let env = test_env();
    let resp = handle(get("/contato"), &env.app).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("name=\"website\""));
}

#[test]
fn contact_submission_is_stored_and_notified() {
    let env = test_env();
    let listing_id = seed_listing(&env, &listing_input("Apartamento no Cambuí"), 1_000);

    let body = format!("name=Ana+Souza&email=ANA%40mail.com&message=Quero+visitar&listing_id={listing_id}");
    let resp = handle(post_form("/contato", &body, None), &env.app).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Obrigado!"));

    let leads = env.app.db.with_conn(|conn| list_leads(conn, false)).unwrap();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].kind, LeadKind::Contact);
    assert_eq!(leads[0].email.as_deref(), Some("ana@mail.com"));
    assert_eq!(leads[0].listing_title.as_deref(), Some("Apartamento no Cambuí"));

    let calls = env.notified.wait_for(1);
    assert_eq!(calls, vec!["notify:contact:Ana Souza".to_string()]);
}

#[test]
fn htmx_submission_gets_fragment() {
    let env = test_env();
    let resp = handle(
        htmx_post("/contato", "name=Ana&phone=19998765432&message=Oi"),
        &env.app,
    )
    .expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("id=\"lead-form\""));
    assert!(!body.contains("<html"));
}

#[test]
fn invalid_submission_rerenders_with_422() {
    let env = test_env();

    let resp = handle(post_form("/contato", "name=Ana&message=Oi", None), &env.app)
        .expect("Handler failed");
    assert_eq!(resp.status(), 422);
    let body = body_string(resp);
    assert!(body.contains("<html"));
    assert!(body.contains("e-mail ou telefone"));
    assert!(body.contains("value=\"Ana\""));

    let resp = handle(htmx_post("/contato", "name=Ana&message=Oi"), &env.app).expect("Handler failed");
    assert_eq!(resp.status(), 422);
    assert!(!body_string(resp).contains("<html"));

    let stored = env.app.db.with_conn(|conn| count_unread(conn)).unwrap();
    assert_eq!(stored, 0);
}

#[test]
fn honeypot_is_acknowledged_but_dropped() {
    let env = test_env();
    let resp = handle(
        post_form(
            "/contato",
            "name=Bot&email=bot%40spam.com&message=compre&website=http%3A%2F%2Fspam.example",
            None,
        ),
        &env.app,
    )
    .expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let stored = env.app.db.with_conn(|conn| list_leads(conn, false)).unwrap();
    assert!(stored.is_empty());
    assert!(env.notified.all().is_empty());
}

#[test]
fn offer_submission_keeps_property_details() {
    let env = disabled_env();
    let resp = handle(
        post_form(
            "/anuncie",
            "name=Jo%C3%A3o&phone=%2819%29+99876-5432&purpose=venda&property_type=casa&city=Valinhos&price=780.000",
            None,
        ),
        &env.app,
    )
    .expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let leads = env.app.db.with_conn(|conn| list_leads(conn, false)).unwrap();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].kind, LeadKind::ListProperty);
    assert_eq!(leads[0].phone.as_deref(), Some("19998765432"));
    assert_eq!(leads[0].offer.city.as_deref(), Some("Valinhos"));
    assert_eq!(leads[0].offer.price_cents, Some(78_000_000));
}
