use crate::db::leads::{get_lead, insert_lead};
use crate::domain::lead::{LeadKind, NewLead, PropertyOffer};
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, get_with_cookie, location, login, post_form, test_env, TestEnv};
use std::io::Read;

fn seed_lead(env: &TestEnv, name: &str, now: i64) -> i64 {
    let lead = NewLead {
        kind: LeadKind::Contact,
        name: name.to_string(),
        email: Some(format!("{}@mail.com", name.to_lowercase())),
        phone: None,
        message: "Gostaria de mais informações".to_string(),
        listing_id: None,
        offer: PropertyOffer::default(),
    };
    env.app
        .db
        .with_conn(|conn| insert_lead(conn, &lead, now))
        .expect("seed lead")
}

fn is_unread(env: &TestEnv, id: i64) -> bool {
    env.app
        .db
        .with_conn(|conn| get_lead(conn, id))
        .unwrap()
        .unwrap()
        .is_unread()
}

#[test]
fn inbox_lists_and_filters_unread() {
    let env = test_env();
    let cookie = login(&env);
    let ana = seed_lead(&env, "Ana", 1_000);
    seed_lead(&env, "Bruno", 2_000);

    let resp = handle(get_with_cookie("/admin/mensagens", &cookie), &env.app).expect("Handler failed");
    let body = body_string(resp);
    assert!(body.contains("Ana"));
    assert!(body.contains("Bruno"));

    handle(get_with_cookie(&format!("/admin/mensagens/{ana}"), &cookie), &env.app).expect("Handler failed");

    let resp = handle(get_with_cookie("/admin/mensagens?nao_lidas=1", &cookie), &env.app)
        .expect("Handler failed");
    let body = body_string(resp);
    assert!(!body.contains("ana@mail.com"));
    assert!(body.contains("Bruno"));
}

#[test]
fn opening_marks_read_and_can_be_undone() {
    let env = test_env();
    let cookie = login(&env);
    let id = seed_lead(&env, "Ana", 1_000);
    assert!(is_unread(&env, id));

    let resp = handle(get_with_cookie(&format!("/admin/mensagens/{id}"), &cookie), &env.app)
        .expect("Handler failed");
    assert!(body_string(resp).contains("Gostaria de mais informações"));
    assert!(!is_unread(&env, id));

    let resp = handle(post_form(&format!("/admin/mensagens/{id}/nao-lida"), "", Some(&cookie)), &env.app)
        .expect("Handler failed");
    assert_eq!(location(&resp), "/admin/mensagens");
    assert!(is_unread(&env, id));
}

#[test]
fn delete_removes_message() {
    let env = test_env();
    let cookie = login(&env);
    let id = seed_lead(&env, "Ana", 1_000);

    let resp = handle(post_form(&format!("/admin/mensagens/{id}/excluir"), "", Some(&cookie)), &env.app)
        .expect("Handler failed");
    assert_eq!(location(&resp), "/admin/mensagens");

    let result = handle(get_with_cookie(&format!("/admin/mensagens/{id}"), &cookie), &env.app);
    assert!(matches!(result, Err(ServerError::NotFound)));
}

#[test]
fn export_downloads_workbook() {
    let env = test_env();
    let cookie = login(&env);
    seed_lead(&env, "Ana", 1_000);

    let resp = handle(get_with_cookie("/admin/mensagens/exportar", &cookie), &env.app)
        .expect("Handler failed");
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap().to_str().unwrap(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    let disposition = resp.headers().get("Content-Disposition").unwrap().to_str().unwrap().to_string();
    assert!(disposition.contains("mensagens_"));
    assert!(disposition.ends_with(".xlsx\""));

    let mut bytes = Vec::new();
    resp.into_body().reader().read_to_end(&mut bytes).unwrap();
    assert!(bytes.starts_with(b"PK"));
}
