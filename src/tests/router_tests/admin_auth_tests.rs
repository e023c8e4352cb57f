use crate::router::handle;
use crate::tests::utils::{body_string, get, get_with_cookie, location, login, post_form, test_env};

#[test]
fn admin_requires_login() {
    let env = test_env();
    for path in ["/admin", "/admin/mensagens", "/admin/imoveis/novo", "/admin/mensagens/exportar"] {
        let resp = handle(get(path), &env.app).expect("Handler failed");
        assert_eq!(resp.status(), 302, "{path} should redirect");
        assert_eq!(location(&resp), "/admin/login");
    }

    let resp = handle(post_form("/admin/imoveis/1/excluir", "", None), &env.app).expect("Handler failed");
    assert_eq!(location(&resp), "/admin/login");
}

#[test]
fn wrong_password_is_rejected() {
    let env = test_env();
    let resp = handle(post_form("/admin/login", "password=errada", None), &env.app)
        .expect("Handler failed");
    assert_eq!(resp.status(), 401);
    assert!(resp.headers().get("Set-Cookie").is_none());
    assert!(body_string(resp).contains("Senha incorreta"));
}

#[test]
fn login_sets_cookie_and_grants_access() {
    let env = test_env();
    let cookie = login(&env);

    let resp = handle(get_with_cookie("/admin", &cookie), &env.app).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Painel"));

    let resp = handle(get_with_cookie("/admin/login", &cookie), &env.app).expect("Handler failed");
    assert_eq!(location(&resp), "/admin");
}

#[test]
fn forged_cookie_is_ignored() {
    let env = test_env();
    let resp = handle(
        get_with_cookie("/admin", "admin_session=not-a-real-token"),
        &env.app,
    )
    .expect("Handler failed");
    assert_eq!(location(&resp), "/admin/login");
}

#[test]
fn logout_revokes_session() {
    let env = test_env();
    let cookie = login(&env);

    let resp = handle(post_form("/admin/logout", "", Some(&cookie)), &env.app).expect("Handler failed");
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/admin/login");
    let cleared = resp.headers().get("Set-Cookie").unwrap().to_str().unwrap();
    assert!(cleared.contains("Max-Age=0"));

    let resp = handle(get_with_cookie("/admin", &cookie), &env.app).expect("Handler failed");
    assert_eq!(location(&resp), "/admin/login");
}
