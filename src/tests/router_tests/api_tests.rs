use crate::router::{handle, respond};
use crate::tests::utils::{body_string, get, test_env};
use std::sync::atomic::Ordering;

#[test]
fn indicators_json_lists_series() {
    let env = test_env();
    let resp = handle(get("/api/indicadores"), &env.app).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap().to_str().unwrap(),
        "application/json"
    );

    let json: serde_json::Value = serde_json::from_str(&body_string(resp)).unwrap();
    let indicators = json["indicators"].as_array().unwrap();
    let names: Vec<&str> = indicators.iter().filter_map(|i| i["name"].as_str()).collect();
    assert_eq!(names, vec!["Selic", "IPCA", "IGP-M", "INCC"]);
    assert_eq!(indicators[0]["code"], 432);
    assert_eq!(indicators[0]["value"], 10.5);
}

#[test]
fn upstream_failure_without_cache_is_json_502() {
    let env = test_env();
    env.indicators_failing.store(true, Ordering::SeqCst);

    let resp = respond(get("/api/indicadores"), &env.app);
    assert_eq!(resp.status(), 502);
    let json: serde_json::Value = serde_json::from_str(&body_string(resp)).unwrap();
    assert!(json["error"].is_string());
}

#[test]
fn fragment_degrades_when_upstream_fails() {
    let env = test_env();
    env.indicators_failing.store(true, Ordering::SeqCst);

    let resp = handle(get("/indicadores"), &env.app).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Indicadores indisponíveis no momento."));
}

#[test]
fn fragment_keeps_last_values_after_failure() {
    let env = test_env();
    let resp = handle(get("/indicadores"), &env.app).expect("Handler failed");
    assert!(body_string(resp).contains("10,50%"));

    env.indicators_failing.store(true, Ordering::SeqCst);
    let resp = handle(get("/indicadores"), &env.app).expect("Handler failed");
    let body = body_string(resp);
    assert!(body.contains("Selic"));
    assert!(body.contains("10,50%"));
}
