use crate::app::App;
use crate::config::Config;
use crate::db::connection::{init_db, Database};
use crate::db::listings::{insert_listing, tests::sample_input};
use crate::domain::listing::ListingInput;
use crate::integrations::indicators::IndicatorService;
use crate::integrations::Disabled;
use crate::requests::cookies::SESSION_COOKIE;
use crate::router::handle;
use crate::tests::fakes::{Calls, FakeImages, FakeIndicators, FakeNotifier, FakeSocial};
use astra::{Body, Request, Response};
use http::Method;
use std::io::Read;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// An `App` on a fresh SQLite file with fake integrations.
pub struct TestEnv {
    pub app: App,
    pub images: Calls,
    pub social: Calls,
    pub notified: Calls,
    pub indicators_failing: Arc<AtomicBool>,
}

/// Initialize a fresh test DB using the production schema
pub fn init_test_db() -> Database {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!(
        "imobiliaria_test_{}_{n}.sqlite3",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    let db = Database::new(path.to_string_lossy().into_owned());
    init_db(&db, "sql/schema.sql")
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    db
}

pub fn test_env() -> TestEnv {
    build_env(false)
}

/// Image uploads fail upstream.
pub fn failing_images_env() -> TestEnv {
    build_env(true)
}

fn build_env(fail_uploads: bool) -> TestEnv {
    let db = init_test_db();
    let config = Config {
        database_path: db.path().to_string(),
        ..Config::default()
    };

    let images = Calls::default();
    let social = Calls::default();
    let notified = Calls::default();
    let indicators_failing = Arc::new(AtomicBool::new(false));

    let app = App {
        db,
        config,
        images: Box::new(FakeImages {
            calls: images.clone(),
            fail_uploads,
        }),
        social: Box::new(FakeSocial {
            calls: social.clone(),
        }),
        indicators: IndicatorService::new(
            Box::new(FakeIndicators {
                failing: indicators_failing.clone(),
            }),
            Duration::ZERO,
        ),
        notifier: Some(Arc::new(FakeNotifier {
            calls: notified.clone(),
        })),
    };

    TestEnv {
        app,
        images,
        social,
        notified,
        indicators_failing,
    }
}

/// Every integration switched off, as when no credentials are configured.
pub fn disabled_env() -> TestEnv {
    let mut env = test_env();
    env.app.images = Box::new(Disabled("cloudinary"));
    env.app.social = Box::new(Disabled("facebook"));
    env.app.notifier = None;
    env
}

pub fn get(uri: &str) -> Request {
    http::Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn get_with_cookie(uri: &str, cookie: &str) -> Request {
    http::Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("Cookie", cookie)
        .body(Body::empty())
        .unwrap()
}

pub fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request {
    let mut builder = http::Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded");
    if let Some(c) = cookie {
        builder = builder.header("Cookie", c);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body()
        .reader()
        .read_to_string(&mut body)
        .unwrap();
    body
}

pub fn location(resp: &Response) -> String {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

/// Logs in with the default password; returns a `Cookie` header value.
pub fn login(env: &TestEnv) -> String {
    let resp = handle(post_form("/admin/login", "password=admin", None), &env.app)
        .expect("login failed");
    assert_eq!(resp.status(), 302);

    let set_cookie = resp
        .headers()
        .get("Set-Cookie")
        .and_then(|v| v.to_str().ok())
        .expect("login sets a cookie");
    let pair = set_cookie.split(';').next().unwrap_or("");
    assert!(pair.starts_with(SESSION_COOKIE));
    pair.to_string()
}

pub fn seed_listing(env: &TestEnv, input: &ListingInput, now: i64) -> i64 {
    env.app
        .db
        .with_conn(|conn| insert_listing(conn, input, now))
        .expect("seed listing")
}

pub fn listing_input(title: &str) -> ListingInput {
    sample_input(title)
}
