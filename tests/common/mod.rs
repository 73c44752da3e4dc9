#![allow(dead_code)]

use actix_web::{
    body::MessageBody,
    cookie::Cookie,
    dev::ServiceResponse,
    http::header,
    test::{self, TestRequest},
};
use hospital_booking::{config::Config, db, service::session::SESSION_COOKIE, DbPool};
use serde::Serialize;
use tempfile::TempDir;

pub const BOUNDARY: &str = "----hospital-booking-test-boundary";

/// A fresh database and static root, removed when dropped.
pub struct TestContext {
    pub dir: TempDir,
    pub pool: DbPool,
    pub config: Config,
}

pub async fn setup() -> TestContext {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        database_url: format!("sqlite://{}", dir.path().join("booking.db").display()),
        bind_addr: "127.0.0.1".to_string(),
        port: 0,
        session_secret: "test-secret".to_string(),
        session_ttl_secs: 3600,
        admin_username: "admin".to_string(),
        admin_password: "admin123".to_string(),
        static_dir: dir.path().join("static"),
    };
    std::fs::create_dir_all(config.uploads_dir()).unwrap();
    let pool = db::init_db_pool(&config.database_url).await.unwrap();
    TestContext { dir, pool, config }
}

/// Carries the session cookie between requests like a browser would.
#[derive(Default)]
pub struct Browser {
    cookie: Option<Cookie<'static>>,
}

impl Browser {
    pub fn get(&self, uri: &str) -> TestRequest {
        self.attach(TestRequest::get().uri(uri))
    }

    pub fn post(&self, uri: &str) -> TestRequest {
        self.attach(TestRequest::post().uri(uri))
    }

    pub fn post_form(&self, uri: &str, form: &impl Serialize) -> TestRequest {
        self.post(uri).set_form(form)
    }

    pub fn post_multipart(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
        photo: Option<(&str, &[u8])>,
    ) -> TestRequest {
        self.post(uri)
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(multipart_body(fields, photo))
    }

    pub fn remember<B>(&mut self, res: &ServiceResponse<B>) {
        if let Some(cookie) = res.response().cookies().find(|c| c.name() == SESSION_COOKIE) {
            self.cookie = Some(cookie.into_owned());
        }
    }

    fn attach(&self, req: TestRequest) -> TestRequest {
        match &self.cookie {
            Some(cookie) => req.cookie(cookie.clone()),
            None => req,
        }
    }
}

pub fn multipart_body(fields: &[(&str, &str)], photo: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        let part = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        );
        body.extend_from_slice(part.as_bytes());
    }
    if let Some((filename, bytes)) = photo {
        let head = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"photo\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        );
        body.extend_from_slice(head.as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn registration(fullname: &str, email: &str, password: &str) -> Vec<(&'static str, String)> {
    vec![
        ("fullname", fullname.to_string()),
        ("email", email.to_string()),
        ("contact", "0917 555 0101".to_string()),
        ("address", "12 Rizal St".to_string()),
        ("password", password.to_string()),
        ("confirm_password", password.to_string()),
    ]
}

pub fn booking(doctor_id: &str, date: &str, time: &str) -> Vec<(&'static str, String)> {
    vec![
        ("doctor_id", doctor_id.to_string()),
        ("date", date.to_string()),
        ("time", time.to_string()),
        ("reason", "Annual check-up".to_string()),
    ]
}

pub fn location<B>(res: &ServiceResponse<B>) -> String {
    res.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub async fn body_text<B: MessageBody>(res: ServiceResponse<B>) -> String {
    String::from_utf8(test::read_body(res).await.to_vec()).unwrap()
}

pub async fn add_doctor(pool: &DbPool, name: &str) -> i64 {
    db::doctor::create(name, "General Medicine", "Mon-Fri, 9AM-5PM", None, pool)
        .await
        .unwrap()
}

pub async fn appointment_count(pool: &DbPool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM appointments")
        .fetch_one(pool)
        .await
        .unwrap();
    count
}

/// Sends a request from `$browser` and stores any session cookie it gets back.
macro_rules! send {
    ($app:expr, $browser:expr, $req:expr) => {{
        let req = $req.to_request();
        let res = actix_web::test::call_service(&$app, req).await;
        $browser.remember(&res);
        res
    }};
}

/// GETs a page that must render, returning its HTML.
macro_rules! page {
    ($app:expr, $browser:expr, $uri:expr) => {{
        let res = send!($app, $browser, $browser.get($uri));
        assert_eq!(res.status(), actix_web::http::StatusCode::OK, "GET {}", $uri);
        common::body_text(res).await
    }};
}

macro_rules! register_and_login {
    ($app:expr, $browser:expr, $fullname:expr, $email:expr) => {{
        let res = send!(
            $app,
            $browser,
            $browser.post_form("/register", &common::registration($fullname, $email, "pw-123"))
        );
        assert_eq!(common::location(&res), "/login");
        let res = send!(
            $app,
            $browser,
            $browser.post_form("/login", &[("email", $email), ("password", "pw-123")])
        );
        assert_eq!(common::location(&res), "/dashboard");
    }};
}

macro_rules! admin_login {
    ($app:expr, $browser:expr) => {{
        let res = send!(
            $app,
            $browser,
            $browser.post_form("/admin_login", &[("username", "admin"), ("password", "admin123")])
        );
        assert_eq!(common::location(&res), "/admin_dashboard");
    }};
}
