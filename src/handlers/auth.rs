use actix_web::{get, post, web, HttpResponse};
use log::info;

use crate::{
    config::Config,
    dto::{AdminLoginForm, LoginForm, RegisterForm},
    errors::AppError,
    service::{
        self,
        session::{FlashLevel, Session},
    },
    views, DbPool,
};

use super::{flash_redirect, recover, render};

#[get("/register")]
pub async fn register_page(session: Session) -> HttpResponse {
    render(&session, "Register", views::register())
}

#[post("/register")]
pub async fn register(
    session: Session,
    form: web::Form<RegisterForm>,
    pool_state: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let conn: &DbPool = pool_state.get_ref();
    match service::user::create(form.into_inner(), conn).await {
        Ok(_) => Ok(flash_redirect(
            &session,
            FlashLevel::Success,
            "Registration successful! You can now log in.",
            "/login",
        )),
        Err(err) => recover(&session, err, "/register"),
    }
}

#[get("/login")]
pub async fn login_page(session: Session) -> HttpResponse {
    render(&session, "Login", views::login())
}

#[post("/login")]
pub async fn login(
    session: Session,
    form: web::Form<LoginForm>,
    pool_state: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let conn: &DbPool = pool_state.get_ref();
    match service::auth::login(form.email.trim(), &form.password, conn).await {
        Ok(user) => {
            session.login_user(user.id);
            Ok(flash_redirect(&session, FlashLevel::Success, "Login successful!", "/dashboard"))
        }
        Err(err) => recover(&session, err, "/login"),
    }
}

#[get("/logout")]
pub async fn logout(session: Session) -> HttpResponse {
    if let Some(user_id) = session.user_id() {
        info!("user {} logged out", user_id);
    }
    session.logout_user();
    flash_redirect(&session, FlashLevel::Info, "You have been logged out.", "/")
}

#[get("/admin_login")]
pub async fn admin_login_page(session: Session) -> HttpResponse {
    render(&session, "Admin Login", views::admin_login())
}

#[post("/admin_login")]
pub async fn admin_login(
    session: Session,
    form: web::Form<AdminLoginForm>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    match service::auth::check_admin(&config, &form.username, &form.password) {
        Ok(()) => {
            session.login_admin();
            Ok(flash_redirect(
                &session,
                FlashLevel::Success,
                "Admin login successful!",
                "/admin_dashboard",
            ))
        }
        Err(err) => recover(&session, err, "/admin_login"),
    }
}

#[get("/admin_logout")]
pub async fn admin_logout(session: Session) -> HttpResponse {
    session.logout_admin();
    flash_redirect(&session, FlashLevel::Info, "Admin logged out successfully.", "/")
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(register_page)
        .service(register)
        .service(login_page)
        .service(login)
        .service(logout)
        .service(admin_login_page)
        .service(admin_login)
        .service(admin_logout);
}
