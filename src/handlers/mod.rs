pub mod admin;
pub mod appointment;
pub mod auth;
pub mod pages;
pub mod user;

use actix_web::{
    http::header::{self, ContentType},
    web, HttpResponse,
};
use log::debug;

use crate::{
    errors::AppError,
    service::session::{FlashLevel, Session},
    views,
};

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn flash_redirect(
    session: &Session,
    level: FlashLevel,
    message: impl Into<String>,
    location: &str,
) -> HttpResponse {
    session.flash(level, message);
    redirect(location)
}

/// Renders `body` inside the layout, consuming pending flashes.
pub fn render(session: &Session, title: &str, body: String) -> HttpResponse {
    let nav = views::Nav {
        user: session.user_id().is_some(),
        admin: session.is_admin(),
    };
    let page = views::layout(title, &session.take_flashes(), &nav, &body);
    HttpResponse::Ok().content_type(ContentType::html()).body(page)
}

/// Turns a failed action into a flash and a redirect. Missing rows stay errors
/// so they render the not-found page.
pub fn recover(session: &Session, err: AppError, location: &str) -> Result<HttpResponse, AppError> {
    debug!("recovering {:?} -> {}", err, location);
    let level = match err {
        AppError::NotFound => return Err(err),
        AppError::EmailTaken => FlashLevel::Warning,
        _ => FlashLevel::Danger,
    };
    Ok(flash_redirect(session, level, err.to_string(), location))
}

pub fn login_required(session: &Session) -> HttpResponse {
    flash_redirect(session, FlashLevel::Warning, "Please log in first.", "/login")
}

pub fn admin_required(session: &Session) -> HttpResponse {
    flash_redirect(session, FlashLevel::Warning, "Please log in as admin first.", "/admin_login")
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(pages::init_routes)
        .configure(auth::init_routes)
        .configure(user::init_routes)
        .configure(appointment::init_routes)
        .configure(admin::init_routes);
}
