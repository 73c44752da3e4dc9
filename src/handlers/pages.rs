use actix_web::{get, web, HttpResponse};

use crate::{errors::AppError, service::session::Session, views};

use super::render;

#[get("/")]
pub async fn landing(session: Session) -> HttpResponse {
    render(&session, "Welcome", views::landing())
}

#[get("/about")]
pub async fn about(session: Session) -> HttpResponse {
    render(&session, "About", views::about())
}

pub async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound)
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(landing).service(about);
}
