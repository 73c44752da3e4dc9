pub mod config;
pub mod db;
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod service;
pub mod views;

use actix_files::Files;
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App,
};
use sqlx::{Pool, Sqlite};

use config::Config;
use errors::AppError;
use service::{
    log::LoggerMiddleware,
    session::{SessionCodec, SessionMiddleware},
};

pub type DbPool = Pool<Sqlite>;

/// Builds the application with every route, static files and middleware mounted.
pub fn build_app(
    pool: DbPool,
    config: Config,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let codec = SessionCodec::new(&config.session_secret, config.session_ttl_secs);
    let static_dir = config.static_dir.clone();
    App::new()
        .app_data(web::Data::new(pool))
        .app_data(web::Data::new(config))
        .app_data(web::PathConfig::default().error_handler(|err, req| {
            log::debug!("unparsable path {}: {}", req.path(), err);
            AppError::NotFound.into()
        }))
        .configure(handlers::init_routes)
        .service(Files::new("/static", static_dir))
        .default_service(web::to(handlers::pages::not_found))
        .wrap(SessionMiddleware { codec })
        .wrap(LoggerMiddleware)
}
