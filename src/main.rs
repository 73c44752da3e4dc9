use actix_web::HttpServer;
use hospital_booking::{build_app, config::Config, db, service::log::init_logger};
use log::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_logger();
    let config = Config::load().unwrap_or_else(|e| {
        panic!("Failed to load configuration: {}", e);
    });
    let pool = db::init_db_pool(&config.database_url)
        .await
        .unwrap_or_else(|e| {
            panic!("Failed to open database {:?}: {:?}", config.database_url, e);
        });
    if let Err(err) = db::seed_doctors(&pool).await {
        error!("failed to seed doctors: {:?}", err);
    }
    std::fs::create_dir_all(config.uploads_dir())?;

    let bind = (config.bind_addr.clone(), config.port);
    info!("listening on {}:{}", bind.0, bind.1);
    HttpServer::new(move || build_app(pool.clone(), config.clone()))
        .bind(bind)?
        .run()
        .await
}
