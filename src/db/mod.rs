pub mod user;
pub mod doctor;
pub mod appointment;

use std::str::FromStr;

use crate::DbPool;
use log::{info, warn};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub async fn init_db_pool(db_url: &str) -> Result<DbPool, sqlx::Error> {
    warn!("database url: {}", db_url);
    let options = SqliteConnectOptions::from_str(db_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool: DbPool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("{}", "Connected to sqlite, schema up to date".to_string());
    Ok(pool)
}

/// Inserts the sample doctors when the table is empty.
pub async fn seed_doctors(pool: &DbPool) -> Result<u64, sqlx::Error> {
    if doctor::count(pool).await? > 0 {
        return Ok(0);
    }
    let samples = [
        ("Dr. Maria Santos", "Pediatrics", "Mon-Fri, 9AM-4PM"),
        ("Dr. John Dela Cruz", "Cardiology", "Tue-Thu, 10AM-3PM"),
        ("Dr. Ana Reyes", "Dermatology", "Mon-Wed, 8AM-2PM"),
    ];
    let mut inserted = 0;
    for (name, specialization, schedule) in samples {
        doctor::create(name, specialization, schedule, None, pool).await?;
        inserted += 1;
    }
    info!("seeded {} sample doctors", inserted);
    Ok(inserted)
}
