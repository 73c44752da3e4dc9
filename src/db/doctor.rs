use crate::{models::Doctor, DbPool};

pub async fn create(
    name: &str,
    specialization: &str,
    schedule: &str,
    photo: Option<&str>,
    pool: &DbPool,
) -> Result<i64, sqlx::Error> {
    let res = sqlx::query(
        "INSERT INTO doctors (name, specialization, schedule, photo)
        VALUES (?, ?, ?, ?)",
    )
    .bind(name)
    .bind(specialization)
    .bind(schedule)
    .bind(photo)
    .execute(pool)
    .await?;
    Ok(res.last_insert_rowid())
}

pub async fn get_by_id(id: i64, pool: &DbPool) -> Result<Doctor, sqlx::Error> {
    sqlx::query_as::<_, Doctor>("SELECT * FROM doctors WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await
}

pub async fn get_all(pool: &DbPool) -> Result<Vec<Doctor>, sqlx::Error> {
    sqlx::query_as::<_, Doctor>("SELECT * FROM doctors ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn exists(id: i64, pool: &DbPool) -> Result<bool, sqlx::Error> {
    let found: Option<(i64,)> = sqlx::query_as("SELECT id FROM doctors WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM doctors")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Number of doctors whose stored photo is `photo`.
pub async fn count_by_photo(photo: &str, pool: &DbPool) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM doctors WHERE photo = ?")
        .bind(photo)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// `photo: None` keeps the stored photo.
pub async fn update(
    id: i64,
    name: &str,
    specialization: &str,
    schedule: &str,
    status: &str,
    photo: Option<&str>,
    pool: &DbPool,
) -> Result<u64, sqlx::Error> {
    let res = sqlx::query(
        "UPDATE doctors
        SET name = ?, specialization = ?, schedule = ?, status = ?, photo = COALESCE(?, photo)
        WHERE id = ?",
    )
    .bind(name)
    .bind(specialization)
    .bind(schedule)
    .bind(status)
    .bind(photo)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(res.rows_affected())
}

pub async fn delete(id: i64, pool: &DbPool) -> Result<u64, sqlx::Error> {
    let res = sqlx::query("DELETE FROM doctors WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}
