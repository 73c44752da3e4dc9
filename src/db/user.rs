use crate::{models::User, DbPool};

pub async fn create(
    fullname: &str,
    email: &str,
    contact: &str,
    address: &str,
    password_hash: &str,
    pool: &DbPool,
) -> Result<i64, sqlx::Error> {
    let res = sqlx::query(
        "INSERT INTO users (fullname, email, contact, address, password_hash)
        VALUES (?, ?, ?, ?, ?)",
    )
    .bind(fullname)
    .bind(email)
    .bind(contact)
    .bind(address)
    .bind(password_hash)
    .execute(pool)
    .await?;
    Ok(res.last_insert_rowid())
}

pub async fn get_by_id(id: i64, pool: &DbPool) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await
}

pub async fn find_by_email(email: &str, pool: &DbPool) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn exists(email: &str, pool: &DbPool) -> Result<bool, sqlx::Error> {
    Ok(find_by_email(email, pool).await?.is_some())
}
