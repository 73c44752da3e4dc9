use log::{error, info};

use crate::{db, dto::RegisterForm, errors::AppError, DbPool};

use super::crypto;

pub async fn create(dto: RegisterForm, pool: &DbPool) -> Result<i64, AppError> {
    let RegisterForm {
        fullname,
        email,
        contact,
        address,
        password,
        confirm_password,
    } = dto;
    if password != confirm_password {
        return Err(AppError::PasswordMismatch);
    }
    let email = email.trim().to_string();
    if [&fullname, &email, &contact, &address, &password]
        .iter()
        .any(|v| v.trim().is_empty())
    {
        return Err(AppError::MissingFields);
    }
    if db::user::exists(&email, pool).await? {
        return Err(AppError::EmailTaken);
    }
    let password_hash = crypto::hash_password(&password).map_err(|err| {
        error!("[{:} : {:}] password hashing failed: {:?}", file!(), line!(), err);
        AppError::InternalError
    })?;
    let res = db::user::create(&fullname, &email, &contact, &address, &password_hash, pool).await;
    match res {
        Ok(id) => {
            info!("registered user {}", id);
            Ok(id)
        }
        // lost a race against a concurrent registration with the same email
        Err(sqlx::Error::Database(err)) if err.is_unique_violation() => Err(AppError::EmailTaken),
        Err(err) => Err(err.into()),
    }
}
