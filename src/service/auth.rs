use log::{info, warn};

use crate::{config::Config, db, errors::AppError, models::User, DbPool};

use super::{crypto, session::Session};

/// Static admin credentials, compared verbatim.
pub fn check_admin(config: &Config, username: &str, password: &str) -> Result<(), AppError> {
    if username == config.admin_username && password == config.admin_password {
        info!("admin logged in");
        Ok(())
    } else {
        warn!("failed admin login for {:?}", username);
        Err(AppError::InvalidAdminCredentials)
    }
}

pub async fn login(email: &str, password: &str, pool: &DbPool) -> Result<User, AppError> {
    match db::user::find_by_email(email, pool).await? {
        Some(user) if crypto::verify_password(password, &user.password_hash) => {
            info!("user {} logged in", user.id);
            Ok(user)
        }
        _ => {
            warn!("failed login for {:?}", email);
            Err(AppError::InvalidCredentials)
        }
    }
}

/// Resolves the session's user. A user id that no longer exists logs the session out.
pub async fn current_user(session: &Session, pool: &DbPool) -> Result<Option<User>, AppError> {
    let Some(user_id) = session.user_id() else {
        return Ok(None);
    };
    match db::user::get_by_id(user_id, pool).await {
        Ok(user) => Ok(Some(user)),
        Err(sqlx::Error::RowNotFound) => {
            warn!("session refers to missing user {}", user_id);
            session.logout_user();
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}
