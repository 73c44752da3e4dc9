use std::path::Path;

use log::info;

use crate::{db, dto::DoctorForm, errors::AppError, models::Doctor, DbPool};

use super::upload;

pub async fn get_all(pool: &DbPool) -> Result<Vec<Doctor>, AppError> {
    Ok(db::doctor::get_all(pool).await?)
}

pub async fn get_by_id(id: i64, pool: &DbPool) -> Result<Doctor, AppError> {
    Ok(db::doctor::get_by_id(id, pool).await?)
}

async fn store_photo(form: &DoctorForm, static_dir: &Path) -> Result<Option<String>, AppError> {
    match &form.photo {
        Some(photo) => {
            let uploads_dir = static_dir.join(upload::UPLOADS_SUBDIR);
            Ok(Some(upload::save_photo(photo, &uploads_dir).await?))
        }
        None => Ok(None),
    }
}

/// Removes the file only once no doctor row points at it any more.
async fn release_photo(photo: &str, static_dir: &Path, pool: &DbPool) -> Result<(), AppError> {
    let users = db::doctor::count_by_photo(photo, pool).await?;
    if users == 0 {
        upload::remove_photo(photo, static_dir).await;
    } else {
        info!("keeping photo {} still used by {} doctor(s)", photo, users);
    }
    Ok(())
}

pub async fn create(form: DoctorForm, static_dir: &Path, pool: &DbPool) -> Result<i64, AppError> {
    if !form.has_required_fields() {
        return Err(AppError::MissingFields);
    }
    let photo = store_photo(&form, static_dir).await?;
    let id = db::doctor::create(
        form.name.trim(),
        form.specialization.trim(),
        form.schedule.trim(),
        photo.as_deref(),
        pool,
    )
    .await?;
    info!("registered doctor {} ({})", id, form.name);
    Ok(id)
}

/// Without a new photo the stored one is kept.
pub async fn update(
    id: i64,
    form: DoctorForm,
    static_dir: &Path,
    pool: &DbPool,
) -> Result<Doctor, AppError> {
    let current = db::doctor::get_by_id(id, pool).await?;
    if !form.has_required_fields() {
        return Err(AppError::MissingFields);
    }
    let photo = store_photo(&form, static_dir).await?;
    let status = form
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(current.status.as_str());
    db::doctor::update(
        id,
        form.name.trim(),
        form.specialization.trim(),
        form.schedule.trim(),
        status,
        photo.as_deref(),
        pool,
    )
    .await?;
    if let (Some(old), Some(new)) = (&current.photo, &photo) {
        if old != new {
            release_photo(old, static_dir, pool).await?;
        }
    }
    info!("updated doctor {}", id);
    Ok(db::doctor::get_by_id(id, pool).await?)
}

/// Deletes the doctor; appointments go with it through the foreign key cascade.
pub async fn delete(id: i64, static_dir: &Path, pool: &DbPool) -> Result<Doctor, AppError> {
    let doctor = db::doctor::get_by_id(id, pool).await?;
    if db::doctor::delete(id, pool).await? == 0 {
        return Err(AppError::NotFound);
    }
    if let Some(photo) = &doctor.photo {
        release_photo(photo, static_dir, pool).await?;
    }
    info!("deleted doctor {} ({})", id, doctor.name);
    Ok(doctor)
}
