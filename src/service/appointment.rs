use chrono::{NaiveDate, NaiveTime};
use log::info;

use crate::{
    db::{self, appointment::NewAppointment},
    dto::BookForm,
    errors::AppError,
    models::{AppointmentDetails, AppointmentStatus, User},
    DbPool,
};

/// Normalizes the date to `YYYY-MM-DD` and the time to `HH:MM`.
pub fn normalize_slot(date: &str, time: &str) -> Result<(String, String), AppError> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidSchedule)?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time.trim(), "%H:%M:%S"))
        .map_err(|_| AppError::InvalidSchedule)?;
    Ok((date.format("%Y-%m-%d").to_string(), time.format("%H:%M").to_string()))
}

/// Books a Pending appointment for `user`. The doctor must exist; overlapping slots are allowed.
pub async fn create(user: &User, dto: BookForm, pool: &DbPool) -> Result<i64, AppError> {
    let doctor_id: i64 = dto.doctor_id.trim().parse().map_err(|_| AppError::UnknownDoctor)?;
    if !db::doctor::exists(doctor_id, pool).await? {
        return Err(AppError::UnknownDoctor);
    }
    let (date, time) = normalize_slot(&dto.date, &dto.time)?;
    let reason = dto.reason.trim();
    if reason.is_empty() {
        return Err(AppError::MissingFields);
    }
    let id = db::appointment::create(
        NewAppointment {
            user_id: user.id,
            doctor_id,
            name: &user.fullname,
            date: &date,
            time: &time,
            reason,
        },
        pool,
    )
    .await?;
    info!("user {} booked appointment {} with doctor {}", user.id, id, doctor_id);
    Ok(id)
}

pub async fn get_all(pool: &DbPool) -> Result<Vec<AppointmentDetails>, AppError> {
    Ok(db::appointment::get_all(pool).await?)
}

pub async fn get_by_user(user_id: i64, pool: &DbPool) -> Result<Vec<AppointmentDetails>, AppError> {
    Ok(db::appointment::get_by_user(user_id, pool).await?)
}

/// Appointments that are still relevant to the patient.
pub async fn get_upcoming(
    user_id: i64,
    pool: &DbPool,
) -> Result<Vec<AppointmentDetails>, AppError> {
    let all = db::appointment::get_by_user(user_id, pool).await?;
    Ok(all.into_iter().filter(AppointmentDetails::is_upcoming).collect())
}

pub async fn set_status(id: i64, status: AppointmentStatus, pool: &DbPool) -> Result<(), AppError> {
    match db::appointment::set_status(id, status, pool).await? {
        0 => Err(AppError::NotFound),
        _ => {
            info!("appointment {} is now {}", id, status);
            Ok(())
        }
    }
}

/// Only the owner may cancel; cancelling deletes the row.
pub async fn cancel(id: i64, user_id: i64, pool: &DbPool) -> Result<(), AppError> {
    let appointment = db::appointment::get_by_id(id, pool).await?;
    if appointment.user_id != user_id {
        return Err(AppError::Unauthorized);
    }
    db::appointment::delete(id, pool).await?;
    info!("user {} canceled appointment {}", user_id, id);
    Ok(())
}

/// Visible to the owning user and to the admin.
pub async fn get_for_viewer(
    id: i64,
    user_id: Option<i64>,
    is_admin: bool,
    pool: &DbPool,
) -> Result<AppointmentDetails, AppError> {
    let appointment = db::appointment::get_details(id, pool).await?;
    if is_admin || user_id == Some(appointment.user_id) {
        Ok(appointment)
    } else {
        Err(AppError::Forbidden)
    }
}
