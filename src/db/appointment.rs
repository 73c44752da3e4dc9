use chrono::Utc;

use crate::{
    models::{Appointment, AppointmentDetails, AppointmentStatus},
    DbPool,
};

const DETAILS_SELECT: &str = "SELECT a.id, a.user_id, a.doctor_id, a.name, a.date, a.time, a.reason,
        a.status, a.created_at, d.name AS doctor_name, d.specialization AS doctor_specialization
    FROM appointments a
    JOIN doctors d ON d.id = a.doctor_id";

pub struct NewAppointment<'a> {
    pub user_id: i64,
    pub doctor_id: i64,
    pub name: &'a str,
    pub date: &'a str,
    pub time: &'a str,
    pub reason: &'a str,
}

pub async fn create(appointment: NewAppointment<'_>, pool: &DbPool) -> Result<i64, sqlx::Error> {
    let res = sqlx::query(
        "INSERT INTO appointments (user_id, doctor_id, name, date, time, reason, status, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(appointment.user_id)
    .bind(appointment.doctor_id)
    .bind(appointment.name)
    .bind(appointment.date)
    .bind(appointment.time)
    .bind(appointment.reason)
    .bind(AppointmentStatus::Pending.as_str())
    .bind(Utc::now())
    .execute(pool)
    .await?;
    Ok(res.last_insert_rowid())
}

pub async fn get_by_id(id: i64, pool: &DbPool) -> Result<Appointment, sqlx::Error> {
    sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await
}

pub async fn get_details(id: i64, pool: &DbPool) -> Result<AppointmentDetails, sqlx::Error> {
    sqlx::query_as::<_, AppointmentDetails>(&format!("{DETAILS_SELECT} WHERE a.id = ?"))
        .bind(id)
        .fetch_one(pool)
        .await
}

pub async fn get_all(pool: &DbPool) -> Result<Vec<AppointmentDetails>, sqlx::Error> {
    sqlx::query_as::<_, AppointmentDetails>(&format!(
        "{DETAILS_SELECT} ORDER BY a.date, a.time, a.id"
    ))
    .fetch_all(pool)
    .await
}

pub async fn get_by_user(
    user_id: i64,
    pool: &DbPool,
) -> Result<Vec<AppointmentDetails>, sqlx::Error> {
    sqlx::query_as::<_, AppointmentDetails>(&format!(
        "{DETAILS_SELECT} WHERE a.user_id = ? ORDER BY a.date, a.time, a.id"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn set_status(
    id: i64,
    status: AppointmentStatus,
    pool: &DbPool,
) -> Result<u64, sqlx::Error> {
    let res = sqlx::query("UPDATE appointments SET status = ? WHERE id = ?")
        .bind(status.as_str())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

pub async fn delete(id: i64, pool: &DbPool) -> Result<u64, sqlx::Error> {
    let res = sqlx::query("DELETE FROM appointments WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}
