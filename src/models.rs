use std::fmt;

use chrono::Utc;
use sqlx::prelude::FromRow;

use crate::errors::AppError;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub fullname: String,
    pub email: String,
    pub contact: String,
    pub address: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub specialization: String,
    pub schedule: String,
    pub status: String,
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentStatus {
    Pending,
    Approved,
    Declined,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Approved => "Approved",
            AppointmentStatus::Declined => "Declined",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for AppointmentStatus {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "Pending" => Ok(AppointmentStatus::Pending),
            "Approved" => Ok(AppointmentStatus::Approved),
            "Declined" => Ok(AppointmentStatus::Declined),
            _ => Err(AppError::InternalError),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Appointment {
    pub id: i64,
    pub user_id: i64,
    pub doctor_id: i64,
    pub name: String,
    pub date: String,
    pub time: String,
    pub reason: String,
    #[sqlx(try_from = "String")]
    pub status: AppointmentStatus,
    pub created_at: chrono::DateTime<Utc>,
}

/// Appointment joined with the doctor it was booked with.
#[derive(Debug, Clone, FromRow)]
pub struct AppointmentDetails {
    pub id: i64,
    pub user_id: i64,
    pub doctor_id: i64,
    pub name: String,
    pub date: String,
    pub time: String,
    pub reason: String,
    #[sqlx(try_from = "String")]
    pub status: AppointmentStatus,
    pub created_at: chrono::DateTime<Utc>,
    pub doctor_name: String,
    pub doctor_specialization: String,
}

impl AppointmentDetails {
    pub fn is_upcoming(&self) -> bool {
        self.status != AppointmentStatus::Declined
    }
}
