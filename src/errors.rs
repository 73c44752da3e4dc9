use actix_web::{
    error,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use derive_more::{Display, Error};

use crate::views;

#[derive(Debug, Display, Error, PartialEq, Eq)]
pub enum AppError {
    #[display(fmt = "Something went wrong, please try again.")]
    InternalError,

    #[display(fmt = "Invalid form submission.")]
    BadClientData,

    #[display(fmt = "Not found")]
    NotFound,

    #[display(fmt = "Passwords do not match!")]
    PasswordMismatch,

    #[display(fmt = "Email already registered.")]
    EmailTaken,

    #[display(fmt = "Invalid email or password.")]
    InvalidCredentials,

    #[display(fmt = "Invalid admin credentials")]
    InvalidAdminCredentials,

    #[display(fmt = "You are not authorized to cancel this appointment.")]
    Unauthorized,

    #[display(fmt = "You are not authorized to view this appointment.")]
    Forbidden,

    #[display(fmt = "Selected doctor does not exist.")]
    UnknownDoctor,

    #[display(fmt = "All fields are required.")]
    MissingFields,

    #[display(fmt = "Invalid date or time.")]
    InvalidSchedule,

    #[display(fmt = "Invalid file type. Allowed: png, jpg, jpeg, gif.")]
    InvalidFileType,
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound,
            other => {
                log::error!("database error: {:?}", other);
                AppError::InternalError
            }
        }
    }
}

impl error::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::NotFound => views::not_found(),
            other => views::error_page(&other.to_string()),
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::html())
            .body(body)
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            AppError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Unauthorized | AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::InvalidCredentials | AppError::InvalidAdminCredentials => {
                StatusCode::UNAUTHORIZED
            }
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
