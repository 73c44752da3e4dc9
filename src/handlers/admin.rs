use actix_multipart::{Multipart, MultipartError};
use actix_web::{get, post, web, HttpResponse};
use futures_util::TryStreamExt;
use log::warn;

use crate::{
    config::Config,
    dto::DoctorForm,
    errors::AppError,
    service::{
        self,
        session::{FlashLevel, Session},
        upload::PhotoUpload,
    },
    views, DbPool,
};

use super::{admin_required, flash_redirect, recover, render};

fn bad_multipart(err: MultipartError) -> AppError {
    warn!("malformed multipart body: {}", err);
    AppError::BadClientData
}

/// Collects text fields and the optional `photo` file part.
async fn read_doctor_form(mut payload: Multipart) -> Result<DoctorForm, AppError> {
    let mut form = DoctorForm::default();
    while let Some(mut field) = payload.try_next().await.map_err(bad_multipart)? {
        let name = field.name().to_string();
        let filename = field.content_disposition().get_filename().map(str::to_string);
        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(bad_multipart)? {
            bytes.extend_from_slice(&chunk);
        }
        match filename {
            // an empty file input still sends a part, with an empty filename
            Some(filename) if name == "photo" => {
                if !filename.is_empty() {
                    form.photo = Some(PhotoUpload { filename, bytes });
                }
            }
            _ => {
                let value = String::from_utf8(bytes).map_err(|_| AppError::BadClientData)?;
                form.set_field(&name, value);
            }
        }
    }
    Ok(form)
}

#[get("/admin_dashboard")]
pub async fn admin_dashboard(
    session: Session,
    pool_state: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    if !session.is_admin() {
        return Ok(admin_required(&session));
    }
    let conn: &DbPool = pool_state.get_ref();
    let appointments = service::appointment::get_all(conn).await?;
    let doctors = service::doctor::get_all(conn).await?;
    Ok(render(&session, "Admin Dashboard", views::admin_dashboard(&appointments, &doctors)))
}

#[get("/doctor_register")]
pub async fn doctor_register_page(session: Session) -> HttpResponse {
    if !session.is_admin() {
        return admin_required(&session);
    }
    render(&session, "Register Doctor", views::doctor_register())
}

#[post("/doctor_register")]
pub async fn doctor_register(
    session: Session,
    payload: Multipart,
    pool_state: web::Data<DbPool>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    if !session.is_admin() {
        return Ok(admin_required(&session));
    }
    let form = match read_doctor_form(payload).await {
        Ok(form) => form,
        Err(err) => return recover(&session, err, "/doctor_register"),
    };
    let name = form.name.trim().to_string();
    match service::doctor::create(form, &config.static_dir, pool_state.get_ref()).await {
        Ok(_) => Ok(flash_redirect(
            &session,
            FlashLevel::Success,
            format!("Doctor {name} added successfully!"),
            "/admin_dashboard",
        )),
        Err(err) => recover(&session, err, "/doctor_register"),
    }
}

#[get("/admin/doctor/{id}/edit")]
pub async fn edit_doctor_page(
    session: Session,
    id: web::Path<i64>,
    pool_state: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    if !session.is_admin() {
        return Ok(admin_required(&session));
    }
    let doctor = service::doctor::get_by_id(id.into_inner(), pool_state.get_ref()).await?;
    Ok(render(&session, "Edit Doctor", views::doctor_edit(&doctor)))
}

#[post("/admin/doctor/{id}/edit")]
pub async fn edit_doctor(
    session: Session,
    id: web::Path<i64>,
    payload: Multipart,
    pool_state: web::Data<DbPool>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    if !session.is_admin() {
        return Ok(admin_required(&session));
    }
    let id = id.into_inner();
    let back = format!("/admin/doctor/{id}/edit");
    let form = match read_doctor_form(payload).await {
        Ok(form) => form,
        Err(err) => return recover(&session, err, &back),
    };
    match service::doctor::update(id, form, &config.static_dir, pool_state.get_ref()).await {
        Ok(doctor) => Ok(flash_redirect(
            &session,
            FlashLevel::Success,
            format!("Doctor {} updated successfully!", doctor.name),
            "/admin_dashboard",
        )),
        Err(err) => recover(&session, err, &back),
    }
}

#[post("/admin/doctor/{id}/delete")]
pub async fn delete_doctor(
    session: Session,
    id: web::Path<i64>,
    pool_state: web::Data<DbPool>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    if !session.is_admin() {
        return Ok(admin_required(&session));
    }
    match service::doctor::delete(id.into_inner(), &config.static_dir, pool_state.get_ref()).await {
        Ok(doctor) => Ok(flash_redirect(
            &session,
            FlashLevel::Info,
            format!("Doctor {} deleted.", doctor.name),
            "/admin_dashboard",
        )),
        Err(err) => recover(&session, err, "/admin_dashboard"),
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(admin_dashboard)
        .service(doctor_register_page)
        .service(doctor_register)
        .service(edit_doctor_page)
        .service(edit_doctor)
        .service(delete_doctor);
}
