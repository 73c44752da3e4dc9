use actix_web::{get, post, web, HttpResponse};

use crate::{
    dto::BookForm,
    errors::AppError,
    models::AppointmentStatus,
    service::{
        self,
        session::{FlashLevel, Session},
    },
    views, DbPool,
};

use super::{admin_required, flash_redirect, login_required, recover, render};

#[get("/book")]
pub async fn book_page(
    session: Session,
    pool_state: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let conn: &DbPool = pool_state.get_ref();
    let Some(user) = service::auth::current_user(&session, conn).await? else {
        return Ok(login_required(&session));
    };
    let doctors = service::doctor::get_all(conn).await?;
    Ok(render(&session, "Book an Appointment", views::book(&user, &doctors)))
}

#[post("/book")]
pub async fn book(
    session: Session,
    form: web::Form<BookForm>,
    pool_state: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let conn: &DbPool = pool_state.get_ref();
    let Some(user) = service::auth::current_user(&session, conn).await? else {
        return Ok(login_required(&session));
    };
    match service::appointment::create(&user, form.into_inner(), conn).await {
        Ok(_) => Ok(flash_redirect(
            &session,
            FlashLevel::Success,
            "Appointment booked successfully!",
            "/my_appointments",
        )),
        Err(err) => recover(&session, err, "/book"),
    }
}

#[get("/my_appointments")]
pub async fn my_appointments(
    session: Session,
    pool_state: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let conn: &DbPool = pool_state.get_ref();
    let Some(user) = service::auth::current_user(&session, conn).await? else {
        return Ok(login_required(&session));
    };
    let appointments = service::appointment::get_by_user(user.id, conn).await?;
    Ok(render(&session, "My Appointments", views::my_appointments(&appointments)))
}

#[get("/cancel/{id}")]
pub async fn cancel(
    session: Session,
    id: web::Path<i64>,
    pool_state: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let conn: &DbPool = pool_state.get_ref();
    let Some(user) = service::auth::current_user(&session, conn).await? else {
        return Ok(login_required(&session));
    };
    match service::appointment::cancel(id.into_inner(), user.id, conn).await {
        Ok(()) => Ok(flash_redirect(
            &session,
            FlashLevel::Success,
            "Appointment canceled successfully!",
            "/my_appointments",
        )),
        Err(err) => recover(&session, err, "/my_appointments"),
    }
}

#[get("/appointment/{id}")]
pub async fn detail(
    session: Session,
    id: web::Path<i64>,
    pool_state: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let conn: &DbPool = pool_state.get_ref();
    let user = service::auth::current_user(&session, conn).await?;
    let is_admin = session.is_admin();
    if user.is_none() && !is_admin {
        return Ok(login_required(&session));
    }
    let id = id.into_inner();
    match service::appointment::get_for_viewer(id, user.map(|u| u.id), is_admin, conn).await {
        Ok(appointment) => Ok(render(
            &session,
            &format!("Appointment #{id}"),
            views::appointment_detail(&appointment, is_admin),
        )),
        Err(err) => recover(&session, err, "/my_appointments"),
    }
}

async fn moderate(
    session: Session,
    id: i64,
    status: AppointmentStatus,
    conn: &DbPool,
) -> Result<HttpResponse, AppError> {
    if !session.is_admin() {
        return Ok(admin_required(&session));
    }
    match service::appointment::set_status(id, status, conn).await {
        Ok(()) => {
            let (level, verb) = match status {
                AppointmentStatus::Approved => (FlashLevel::Success, "approved"),
                _ => (FlashLevel::Danger, "declined"),
            };
            Ok(flash_redirect(
                &session,
                level,
                format!("Appointment ID {id} {verb}!"),
                "/admin_dashboard",
            ))
        }
        Err(err) => recover(&session, err, "/admin_dashboard"),
    }
}

#[post("/approve/{id}")]
pub async fn approve(
    session: Session,
    id: web::Path<i64>,
    pool_state: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    moderate(session, id.into_inner(), AppointmentStatus::Approved, pool_state.get_ref()).await
}

#[post("/decline/{id}")]
pub async fn decline(
    session: Session,
    id: web::Path<i64>,
    pool_state: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    moderate(session, id.into_inner(), AppointmentStatus::Declined, pool_state.get_ref()).await
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(book_page)
        .service(book)
        .service(my_appointments)
        .service(cancel)
        .service(detail)
        .service(approve)
        .service(decline);
}
