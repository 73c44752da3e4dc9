use actix_web::{get, web, HttpResponse};

use crate::{
    errors::AppError,
    service::{self, session::Session},
    views, DbPool,
};

use super::{login_required, render};

#[get("/dashboard")]
pub async fn dashboard(
    session: Session,
    pool_state: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let conn: &DbPool = pool_state.get_ref();
    let Some(user) = service::auth::current_user(&session, conn).await? else {
        return Ok(login_required(&session));
    };
    let upcoming = service::appointment::get_upcoming(user.id, conn).await?;
    let doctors = service::doctor::get_all(conn).await?;
    Ok(render(&session, "Dashboard", views::dashboard(&user, &upcoming, &doctors)))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(dashboard);
}
