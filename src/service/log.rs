use std::{
    future::{ready, Ready},
    io::Write,
    time::Instant,
};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use colored::{ColoredString, Colorize};
use env_logger::{Builder, Env};
use futures_util::future::LocalBoxFuture;
use log::{info, Level};
use uuid::Uuid;

use super::session::Session;

/// Tags every request with an id and logs its outcome together with the
/// session it ran under. Must wrap `SessionMiddleware` to see the session.
pub struct LoggerMiddleware;

impl<S, B> Transform<S, ServiceRequest> for LoggerMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = LoggerMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LoggerMiddlewareService { service }))
    }
}

pub struct LoggerMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for LoggerMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request_id = Uuid::new_v4().simple().to_string();
        let line = format!("{} {}", req.method(), req.uri());
        let started = Instant::now();
        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;
            // the session middleware has stored the final session by now
            let who = res
                .request()
                .extensions()
                .get::<Session>()
                .map(Session::describe)
                .unwrap_or_else(|| "-".to_string());
            info!(
                "[{}] {} as {} -> {} in {:.1?}",
                &request_id[..8],
                line,
                who,
                res.status(),
                started.elapsed()
            );
            Ok(res)
        })
    }
}

fn level_tag(level: Level) -> ColoredString {
    let tag = format!("{:<5}", level.as_str());
    match level {
        Level::Error => tag.red().bold(),
        Level::Warn => tag.yellow().bold(),
        Level::Info => tag.green(),
        Level::Debug => tag.blue(),
        Level::Trace => tag.dimmed(),
    }
}

/// Reads the filter from `RUST_LOG`, falling back to `info`.
pub fn init_logger() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {} {}",
                level_tag(record.level()),
                record.target().dimmed(),
                record.args()
            )
        })
        .init();
}
