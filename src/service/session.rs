use std::{
    cell::RefCell,
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    cookie::{Cookie, SameSite},
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Danger,
    Warning,
    Info,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Danger => "danger",
            FlashLevel::Warning => "warning",
            FlashLevel::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

/// Everything the browser carries between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub admin: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flashes: Vec<Flash>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(flatten)]
    data: SessionData,
    exp: usize,
}

/// Signs and verifies the session cookie value.
#[derive(Clone)]
pub struct SessionCodec {
    encoding_key: jsonwebtoken::EncodingKey,
    decoding_key: jsonwebtoken::DecodingKey,
    ttl_secs: i64,
}

impl SessionCodec {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding_key: jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: jsonwebtoken::DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    pub fn encode(&self, data: &SessionData) -> Result<String, jsonwebtoken::errors::Error> {
        let exp = (chrono::Utc::now().timestamp() + self.ttl_secs).max(0) as usize;
        let claims = Claims {
            data: data.clone(),
            exp,
        };
        jsonwebtoken::encode(&jsonwebtoken::Header::default(), &claims, &self.encoding_key)
    }

    /// Fails on a bad signature or an expired token.
    pub fn decode(&self, token: &str) -> Result<SessionData, jsonwebtoken::errors::Error> {
        let validation = jsonwebtoken::Validation::default();
        let token_data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(token_data.claims.data)
    }
}

struct SessionInner {
    data: SessionData,
    changed: bool,
}

/// Request-scoped view of the session. Clones share state, so changes made by
/// a handler are seen by the middleware that writes the cookie back.
#[derive(Clone)]
pub struct Session(Rc<RefCell<SessionInner>>);

impl Session {
    pub fn new(data: SessionData) -> Self {
        Session(Rc::new(RefCell::new(SessionInner {
            data,
            changed: false,
        })))
    }

    pub fn user_id(&self) -> Option<i64> {
        self.0.borrow().data.user_id
    }

    pub fn is_admin(&self) -> bool {
        self.0.borrow().data.admin
    }

    /// Who the request runs as, for request logs.
    pub fn describe(&self) -> String {
        let inner = self.0.borrow();
        match (inner.data.admin, inner.data.user_id) {
            (true, Some(id)) => format!("admin+user#{id}"),
            (true, None) => "admin".to_string(),
            (false, Some(id)) => format!("user#{id}"),
            (false, None) => "anonymous".to_string(),
        }
    }

    pub fn login_user(&self, user_id: i64) {
        self.update(|data| data.user_id = Some(user_id));
    }

    pub fn logout_user(&self) {
        self.update(|data| data.user_id = None);
    }

    pub fn login_admin(&self) {
        self.update(|data| data.admin = true);
    }

    pub fn logout_admin(&self) {
        self.update(|data| data.admin = false);
    }

    pub fn flash(&self, level: FlashLevel, message: impl Into<String>) {
        let message = message.into();
        self.update(|data| data.flashes.push(Flash { level, message }));
    }

    /// Drains pending flashes; they are shown exactly once.
    pub fn take_flashes(&self) -> Vec<Flash> {
        let mut inner = self.0.borrow_mut();
        if inner.data.flashes.is_empty() {
            return Vec::new();
        }
        inner.changed = true;
        std::mem::take(&mut inner.data.flashes)
    }

    fn update(&self, f: impl FnOnce(&mut SessionData)) {
        let mut inner = self.0.borrow_mut();
        f(&mut inner.data);
        inner.changed = true;
    }

    fn take_changes(&self) -> Option<SessionData> {
        let mut inner = self.0.borrow_mut();
        if !inner.changed {
            return None;
        }
        inner.changed = false;
        Some(inner.data.clone())
    }
}

impl FromRequest for Session {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let session = req.extensions().get::<Session>().cloned();
        ready(session.ok_or_else(|| {
            error!("session requested on a route without SessionMiddleware");
            AppError::InternalError.into()
        }))
    }
}

pub struct SessionMiddleware {
    pub codec: SessionCodec,
}

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Transform = SessionMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService {
            service,
            codec: Rc::new(self.codec.clone()),
        }))
    }
}

pub struct SessionMiddlewareService<S> {
    service: S,
    codec: Rc<SessionCodec>,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let data = req
            .cookie(SESSION_COOKIE)
            .and_then(|cookie| match self.codec.decode(cookie.value()) {
                Ok(data) => Some(data),
                Err(err) => {
                    debug!("discarding session cookie: {}", err);
                    None
                }
            })
            .unwrap_or_default();
        let session = Session::new(data);
        req.extensions_mut().insert(session.clone());

        let codec = self.codec.clone();
        let fut = self.service.call(req);
        Box::pin(async move {
            let mut res = fut.await?;
            if let Some(data) = session.take_changes() {
                let token = codec
                    .encode(&data)
                    .map_err(actix_web::error::ErrorInternalServerError)?;
                let cookie = Cookie::build(SESSION_COOKIE, token)
                    .path("/")
                    .http_only(true)
                    .same_site(SameSite::Lax)
                    .finish();
                res.response_mut().add_cookie(&cookie)?;
            }
            Ok(res)
        })
    }
}
