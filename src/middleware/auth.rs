use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::{ready, Ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use uuid::Uuid;

use crate::error::AppError;
use crate::security::jwt::JwtKeys;

/// User ID extracted from a verified access token
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub Uuid);

/// JWT authentication middleware. Routes wrapped with this reject requests
/// without a valid Bearer access token; handlers receive the caller via the
/// `AuthenticatedUser` extractor.
pub struct JwtAuth;

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = JwtAuthService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthService {
            service: Rc::new(service),
        }))
    }
}

pub struct JwtAuthService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let keys = req
                .app_data::<web::Data<JwtKeys>>()
                .cloned()
                .ok_or_else(|| {
                    Error::from(AppError::Internal("JWT keys not configured".into()))
                })?;

            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .ok_or_else(|| {
                    Error::from(AppError::Unauthorized("Missing Authorization header".into()))
                })?;

            let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
                Error::from(AppError::Unauthorized(
                    "Invalid Authorization header format".into(),
                ))
            })?;

            let claims = keys.verify_access(token).map_err(|e| {
                tracing::warn!("JWT validation failed: {}", e);
                Error::from(e)
            })?;

            let user_id = claims.user_id()?;
            req.extensions_mut().insert(AuthenticatedUser(user_id));

            service.call(req).await
        })
    }
}

/// FromRequest implementation for AuthenticatedUser
impl actix_web::FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(*user)),
            None => ready(Err(Error::from(AppError::Unauthorized(
                "User not authenticated".into(),
            )))),
        }
    }
}
