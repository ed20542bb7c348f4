/// HTTP middleware for feedpulse
///
/// Identity is established upstream: the gateway terminates auth and
/// forwards the caller's identity as an `X-User-Id` header. The middleware
/// lifts it into request extensions so handlers share one extraction path.
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{error::ErrorUnauthorized, Error, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use uuid::Uuid;

use crate::error::AppError;

pub const USER_ID_HEADER: &str = "X-User-Id";

/// Extracted user identifier stored in request extensions
#[derive(Debug, Clone, Copy)]
pub struct UserId(pub Uuid);

/// Read the authenticated user id out of request extensions
pub fn require_user_id(req: &HttpRequest) -> Result<Uuid, AppError> {
    req.extensions()
        .get::<UserId>()
        .map(|u| u.0)
        .ok_or_else(|| AppError::Unauthorized("Missing user context".to_string()))
}

/// Actix middleware that requires a forwarded user identity header
pub struct IdentityMiddleware;

impl<S, B> Transform<S, ServiceRequest> for IdentityMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = IdentityMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(IdentityMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct IdentityMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for IdentityMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let header = match req
                .headers()
                .get(USER_ID_HEADER)
                .and_then(|h| h.to_str().ok())
            {
                Some(header) => header,
                None => {
                    let response = ErrorUnauthorized("Missing user identity header")
                        .error_response()
                        .map_into_right_body();
                    return Ok(req.into_response(response));
                }
            };

            let user_id = match Uuid::parse_str(header) {
                Ok(user_id) => user_id,
                Err(_) => {
                    let response = ErrorUnauthorized("Invalid user ID")
                        .error_response()
                        .map_into_right_body();
                    return Ok(req.into_response(response));
                }
            };

            req.extensions_mut().insert(UserId(user_id));

            service.call(req).await.map(|res| res.map_into_left_body())
        })
    }
}
