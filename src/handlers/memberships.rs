use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::Result;
use crate::handlers::AppState;
use crate::middleware::require_user_id;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinBusinessRequest {
    pub business_id: Uuid,
}

/// POST /api/memberships
pub async fn join_business(
    body: web::Json<JoinBusinessRequest>,
    http_req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let user_id = require_user_id(&http_req)?;

    let membership = state
        .memberships
        .join_business(user_id, body.business_id)
        .await?;

    Ok(HttpResponse::Created().json(membership))
}

/// GET /api/memberships
pub async fn list_memberships(
    http_req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let user_id = require_user_id(&http_req)?;

    let memberships = state.memberships.memberships_for(user_id).await?;

    Ok(HttpResponse::Ok().json(memberships))
}

/// DELETE /api/memberships/{membership_id}
pub async fn leave_business(
    path: web::Path<Uuid>,
    http_req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let user_id = require_user_id(&http_req)?;

    state
        .memberships
        .leave_business(user_id, path.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
