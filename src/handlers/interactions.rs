use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::handlers::AppState;
use crate::middleware::require_user_id;
use crate::models::InteractionType;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordInteractionRequest {
    #[serde(rename = "type")]
    pub interaction_type: InteractionType,
    pub content_id: Uuid,
    #[validate(length(min = 1, max = 2048))]
    pub payload: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveInteractionQuery {
    #[serde(rename = "type")]
    pub interaction_type: InteractionType,
    pub content_id: Uuid,
}

/// POST /api/interactions
pub async fn record_interaction(
    body: web::Json<RecordInteractionRequest>,
    http_req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let user_id = require_user_id(&http_req)?;
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let request = body.into_inner();

    state
        .memberships
        .require_member_for_content(user_id, request.content_id)
        .await?;

    let interaction = state
        .ledger
        .record(
            user_id,
            request.content_id,
            request.interaction_type,
            request.payload,
        )
        .await?;

    Ok(HttpResponse::Created().json(interaction))
}

/// DELETE /api/interactions?type=LIKE&contentId=...
///
/// Only LIKE, COMMENT, and SHARE removals are exposed; views and clicks
/// stay on the ledger once recorded.
pub async fn remove_interaction(
    query: web::Query<RemoveInteractionQuery>,
    http_req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let user_id = require_user_id(&http_req)?;

    if !matches!(
        query.interaction_type,
        InteractionType::Like | InteractionType::Comment | InteractionType::Share
    ) {
        return Err(AppError::Validation(format!(
            "{} interactions cannot be removed",
            query.interaction_type.as_str()
        )));
    }

    state
        .ledger
        .remove(user_id, query.content_id, query.interaction_type)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
