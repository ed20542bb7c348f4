use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::handlers::AppState;
use crate::middleware::require_user_id;

#[derive(Debug, Deserialize, Validate)]
pub struct FeedQueryParams {
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    #[validate(range(min = 1))]
    pub limit: Option<u32>,
}

/// GET /api/feed/{business_slug}
///
/// Personalized ranked feed for the authenticated user, as
/// `{data, pagination: {page, limit, total, totalPages, hasMore}}`.
pub async fn get_feed(
    path: web::Path<String>,
    query: web::Query<FeedQueryParams>,
    http_req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let user_id = require_user_id(&http_req)?;
    query
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let business_slug = path.into_inner();
    let page = query.page.unwrap_or(1) as usize;
    let limit = (query.limit.map(|l| l as usize))
        .unwrap_or(state.feed_config.default_page_size)
        .min(state.feed_config.max_page_size);

    debug!(%user_id, business_slug, page, limit, "feed request");

    let response = state
        .feed
        .get_ranked_feed(user_id, &business_slug, page, limit)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/feed/content/{content_id}
pub async fn get_content_details(
    path: web::Path<Uuid>,
    http_req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let user_id = require_user_id(&http_req)?;
    let content_id = path.into_inner();

    let detail = state.feed.get_content_details(content_id, user_id).await?;

    Ok(HttpResponse::Ok().json(detail))
}
