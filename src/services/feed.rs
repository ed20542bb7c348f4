/// Feed orchestration and content detail assembly
///
/// Pulls enriched content and the user's interaction history from the
/// entity store, runs the pure enrich/rank/paginate pipeline, and builds
/// response envelopes. Every request recomputes from current data; nothing
/// is cached between requests.
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::db::EntityStore;
use crate::error::{AppError, Result};
use crate::models::{
    CommentAuthor, CommentView, ContentDetail, EngagementCounts, EnrichedContent, FeedResponse,
    InteractionMarker, UserInteractionFlags,
};
use crate::services::enrichment::enrich;
use crate::services::pagination::paginate;
use crate::services::ranking::RankingEngine;

#[derive(Clone)]
pub struct FeedService {
    store: Arc<dyn EntityStore>,
    ranking: RankingEngine,
}

impl FeedService {
    pub fn new(store: Arc<dyn EntityStore>, ranking: RankingEngine) -> Self {
        Self { store, ranking }
    }

    /// Compute the ranked, paginated feed for a user within one business.
    pub async fn get_ranked_feed(
        &self,
        user_id: Uuid,
        business_slug: &str,
        page: usize,
        limit: usize,
    ) -> Result<FeedResponse> {
        let business_id = self
            .store
            .business_id_by_slug(business_slug)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Business with slug {business_slug} not found"))
            })?;

        let contents = self.store.contents_by_business(business_id).await?;
        let interactions = self
            .store
            .interactions_by_user_and_business(user_id, business_id)
            .await?;

        debug!(
            %user_id, %business_id,
            contents = contents.len(),
            interactions = interactions.len(),
            "computing ranked feed"
        );

        let enriched = enrich(&contents, &interactions);
        let markers: Vec<InteractionMarker> = interactions
            .iter()
            .map(InteractionMarker::from_interaction)
            .collect();

        let ranked = self.ranking.rank(Utc::now(), &enriched, &markers);

        let content_by_id: HashMap<Uuid, EnrichedContent> =
            enriched.into_iter().map(|c| (c.id, c)).collect();
        let (data, meta) = paginate(&ranked, &content_by_id, page, limit);

        Ok(FeedResponse {
            data,
            pagination: meta.into(),
        })
    }

    /// Assemble the detail view of one content item for one user.
    pub async fn get_content_details(
        &self,
        content_id: Uuid,
        user_id: Uuid,
    ) -> Result<ContentDetail> {
        let content = self
            .store
            .content_by_id(content_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Content with ID {content_id} not found"))
            })?;

        let counts = self.store.interaction_counts_by_type(content_id).await?;
        let user_rows = self
            .store
            .interactions_by_user_and_content(user_id, content_id)
            .await?;
        let comments = self.store.comments_by_content(content_id).await?;

        Ok(ContentDetail {
            id: content.id,
            title: content.title,
            body: content.body,
            description: content.description,
            content_type: content.content_type,
            media_url: content.media_url,
            tags: content.tags,
            created_at: content.created_at,
            stats: EngagementCounts::from_counts(&counts),
            user_interactions: UserInteractionFlags::from_types(
                user_rows.iter().map(|i| i.interaction_type),
            ),
            comments: comments
                .into_iter()
                // Comments with a null payload are historical bad data;
                // drop them rather than surface empty entries.
                .filter_map(|record| {
                    record.payload.map(|payload| CommentView {
                        user: CommentAuthor {
                            id: record.user_id,
                            name: record.user_name,
                        },
                        payload,
                        created_at: record.created_at,
                    })
                })
                .collect(),
        })
    }
}
