/// Data models for feedpulse
///
/// This module defines:
/// - Persisted entities: `Content`, `Interaction`, `Membership`
/// - Derived, per-request records: `EnrichedContent`, `InteractionMarker`,
///   `RankedEntry`, `PaginationMeta`
/// - Response shapes: `FeedResponse`, `ContentDetail`
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;
use uuid::Uuid;

/// Kind of a published content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "content_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ContentType {
    Text,
    Longform,
    Image,
    Link,
}

/// Typed user action on a content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "interaction_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum InteractionType {
    View,
    Click,
    Like,
    Comment,
    Share,
}

impl InteractionType {
    pub const ALL: [InteractionType; 5] = [
        InteractionType::View,
        InteractionType::Click,
        InteractionType::Like,
        InteractionType::Comment,
        InteractionType::Share,
    ];

    /// COMMENT carries the comment text, SHARE carries a client-generated
    /// idempotency token. Every other type must not carry a payload.
    pub fn requires_payload(self) -> bool {
        matches!(self, InteractionType::Comment | InteractionType::Share)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InteractionType::View => "VIEW",
            InteractionType::Click => "CLICK",
            InteractionType::Like => "LIKE",
            InteractionType::Comment => "COMMENT",
            InteractionType::Share => "SHARE",
        }
    }

    /// Past-tense verb used in conflict messages ("You already liked ...")
    pub fn past_tense(self) -> &'static str {
        match self {
            InteractionType::View => "viewed",
            InteractionType::Click => "clicked",
            InteractionType::Like => "liked",
            InteractionType::Comment => "commented on",
            InteractionType::Share => "shared",
        }
    }
}

/// A content item owned by exactly one business
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub id: Uuid,
    pub business_id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub body: String,
    pub media_url: Option<String>,
    /// Ordered list; duplicates are allowed and never deduplicated
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// A recorded user action on a content item.
///
/// `business_id` is denormalized from the content at creation time and is
/// never updated afterward.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content_id: Uuid,
    pub business_id: Uuid,
    #[serde(rename = "type")]
    pub interaction_type: InteractionType,
    pub payload: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new interaction row
#[derive(Debug, Clone)]
pub struct NewInteraction {
    pub user_id: Uuid,
    pub content_id: Uuid,
    pub business_id: Uuid,
    pub interaction_type: InteractionType,
    pub payload: Option<String>,
}

/// A user's membership in a business
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub id: Uuid,
    pub user_id: Uuid,
    pub business_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A content row together with the types of every interaction recorded
/// against it (all users), as loaded by the entity store.
#[derive(Debug, Clone)]
pub struct ContentWithInteractions {
    pub content: Content,
    pub interaction_types: Vec<InteractionType>,
}

/// Which interaction types the requesting user has performed on a content
/// item. All five types are always present, defaulting to false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct UserInteractionFlags {
    pub view: bool,
    pub click: bool,
    pub like: bool,
    pub comment: bool,
    pub share: bool,
}

impl UserInteractionFlags {
    pub fn set(&mut self, interaction_type: InteractionType) {
        match interaction_type {
            InteractionType::View => self.view = true,
            InteractionType::Click => self.click = true,
            InteractionType::Like => self.like = true,
            InteractionType::Comment => self.comment = true,
            InteractionType::Share => self.share = true,
        }
    }

    pub fn from_types<I: IntoIterator<Item = InteractionType>>(types: I) -> Self {
        let mut flags = Self::default();
        for t in types {
            flags.set(t);
        }
        flags
    }
}

/// A content projection augmented with aggregate interaction counts and the
/// requesting user's own interaction flags. Built fresh per feed request,
/// never cached or mutated after construction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedContent {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub body: String,
    pub media_url: Option<String>,
    pub tags: Vec<String>,
    pub business_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub likes: i64,
    pub comments: i64,
    pub shares: i64,
    pub views: i64,
    pub clicks: i64,
    #[serde(rename = "user_interactions")]
    pub user_interactions: UserInteractionFlags,
}

/// Fixed-shape ranking input: one marker per interaction row, flags set
/// one-hot from the row's type. CLICK rows produce an all-false marker but
/// still occupy a slot in the per-content marker map.
#[derive(Debug, Clone, Copy)]
pub struct InteractionMarker {
    pub content_id: Uuid,
    pub liked: bool,
    pub commented: bool,
    pub shared: bool,
    pub viewed: bool,
}

impl InteractionMarker {
    pub fn from_interaction(interaction: &Interaction) -> Self {
        Self {
            content_id: interaction.content_id,
            liked: interaction.interaction_type == InteractionType::Like,
            commented: interaction.interaction_type == InteractionType::Comment,
            shared: interaction.interaction_type == InteractionType::Share,
            viewed: interaction.interaction_type == InteractionType::View,
        }
    }
}

/// Output of the ranking engine, consumed only by the paginator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedEntry {
    pub content_id: Uuid,
    pub score: f64,
}

/// Pagination metadata computed by the paginator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationMeta {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// Pagination envelope returned to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_more: bool,
}

impl From<PaginationMeta> for Pagination {
    fn from(meta: PaginationMeta) -> Self {
        Pagination {
            page: meta.page,
            limit: meta.limit,
            total: meta.total,
            total_pages: meta.total_pages,
            has_more: meta.page < meta.total_pages,
        }
    }
}

/// Ranked feed response: `{data, pagination}`
#[derive(Debug, Clone, Serialize)]
pub struct FeedResponse {
    pub data: Vec<EnrichedContent>,
    pub pagination: Pagination,
}

/// Aggregate interaction counts for a single content item, with absent
/// types defaulting to 0
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct EngagementCounts {
    pub likes: i64,
    pub views: i64,
    pub comments: i64,
    pub shares: i64,
    pub clicks: i64,
}

impl EngagementCounts {
    pub fn from_counts(counts: &HashMap<InteractionType, i64>) -> Self {
        Self {
            likes: counts.get(&InteractionType::Like).copied().unwrap_or(0),
            views: counts.get(&InteractionType::View).copied().unwrap_or(0),
            comments: counts.get(&InteractionType::Comment).copied().unwrap_or(0),
            shares: counts.get(&InteractionType::Share).copied().unwrap_or(0),
            clicks: counts.get(&InteractionType::Click).copied().unwrap_or(0),
        }
    }
}

/// Comment author reference embedded in content detail responses
#[derive(Debug, Clone, Serialize)]
pub struct CommentAuthor {
    pub id: Uuid,
    pub name: String,
}

/// A single comment on a content item
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub user: CommentAuthor,
    pub payload: String,
    pub created_at: DateTime<Utc>,
}

/// Assembled detail view of one content item for one requesting user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDetail {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub description: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub media_url: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub stats: EngagementCounts,
    #[serde(rename = "user_interactions")]
    pub user_interactions: UserInteractionFlags,
    pub comments: Vec<CommentView>,
}
