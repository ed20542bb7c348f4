/// Entity store abstraction and its PostgreSQL implementation
///
/// The store owns all durable state and the uniqueness constraints that the
/// interaction ledger and membership service rely on. Services receive the
/// store as an explicit `Arc<dyn EntityStore>` dependency.
pub mod postgres;

pub use postgres::{create_pool, ensure_schema, PgStore};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    Content, ContentWithInteractions, Interaction, InteractionType, Membership, NewInteraction,
};

/// A comment row joined with its author, as returned by the store
#[derive(Debug, Clone)]
pub struct CommentRecord {
    pub user_id: Uuid,
    pub user_name: String,
    /// Nullable: historical rows may have been created without a payload
    pub payload: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Durable storage interface for the feed core.
///
/// Uniqueness of (user, content, type) interactions and (user, business)
/// memberships is enforced by the implementation; a create that loses a
/// concurrent race must fail with `AppError::Conflict`.
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn business_id_by_slug(&self, slug: &str) -> Result<Option<Uuid>>;

    /// All content of a business, each with its full interaction type list
    async fn contents_by_business(&self, business_id: Uuid)
        -> Result<Vec<ContentWithInteractions>>;

    async fn content_by_id(&self, content_id: Uuid) -> Result<Option<Content>>;

    async fn interactions_by_user_and_business(
        &self,
        user_id: Uuid,
        business_id: Uuid,
    ) -> Result<Vec<Interaction>>;

    async fn interactions_by_user_and_content(
        &self,
        user_id: Uuid,
        content_id: Uuid,
    ) -> Result<Vec<Interaction>>;

    /// Grouped interaction counts for one content item; absent types are
    /// simply missing from the map
    async fn interaction_counts_by_type(
        &self,
        content_id: Uuid,
    ) -> Result<HashMap<InteractionType, i64>>;

    async fn comments_by_content(&self, content_id: Uuid) -> Result<Vec<CommentRecord>>;

    async fn find_interaction(
        &self,
        user_id: Uuid,
        content_id: Uuid,
        interaction_type: InteractionType,
    ) -> Result<Option<Interaction>>;

    /// Fails with `Conflict` when the (user, content, type) row already exists
    async fn create_interaction(&self, interaction: NewInteraction) -> Result<Interaction>;

    /// Returns whether a row was actually deleted
    async fn delete_interaction(
        &self,
        user_id: Uuid,
        content_id: Uuid,
        interaction_type: InteractionType,
    ) -> Result<bool>;

    async fn find_membership(&self, user_id: Uuid, business_id: Uuid)
        -> Result<Option<Membership>>;

    async fn membership_by_id(&self, membership_id: Uuid) -> Result<Option<Membership>>;

    async fn memberships_by_user(&self, user_id: Uuid) -> Result<Vec<Membership>>;

    /// Fails with `Conflict` when the (user, business) pair already exists
    async fn create_membership(&self, user_id: Uuid, business_id: Uuid) -> Result<Membership>;

    async fn delete_membership(&self, membership_id: Uuid) -> Result<bool>;
}
