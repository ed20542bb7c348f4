#![allow(dead_code)]

//! In-memory entity store for integration tests.
//!
//! Mirrors the PostgreSQL store's observable behavior, including the
//! uniqueness constraints on interactions and memberships: a create that
//! would duplicate a row fails with `Conflict`, exactly like losing a race
//! against the database constraint.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use feedpulse::db::{CommentRecord, EntityStore};
use feedpulse::error::{AppError, Result};
use feedpulse::models::{
    Content, ContentType, ContentWithInteractions, Interaction, InteractionType, Membership,
    NewInteraction,
};

#[derive(Default)]
struct State {
    businesses: Vec<(Uuid, String)>,
    users: Vec<(Uuid, String)>,
    contents: Vec<Content>,
    interactions: Vec<Interaction>,
    memberships: Vec<Membership>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_business(&self, slug: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.inner
            .lock()
            .unwrap()
            .businesses
            .push((id, slug.to_string()));
        id
    }

    pub fn seed_user(&self, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.lock().unwrap().users.push((id, name.to_string()));
        id
    }

    pub fn seed_content(
        &self,
        business_id: Uuid,
        tags: &[&str],
        created_at: DateTime<Utc>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.lock().unwrap().contents.push(Content {
            id,
            business_id,
            title: "title".to_string(),
            description: "description".to_string(),
            content_type: ContentType::Text,
            body: "body".to_string(),
            media_url: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at,
        });
        id
    }

    pub fn seed_membership(&self, user_id: Uuid, business_id: Uuid) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.lock().unwrap().memberships.push(Membership {
            id,
            user_id,
            business_id,
            created_at: Utc::now(),
        });
        id
    }

    /// Insert an interaction row directly, bypassing the ledger. Panics on a
    /// uniqueness violation; seed data is expected to be consistent.
    pub fn seed_interaction(
        &self,
        user_id: Uuid,
        content_id: Uuid,
        interaction_type: InteractionType,
        payload: Option<&str>,
    ) {
        let mut state = self.inner.lock().unwrap();
        let business_id = state
            .contents
            .iter()
            .find(|c| c.id == content_id)
            .expect("seed_interaction: unknown content")
            .business_id;
        assert!(
            !state.interactions.iter().any(|i| i.user_id == user_id
                && i.content_id == content_id
                && i.interaction_type == interaction_type),
            "seed_interaction: duplicate row"
        );
        state.interactions.push(Interaction {
            id: Uuid::new_v4(),
            user_id,
            content_id,
            business_id,
            interaction_type,
            payload: payload.map(str::to_string),
            created_at: Utc::now(),
        });
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn business_id_by_slug(&self, slug: &str) -> Result<Option<Uuid>> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .businesses
            .iter()
            .find(|(_, s)| s == slug)
            .map(|(id, _)| *id))
    }

    async fn contents_by_business(
        &self,
        business_id: Uuid,
    ) -> Result<Vec<ContentWithInteractions>> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .contents
            .iter()
            .filter(|c| c.business_id == business_id)
            .map(|content| ContentWithInteractions {
                content: content.clone(),
                interaction_types: state
                    .interactions
                    .iter()
                    .filter(|i| i.content_id == content.id)
                    .map(|i| i.interaction_type)
                    .collect(),
            })
            .collect())
    }

    async fn content_by_id(&self, content_id: Uuid) -> Result<Option<Content>> {
        let state = self.inner.lock().unwrap();
        Ok(state.contents.iter().find(|c| c.id == content_id).cloned())
    }

    async fn interactions_by_user_and_business(
        &self,
        user_id: Uuid,
        business_id: Uuid,
    ) -> Result<Vec<Interaction>> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .interactions
            .iter()
            .filter(|i| i.user_id == user_id && i.business_id == business_id)
            .cloned()
            .collect())
    }

    async fn interactions_by_user_and_content(
        &self,
        user_id: Uuid,
        content_id: Uuid,
    ) -> Result<Vec<Interaction>> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .interactions
            .iter()
            .filter(|i| i.user_id == user_id && i.content_id == content_id)
            .cloned()
            .collect())
    }

    async fn interaction_counts_by_type(
        &self,
        content_id: Uuid,
    ) -> Result<HashMap<InteractionType, i64>> {
        let state = self.inner.lock().unwrap();
        let mut counts = HashMap::new();
        for interaction in state.interactions.iter().filter(|i| i.content_id == content_id) {
            *counts.entry(interaction.interaction_type).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn comments_by_content(&self, content_id: Uuid) -> Result<Vec<CommentRecord>> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .interactions
            .iter()
            .filter(|i| {
                i.content_id == content_id && i.interaction_type == InteractionType::Comment
            })
            .map(|i| CommentRecord {
                user_id: i.user_id,
                user_name: state
                    .users
                    .iter()
                    .find(|(id, _)| *id == i.user_id)
                    .map(|(_, name)| name.clone())
                    .unwrap_or_else(|| "unknown".to_string()),
                payload: i.payload.clone(),
                created_at: i.created_at,
            })
            .collect())
    }

    async fn find_interaction(
        &self,
        user_id: Uuid,
        content_id: Uuid,
        interaction_type: InteractionType,
    ) -> Result<Option<Interaction>> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .interactions
            .iter()
            .find(|i| {
                i.user_id == user_id
                    && i.content_id == content_id
                    && i.interaction_type == interaction_type
            })
            .cloned())
    }

    async fn create_interaction(&self, interaction: NewInteraction) -> Result<Interaction> {
        let mut state = self.inner.lock().unwrap();
        let duplicate = state.interactions.iter().any(|i| {
            i.user_id == interaction.user_id
                && i.content_id == interaction.content_id
                && i.interaction_type == interaction.interaction_type
        });
        if duplicate {
            return Err(AppError::Conflict("Duplicate record".to_string()));
        }

        let created = Interaction {
            id: Uuid::new_v4(),
            user_id: interaction.user_id,
            content_id: interaction.content_id,
            business_id: interaction.business_id,
            interaction_type: interaction.interaction_type,
            payload: interaction.payload,
            created_at: Utc::now(),
        };
        state.interactions.push(created.clone());
        Ok(created)
    }

    async fn delete_interaction(
        &self,
        user_id: Uuid,
        content_id: Uuid,
        interaction_type: InteractionType,
    ) -> Result<bool> {
        let mut state = self.inner.lock().unwrap();
        let before = state.interactions.len();
        state.interactions.retain(|i| {
            !(i.user_id == user_id
                && i.content_id == content_id
                && i.interaction_type == interaction_type)
        });
        Ok(state.interactions.len() < before)
    }

    async fn find_membership(
        &self,
        user_id: Uuid,
        business_id: Uuid,
    ) -> Result<Option<Membership>> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .memberships
            .iter()
            .find(|m| m.user_id == user_id && m.business_id == business_id)
            .cloned())
    }

    async fn membership_by_id(&self, membership_id: Uuid) -> Result<Option<Membership>> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .memberships
            .iter()
            .find(|m| m.id == membership_id)
            .cloned())
    }

    async fn memberships_by_user(&self, user_id: Uuid) -> Result<Vec<Membership>> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .memberships
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_membership(&self, user_id: Uuid, business_id: Uuid) -> Result<Membership> {
        let mut state = self.inner.lock().unwrap();
        let duplicate = state
            .memberships
            .iter()
            .any(|m| m.user_id == user_id && m.business_id == business_id);
        if duplicate {
            return Err(AppError::Conflict("Duplicate record".to_string()));
        }

        let membership = Membership {
            id: Uuid::new_v4(),
            user_id,
            business_id,
            created_at: Utc::now(),
        };
        state.memberships.push(membership.clone());
        Ok(membership)
    }

    async fn delete_membership(&self, membership_id: Uuid) -> Result<bool> {
        let mut state = self.inner.lock().unwrap();
        let before = state.memberships.len();
        state.memberships.retain(|m| m.id != membership_id);
        Ok(state.memberships.len() < before)
    }
}
