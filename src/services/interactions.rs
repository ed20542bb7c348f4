/// Interaction ledger
///
/// Enforces the interaction invariants on top of the entity store:
/// at most one interaction per (user, content, type), an implicit view
/// before any non-VIEW interaction, payload presence rules, and share
/// idempotency. The store's uniqueness constraint is the authoritative
/// guard; the existence checks here exist to produce friendly messages.
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::db::EntityStore;
use crate::error::{AppError, Result};
use crate::models::{Interaction, InteractionType, NewInteraction};

#[derive(Clone)]
pub struct InteractionLedger {
    store: Arc<dyn EntityStore>,
}

impl InteractionLedger {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// Record an interaction for a user on a content item.
    ///
    /// Fails with `NotFound` when the content does not exist, `Validation`
    /// when the payload rules are violated, and `Conflict` when the same
    /// (user, content, type) interaction already exists. Recording any
    /// non-VIEW interaction first ensures a VIEW exists for the pair.
    pub async fn record(
        &self,
        user_id: Uuid,
        content_id: Uuid,
        interaction_type: InteractionType,
        payload: Option<String>,
    ) -> Result<Interaction> {
        validate_payload(interaction_type, payload.as_deref())?;

        let content = self
            .store
            .content_by_id(content_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Content not found".to_string()))?;

        if interaction_type != InteractionType::View {
            self.ensure_view(user_id, content_id, content.business_id)
                .await?;
        }

        let conflict_message = conflict_message(interaction_type);
        if self
            .store
            .find_interaction(user_id, content_id, interaction_type)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(conflict_message));
        }

        debug!(
            %user_id, %content_id, interaction_type = interaction_type.as_str(),
            "recording interaction"
        );

        self.store
            .create_interaction(NewInteraction {
                user_id,
                content_id,
                business_id: content.business_id,
                interaction_type,
                payload,
            })
            .await
            .map_err(|err| match err {
                // Lost the race against a concurrent duplicate submission.
                AppError::Conflict(_) => AppError::Conflict(conflict_message),
                other => other,
            })
    }

    /// Remove a previously recorded interaction.
    ///
    /// Fails with `NotFound` when no such interaction exists.
    pub async fn remove(
        &self,
        user_id: Uuid,
        content_id: Uuid,
        interaction_type: InteractionType,
    ) -> Result<()> {
        if self
            .store
            .find_interaction(user_id, content_id, interaction_type)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Interaction not found".to_string()));
        }

        let deleted = self
            .store
            .delete_interaction(user_id, content_id, interaction_type)
            .await?;
        if !deleted {
            return Err(AppError::NotFound("Interaction not found".to_string()));
        }

        Ok(())
    }

    /// Create a VIEW row for (user, content) if one does not exist.
    ///
    /// A concurrent racer creating the same view is fine: the view exists,
    /// which is all that was required.
    async fn ensure_view(&self, user_id: Uuid, content_id: Uuid, business_id: Uuid) -> Result<()> {
        if self
            .store
            .find_interaction(user_id, content_id, InteractionType::View)
            .await?
            .is_some()
        {
            return Ok(());
        }

        match self
            .store
            .create_interaction(NewInteraction {
                user_id,
                content_id,
                business_id,
                interaction_type: InteractionType::View,
                payload: None,
            })
            .await
        {
            Ok(_) | Err(AppError::Conflict(_)) => Ok(()),
            Err(err) => Err(err),
        }
    }
}

fn conflict_message(interaction_type: InteractionType) -> String {
    match interaction_type {
        InteractionType::Share => "You have already shared this content".to_string(),
        other => format!("You already {} this content", other.past_tense()),
    }
}

/// COMMENT and SHARE must carry a payload (comment text or share token);
/// VIEW, CLICK, and LIKE must not.
fn validate_payload(interaction_type: InteractionType, payload: Option<&str>) -> Result<()> {
    match (interaction_type.requires_payload(), payload) {
        (true, None) => Err(AppError::Validation(format!(
            "{} requires a payload",
            interaction_type.as_str()
        ))),
        (false, Some(_)) => Err(AppError::Validation(format!(
            "{} should not include a payload",
            interaction_type.as_str()
        ))),
        _ => Ok(()),
    }
}
