/// Membership management
///
/// Joining is unique per (user, business); interacting with content requires
/// membership in the content's business.
use std::sync::Arc;
use uuid::Uuid;

use crate::db::EntityStore;
use crate::error::{AppError, Result};
use crate::models::Membership;

#[derive(Clone)]
pub struct MembershipService {
    store: Arc<dyn EntityStore>,
}

impl MembershipService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// Join a business. Fails with `Conflict` when already a member.
    pub async fn join_business(&self, user_id: Uuid, business_id: Uuid) -> Result<Membership> {
        if self
            .store
            .find_membership(user_id, business_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "Already a member of this business".to_string(),
            ));
        }

        self.store
            .create_membership(user_id, business_id)
            .await
            .map_err(|err| match err {
                AppError::Conflict(_) => {
                    AppError::Conflict("Already a member of this business".to_string())
                }
                other => other,
            })
    }

    /// Leave a business by membership id. Only the owning user may leave.
    pub async fn leave_business(&self, user_id: Uuid, membership_id: Uuid) -> Result<()> {
        let membership = self
            .store
            .membership_by_id(membership_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Membership not found".to_string()))?;

        if membership.user_id != user_id {
            return Err(AppError::Forbidden("Not your membership".to_string()));
        }

        self.store.delete_membership(membership_id).await?;
        Ok(())
    }

    pub async fn memberships_for(&self, user_id: Uuid) -> Result<Vec<Membership>> {
        self.store.memberships_by_user(user_id).await
    }

    /// Require that the user is a member of the business owning the given
    /// content. Fails with `NotFound` when the content does not exist and
    /// `Forbidden` when no membership exists.
    pub async fn require_member_for_content(&self, user_id: Uuid, content_id: Uuid) -> Result<()> {
        let content = self
            .store
            .content_by_id(content_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Content not found".to_string()))?;

        self.store
            .find_membership(user_id, content.business_id)
            .await?
            .ok_or_else(|| {
                AppError::Forbidden(
                    "You must be a member to interact with this content".to_string(),
                )
            })?;

        Ok(())
    }
}
