/// HTTP handlers for feedpulse
///
/// Thin controllers: extract identity and parameters, validate, delegate to
/// the service layer, and serialize responses. All domain rules live in
/// `services`.
pub mod feed;
pub mod interactions;
pub mod memberships;

use crate::config::FeedConfig;
use crate::services::{FeedService, InteractionLedger, MembershipService};

/// Shared handler state, constructed once at startup with explicit
/// dependencies
#[derive(Clone)]
pub struct AppState {
    pub feed: FeedService,
    pub ledger: InteractionLedger,
    pub memberships: MembershipService,
    pub feed_config: FeedConfig,
}

pub use feed::{get_content_details, get_feed};
pub use interactions::{record_interaction, remove_interaction};
pub use memberships::{join_business, leave_business, list_memberships};
