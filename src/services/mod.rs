/// Business logic layer for feedpulse
///
/// - `enrichment`: pure content/metrics join
/// - `ranking`: pure per-user scoring and ordering
/// - `pagination`: ranked-sequence page slicing
/// - `interactions`: interaction ledger and its invariants
/// - `memberships`: membership lifecycle and guards
/// - `feed`: request orchestration and detail assembly
pub mod enrichment;
pub mod feed;
pub mod interactions;
pub mod memberships;
pub mod pagination;
pub mod ranking;

pub use feed::FeedService;
pub use interactions::InteractionLedger;
pub use memberships::MembershipService;
pub use ranking::RankingEngine;
