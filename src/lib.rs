/// Feedpulse
///
/// Personalized feed ranking service for a multi-tenant content platform.
/// Businesses publish content, members interact with it, and the feed
/// pipeline turns content plus interaction history into a scored, paginated,
/// per-user ordering.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers (thin controllers)
/// - `models`: Persisted entities and derived per-request records
/// - `services`: Enrichment, ranking, pagination, ledger, memberships, feed
/// - `db`: Entity store abstraction and PostgreSQL implementation
/// - `middleware`: Forwarded-identity extraction
/// - `error`: Error taxonomy and HTTP mapping
/// - `config`: Environment-driven configuration
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
