use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use feedpulse::db::{create_pool, ensure_schema, EntityStore, PgStore};
use feedpulse::handlers::{self, AppState};
use feedpulse::middleware::IdentityMiddleware;
use feedpulse::services::{FeedService, InteractionLedger, MembershipService, RankingEngine};
use feedpulse::Config;

struct HealthState {
    db_pool: PgPool,
}

async fn health_summary(state: web::Data<HealthState>) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(&state.db_pool).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "feedpulse",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "feedpulse"
        })),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    info!(env = %config.app.env, "starting feedpulse");

    let pool = create_pool(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("failed to connect to database: {e}"))?;
    ensure_schema(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("failed to ensure schema: {e}"))?;

    let store: Arc<dyn EntityStore> = Arc::new(PgStore::new(pool.clone()));
    let state = AppState {
        feed: FeedService::new(store.clone(), RankingEngine::new()),
        ledger: InteractionLedger::new(store.clone()),
        memberships: MembershipService::new(store),
        feed_config: config.feed.clone(),
    };

    let health_state = web::Data::new(HealthState { db_pool: pool });
    let app_state = web::Data::new(state);
    let allowed_origins = config.cors.allowed_origins.clone();

    let bind_addr = (config.app.host.clone(), config.app.port);
    info!(host = %config.app.host, port = config.app.port, "binding HTTP server");

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "DELETE"])
            .allow_any_header()
            .max_age(3600);
        for origin in allowed_origins.split(',').map(str::trim) {
            if !origin.is_empty() {
                cors = cors.allowed_origin(origin);
            }
        }

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(health_state.clone())
            .app_data(app_state.clone())
            .route("/health", web::get().to(health_summary))
            .service(
                web::scope("/api")
                    .wrap(IdentityMiddleware)
                    .route("/feed/content/{content_id}", web::get().to(handlers::get_content_details))
                    .route("/feed/{business_slug}", web::get().to(handlers::get_feed))
                    .route("/interactions", web::post().to(handlers::record_interaction))
                    .route("/interactions", web::delete().to(handlers::remove_interaction))
                    .route("/memberships", web::get().to(handlers::list_memberships))
                    .route("/memberships", web::post().to(handlers::join_business))
                    .route("/memberships/{membership_id}", web::delete().to(handlers::leave_business)),
            )
    })
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}
