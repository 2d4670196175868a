//! Peer Review API Server
//!
//! Reputation, achievements and the activity feed for a peer code-review
//! community. Uses hexagonal (ports & adapters) architecture: pure scoring
//! and projection rules in the domain, the hosted backend behind adapters.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    BackendAchievementRuleRepository, BackendClient, BackendFeedRepository,
    BackendProfileRepository, BackendReputationLedger, BackendReviewRepository,
    BackendSubmissionRepository, PollingActivityStream, StaticAchievementRules,
};
use app::{load_achievement_rules, DashboardService, FeedService, ReputationService};
use config::{Config, RulesSource};

pub type AppReputationService = ReputationService<
    BackendReviewRepository,
    BackendProfileRepository,
    BackendSubmissionRepository,
    BackendReputationLedger,
>;
pub type AppFeedService = FeedService<BackendFeedRepository, PollingActivityStream>;
pub type AppDashboardService = DashboardService<
    BackendSubmissionRepository,
    BackendReviewRepository,
    BackendProfileRepository,
>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub reputation_service: Arc<AppReputationService>,
    pub feed_service: Arc<AppFeedService>,
    pub dashboard_service: Arc<AppDashboardService>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,peer_review_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Peer Review API...");

    let config = Config::from_env()?;

    // Create adapters
    let backend = Arc::new(BackendClient::new(
        config.backend_url.clone(),
        config.backend_service_key.clone(),
    ));
    let review_repo = Arc::new(BackendReviewRepository::new(backend.clone()));
    let profile_repo = Arc::new(BackendProfileRepository::new(backend.clone()));
    let ledger = Arc::new(BackendReputationLedger::new(backend.clone()));
    let submission_repo = Arc::new(BackendSubmissionRepository::new(backend.clone()));
    let feed_repo = Arc::new(BackendFeedRepository::new(backend.clone()));
    let activity = Arc::new(PollingActivityStream::new(
        backend.clone(),
        config.activity_poll_interval,
    ));

    // Achievement rules are read once and shared for the process lifetime
    let rules = match config.rules_source {
        RulesSource::Builtin => load_achievement_rules(&StaticAchievementRules).await?,
        RulesSource::Backend => {
            load_achievement_rules(&BackendAchievementRuleRepository::new(backend.clone())).await?
        }
    };

    // Create application services
    let reputation_service = Arc::new(ReputationService::new(
        review_repo.clone(),
        profile_repo.clone(),
        submission_repo.clone(),
        ledger,
        rules,
    ));
    let feed_service = Arc::new(FeedService::new(feed_repo, activity));
    let dashboard_service = Arc::new(DashboardService::new(
        submission_repo,
        review_repo,
        profile_repo,
    ));

    let state = AppState {
        reputation_service,
        feed_service,
        dashboard_service,
    };

    // Rate limiting config: 2 req/sec sustained, burst of 5
    // Uses PeerIpKeyExtractor to get client IP from socket connection
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("Invalid rate limit configuration"))?,
    );

    // Rate-limited routes (ledger writes)
    let rate_limited_routes = Router::new()
        .route("/users/:id/reviews/award", post(handlers::award_review))
        .route(
            "/users/:id/achievements/evaluate",
            post(handlers::evaluate_achievements),
        )
        .route(
            "/submissions/:id/approval-award",
            post(handlers::award_submission_approval),
        )
        .layer(GovernorLayer {
            config: governor_config,
        });

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .route("/status/classify", post(handlers::classify_status))
        .route("/reputation/score", post(handlers::score_review))
        .route("/users/:id/reputation", get(handlers::get_reputation))
        .route("/users/:id/dashboard", get(handlers::get_dashboard))
        .route("/feed", get(handlers::get_feed))
        .route("/feed/live", get(handlers::live_feed))
        .merge(rate_limited_routes)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
