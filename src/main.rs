use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recipe_bot::commands::CommandRegistry;
use recipe_bot::config::BotConfig;
use recipe_bot::events::EventContext;
use recipe_bot::github::OctocrabGateway;
use recipe_bot::handlers::build_event_router;
use recipe_bot::scheduler::lint_queue;
use recipe_bot::server::{AppState, build_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recipe_bot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = BotConfig::from_env()?;

    let gateway = OctocrabGateway::from_token(&config.github_token, config.repo.clone())?;

    let (scheduler, mut jobs) = lint_queue();

    // Drain the lint queue. The lint runner itself is a separate service;
    // this side only hands jobs over.
    tokio::spawn(async move {
        while let Some(job) = jobs.recv().await {
            tracing::info!(
                pr = %job.pr_info.pr_number,
                sha = %job.head_sha.short(),
                "Dequeued lint job"
            );
        }
    });

    // Comment commands register here as they are added.
    let commands = Arc::new(CommandRegistry::new());

    let router = build_event_router(config.app_id, config.alias.clone(), commands);
    let context = EventContext {
        gateway: Arc::new(gateway),
        scheduler: Arc::new(scheduler),
    };
    let state = AppState::new(router, context, config.webhook_secret.as_bytes().to_vec());

    let app = build_router(state);

    tracing::info!(repo = %config.repo, "listening on {}", config.listen_addr);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
