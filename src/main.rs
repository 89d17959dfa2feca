//! DealDock - simulated session runner.
//!
//! Builds every store, runs the simulated catalog load and prints the feed
//! for the configured criteria, together with the viewer's inbox state, as
//! JSON on stdout.
//!
//! # Environment
//!
//! - `DEALDOCK_LOAD_DELAY_MS`, `DEALDOCK_SUBMIT_DELAY_MS` - simulated latencies
//! - `DEALDOCK_VIEWER_ID`, `DEALDOCK_VIEWER_NAME`, `DEALDOCK_VIEWER_AVATAR` - viewer identity
//! - `DEALDOCK_CATEGORY`, `DEALDOCK_SORT`, `DEALDOCK_MAX_PRICE` - feed criteria
//! - `RUST_LOG` - log filter (logs go to stderr)

use chrono::Utc;
use serde_json::json;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use dealdock::OfferCatalog;
use dealdock::config::Config;
use dealdock::messages::MessageCenter;
use dealdock::notifications::NotificationCenter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("dealdock=info".parse()?))
        .init();

    let config = Config::from_env();

    info!(
        viewer = %config.viewer.id,
        load_delay_ms = config.load_delay.as_millis() as u64,
        "Starting DealDock session"
    );

    let mut catalog = OfferCatalog::new(config.load_delay, config.submit_delay);
    let notifications = NotificationCenter::seeded(config.viewer.id.clone(), Utc::now());
    let messages = MessageCenter::seeded(config.viewer.clone(), Utc::now());

    catalog.initialize().await;

    let feed = catalog.list(&config.criteria);
    let summary = catalog.summary(&config.criteria);

    let output = json!({
        "viewer": config.viewer,
        "criteria": config.criteria,
        "summary": summary,
        "offers": feed,
        "stories": catalog.stories().stories(),
        "unread_notifications": notifications.unread_count(),
        "unread_messages": messages.total_unread(),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);

    info!(offers = feed.len(), "Session complete");

    Ok(())
}
