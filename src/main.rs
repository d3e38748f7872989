use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use listing_desk::catalog::{self, ListingStore};
use listing_desk::config::Config;
use listing_desk::web::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🏡 Listing Desk - property catalog & contact ledger");

    let config = Config::from_env();

    // Warm the listing cache up front. A broken dataset is not fatal:
    // the catalog degrades to empty and the error shows up on the page.
    let (store, load_error) = match catalog::load_listings() {
        Ok(store) => (store, None),
        Err(e) => {
            warn!("Listing dataset failed to load: {e}");
            warn!("Serving an empty catalog");
            let empty: &'static ListingStore = Box::leak(Box::new(ListingStore::empty()));
            (empty, Some(e.to_string()))
        }
    };
    info!("Catalog ready with {} listings", store.len());
    info!("Contact ledger at {}", config.ledger_path.display());

    let state = Arc::new(AppState::new(store, load_error, &config));
    let app = web::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    info!("Listening on http://{}", config.bind);
    axum::serve(listener, app).await?;

    Ok(())
}
