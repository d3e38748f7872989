pub mod pages;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use tower_http::services::ServeDir;

use crate::catalog::ListingStore;
use crate::config::Config;
use crate::ledger::ContactLedger;

/// Shared state for the request handlers.
///
/// The listing store is process-wide and read-only; a failed dataset load
/// leaves `load_error` set and an empty store behind so the rest of the
/// UI keeps working.
pub struct AppState {
    pub store: &'static ListingStore,
    pub load_error: Option<String>,
    pub ledger: ContactLedger,
    pub budget_floor: i64,
    pub budget_ceiling: i64,
}

impl AppState {
    pub fn new(store: &'static ListingStore, load_error: Option<String>, config: &Config) -> Self {
        Self {
            store,
            load_error,
            ledger: ContactLedger::new(&config.ledger_path),
            budget_floor: config.budget_floor,
            budget_ceiling: config.budget_ceiling,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let static_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static");

    Router::new()
        .merge(pages::router())
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}
