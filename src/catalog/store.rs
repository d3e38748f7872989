use std::collections::HashSet;
use std::sync::OnceLock;

use tracing::info;

use crate::error::DeskError;
use crate::models::PropertyListing;

/// The fixed listing dataset, compiled into the binary.
const EMBEDDED_DATASET: &str = include_str!("../../data/listings.json");

/// Read-only set of property records, loaded once per process.
#[derive(Debug)]
pub struct ListingStore {
    listings: Vec<PropertyListing>,
    price_bounds: (i64, i64),
}

impl ListingStore {
    /// Parse a JSON array of listings and check the store invariants:
    /// unique ids, non-negative price and areas.
    pub fn from_json(raw: &str) -> Result<Self, DeskError> {
        let listings: Vec<PropertyListing> = serde_json::from_str(raw)
            .map_err(|e| DeskError::data_load(format!("listing dataset is not valid JSON: {e}")))?;
        Self::from_listings(listings)
    }

    pub fn from_listings(listings: Vec<PropertyListing>) -> Result<Self, DeskError> {
        let mut seen = HashSet::new();
        for listing in &listings {
            if listing.id == 0 {
                return Err(DeskError::data_load("listing id 0 is not a valid id"));
            }
            if !seen.insert(listing.id) {
                return Err(DeskError::data_load(format!(
                    "duplicate listing id {}",
                    listing.id
                )));
            }
            if listing.price < 0 || listing.land_area_m2 < 0 || listing.built_area_m2 < 0 {
                return Err(DeskError::data_load(format!(
                    "listing {} has a negative amount",
                    listing.id
                )));
            }
        }

        // Derived once at load time, not recomputed per filter.
        let price_bounds = listings
            .iter()
            .map(|l| l.price)
            .fold(None, |acc: Option<(i64, i64)>, p| match acc {
                None => Some((p, p)),
                Some((min, max)) => Some((min.min(p), max.max(p))),
            })
            .unwrap_or((0, 0));

        Ok(Self {
            listings,
            price_bounds,
        })
    }

    /// Degraded store used when the dataset fails to load: the rest of
    /// the UI keeps working against an empty catalog.
    pub fn empty() -> Self {
        Self {
            listings: Vec::new(),
            price_bounds: (0, 0),
        }
    }

    /// All listings in original dataset order.
    pub fn listings(&self) -> &[PropertyListing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// `(min, max)` over all listing prices; `(0, 0)` for an empty store.
    pub fn price_bounds(&self) -> (i64, i64) {
        self.price_bounds
    }
}

/// Process-wide memoized loader over the embedded dataset.
///
/// The parse runs at most once per process and is never invalidated;
/// a malformed dataset is reported on every call without caching, so the
/// caller can degrade to an empty catalog.
pub fn load_listings() -> Result<&'static ListingStore, DeskError> {
    static STORE: OnceLock<ListingStore> = OnceLock::new();
    if let Some(store) = STORE.get() {
        return Ok(store);
    }
    let store = ListingStore::from_json(EMBEDDED_DATASET)?;
    info!("Loaded {} listings from embedded dataset", store.len());
    Ok(STORE.get_or_init(|| store))
}
