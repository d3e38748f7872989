pub mod filter;
pub mod store;

pub use filter::{distinct_cities, distinct_property_types, distinct_statuses, filter};
pub use store::{load_listings, ListingStore};
