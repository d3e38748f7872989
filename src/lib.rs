pub mod catalog;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod web;

pub use catalog::{filter, load_listings, ListingStore};
pub use error::DeskError;
pub use ledger::ContactLedger;
pub use models::{ContactForm, ContactSubmission, FilterCriteria, PropertyListing, Selection};
