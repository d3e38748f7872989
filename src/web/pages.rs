use std::sync::Arc;

use askama::Template;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;
use tracing::warn;

use crate::catalog::{distinct_cities, distinct_property_types, distinct_statuses, filter};
use crate::error::DeskError;
use crate::models::{
    ContactForm, ContactSubmission, DesiredPropertyType, FilterCriteria, PropertyListing,
    Selection,
};
use crate::web::AppState;

/// Rows shown in the admin preview on the contact page.
const ADMIN_PREVIEW_ROWS: usize = 10;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(catalog))
        .route("/contact", get(contact).post(submit_contact))
}

#[derive(Template)]
#[template(path = "catalog.html")]
struct CatalogTemplate {
    error: String,
    results: Vec<PropertyListing>,
    all: &'static [PropertyListing],
    bounds_min: i64,
    bounds_max: i64,
    price_min: i64,
    price_max: i64,
    cities: Vec<String>,
    property_types: Vec<String>,
    statuses: Vec<String>,
    city_sel: String,
    type_sel: String,
    status_sel: String,
}

#[derive(Deserialize, Default)]
struct CatalogQuery {
    price_min: Option<String>,
    price_max: Option<String>,
    city: Option<String>,
    property_type: Option<String>,
    status: Option<String>,
}

/// A cleared number input submits an empty string; treat anything that
/// does not parse as "use the default bound".
fn parse_bound(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse().ok())
}

/// Catalog view: filter form, listing cards and the full-table view.
/// Each filter change is one request carrying the whole selection.
async fn catalog(
    State(state): State<Arc<AppState>>,
    Query(q): Query<CatalogQuery>,
) -> impl IntoResponse {
    let listings = state.store.listings();
    let (bounds_min, bounds_max) = state.store.price_bounds();

    let criteria = FilterCriteria {
        price_min: parse_bound(q.price_min.as_deref()).unwrap_or(bounds_min),
        price_max: parse_bound(q.price_max.as_deref()).unwrap_or(bounds_max),
        city: Selection::parse(q.city.as_deref().unwrap_or("Any")),
        property_type: Selection::parse(q.property_type.as_deref().unwrap_or("Any")),
        status: Selection::parse(q.status.as_deref().unwrap_or("Any")),
    };
    let results = filter(listings, &criteria);

    let content = CatalogTemplate {
        error: state.load_error.clone().unwrap_or_default(),
        results,
        all: listings,
        bounds_min,
        bounds_max,
        price_min: criteria.price_min,
        price_max: criteria.price_max,
        cities: distinct_cities(listings),
        property_types: distinct_property_types(listings),
        statuses: distinct_statuses(listings),
        city_sel: criteria.city.to_string(),
        type_sel: criteria.property_type.to_string(),
        status_sel: criteria.status.to_string(),
    }
    .render()
    .unwrap_or_default();

    Html(content)
}

#[derive(Template)]
#[template(path = "contact.html")]
struct ContactTemplate {
    notice: String,
    error: String,
    types: Vec<String>,
    type_sel: String,
    budget_floor: i64,
    budget_ceiling: i64,
    full_name: String,
    phone: String,
    email: String,
    budget_min: i64,
    budget_max: i64,
    message: String,
    recent: Vec<ContactSubmission>,
    recent_error: String,
}

impl ContactTemplate {
    fn blank(state: &AppState) -> Self {
        Self {
            notice: String::new(),
            error: String::new(),
            types: DesiredPropertyType::ALL
                .iter()
                .map(|t| t.label().to_string())
                .collect(),
            type_sel: DesiredPropertyType::House.label().to_string(),
            budget_floor: state.budget_floor,
            budget_ceiling: state.budget_ceiling,
            full_name: String::new(),
            phone: String::new(),
            email: String::new(),
            budget_min: state.budget_floor,
            budget_max: state.budget_ceiling,
            message: String::new(),
            recent: Vec::new(),
            recent_error: String::new(),
        }
    }

    /// Carry the submitted values back into the form after a failure.
    fn keep_input(&mut self, input: &ContactInput) {
        self.full_name = input.full_name.clone();
        self.phone = input.phone.clone();
        self.email = input.email.clone();
        self.type_sel = input.desired_property_type.clone();
        self.message = input.message.clone();
    }

    /// Pull in the admin preview, degrading to a visible error when the
    /// ledger cannot be read.
    fn with_recent(mut self, state: &AppState) -> Self {
        match state.ledger.read_recent(ADMIN_PREVIEW_ROWS) {
            Ok(rows) => self.recent = rows,
            Err(e) => {
                warn!("Failed to read contact ledger: {e}");
                self.recent_error = e.to_string();
            }
        }
        self
    }
}

/// Raw form fields as the browser submits them; numbers arrive as text
/// and are parsed explicitly so a bad value is a validation message, not
/// a rejected request.
#[derive(Deserialize)]
struct ContactInput {
    full_name: String,
    phone: String,
    #[serde(default)]
    email: String,
    desired_property_type: String,
    budget_min: String,
    budget_max: String,
    #[serde(default)]
    message: String,
}

impl ContactInput {
    fn to_form(&self) -> Result<ContactForm, DeskError> {
        let desired_property_type: DesiredPropertyType = self.desired_property_type.parse()?;
        let budget_min = parse_amount("minimum budget", &self.budget_min)?;
        let budget_max = parse_amount("maximum budget", &self.budget_max)?;
        Ok(ContactForm {
            full_name: self.full_name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            desired_property_type,
            budget_min,
            budget_max,
            message: self.message.clone(),
        })
    }
}

fn parse_amount(field: &str, raw: &str) -> Result<i64, DeskError> {
    raw.trim()
        .parse()
        .map_err(|_| DeskError::validation(format!("{field} must be a number")))
}

/// Contact view: lead-capture form plus the admin preview of the last
/// ledger rows.
async fn contact(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let content = ContactTemplate::blank(&state)
        .with_recent(&state)
        .render()
        .unwrap_or_default();
    Html(content)
}

/// One form submit is one append. Failures re-render the form with the
/// submitted values and a visible error; the submission is never dropped
/// silently.
async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Form(input): Form<ContactInput>,
) -> impl IntoResponse {
    let mut page = ContactTemplate::blank(&state);

    match input.to_form() {
        Ok(form) => match state.ledger.append(&form) {
            Ok(stamped) => {
                page.notice = format!(
                    "Thank you, {}. We will be in touch shortly.",
                    stamped.full_name
                );
            }
            Err(e) => {
                warn!("Contact submission not persisted: {e}");
                page.error = e.to_string();
                page.keep_input(&input);
                page.budget_min = form.budget_min;
                page.budget_max = form.budget_max;
            }
        },
        Err(e) => {
            warn!("Contact submission rejected: {e}");
            page.error = e.to_string();
            page.keep_input(&input);
        }
    }

    let content = page.with_recent(&state).render().unwrap_or_default();
    Html(content)
}
