use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DeskError;

/// One real-estate property record.
///
/// Immutable within a session: the whole set is loaded once from the
/// embedded dataset and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListing {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub city: String,
    pub neighborhood: String,
    pub property_type: String,
    pub status: String,
    pub accepted_financing: String,
    pub land_area_m2: i32,
    pub built_area_m2: i32,
}

impl PropertyListing {
    /// Listings with any other status render as not available.
    pub fn is_available(&self) -> bool {
        self.status == "Available"
    }

    pub fn price_display(&self) -> String {
        format_amount(self.price)
    }
}

/// Property type a contact is asking about. Closed enumeration, unlike
/// the open string keys on `PropertyListing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DesiredPropertyType {
    House,
    Land,
    Apartment,
    #[serde(rename = "Commercial space")]
    CommercialSpace,
    Other,
}

impl DesiredPropertyType {
    pub const ALL: [DesiredPropertyType; 5] = [
        DesiredPropertyType::House,
        DesiredPropertyType::Land,
        DesiredPropertyType::Apartment,
        DesiredPropertyType::CommercialSpace,
        DesiredPropertyType::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DesiredPropertyType::House => "House",
            DesiredPropertyType::Land => "Land",
            DesiredPropertyType::Apartment => "Apartment",
            DesiredPropertyType::CommercialSpace => "Commercial space",
            DesiredPropertyType::Other => "Other",
        }
    }
}

impl fmt::Display for DesiredPropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DesiredPropertyType {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DesiredPropertyType::ALL
            .into_iter()
            .find(|t| t.label() == s)
            .ok_or_else(|| DeskError::validation(format!("unknown property type: {s}")))
    }
}

/// Caller-supplied half of a contact submission. The ledger stamps the
/// timestamp at append time, never the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactForm {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub desired_property_type: DesiredPropertyType,
    pub budget_min: i64,
    pub budget_max: i64,
    pub message: String,
}

/// One persisted row of the contact ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub timestamp: DateTime<Utc>,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub desired_property_type: DesiredPropertyType,
    pub budget_min: i64,
    pub budget_max: i64,
    pub message: String,
}

impl ContactSubmission {
    pub fn budget_display(&self) -> String {
        format!(
            "{} - {}",
            format_amount(self.budget_min),
            format_amount(self.budget_max)
        )
    }

    pub fn timestamp_display(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M UTC").to_string()
    }
}

/// One dropdown pick: either the "Any" sentinel (do not filter on this
/// field) or an exact value to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Any,
    Exact(String),
}

impl Selection {
    /// The literal string "Any" is the sentinel; everything else is an
    /// exact-match value. Case-sensitive on purpose.
    pub fn parse(raw: &str) -> Self {
        if raw == "Any" {
            Selection::Any
        } else {
            Selection::Exact(raw.to_string())
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::Any => true,
            Selection::Exact(wanted) => wanted == value,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Selection::Any)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Any => f.write_str("Any"),
            Selection::Exact(value) => f.write_str(value),
        }
    }
}

/// The active filter selection: price bounds plus three exact-match keys.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub price_min: i64,
    pub price_max: i64,
    pub city: Selection,
    pub property_type: Selection,
    pub status: Selection,
}

impl FilterCriteria {
    /// Criteria that keep every listing within the given price bounds.
    pub fn any_within(price_min: i64, price_max: i64) -> Self {
        Self {
            price_min,
            price_max,
            city: Selection::Any,
            property_type: Selection::Any,
            status: Selection::Any,
        }
    }
}

/// Thousands-separated amount for display, e.g. `$520,000`.
pub fn format_amount(amount: i64) -> String {
    let digits = amount.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if amount < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_parses_any_sentinel() {
        assert_eq!(Selection::parse("Any"), Selection::Any);
        assert_eq!(
            Selection::parse("Monterrey"),
            Selection::Exact("Monterrey".to_string())
        );
        // Case-sensitive: "any" is a value, not the sentinel.
        assert_eq!(Selection::parse("any"), Selection::Exact("any".to_string()));
    }

    #[test]
    fn selection_matches_exactly() {
        assert!(Selection::Any.matches("whatever"));
        let sel = Selection::Exact("House".to_string());
        assert!(sel.matches("House"));
        assert!(!sel.matches("house"));
        assert!(!sel.matches("Houses"));
    }

    #[test]
    fn desired_property_type_round_trips_labels() {
        for ty in DesiredPropertyType::ALL {
            let parsed: DesiredPropertyType = ty.label().parse().unwrap();
            assert_eq!(parsed, ty);
        }
        assert_eq!(
            "Commercial space".parse::<DesiredPropertyType>().unwrap(),
            DesiredPropertyType::CommercialSpace
        );
        assert!("Castle".parse::<DesiredPropertyType>().is_err());
    }

    #[test]
    fn amounts_get_thousands_separators() {
        assert_eq!(format_amount(0), "$0");
        assert_eq!(format_amount(999), "$999");
        assert_eq!(format_amount(520000), "$520,000");
        assert_eq!(format_amount(1234567), "$1,234,567");
    }
}
