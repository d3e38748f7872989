use crate::models::{FilterCriteria, PropertyListing};

/// Filter listings by the active criteria.
///
/// A listing is included iff its price falls within the criteria bounds
/// and each of city, property type and status either matches exactly or
/// is left at "Any". Pure conjunction; the result preserves the input
/// order. All string comparisons are exact equality, matching the
/// single-select dropdowns that feed the criteria.
pub fn filter(listings: &[PropertyListing], criteria: &FilterCriteria) -> Vec<PropertyListing> {
    listings
        .iter()
        .filter(|listing| {
            criteria.price_min <= listing.price
                && listing.price <= criteria.price_max
                && criteria.city.matches(&listing.city)
                && criteria.property_type.matches(&listing.property_type)
                && criteria.status.matches(&listing.status)
        })
        .cloned()
        .collect()
}

/// Sorted distinct cities, for the city dropdown.
pub fn distinct_cities(listings: &[PropertyListing]) -> Vec<String> {
    distinct(listings, |l| &l.city)
}

/// Sorted distinct property types, for the type dropdown.
pub fn distinct_property_types(listings: &[PropertyListing]) -> Vec<String> {
    distinct(listings, |l| &l.property_type)
}

/// Sorted distinct statuses, for the status dropdown.
pub fn distinct_statuses(listings: &[PropertyListing]) -> Vec<String> {
    distinct(listings, |l| &l.status)
}

fn distinct<F>(listings: &[PropertyListing], key: F) -> Vec<String>
where
    F: Fn(&PropertyListing) -> &str,
{
    let mut values: Vec<String> = listings.iter().map(|l| key(l).to_string()).collect();
    values.sort();
    values.dedup();
    values
}
