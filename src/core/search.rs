use crate::core::engine::AvailabilityEngine;
use crate::domain::model::{CarListing, City, DateInterval, UnavailabilityRecord, UserId};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SEARCH_LIMIT: usize = 9;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    pub search_term: Option<String>,
    pub brand: Option<String>,
    pub owner_id: Option<UserId>,
    pub city: Option<City>,
    pub dates: Option<DateInterval>,
}

impl SearchFilter {
    /// Term, brand, owner and city checks; dates are left to the engine.
    pub fn matches_listing(&self, listing: &CarListing) -> bool {
        if let Some(term) = self.search_term.as_deref().map(str::trim) {
            if !term.is_empty() {
                let term = term.to_lowercase();
                if !listing.name.to_lowercase().contains(&term)
                    && !listing.brand.to_lowercase().contains(&term)
                {
                    return false;
                }
            }
        }
        if self.brand.as_ref().is_some_and(|b| *b != listing.brand) {
            return false;
        }
        if self
            .owner_id
            .as_ref()
            .is_some_and(|o| listing.owner_id.as_ref() != Some(o))
        {
            return false;
        }
        if self.city.is_some_and(|c| c != listing.city) {
            return false;
        }
        true
    }
}

/// Applies `filter` to `candidates`, newest first, at most `limit` results.
///
/// `unavailability` is only consulted when the filter carries dates.
pub fn filter_listings<'a, F>(
    engine: &AvailabilityEngine,
    candidates: &'a [CarListing],
    filter: &SearchFilter,
    limit: usize,
    mut unavailability: F,
) -> Result<Vec<&'a CarListing>>
where
    F: FnMut(&CarListing) -> &'a [UnavailabilityRecord],
{
    let mut matched = Vec::new();
    for listing in candidates.iter().filter(|l| filter.matches_listing(l)) {
        if let Some(dates) = &filter.dates {
            if engine.check_conflict(unavailability(listing), dates)? {
                continue;
            }
        }
        matched.push(listing);
    }

    matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    matched.truncate(limit);
    Ok(matched)
}
