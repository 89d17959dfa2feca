//! Derivations over offers: discount percentages, rating averages, feed views
//! and summary statistics.
//!
//! Everything here is pure. Nothing in this module mutates an offer it is
//! handed by reference.

use std::cmp::Reverse;

use serde::Serialize;

use crate::error::{CatalogError, Result};
use crate::model::{FilterCriteria, Offer, Rating, SortBy};

/// Lowest star value a rating may carry.
pub const MIN_RATING: u8 = 1;

/// Highest star value a rating may carry.
pub const MAX_RATING: u8 = 5;

/// Compute the whole-number discount percentage for a price pair.
///
/// # Arguments
///
/// * `original` - The list price; must be finite and positive
/// * `discount` - The offer price; must be finite, non-negative and below `original`
///
/// # Returns
///
/// `round((original - discount) / original * 100)`, or
/// `CatalogError::NonPositiveDiscount` when the pair is not a real discount.
/// That includes pairs whose percentage rounds to zero, which the post-offer
/// form also rejects.
pub fn discount_percentage(original: f64, discount: f64) -> Result<u8> {
    let priced = original.is_finite()
        && discount.is_finite()
        && original > 0.0
        && discount >= 0.0
        && discount < original;
    if !priced {
        return Err(CatalogError::NonPositiveDiscount { original, discount });
    }

    let percentage = ((original - discount) / original * 100.0).round();
    if !percentage.is_finite() || percentage <= 0.0 {
        // e.g. 1000.00 -> 999.99 rounds to 0%
        return Err(CatalogError::NonPositiveDiscount { original, discount });
    }

    Ok(percentage.min(100.0) as u8)
}

/// Check that a star value lies within 1..=5.
pub fn validate_rating(rating: u8) -> Result<u8> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(rating)
    } else {
        Err(CatalogError::RatingOutOfRange(rating))
    }
}

/// Arithmetic mean of the ratings, or 0.0 when there are none.
pub fn average_rating(ratings: &[Rating]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }

    let total: u32 = ratings.iter().map(|r| u32::from(r.rating)).sum();
    f64::from(total) / ratings.len() as f64
}

/// Split a comma-separated tag string into trimmed, non-empty tags.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Produce the feed view for `criteria`.
///
/// Filters first, then sorts. The sort is stable, so offers with equal keys
/// keep their catalog order. Unrecognized sort keys leave the order alone.
///
/// # Arguments
///
/// * `offers` - The offers to consider, in catalog order
/// * `criteria` - Category, price range, brand and profile filters plus the sort key
///
/// # Returns
///
/// Cloned offers that pass every filter, in sorted order. The input is not
/// modified.
pub fn apply_criteria<'a, I>(offers: I, criteria: &FilterCriteria) -> Vec<Offer>
where
    I: IntoIterator<Item = &'a Offer>,
{
    let mut view: Vec<Offer> = offers
        .into_iter()
        .filter(|offer| criteria.accepts(offer))
        .cloned()
        .collect();

    match criteria.sort_by {
        SortBy::Newest => view.sort_by_key(|o| Reverse(o.created_at)),
        SortBy::Discount => view.sort_by_key(|o| Reverse(o.discount_percentage)),
        SortBy::Popular => view.sort_by_key(|o| Reverse(o.saves)),
        SortBy::Unordered => {}
    }

    view
}

/// Aggregate statistics over a set of offers, as shown on profile pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogSummary {
    pub total_offers: usize,
    pub total_saves: u64,
    pub total_ratings: usize,
    pub total_comments: usize,

    /// Mean of the per-offer averages, counting only offers that have ratings.
    pub average_rating: f64,

    /// Largest discount percentage across the set, 0 when empty.
    pub best_discount: u8,
}

impl CatalogSummary {
    pub fn from_offers<'a, I>(offers: I) -> Self
    where
        I: IntoIterator<Item = &'a Offer>,
    {
        let mut summary = CatalogSummary {
            total_offers: 0,
            total_saves: 0,
            total_ratings: 0,
            total_comments: 0,
            average_rating: 0.0,
            best_discount: 0,
        };

        let mut rated_offers = 0usize;
        let mut rating_sum = 0.0;

        for offer in offers {
            summary.total_offers += 1;
            summary.total_saves += u64::from(offer.saves);
            summary.total_ratings += offer.ratings.len();
            summary.total_comments += offer.comments.len();
            summary.best_discount = summary.best_discount.max(offer.discount_percentage);

            if !offer.ratings.is_empty() {
                rated_offers += 1;
                rating_sum += offer.average_rating;
            }
        }

        if rated_offers > 0 {
            summary.average_rating = rating_sum / rated_offers as f64;
        }

        summary
    }
}
