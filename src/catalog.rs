//! The offer catalog: the authoritative in-memory collection of offers.
//!
//! The catalog is an owned value. Whoever builds it (normally the binary's
//! `main`) hands it to presentation code by reference; there is no global
//! instance. All mutations go through `&mut self` and run to completion, so a
//! single viewer session never observes a half-applied change.
//!
//! Every mutation takes the acting [`Viewer`] explicitly. The viewer's display
//! fields are copied onto the ratings, comments and offers it creates.

use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::aggregation::{
    CatalogSummary, apply_criteria, average_rating, discount_percentage, parse_tags,
    validate_rating,
};
use crate::error::{CatalogError, Result};
use crate::model::{Comment, FilterCriteria, Offer, OfferDraft, Rating, Viewer};
use crate::seed;
use crate::stories::StoryReel;

/// Default simulated latency of the initial load.
pub const DEFAULT_LOAD_DELAY: Duration = Duration::from_millis(1000);

/// Default simulated latency of submitting the post-offer form.
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(1000);

/// Whether the seed data has arrived yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogState {
    Loading,
    Ready,
}

/// In-memory offer store with feed derivations.
#[derive(Debug, Clone)]
pub struct OfferCatalog {
    offers: Vec<Offer>,
    stories: StoryReel,
    state: CatalogState,
    load_delay: Duration,
    submit_delay: Duration,
}

impl Default for OfferCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_LOAD_DELAY, DEFAULT_SUBMIT_DELAY)
    }
}

impl OfferCatalog {
    /// Create an empty catalog in the `Loading` state.
    pub fn new(load_delay: Duration, submit_delay: Duration) -> Self {
        Self {
            offers: Vec::new(),
            stories: StoryReel::default(),
            state: CatalogState::Loading,
            load_delay,
            submit_delay,
        }
    }

    /// Create a ready catalog holding exactly `offers`, with no simulated delays.
    pub fn with_offers(offers: Vec<Offer>) -> Self {
        Self {
            offers,
            stories: StoryReel::default(),
            state: CatalogState::Ready,
            load_delay: Duration::ZERO,
            submit_delay: Duration::ZERO,
        }
    }

    /// Load the seed offers and stories after the simulated fetch delay.
    ///
    /// Moves the catalog from `Loading` to `Ready`. Calling this on a ready
    /// catalog does nothing.
    #[instrument(skip(self))]
    pub async fn initialize(&mut self) {
        if self.state == CatalogState::Ready {
            debug!("Catalog already loaded");
            return;
        }

        if !self.load_delay.is_zero() {
            tokio::time::sleep(self.load_delay).await;
        }

        self.offers = seed::offers();
        self.stories.load_seed(Utc::now());
        self.state = CatalogState::Ready;

        info!(
            offers = self.offers.len(),
            stories = self.stories.stories().len(),
            "Catalog ready"
        );
    }

    pub fn state(&self) -> CatalogState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == CatalogState::Ready
    }

    /// All offers in catalog order (most recently posted first).
    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    pub fn get(&self, offer_id: &str) -> Option<&Offer> {
        self.offers.iter().find(|o| o.id == offer_id)
    }

    pub fn stories(&self) -> &StoryReel {
        &self.stories
    }

    pub fn stories_mut(&mut self) -> &mut StoryReel {
        &mut self.stories
    }

    /// Produce the feed view for `criteria`.
    ///
    /// Returns fresh copies; the catalog itself is untouched. Expired offers
    /// are included.
    pub fn list(&self, criteria: &FilterCriteria) -> Vec<Offer> {
        let view = apply_criteria(&self.offers, criteria);

        debug!(
            category = %String::from(criteria.category),
            sort_by = ?criteria.sort_by,
            matched = view.len(),
            total = self.offers.len(),
            "Offers listed"
        );

        view
    }

    /// Aggregate statistics over the offers matching `criteria`.
    pub fn summary(&self, criteria: &FilterCriteria) -> CatalogSummary {
        CatalogSummary::from_offers(self.offers.iter().filter(|o| criteria.accepts(o)))
    }

    fn find_mut(&mut self, offer_id: &str) -> Result<&mut Offer> {
        self.offers
            .iter_mut()
            .find(|o| o.id == offer_id)
            .ok_or_else(|| {
                warn!(offer_id, "Offer not found");
                CatalogError::OfferNotFound(offer_id.to_string())
            })
    }

    /// Rate an offer on behalf of `viewer`.
    ///
    /// A viewer holds at most one rating per offer: rating again replaces the
    /// earlier value and review in place. The average is recomputed over the
    /// resulting list.
    #[instrument(skip(self, viewer, review), fields(viewer = %viewer.id))]
    pub fn rate(
        &mut self,
        offer_id: &str,
        viewer: &Viewer,
        rating: u8,
        review: Option<String>,
    ) -> Result<Offer> {
        let rating = validate_rating(rating).inspect_err(|_| {
            warn!(offer_id, rating, "Rejected out-of-range rating");
        })?;
        let review = review.filter(|r| !r.trim().is_empty());

        let offer = self.find_mut(offer_id)?;

        match offer.ratings.iter_mut().find(|r| r.user_id == viewer.id) {
            Some(existing) => {
                existing.rating = rating;
                existing.review = review;
            }
            None => offer.ratings.push(Rating {
                id: Uuid::new_v4().to_string(),
                user_id: viewer.id.clone(),
                user_name: viewer.name.clone(),
                user_avatar: viewer.avatar.clone(),
                rating,
                review,
                created_at: Utc::now(),
            }),
        }

        offer.average_rating = average_rating(&offer.ratings);
        offer.user_rating = Some(rating);

        info!(
            offer_id,
            rating,
            ratings = offer.ratings.len(),
            average = offer.average_rating,
            "Offer rated"
        );

        Ok(offer.clone())
    }

    /// Flip the viewer's saved flag on an offer and adjust the save counter.
    ///
    /// `is_saved` is the session viewer's flag; `viewer` only tags the log
    /// span here.
    #[instrument(skip(self, viewer), fields(viewer = %viewer.id))]
    pub fn toggle_save(&mut self, offer_id: &str, viewer: &Viewer) -> Result<Offer> {
        let offer = self.find_mut(offer_id)?;

        offer.is_saved = !offer.is_saved;
        offer.saves = if offer.is_saved {
            offer.saves.saturating_add(1)
        } else {
            offer.saves.saturating_sub(1)
        };

        info!(
            offer_id,
            saved = offer.is_saved,
            saves = offer.saves,
            "Offer save toggled"
        );

        Ok(offer.clone())
    }

    /// Append a comment from `viewer`.
    ///
    /// Content that is empty after trimming is ignored and the offer is
    /// returned unchanged.
    #[instrument(skip(self, viewer, content), fields(viewer = %viewer.id))]
    pub fn comment(&mut self, offer_id: &str, viewer: &Viewer, content: &str) -> Result<Offer> {
        let offer = self.find_mut(offer_id)?;

        let content = content.trim();
        if content.is_empty() {
            debug!(offer_id, "Ignoring empty comment");
            return Ok(offer.clone());
        }

        offer.comments.push(Comment {
            id: Uuid::new_v4().to_string(),
            user_id: viewer.id.clone(),
            user_name: viewer.name.clone(),
            user_avatar: viewer.avatar.clone(),
            content: content.to_string(),
            created_at: Utc::now(),
        });

        info!(offer_id, comments = offer.comments.len(), "Comment added");

        Ok(offer.clone())
    }

    /// Build an offer from a form draft without inserting it.
    fn build_offer(business: &Viewer, draft: OfferDraft) -> Result<Offer> {
        let discount_percentage = discount_percentage(draft.original_price, draft.discount_price)?;

        let image = draft
            .image
            .filter(|i| !i.trim().is_empty())
            .unwrap_or_else(|| seed::DEFAULT_OFFER_IMAGE.to_string());

        Ok(Offer {
            id: Uuid::new_v4().to_string(),
            business_id: business.id.clone(),
            business_name: business.name.clone(),
            business_avatar: business.avatar.clone(),
            product_name: draft.product_name,
            description: draft.description,
            image,
            original_price: draft.original_price,
            discount_price: draft.discount_price,
            discount_percentage,
            category: draft.category,
            tags: parse_tags(&draft.tags),
            ratings: Vec::new(),
            average_rating: 0.0,
            comments: Vec::new(),
            saves: 0,
            created_at: Utc::now(),
            expires_at: draft.expires_at,
            user_rating: None,
            is_saved: false,
        })
    }

    /// Post a new offer for `business` and place it at the front of the catalog.
    ///
    /// Fails without touching the catalog when the discount price is not below
    /// the original price.
    #[instrument(skip(self, business, draft), fields(business = %business.id))]
    pub fn post(&mut self, business: &Viewer, draft: OfferDraft) -> Result<Offer> {
        let offer = Self::build_offer(business, draft).inspect_err(|e| {
            warn!(error = %e, "Rejected offer draft");
        })?;

        self.offers.insert(0, offer.clone());

        info!(
            offer_id = %offer.id,
            product = %offer.product_name,
            discount = offer.discount_percentage,
            total = self.offers.len(),
            "Offer posted"
        );

        Ok(offer)
    }

    /// Post-offer form path: validate, wait out the simulated network delay,
    /// then insert.
    ///
    /// Validation failures return immediately. Dropping the returned future
    /// before it resolves leaves the catalog untouched.
    pub async fn submit(&mut self, business: &Viewer, draft: OfferDraft) -> Result<Offer> {
        discount_percentage(draft.original_price, draft.discount_price).inspect_err(|e| {
            warn!(business = %business.id, error = %e, "Rejected offer draft");
        })?;

        if !self.submit_delay.is_zero() {
            tokio::time::sleep(self.submit_delay).await;
        }

        self.post(business, draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, CategoryFilter, SortBy};

    fn viewer() -> Viewer {
        Viewer::new("current-user", "John Doe", "avatar.jpg")
    }

    fn business() -> Viewer {
        Viewer::new("tech-store", "TechStore Inc.", "store.jpg")
    }

    fn draft(original: f64, discount: f64) -> OfferDraft {
        OfferDraft {
            product_name: "Galaxy Buds".to_string(),
            description: "Wireless earbuds".to_string(),
            image: None,
            original_price: original,
            discount_price: discount,
            category: Category::Electronics,
            tags: "audio, wireless, ,".to_string(),
            expires_at: None,
        }
    }

    fn seeded() -> OfferCatalog {
        OfferCatalog::with_offers(seed::offers())
    }

    #[tokio::test]
    async fn test_initialize_loads_seed() {
        let mut catalog = OfferCatalog::new(Duration::ZERO, Duration::ZERO);
        assert_eq!(catalog.state(), CatalogState::Loading);
        assert!(catalog.is_empty());

        catalog.initialize().await;

        assert_eq!(catalog.state(), CatalogState::Ready);
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.stories().stories().len(), 4);
    }

    #[tokio::test]
    async fn test_initialize_twice_keeps_mutations() {
        let mut catalog = OfferCatalog::new(Duration::ZERO, Duration::ZERO);
        catalog.initialize().await;
        catalog.toggle_save("1", &viewer()).unwrap();

        catalog.initialize().await;

        assert!(catalog.get("1").unwrap().is_saved);
    }

    #[test]
    fn test_list_default_criteria_returns_all_newest_first() {
        let catalog = seeded();

        let view = catalog.list(&FilterCriteria::default());

        let ids: Vec<_> = view.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_list_does_not_mutate() {
        let catalog = seeded();
        let before = catalog.offers().to_vec();

        let _ = catalog.list(&FilterCriteria::everything(SortBy::Popular));

        assert_eq!(catalog.offers(), before.as_slice());
    }

    #[test]
    fn test_list_by_category() {
        let catalog = seeded();
        let criteria = FilterCriteria {
            category: CategoryFilter::Only(Category::Fashion),
            ..FilterCriteria::default()
        };

        let view = catalog.list(&criteria);

        assert_eq!(view.len(), 1);
        assert_eq!(view[0].product_name, "Designer Leather Jacket");
    }

    #[test]
    fn test_rate_replaces_existing_entry() {
        let mut catalog = seeded();
        let v = viewer();

        catalog.rate("3", &v, 5, None).unwrap();
        let offer = catalog.rate("3", &v, 3, Some("Changed my mind".to_string())).unwrap();

        assert_eq!(offer.ratings.len(), 1);
        assert_eq!(offer.average_rating, 3.0);
        assert_eq!(offer.user_rating, Some(3));
        assert_eq!(offer.ratings[0].review.as_deref(), Some("Changed my mind"));

        let offer = catalog.rate("3", &v, 4, Some("   ".to_string())).unwrap();
        assert_eq!(offer.ratings.len(), 1);
        assert_eq!(offer.ratings[0].review, None);
    }

    #[test]
    fn test_rate_keeps_separate_entries_per_viewer() {
        let mut catalog = seeded();
        let alice = Viewer::new("alice", "Alice", "a.jpg");
        let bob = Viewer::new("bob", "Bob", "b.jpg");

        catalog.rate("3", &alice, 5, None).unwrap();
        let offer = catalog.rate("3", &bob, 1, None).unwrap();

        assert_eq!(offer.ratings.len(), 2);
        assert_eq!(offer.rating_by("alice").map(|r| r.rating), Some(5));
        assert_eq!(offer.rating_by("bob").map(|r| r.rating), Some(1));
        assert_eq!(offer.average_rating, 3.0);
        // Session projection follows the last viewer to act
        assert_eq!(offer.user_rating, Some(1));
    }

    #[test]
    fn test_rate_appends_and_averages() {
        let mut catalog = seeded();

        // Seed: 5 and 4
        let offer = catalog.rate("1", &viewer(), 3, None).unwrap();

        assert_eq!(offer.ratings.len(), 3);
        assert_eq!(offer.average_rating, 4.0);
        assert_eq!(offer.ratings[2].user_name, "John Doe");
    }

    #[test]
    fn test_rate_out_of_range_leaves_offer_unchanged() {
        let mut catalog = seeded();
        let before = catalog.get("1").cloned();

        assert_eq!(
            catalog.rate("1", &viewer(), 6, None),
            Err(CatalogError::RatingOutOfRange(6))
        );
        assert_eq!(
            catalog.rate("1", &viewer(), 0, None),
            Err(CatalogError::RatingOutOfRange(0))
        );
        assert_eq!(catalog.get("1").cloned(), before);
    }

    #[test]
    fn test_rate_unknown_offer() {
        let mut catalog = seeded();

        let result = catalog.rate("missing", &viewer(), 4, None);

        assert_eq!(result, Err(CatalogError::OfferNotFound("missing".to_string())));
    }

    #[test]
    fn test_toggle_save_is_its_own_inverse() {
        let mut catalog = seeded();

        let saved = catalog.toggle_save("1", &viewer()).unwrap();
        assert!(saved.is_saved);
        assert_eq!(saved.saves, 90);

        let unsaved = catalog.toggle_save("1", &viewer()).unwrap();
        assert!(!unsaved.is_saved);
        assert_eq!(unsaved.saves, 89);
    }

    #[test]
    fn test_toggle_save_never_underflows() {
        let mut offer = seed::offers().remove(2);
        offer.saves = 0;
        offer.is_saved = true;
        let mut catalog = OfferCatalog::with_offers(vec![offer]);

        let updated = catalog.toggle_save("3", &viewer()).unwrap();

        assert!(!updated.is_saved);
        assert_eq!(updated.saves, 0);
    }

    #[test]
    fn test_comment_appends() {
        let mut catalog = seeded();

        let offer = catalog.comment("2", &viewer(), "  Does it come in brown?  ").unwrap();

        assert_eq!(offer.comments.len(), 1);
        assert_eq!(offer.comments[0].content, "Does it come in brown?");
        assert_eq!(offer.comments[0].user_id, "current-user");
    }

    #[test]
    fn test_comment_blank_is_ignored() {
        let mut catalog = seeded();

        let offer = catalog.comment("2", &viewer(), "   ").unwrap();

        assert!(offer.comments.is_empty());
        assert!(catalog.get("2").unwrap().comments.is_empty());
    }

    #[test]
    fn test_post_inserts_at_front() {
        let mut catalog = seeded();

        let offer = catalog.post(&business(), draft(250.0, 199.0)).unwrap();

        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.offers()[0].id, offer.id);
        assert_eq!(offer.discount_percentage, 20);
        assert_eq!(offer.tags, vec!["audio", "wireless"]);
        assert_eq!(offer.image, seed::DEFAULT_OFFER_IMAGE);
        assert_eq!(offer.business_name, "TechStore Inc.");
        assert_eq!(offer.saves, 0);
        assert!(offer.ratings.is_empty());
        assert!(!offer.is_saved);
    }

    #[test]
    fn test_post_rejects_non_discount() {
        let mut catalog = seeded();

        let result = catalog.post(&business(), draft(100.0, 150.0));

        assert!(matches!(result, Err(CatalogError::NonPositiveDiscount { .. })));
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_post_rejects_non_finite_prices() {
        let mut catalog = seeded();

        for (original, discount) in [(f64::INFINITY, 10.0), (f64::NAN, 10.0), (100.0, f64::NAN)] {
            let result = catalog.post(&business(), draft(original, discount));
            assert!(matches!(result, Err(CatalogError::NonPositiveDiscount { .. })));
        }

        assert_eq!(catalog.len(), 4);
    }

    #[tokio::test]
    async fn test_submit_validates_before_delay() {
        let mut catalog = OfferCatalog::new(Duration::ZERO, Duration::from_secs(3600));
        catalog.initialize().await;

        // Would hang for an hour if the delay ran first
        let result = catalog.submit(&business(), draft(100.0, 100.0)).await;

        assert!(result.is_err());
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_summary_for_business() {
        let mut catalog = seeded();
        catalog.post(&business(), draft(200.0, 150.0)).unwrap();

        let summary = catalog.summary(&FilterCriteria::for_business("tech-store"));

        assert_eq!(summary.total_offers, 2);
        assert_eq!(summary.total_saves, 89);
        assert_eq!(summary.average_rating, 4.5);
        assert_eq!(summary.best_discount, 25);
    }
}
