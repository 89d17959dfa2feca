//! Data models for DealDock.
//!
//! Offers, ratings and comments carry denormalized copies of the business or
//! viewer display fields (name, avatar). A later rename does not propagate to
//! records created before it.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Offer categories available to businesses when posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Fashion,
    #[serde(rename = "Home & Garden")]
    HomeAndGarden,
    Sports,
    Books,
    Beauty,
    Automotive,
    #[serde(rename = "Food & Beverage")]
    FoodAndBeverage,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Electronics,
        Category::Fashion,
        Category::HomeAndGarden,
        Category::Sports,
        Category::Books,
        Category::Beauty,
        Category::Automotive,
        Category::FoodAndBeverage,
    ];

    /// Display name, as shown in the post-offer form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Fashion => "Fashion",
            Category::HomeAndGarden => "Home & Garden",
            Category::Sports => "Sports",
            Category::Books => "Books",
            Category::Beauty => "Beauty",
            Category::Automotive => "Automotive",
            Category::FoodAndBeverage => "Food & Beverage",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// The identity of whoever is interacting with the stores.
///
/// Supplied by the identity provider and trusted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub id: String,
    pub name: String,
    pub avatar: String,
}

impl Viewer {
    pub fn new(id: impl Into<String>, name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: avatar.into(),
        }
    }
}

/// A single rating left on an offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_avatar: String,
    /// Star value, 1 through 5.
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A comment on an offer. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_avatar: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A business's discounted product listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: String,
    pub business_id: String,
    pub business_name: String,
    pub business_avatar: String,
    pub product_name: String,
    pub description: String,
    pub image: String,
    pub original_price: f64,
    pub discount_price: f64,
    /// Fixed when the offer is posted; never recomputed.
    pub discount_percentage: u8,
    pub category: Category,
    pub tags: Vec<String>,
    pub ratings: Vec<Rating>,
    /// Mean of `ratings`, or 0 when there are none.
    pub average_rating: f64,
    pub comments: Vec<Comment>,
    pub saves: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    // Viewer-relative projections. The catalog serves one viewer session, so
    // these hold the state of whichever viewer acted last. Per-viewer truth
    // for ratings lives in `ratings`; see `rating_by`.
    /// Star value most recently set through `rate`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_rating: Option<u8>,
    /// Saved flag of the session viewer, flipped by `toggle_save`.
    pub is_saved: bool,
}

impl Offer {
    /// Whether the offer's expiry lies in the past relative to `now`.
    ///
    /// Listing never hides expired offers; callers decide what to do with this.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    /// The rating entry left by `viewer_id`, if any.
    pub fn rating_by(&self, viewer_id: &str) -> Option<&Rating> {
        self.ratings.iter().find(|r| r.user_id == viewer_id)
    }
}

/// Input from the post-offer form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferDraft {
    pub product_name: String,
    pub description: String,
    /// Falls back to a stock product image when empty.
    #[serde(default)]
    pub image: Option<String>,
    pub original_price: f64,
    pub discount_price: f64,
    pub category: Category,
    /// Free-text, comma-separated.
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Category selector for the feed. Serialized as `"all"` or a category name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        match filter {
            CategoryFilter::All => "all".to_string(),
            CategoryFilter::Only(c) => c.as_str().to_string(),
        }
    }
}

/// Sort order for the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// `created_at` descending.
    #[default]
    Newest,
    /// `discount_percentage` descending.
    Discount,
    /// `saves` descending.
    Popular,
    /// Any unrecognized key: keep catalog order.
    #[serde(other)]
    Unordered,
}

impl FromStr for SortBy {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "newest" => SortBy::Newest,
            "discount" => SortBy::Discount,
            "popular" => SortBy::Popular,
            _ => SortBy::Unordered,
        })
    }
}

/// Filter and sort applied to produce a view over the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub category: CategoryFilter,
    /// Inclusive `[min, max]` on `discount_price`.
    #[serde(default = "default_price_range")]
    pub price_range: (f64, f64),
    /// Accepted business display names. Empty means any.
    #[serde(default)]
    pub brands: BTreeSet<String>,
    #[serde(default)]
    pub sort_by: SortBy,
    /// Restrict to a single business (business profile page).
    #[serde(default)]
    pub business_id: Option<String>,
    /// Restrict to offers the viewer has saved.
    #[serde(default)]
    pub saved_only: bool,
}

pub const DEFAULT_MAX_PRICE: f64 = 2000.0;

fn default_price_range() -> (f64, f64) {
    (0.0, DEFAULT_MAX_PRICE)
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            category: CategoryFilter::All,
            price_range: default_price_range(),
            brands: BTreeSet::new(),
            sort_by: SortBy::Newest,
            business_id: None,
            saved_only: false,
        }
    }
}

impl FilterCriteria {
    /// Every offer, regardless of price, in the given order.
    pub fn everything(sort_by: SortBy) -> Self {
        Self {
            price_range: (0.0, f64::INFINITY),
            sort_by,
            ..Self::default()
        }
    }

    /// Offers posted by a single business.
    pub fn for_business(business_id: impl Into<String>) -> Self {
        Self {
            business_id: Some(business_id.into()),
            ..Self::everything(SortBy::Newest)
        }
    }

    /// Offers the viewer has saved.
    pub fn saved() -> Self {
        Self {
            saved_only: true,
            ..Self::everything(SortBy::Newest)
        }
    }

    /// Whether an offer passes every filter in these criteria.
    pub fn accepts(&self, offer: &Offer) -> bool {
        let (min, max) = self.price_range;

        self.category.matches(offer.category)
            && offer.discount_price >= min
            && offer.discount_price <= max
            && (self.brands.is_empty() || self.brands.contains(&offer.business_name))
            && self
                .business_id
                .as_deref()
                .is_none_or(|id| id == offer.business_id)
            && (!self.saved_only || offer.is_saved)
    }
}

/// A short-lived promotional story from a business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: String,
    pub business_id: String,
    pub business_name: String,
    pub business_avatar: String,
    pub image: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub viewed: bool,
}

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    NewOffer,
    Rating,
    Comment,
    Follow,
    Message,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Text,
    Image,
    File,
    Audio,
    Video,
}

/// File metadata carried by non-text messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub file_name: String,
    pub file_size: u64,
    pub file_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub kind: MessageKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub participants: Vec<Viewer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<Message>,
    pub unread_count: u32,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// The participant that is not `viewer_id`.
    pub fn counterpart(&self, viewer_id: &str) -> Option<&Viewer> {
        self.participants.iter().find(|p| p.id != viewer_id)
    }
}
