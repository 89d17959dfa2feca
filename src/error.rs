//! Errors raised by the DealDock stores.
//!
//! Every error is local to a single operation. The store that raised it is
//! left exactly as it was before the call.

/// Store-level errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Discount price must be lower than original price (original {original}, discount {discount})")]
    NonPositiveDiscount { original: f64, discount: f64 },

    #[error("Rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(u8),

    #[error("Offer not found: {0}")]
    OfferNotFound(String),

    #[error("Story not found: {0}")]
    StoryNotFound(String),

    #[error("Notification not found: {0}")]
    NotificationNotFound(String),

    #[error("Conversation not found: {0}")]
    ConversationNotFound(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
