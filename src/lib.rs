//! DealDock - the domain core of a social deal-discovery front end.
//!
//! # Overview
//!
//! Businesses post discount offers. Customers browse, save, rate and comment
//! on them. Both sides exchange messages and receive notifications.
//!
//! All state lives in memory and is seeded at startup. There is no backend,
//! no persistence and no authentication: the viewer identity is supplied by
//! the caller and trusted as-is.
//!
//! # Modules
//!
//! - [`model`]: Offers, ratings, comments, feed criteria and the inbox types
//! - [`catalog`]: The offer store and its mutations
//! - [`aggregation`]: Feed filtering/sorting, rating averages and summaries
//! - [`stories`], [`notifications`], [`messages`]: Independent inbox-style stores
//! - [`config`]: Environment configuration for the binary

pub mod aggregation;
pub mod catalog;
pub mod config;
pub mod error;
pub mod messages;
pub mod model;
pub mod notifications;
pub mod seed;
pub mod stories;

pub use catalog::{CatalogState, OfferCatalog};
pub use error::CatalogError;
