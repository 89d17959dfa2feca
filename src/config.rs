//! Environment-driven configuration for the `dealdock` binary.
//!
//! Every setting has a default; unparsable values fall back to it.

use std::env;
use std::time::Duration;

use crate::model::{CategoryFilter, DEFAULT_MAX_PRICE, FilterCriteria, SortBy, Viewer};

const DEFAULT_DELAY_MS: u64 = 1000;
const DEFAULT_VIEWER_ID: &str = "current-user";
const DEFAULT_VIEWER_NAME: &str = "John Doe";
const DEFAULT_VIEWER_AVATAR: &str =
    "https://images.pexels.com/photos/1367269/pexels-photo-1367269.jpeg?auto=compress&cs=tinysrgb&w=100";

#[derive(Debug, Clone)]
pub struct Config {
    /// Simulated latency of the initial catalog load.
    pub load_delay: Duration,
    /// Simulated latency of the post-offer form.
    pub submit_delay: Duration,
    pub viewer: Viewer,
    /// Feed criteria printed by the binary.
    pub criteria: FilterCriteria,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    /// Read configuration from `DEALDOCK_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let millis = |key: &str| {
            Duration::from_millis(
                lookup(key)
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_DELAY_MS),
            )
        };

        let viewer = Viewer::new(
            lookup("DEALDOCK_VIEWER_ID").unwrap_or_else(|| DEFAULT_VIEWER_ID.to_string()),
            lookup("DEALDOCK_VIEWER_NAME").unwrap_or_else(|| DEFAULT_VIEWER_NAME.to_string()),
            lookup("DEALDOCK_VIEWER_AVATAR").unwrap_or_else(|| DEFAULT_VIEWER_AVATAR.to_string()),
        );

        let category: CategoryFilter = lookup("DEALDOCK_CATEGORY")
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        let sort_by: SortBy = lookup("DEALDOCK_SORT")
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        let max_price: f64 = lookup("DEALDOCK_MAX_PRICE")
            .and_then(|v| v.parse().ok())
            .filter(|p: &f64| *p >= 0.0)
            .unwrap_or(DEFAULT_MAX_PRICE);

        Self {
            load_delay: millis("DEALDOCK_LOAD_DELAY_MS"),
            submit_delay: millis("DEALDOCK_SUBMIT_DELAY_MS"),
            viewer,
            criteria: FilterCriteria {
                category,
                price_range: (0.0, max_price),
                sort_by,
                ..FilterCriteria::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.load_delay, Duration::from_millis(1000));
        assert_eq!(config.viewer.id, "current-user");
        assert_eq!(config.criteria, FilterCriteria::default());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("DEALDOCK_LOAD_DELAY_MS", "0"),
            ("DEALDOCK_VIEWER_NAME", "Ada"),
            ("DEALDOCK_CATEGORY", "Sports"),
            ("DEALDOCK_SORT", "discount"),
            ("DEALDOCK_MAX_PRICE", "150"),
        ]);

        assert_eq!(config.load_delay, Duration::ZERO);
        assert_eq!(config.viewer.name, "Ada");
        assert_eq!(config.criteria.category, CategoryFilter::Only(Category::Sports));
        assert_eq!(config.criteria.sort_by, SortBy::Discount);
        assert_eq!(config.criteria.price_range, (0.0, 150.0));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config(&[
            ("DEALDOCK_SUBMIT_DELAY_MS", "soon"),
            ("DEALDOCK_CATEGORY", "Toys"),
            ("DEALDOCK_MAX_PRICE", "-5"),
        ]);

        assert_eq!(config.submit_delay, Duration::from_millis(1000));
        assert_eq!(config.criteria.category, CategoryFilter::All);
        assert_eq!(config.criteria.price_range, (0.0, 2000.0));
    }
}
