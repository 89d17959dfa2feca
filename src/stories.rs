//! The stories strip shown above the feed.

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use crate::error::{CatalogError, Result};
use crate::model::Story;
use crate::seed;

/// In-memory collection of business stories.
#[derive(Debug, Clone, Default)]
pub struct StoryReel {
    stories: Vec<Story>,
}

impl StoryReel {
    pub fn new(stories: Vec<Story>) -> Self {
        Self { stories }
    }

    /// Replace the contents with the seed stories, timestamped at `now`.
    pub fn load_seed(&mut self, now: DateTime<Utc>) {
        self.stories = seed::stories(now);
        debug!(count = self.stories.len(), "Stories loaded");
    }

    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn unviewed_count(&self) -> usize {
        self.stories.iter().filter(|s| !s.viewed).count()
    }

    /// Mark a story as viewed. Viewing an already viewed story is a no-op.
    #[instrument(skip(self))]
    pub fn mark_viewed(&mut self, story_id: &str) -> Result<&Story> {
        let story = self
            .stories
            .iter_mut()
            .find(|s| s.id == story_id)
            .ok_or_else(|| CatalogError::StoryNotFound(story_id.to_string()))?;

        if !story.viewed {
            story.viewed = true;
            info!(story_id, business = %story.business_name, "Story viewed");
        }

        Ok(story)
    }
}
