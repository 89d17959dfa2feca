//! The viewer's notification inbox.

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::{CatalogError, Result};
use crate::model::{Notification, NotificationKind};
use crate::seed;

/// Notifications for a single viewer, newest first, with an unread counter.
///
/// The counter moves with each operation instead of being recounted, so it
/// is floored at zero on the way down.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    viewer_id: String,
    notifications: Vec<Notification>,
    unread: usize,
}

impl NotificationCenter {
    /// An empty inbox for `viewer_id`.
    pub fn new(viewer_id: impl Into<String>) -> Self {
        Self {
            viewer_id: viewer_id.into(),
            notifications: Vec::new(),
            unread: 0,
        }
    }

    /// An inbox pre-filled with the seed notifications.
    pub fn seeded(viewer_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        let viewer_id = viewer_id.into();
        let notifications = seed::notifications(&viewer_id, now);
        let unread = notifications.iter().filter(|n| !n.read).count();

        debug!(count = notifications.len(), unread, "Notifications loaded");

        Self {
            viewer_id,
            notifications,
            unread,
        }
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.unread
    }

    /// Push a new unread notification to the front of the inbox.
    #[instrument(skip(self, title, message, data))]
    pub fn add(
        &mut self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        data: Option<serde_json::Value>,
    ) -> &Notification {
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            user_id: self.viewer_id.clone(),
            kind,
            title: title.into(),
            message: message.into(),
            data,
            read: false,
            created_at: Utc::now(),
        };

        info!(id = %notification.id, kind = ?kind, "Notification added");

        self.notifications.insert(0, notification);
        self.unread += 1;

        &self.notifications[0]
    }

    #[instrument(skip(self))]
    pub fn mark_read(&mut self, notification_id: &str) -> Result<()> {
        let notification = self
            .notifications
            .iter_mut()
            .find(|n| n.id == notification_id)
            .ok_or_else(|| CatalogError::NotificationNotFound(notification_id.to_string()))?;

        if !notification.read {
            notification.read = true;
            self.unread = self.unread.saturating_sub(1);
        }

        Ok(())
    }

    pub fn mark_all_read(&mut self) {
        for notification in &mut self.notifications {
            notification.read = true;
        }
        self.unread = 0;
    }

    /// Remove a notification, returning it.
    #[instrument(skip(self))]
    pub fn delete(&mut self, notification_id: &str) -> Result<Notification> {
        let index = self
            .notifications
            .iter()
            .position(|n| n.id == notification_id)
            .ok_or_else(|| CatalogError::NotificationNotFound(notification_id.to_string()))?;

        let removed = self.notifications.remove(index);
        if !removed.read {
            self.unread = self.unread.saturating_sub(1);
        }

        info!(notification_id, "Notification deleted");

        Ok(removed)
    }
}
