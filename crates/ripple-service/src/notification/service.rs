//! Notification creation with dedup, plus recipient-side reads.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use ripple_core::config::notification::NotificationConfig;
use ripple_core::error::AppError;
use ripple_core::result::AppResult;
use ripple_core::types::pagination::{PageRequest, PageResponse};
use ripple_database::store::NotificationStore;
use ripple_entity::notification::{Notification, NotificationKind};

/// A page of notifications together with the recipient's unread count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationList {
    /// The requested page, newest first.
    pub page: PageResponse<Notification>,
    /// Unread notifications across all pages.
    pub unread_count: u64,
}

/// Creates and manages user notifications.
///
/// Creation is idempotent within a rolling window: an identical
/// (recipient, actor, kind, post, comment) tuple inside the window
/// returns the existing row instead of inserting a duplicate, and
/// self-actions never produce a notification at all.
#[derive(Clone)]
pub struct NotificationService {
    /// Notification store.
    store: Arc<dyn NotificationStore>,
    /// Dedup settings.
    config: NotificationConfig,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(store: Arc<dyn NotificationStore>, config: NotificationConfig) -> Self {
        Self { store, config }
    }

    /// Create a notification, suppressing self-actions and duplicates.
    ///
    /// Returns `None` when the actor is the recipient; otherwise the
    /// stored notification — either a fresh unread row or the existing
    /// in-window match, unchanged.
    pub async fn notify(
        &self,
        recipient_id: Uuid,
        actor_id: Uuid,
        kind: NotificationKind,
        post_id: Option<Uuid>,
        comment_id: Option<Uuid>,
    ) -> AppResult<Option<Notification>> {
        if recipient_id == actor_id {
            return Ok(None);
        }

        let since = Utc::now() - Duration::hours(self.config.dedup_window_hours);
        if let Some(existing) = self
            .store
            .find_duplicate(recipient_id, actor_id, kind, post_id, comment_id, since)
            .await?
        {
            debug!(
                %recipient_id,
                %actor_id,
                kind = %kind,
                "Duplicate notification suppressed"
            );
            return Ok(Some(existing));
        }

        let notification = Notification::new(recipient_id, actor_id, kind, post_id, comment_id);
        let created = self.store.insert(&notification).await?;
        Ok(Some(created))
    }

    /// List a recipient's notifications, newest first, with the unread
    /// count.
    pub async fn list(
        &self,
        recipient_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<NotificationList> {
        let (items, total, unread_count) = tokio::try_join!(
            self.store
                .find_by_recipient(recipient_id, page.limit() as i64, page.offset() as i64),
            self.store.count_by_recipient(recipient_id),
            self.store.count_unread(recipient_id),
        )?;

        Ok(NotificationList {
            page: PageResponse::new(items, page.page, page.page_size, total),
            unread_count,
        })
    }

    /// Mark one of the recipient's notifications read.
    pub async fn mark_read(&self, recipient_id: Uuid, notification_id: Uuid) -> AppResult<()> {
        let notification = self
            .store
            .find_by_id(notification_id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))?;

        if notification.recipient_id != recipient_id {
            return Err(AppError::authorization("Notification belongs to another user"));
        }

        self.store.mark_read(notification_id).await
    }

    /// Mark all of the recipient's notifications read. Returns the
    /// number updated.
    pub async fn mark_all_read(&self, recipient_id: Uuid) -> AppResult<u64> {
        self.store.mark_all_read(recipient_id).await
    }

    /// Delete one of the recipient's notifications.
    pub async fn delete(&self, recipient_id: Uuid, notification_id: Uuid) -> AppResult<()> {
        let notification = self
            .store
            .find_by_id(notification_id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))?;

        if notification.recipient_id != recipient_id {
            return Err(AppError::authorization("Notification belongs to another user"));
        }

        self.store.delete(notification_id).await
    }
}
