//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::NotificationKind;

/// A notification delivered to a user.
///
/// Invariants enforced by the notification service: `recipient_id` is
/// never equal to `actor_id`, and within the dedup window at most one
/// row exists per (recipient, actor, kind, post, comment) tuple.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// The recipient user.
    pub recipient_id: Uuid,
    /// The user whose action triggered this notification.
    pub actor_id: Uuid,
    /// The triggering action kind.
    pub kind: NotificationKind,
    /// The post involved, if any.
    pub post_id: Option<Uuid>,
    /// The comment involved, if any.
    pub comment_id: Option<Uuid>,
    /// Whether the recipient has read this notification.
    pub is_read: bool,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Build a new unread notification with a fresh id and timestamp.
    pub fn new(
        recipient_id: Uuid,
        actor_id: Uuid,
        kind: NotificationKind,
        post_id: Option<Uuid>,
        comment_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient_id,
            actor_id,
            kind,
            post_id,
            comment_id,
            is_read: false,
            created_at: Utc::now(),
        }
    }
}
