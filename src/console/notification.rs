//! Transient save/load notifications

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Dismissible message shown after a save or load attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub ok: bool,
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

impl Notification {
    pub fn success(message: impl Into<String>, ttl: Duration, now: DateTime<Utc>) -> Self {
        Self {
            ok: true,
            message: message.into(),
            expires_at: now + ttl,
        }
    }

    pub fn failure(message: impl Into<String>, ttl: Duration, now: DateTime<Utc>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            expires_at: now + ttl,
        }
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_expires() {
        let now = Utc::now();
        let notification = Notification::failure("Can not save", Duration::seconds(3), now);

        assert!(!notification.ok);
        assert!(notification.is_active(now));
        assert!(notification.is_active(now + Duration::seconds(2)));
        assert!(!notification.is_active(now + Duration::seconds(3)));
    }
}
