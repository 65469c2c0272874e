// src/session.rs
use crate::config::AppConfig;
use crate::error::StoryError;
use chrono::{DateTime, Duration, Utc};

/// Authenticated viewing session with an explicit expiry timestamp.
///
/// Created by checking the PIN once at the composition root and passed
/// through explicitly; there is no ambient auth state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub authenticated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn authenticate(
        pin: &str,
        config: &AppConfig,
        now: DateTime<Utc>,
    ) -> Result<Self, StoryError> {
        if pin != config.pin {
            return Err(StoryError::IncorrectPin);
        }

        Ok(Session {
            authenticated_at: now,
            expires_at: now + Duration::days(config.auth_expiry_days),
        })
    }

    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}
