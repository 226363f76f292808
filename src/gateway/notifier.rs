use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::lending::{LendingError, LendingResult};
use crate::utils::date::serializer;

// Notification abstracts a message sent to a member, driver or student.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub notification_id: String,
    pub recipient: String,
    pub subject: String,
    pub message: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
}

impl Notification {
    pub fn new(recipient: &str, subject: &str, message: &str) -> Self {
        Self {
            notification_id: Uuid::new_v4().to_string(),
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
            created_at: Utc::now().naive_utc(),
        }
    }
}

#[async_trait]
pub trait Notifier: Sync + Send {
    async fn notify(&self, recipient: &str, subject: &str, message: &str) -> LendingResult<()>;
    async fn broadcast(&self, recipients: &[String], subject: &str, message: &str) -> LendingResult<()>;
}

// LoggingNotifier narrates through tracing, which is all the demo bins need.
pub struct LoggingNotifier {}

impl LoggingNotifier {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for LoggingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for LoggingNotifier {
    async fn notify(&self, recipient: &str, subject: &str, message: &str) -> LendingResult<()> {
        tracing::info!(recipient, subject, "{}", message);
        Ok(())
    }

    async fn broadcast(&self, recipients: &[String], subject: &str, message: &str) -> LendingResult<()> {
        for recipient in recipients {
            self.notify(recipient.as_str(), subject, message).await?;
        }
        Ok(())
    }
}

// MemoryNotifier records every notification so tests can assert on what the
// services sent. Cloned handles share the same buffer.
#[derive(Clone)]
pub struct MemoryNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        match self.sent.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => Vec::new(),
        }
    }
}

impl Default for MemoryNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for MemoryNotifier {
    async fn notify(&self, recipient: &str, subject: &str, message: &str) -> LendingResult<()> {
        let mut guard = self.sent.lock().map_err(|e|
            LendingError::runtime(format!("notifier lock poisoned {:?}", e).as_str(), None))?;
        guard.push(Notification::new(recipient, subject, message));
        Ok(())
    }

    async fn broadcast(&self, recipients: &[String], subject: &str, message: &str) -> LendingResult<()> {
        for recipient in recipients {
            self.notify(recipient.as_str(), subject, message).await?;
        }
        Ok(())
    }
}
