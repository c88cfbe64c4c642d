use std::error::Error as StdError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationDuration {
    #[default]
    Short,
    Long,
}

/// Transient user-visible message describing the outcome of a send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub duration: NotificationDuration,
}

impl Notification {
    pub fn short(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            duration: NotificationDuration::Short,
        }
    }

    pub fn long(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            duration: NotificationDuration::Long,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("notification failed: {0}")]
pub struct NotifyError(#[source] pub Box<dyn StdError + Send + Sync>);

impl NotifyError {
    pub fn new(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self(err.into())
    }
}

/// Best-effort surface for showing [`Notification`]s to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Writes notifications to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        log::info!(
            target: super::LOG_TARGET,
            "notification ({:?}): {}",
            notification.duration,
            notification.text
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _notification: &Notification) -> Result<(), NotifyError> {
        Ok(())
    }
}
