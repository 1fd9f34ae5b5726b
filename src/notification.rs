//! User feedback notices, delivered fire-and-forget.
//!
//! The engine reports fills, clears, zoom resets and autosave failures through
//! a [`Notifier`]. Delivery is best effort: nothing in the engine depends on a
//! notice arriving.

use std::collections::HashMap;
use thiserror::Error;
use zbus::{Connection, proxy};

/// How long a desktop notification stays up.
const NOTICE_TIMEOUT_MS: i32 = 3000;

/// Events worth telling the user about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Filled,
    Cleared,
    ZoomReset,
    AutosaveFailed(String),
}

impl Notice {
    pub fn summary(&self) -> &'static str {
        match self {
            Notice::Filled => "Filled! 🎨",
            Notice::Cleared => "Canvas cleared! ✨",
            Notice::ZoomReset => "Zoom reset 🔍",
            Notice::AutosaveFailed(_) => "Autosave failed 😭",
        }
    }

    pub fn body(&self) -> String {
        match self {
            Notice::Filled => "The region was filled with the current color.".to_string(),
            Notice::Cleared => "Start a fresh doodle.".to_string(),
            Notice::ZoomReset => "Back to 100%.".to_string(),
            Notice::AutosaveFailed(reason) => format!("Your draft was not saved: {reason}"),
        }
    }

    /// Freedesktop urgency level: 1 normal, 2 critical.
    pub fn urgency(&self) -> u8 {
        match self {
            Notice::AutosaveFailed(_) => 2,
            _ => 1,
        }
    }

    /// Freedesktop icon name used for desktop notifications.
    pub fn icon(&self) -> &'static str {
        match self {
            Notice::AutosaveFailed(_) => "dialog-warning",
            Notice::ZoomReset => "zoom-original",
            Notice::Filled | Notice::Cleared => "applications-graphics",
        }
    }
}

/// Receives engine notices.
pub trait Notifier {
    fn notify(&self, notice: &Notice);
}

impl<F> Notifier for F
where
    F: Fn(&Notice),
{
    fn notify(&self, notice: &Notice) {
        self(notice)
    }
}

/// Discards every notice.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _notice: &Notice) {}
}

/// Writes notices to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &Notice) {
        match notice {
            Notice::AutosaveFailed(_) => log::warn!("{} {}", notice.summary(), notice.body()),
            _ => log::info!("{} {}", notice.summary(), notice.body()),
        }
    }
}

/// Failures while delivering a desktop notification.
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Failed to connect to session bus: {0}")]
    Connect(#[source] zbus::Error),

    #[error("Failed to create notifications proxy: {0}")]
    Proxy(#[source] zbus::Error),

    #[error("Failed to send notification: {0}")]
    Send(#[source] zbus::Error),
}

#[proxy(
    interface = "org.freedesktop.Notifications",
    default_service = "org.freedesktop.Notifications",
    default_path = "/org/freedesktop/Notifications"
)]
trait Notifications {
    /// Returns the notification id; `replaces_id` 0 creates a new one.
    #[allow(clippy::too_many_arguments)]
    fn notify(
        &self,
        app_name: &str,
        replaces_id: u32,
        app_icon: &str,
        summary: &str,
        body: &str,
        actions: Vec<&str>,
        hints: HashMap<&str, zbus::zvariant::Value<'_>>,
        expire_timeout: i32,
    ) -> zbus::Result<u32>;
}

/// Shows `notice` through the freedesktop notification service.
pub async fn send_notification(notice: &Notice) -> Result<u32, NotificationError> {
    let connection = Connection::session()
        .await
        .map_err(NotificationError::Connect)?;
    let proxy = NotificationsProxy::new(&connection)
        .await
        .map_err(NotificationError::Proxy)?;

    let mut hints = HashMap::new();
    hints.insert("urgency", zbus::zvariant::Value::U8(notice.urgency()));

    proxy
        .notify(
            "Doodle Engine",
            0,
            notice.icon(),
            notice.summary(),
            &notice.body(),
            vec![],
            hints,
            NOTICE_TIMEOUT_MS,
        )
        .await
        .map_err(NotificationError::Send)
}

/// Sends notices as desktop notifications on a tokio runtime.
///
/// Each notice is spawned as its own task; failures are only logged.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    runtime_handle: tokio::runtime::Handle,
}

impl DesktopNotifier {
    pub fn new(runtime_handle: tokio::runtime::Handle) -> Self {
        Self { runtime_handle }
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, notice: &Notice) {
        let notice = notice.clone();
        self.runtime_handle.spawn(async move {
            if let Err(err) = send_notification(&notice).await {
                log::warn!("{err}");
            }
        });
    }
}
