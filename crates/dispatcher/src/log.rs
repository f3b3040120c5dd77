use dqnotify_core::NotificationMessage;
use tracing::info;

use crate::dispatcher::Dispatcher;
use crate::error::DispatchError;

/// A dispatcher that logs the message and reports success without any
/// network I/O.
///
/// Useful for dry runs and local development. Only the host of the webhook
/// URL is logged since the path carries the secret.
pub struct LogDispatcher {
    name: String,
}

impl LogDispatcher {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for LogDispatcher {
    fn default() -> Self {
        Self::new("log")
    }
}

impl Dispatcher for LogDispatcher {
    fn name(&self) -> &str {
        &self.name
    }

    #[allow(clippy::unused_async)]
    async fn send(
        &self,
        webhook_url: &str,
        message: &NotificationMessage,
    ) -> Result<(), DispatchError> {
        info!(
            dispatcher = %self.name,
            host = webhook_host(webhook_url),
            event = %message.event,
            job = %message.job,
            environment = %message.environment,
            text = %message.text(),
            "log dispatcher delivered notification"
        );
        Ok(())
    }
}

/// Extract the host portion of a URL, or `"unknown"` if there is none.
///
/// Credentials in the authority (`user:token@host`) are dropped.
pub(crate) fn webhook_host(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);
    if host.is_empty() { "unknown" } else { host }
}
