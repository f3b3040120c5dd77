use async_trait::async_trait;
use dqnotify_core::NotificationMessage;

use crate::error::DispatchError;

/// Delivers a notification message to a webhook.
///
/// This trait is **not** object-safe because it uses native `async fn`
/// methods. For dynamic dispatch use [`DynDispatcher`]; every `Dispatcher`
/// implements it through a blanket implementation.
///
/// Implementations should not retry or enforce timeouts themselves; the
/// executor wraps every call with both.
pub trait Dispatcher: Send + Sync {
    /// Returns the unique name of this dispatcher.
    fn name(&self) -> &str;

    /// Deliver `message` to `webhook_url`.
    fn send(
        &self,
        webhook_url: &str,
        message: &NotificationMessage,
    ) -> impl std::future::Future<Output = Result<(), DispatchError>> + Send;
}

/// Object-safe dispatcher trait for use behind `Arc<dyn DynDispatcher>`.
///
/// You generally should not implement this trait directly; implement
/// [`Dispatcher`] and rely on the blanket implementation.
#[async_trait]
pub trait DynDispatcher: Send + Sync {
    /// Returns the unique name of this dispatcher.
    fn name(&self) -> &str;

    /// Deliver `message` to `webhook_url`.
    async fn send(
        &self,
        webhook_url: &str,
        message: &NotificationMessage,
    ) -> Result<(), DispatchError>;
}

#[async_trait]
impl<T: Dispatcher + Sync> DynDispatcher for T {
    fn name(&self) -> &str {
        Dispatcher::name(self)
    }

    async fn send(
        &self,
        webhook_url: &str,
        message: &NotificationMessage,
    ) -> Result<(), DispatchError> {
        Dispatcher::send(self, webhook_url, message).await
    }
}

#[cfg(test)]
#[allow(clippy::unnecessary_literal_bound)]
mod tests {
    use std::sync::Arc;

    use dqnotify_core::{LifecycleEvent, NotificationConfig, RunContext};

    use super::*;

    struct MockDispatcher {
        should_fail: bool,
    }

    impl Dispatcher for MockDispatcher {
        fn name(&self) -> &str {
            "mock"
        }

        async fn send(
            &self,
            webhook_url: &str,
            _message: &NotificationMessage,
        ) -> Result<(), DispatchError> {
            if self.should_fail {
                return Err(DispatchError::Connection(format!("{webhook_url} unreachable")));
            }
            Ok(())
        }
    }

    fn message() -> NotificationMessage {
        NotificationConfig::default().build_message(LifecycleEvent::Start, &RunContext::new("j"))
    }

    #[tokio::test]
    async fn dispatcher_send_success() {
        let dispatcher = MockDispatcher { should_fail: false };
        Dispatcher::send(&dispatcher, "https://example.test/hook", &message())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn blanket_dyn_dispatcher_impl() {
        let dispatcher: Arc<dyn DynDispatcher> = Arc::new(MockDispatcher { should_fail: true });
        assert_eq!(dispatcher.name(), "mock");
        let err = dispatcher
            .send("https://example.test/hook", &message())
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::Connection(_)));
        assert!(err.is_retryable());
    }
}
