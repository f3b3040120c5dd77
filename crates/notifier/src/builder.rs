use std::sync::Arc;

use dqnotify_core::NotificationConfig;
use dqnotify_dispatcher::DynDispatcher;
use dqnotify_executor::{DispatchExecutor, ExecutorConfig};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::error::NotifierError;
use crate::notifier::{Notifier, NotifierInner};

/// Fluent builder for a [`Notifier`].
///
/// A [`NotificationConfig`] and a dispatcher are required; the executor
/// configuration defaults to [`ExecutorConfig::default`].
pub struct NotifierBuilder {
    config: Option<NotificationConfig>,
    dispatcher: Option<Arc<dyn DynDispatcher>>,
    executor_config: ExecutorConfig,
}

impl NotifierBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            dispatcher: None,
            executor_config: ExecutorConfig::default(),
        }
    }

    #[must_use]
    pub fn config(mut self, config: NotificationConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn dispatcher(mut self, dispatcher: Arc<dyn DynDispatcher>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    #[must_use]
    pub fn executor_config(mut self, config: ExecutorConfig) -> Self {
        self.executor_config = config;
        self
    }

    pub fn build(self) -> Result<Notifier, NotifierError> {
        let config = self
            .config
            .ok_or_else(|| NotifierError::Configuration("notification config is required".into()))?;
        let dispatcher = self
            .dispatcher
            .ok_or_else(|| NotifierError::Configuration("dispatcher is required".into()))?;

        Ok(Notifier {
            inner: Arc::new(NotifierInner {
                config,
                dispatcher,
                executor: DispatchExecutor::new(self.executor_config),
            }),
            tracker: TaskTracker::new(),
            cancel: CancellationToken::new(),
        })
    }
}

impl Default for NotifierBuilder {
    fn default() -> Self {
        Self::new()
    }
}
