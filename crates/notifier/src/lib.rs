//! Run-scoped notification orchestration.
//!
//! A [`Notifier`] ties a validated [`NotificationConfig`](dqnotify_core::NotificationConfig)
//! to a dispatcher and guarantees that notification problems are logged and
//! swallowed rather than failing or stalling the data-quality run.

pub mod builder;
pub mod error;
pub mod notifier;
pub mod outcome;

pub use builder::NotifierBuilder;
pub use error::NotifierError;
pub use notifier::Notifier;
pub use outcome::NotifyOutcome;
