//! Notification trigger configuration for data-quality runs.
//!
//! [`NotificationConfig::build`] validates user-supplied options (see
//! [`keys`]) and [`NotificationConfig::should_notify`] decides, per
//! [`LifecycleEvent`], whether a notification fires.

pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod keys;
pub mod message;
pub mod options;
mod trigger;

pub use config::NotificationConfig;
pub use context::RunContext;
pub use error::ConfigError;
pub use event::LifecycleEvent;
pub use message::{NotificationMessage, ThresholdDetail};
pub use options::RawOptions;
