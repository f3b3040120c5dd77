use thiserror::Error;

/// Errors raised while assembling a [`Notifier`](crate::Notifier).
#[derive(Debug, Error)]
pub enum NotifierError {
    /// The notifier was missing a required component.
    #[error("configuration error: {0}")]
    Configuration(String),
}
