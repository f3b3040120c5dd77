use chrono::{DateTime, Utc};

/// Metadata about the run a lifecycle event belongs to.
///
/// Built by the caller at the point the event happens. The error drop
/// percentage is computed upstream by the aggregation engine; this type only
/// carries it.
#[derive(Debug, Clone, PartialEq)]
pub struct RunContext {
    /// Job or product identifier.
    pub job: String,
    /// Target table, if the run writes one.
    pub table: Option<String>,
    /// Deployment environment (e.g. `dev`, `prod`).
    pub environment: String,
    /// Identifier of this run.
    pub run_id: Option<String>,
    /// When the event happened.
    pub timestamp: DateTime<Utc>,
    /// Observed percentage of records dropped due to errors.
    pub observed_error_drop_percent: Option<f64>,
    /// Names of rules that failed.
    pub failed_rules: Vec<String>,
    /// Failure description for [`LifecycleEvent::Failure`](crate::LifecycleEvent::Failure).
    pub error: Option<String>,
}

impl RunContext {
    /// Create a context for the given job, stamped with the current time.
    #[must_use]
    pub fn new(job: impl Into<String>) -> Self {
        Self {
            job: job.into(),
            table: None,
            environment: "default".to_owned(),
            run_id: None,
            timestamp: Utc::now(),
            observed_error_drop_percent: None,
            failed_rules: Vec::new(),
            error: None,
        }
    }

    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    #[must_use]
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    #[must_use]
    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[must_use]
    pub fn with_observed_error_drop_percent(mut self, percent: f64) -> Self {
        self.observed_error_drop_percent = Some(percent);
        self
    }

    /// Record a failed rule by name.
    #[must_use]
    pub fn with_failed_rule(mut self, rule: impl Into<String>) -> Self {
        self.failed_rules.push(rule.into());
        self
    }

    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}
