//! The fatal side of the dispatch error taxonomy.
//!
//! User-recoverable validation errors are never errors at the Rust
//! level — they travel inside
//! [`Response::Error`](crate::response::Response::Error). Everything in
//! this module signals a configuration or programming defect and comes
//! back as an `Err` from dispatch; callers treat it as their
//! 500-equivalent path and must not render it as a normal error page.

use thiserror::Error;

/// Fatal dispatch failures.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A request named an action with no registered factory.
    ///
    /// Deterministic: no validator, hook, or action code runs.
    #[error("no action registered for request name {name:?}")]
    UnknownAction {
        /// The unresolvable request name.
        name: String,
    },

    /// An action accumulated errors but never declared an error target.
    ///
    /// Every action that can fail validation must call
    /// `on_error_redirect_to` before its run completes.
    #[error("action {name:?} accumulated errors but declared no error target")]
    MissingErrorTarget {
        /// The name of the offending action.
        name: String,
    },

    /// An unhandled fault propagated out of an action's `run()`.
    ///
    /// The pipeline performs no recovery; the source error is surfaced
    /// unmodified. `after` hooks did not run.
    #[error("action {name:?} failed")]
    ActionFault {
        /// The name of the failing action.
        name: String,
        /// The underlying fault.
        #[source]
        source: anyhow::Error,
    },
}

impl DispatchError {
    /// The request name the failure is attributed to.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::UnknownAction { name }
            | Self::MissingErrorTarget { name }
            | Self::ActionFault { name, .. } => name,
        }
    }
}
