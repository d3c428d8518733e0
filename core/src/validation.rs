//! Pre-execution request validation.
//!
//! Validators are keyed by action name in the dispatch registry and run
//! before the target action is even constructed. On failure the registry
//! produces a [`Response::Error`](crate::response::Response::Error)
//! directly — validators never see an action's internal state, and
//! actions never see validator internals.

use crate::request::Request;

/// A pre-execution check for one action name.
pub trait Validator: Send + Sync {
    /// Inspect a request before its action is constructed.
    fn validate(&self, request: &Request) -> ValidationOutcome;
}

/// The result of running a validator against a request.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// The request may proceed to its action.
    Pass,

    /// The request is rejected without constructing the action.
    ///
    /// The failure payload owns the error target: the action never runs
    /// on this path, so it cannot supply one.
    Fail {
        /// The request the resulting error response routes to.
        target: Request,
        /// Ordered, non-empty list of messages to surface.
        errors: Vec<String>,
    },
}

impl ValidationOutcome {
    /// The passing outcome.
    #[must_use]
    pub const fn pass() -> Self {
        Self::Pass
    }

    /// Build a failing outcome from a target and a batch of messages.
    #[must_use]
    pub fn fail<I>(target: Request, errors: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::Fail {
            target,
            errors: errors.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the request may proceed.
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}
