//! The closed result type of one dispatch.
//!
//! Every pipeline run produces exactly one [`Response`] variant. The
//! transport layer is responsible for rendering it (JSON body, 3xx
//! redirect, error page…); nothing in this crate knows about HTTP.

use crate::request::Request;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The result of dispatching one [`Request`].
///
/// A closed variant set: success payload, redirect to a follow-up
/// request, or a recoverable error routed to a target request. Fatal
/// conditions (unknown action, missing error target, unhandled faults)
/// are *not* responses — they surface as
/// [`DispatchError`](crate::error::DispatchError).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Response {
    /// Terminal success carrying the data the action produced.
    Data {
        /// Payload written by the action's `run()`.
        payload: Map<String, Value>,
    },

    /// Terminal success instructing the caller to re-dispatch `next`.
    Redirect {
        /// The follow-up request to dispatch.
        next: Request,
        /// Human-readable message to surface alongside the redirect.
        message: String,
    },

    /// Recoverable failure: dispatch `target` while surfacing `errors`.
    Error {
        /// The request to route the user to.
        target: Request,
        /// Ordered, non-empty list of human-readable messages.
        errors: Vec<String>,
    },
}

impl Response {
    /// Whether this is a [`Response::Data`].
    #[must_use]
    pub const fn is_data(&self) -> bool {
        matches!(self, Self::Data { .. })
    }

    /// Whether this is a [`Response::Redirect`].
    #[must_use]
    pub const fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }

    /// Whether this is a [`Response::Error`].
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Short variant name, used in log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Data { .. } => "data",
            Self::Redirect { .. } => "redirect",
            Self::Error { .. } => "error",
        }
    }
}
