//! Per-run mutable action state.
//!
//! One [`Execution`] is created by the pipeline for each `handle()` call
//! and discarded afterwards. It holds everything an action's `run()`
//! mutates: the accumulated errors, the success payload, and any pending
//! redirect. Because each dispatch gets a fresh instance there is no
//! reset logic and no cross-request leakage.

use crate::request::Request;
use serde_json::{Map, Value};
use smallvec::SmallVec;

/// Mutable state owned by exactly one pipeline run.
///
/// Actions receive `&mut Execution` in `run()` and terminate by doing
/// exactly one of:
///
/// - leaving the errors empty and optionally writing payload data
///   ([`set`](Self::set)),
/// - leaving the errors empty and calling
///   [`redirect_to`](Self::redirect_to),
/// - accumulating one or more errors ([`add_error`](Self::add_error) /
///   [`merge_errors`](Self::merge_errors)), having declared where errors
///   route via [`on_error_redirect_to`](Self::on_error_redirect_to).
#[derive(Debug)]
pub struct Execution {
    request: Request,
    data: Map<String, Value>,
    errors: SmallVec<[String; 2]>,
    next_request: Option<Request>,
    redirect_message: String,
    error_request: Option<Request>,
}

impl Execution {
    /// Create fresh state for one run of the given request.
    #[must_use]
    pub fn new(request: Request) -> Self {
        Self {
            request,
            data: Map::new(),
            errors: SmallVec::new(),
            next_request: None,
            redirect_message: String::new(),
            error_request: None,
        }
    }

    /// The request that led to this run.
    #[must_use]
    pub const fn request(&self) -> &Request {
        &self.request
    }

    /// Write one entry of the success payload.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    /// The payload accumulated so far.
    #[must_use]
    pub const fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Whether `run()` produced any payload data.
    #[must_use]
    pub fn has_data(&self) -> bool {
        !self.data.is_empty()
    }

    /// Append an error message. Chainable.
    pub fn add_error(&mut self, error: impl Into<String>) -> &mut Self {
        self.errors.push(error.into());
        self
    }

    /// Append every message of an externally supplied batch, in order.
    pub fn merge_errors<I>(&mut self, errors: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        for error in errors {
            self.add_error(error);
        }
        self
    }

    /// Whether any errors have been accumulated.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The errors accumulated so far, in call order.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Set a follow-up request to execute after this action succeeds.
    pub fn redirect_to(&mut self, next: Request, message: impl Into<String>) {
        self.next_request = Some(next);
        self.redirect_message = message.into();
    }

    /// Declare the request errors should route to.
    ///
    /// Every action that can accumulate errors must call this before its
    /// run completes — building an error response without a declared
    /// target is a fatal contract violation, not a user-facing error.
    pub fn on_error_redirect_to(&mut self, target: Request) {
        self.error_request = Some(target);
    }

    /// The pending redirect, if any.
    #[must_use]
    pub const fn next_request(&self) -> Option<&Request> {
        self.next_request.as_ref()
    }

    /// The message attached to the pending redirect.
    #[must_use]
    pub fn redirect_message(&self) -> &str {
        &self.redirect_message
    }

    /// The declared error target, if any.
    #[must_use]
    pub const fn error_request(&self) -> Option<&Request> {
        self.error_request.as_ref()
    }
}
