//! Collaborator traits injected into actions.
//!
//! All external dependencies an action touches are abstracted behind
//! `Send + Sync` traits and injected at construction time. The pipeline
//! itself performs no I/O; any blocking (database access, auth calls)
//! happens inside `run()` through these capabilities.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Abstracts time operations for testability.
///
/// Actions never call `Utc::now()` directly; they take a `Clock` so
/// tests can pin timestamps.
pub trait Clock: Send + Sync {
    /// Get the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// System clock for production use.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A domain event raised by an action, as handed to an [`EventSink`].
///
/// Carries a name tag and a JSON payload rather than a concrete type, so
/// the core stays independent of any one domain's event vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainEvent {
    /// Event name tag, e.g. `"user_has_posted"`.
    pub name: String,

    /// Serialized event body.
    pub payload: Value,
}

impl DomainEvent {
    /// Build an event by serializing the given body.
    ///
    /// # Errors
    ///
    /// Returns the serialization error if the body cannot be represented
    /// as a JSON value.
    pub fn new(
        name: impl Into<String>,
        body: &impl Serialize,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            name: name.into(),
            payload: serde_json::to_value(body)?,
        })
    }
}

/// The messaging collaborator actions raise domain events through.
///
/// Contract: `publish` is a synchronous, at-most-once, fire-and-forget
/// call. A sink failure must not fail the action — implementations
/// swallow or log their own errors and must not panic. Anything stronger
/// (at-least-once delivery, async fan-out) belongs to a real bus behind
/// this same trait.
pub trait EventSink: Send + Sync {
    /// Deliver one event.
    fn publish(&self, event: DomainEvent);
}

/// An [`EventSink`] that drops every event.
///
/// Useful where no transport-level consumer is wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn publish(&self, _event: DomainEvent) {}
}
