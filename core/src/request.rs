//! The immutable named invocation that drives every dispatch.
//!
//! A [`Request`] is how the transport layer (and actions themselves, when
//! they produce follow-up targets) name a unit of work: an action
//! identifier plus a bag of parameters. Requests are values — a redirect
//! is always a *new* `Request`, never an edit of the current one.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An immutable, named action invocation.
///
/// Carries the action name and a string-keyed parameter bag. Parameter
/// insertion order is irrelevant; all lookups are by key.
///
/// # Examples
///
/// ```
/// use emberbb_core::request::Request;
///
/// let request = Request::new("conversation").param("id", 42);
/// assert_eq!(request.name(), "conversation");
/// assert_eq!(request.get_i64("id"), Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// The action identifier this request targets.
    name: String,

    /// Parameters attached to the invocation.
    parameters: Map<String, Value>,
}

impl Request {
    /// Create a request for the given action name with no parameters.
    ///
    /// The name must be non-empty; an empty name can never resolve to a
    /// registered action.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        debug_assert!(!name.is_empty(), "request name must be non-empty");
        Self {
            name,
            parameters: Map::new(),
        }
    }

    /// Create a request with a pre-built parameter map.
    #[must_use]
    pub fn with_params(name: impl Into<String>, parameters: Map<String, Value>) -> Self {
        let mut request = Self::new(name);
        request.parameters = parameters;
        request
    }

    /// Attach a parameter, consuming and returning the request.
    ///
    /// Intended for request construction only — once a request has been
    /// handed to the dispatcher it is never mutated again.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// The action name this request targets.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All parameters attached to this request.
    #[must_use]
    pub const fn parameters(&self) -> &Map<String, Value> {
        &self.parameters
    }

    /// Look up a parameter by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.parameters.get(key)
    }

    /// Look up a string parameter by key.
    ///
    /// Returns `None` if the key is absent or the value is not a string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Look up an integer parameter by key.
    #[must_use]
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    /// Look up a boolean parameter by key.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn params_are_looked_up_by_key() {
        let request = Request::new("reply_handler")
            .param("id", 7)
            .param("message", "hello")
            .param("remember", true);

        assert_eq!(request.get_i64("id"), Some(7));
        assert_eq!(request.get_str("message"), Some("hello"));
        assert_eq!(request.get_bool("remember"), Some(true));
        assert_eq!(request.get("missing"), None);
    }

    #[test]
    fn type_mismatches_read_as_none() {
        let request = Request::new("x").param("id", "not-a-number");
        assert_eq!(request.get_i64("id"), None);
        assert_eq!(request.get_str("id"), Some("not-a-number"));
    }

    #[test]
    fn round_trips_through_json() {
        let request = Request::new("conversation").param("id", 42);
        let json = serde_json::to_string(&request).unwrap();
        let back: Request = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }
}
