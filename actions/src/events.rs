//! Domain events raised by actions.

use crate::models::{Post, User};
use emberbb_core::environment::DomainEvent;
use serde::{Deserialize, Serialize};

/// Raised after a reply has been stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserHasPosted {
    /// The posting user.
    pub user: User,
    /// The stored post, with its assigned id.
    pub post: Post,
}

impl UserHasPosted {
    /// Event name tag used on the wire.
    pub const NAME: &'static str = "user_has_posted";

    /// Serialize into the sink-facing event envelope.
    ///
    /// # Errors
    ///
    /// Returns the serialization error if the body cannot be represented
    /// as JSON.
    pub fn into_event(self) -> Result<DomainEvent, serde_json::Error> {
        DomainEvent::new(Self::NAME, &self)
    }
}
