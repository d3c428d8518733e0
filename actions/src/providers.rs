//! Collaborator traits injected into the concrete actions.
//!
//! Each trait is a narrow, opaque capability: the action calls it
//! directly and its internals (session storage, SQL, password hashing)
//! are out of scope here. All methods are synchronous — the pipeline has
//! no suspension points, and any blocking happens inside these calls
//! under whatever timeout discipline the implementation chooses.

use crate::models::{Conversation, Credentials, Post, User};
use anyhow::Result;

/// Authentication provider.
///
/// Abstracts over whatever session/identity backend the deployment uses.
pub trait AuthProvider: Send + Sync {
    /// Try to authenticate with the given credentials.
    ///
    /// Returns `Ok(false)` for a wrong username/password combination —
    /// that is a user-recoverable outcome, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error only for backend faults (store unreachable,
    /// session write failed); those surface as unhandled action faults.
    fn attempt(&self, credentials: &Credentials, remember: bool) -> Result<bool>;

    /// Terminate the current session.
    ///
    /// # Errors
    ///
    /// Returns an error for backend faults.
    fn logout(&self) -> Result<()>;

    /// The currently authenticated user.
    ///
    /// # Errors
    ///
    /// Returns an error if no user is authenticated or the backend
    /// fails; actions that require a user treat both as faults.
    fn current_user(&self) -> Result<User>;
}

/// Conversation store.
pub trait ConversationRepository: Send + Sync {
    /// Look up a conversation by id.
    ///
    /// # Errors
    ///
    /// Returns an error for backend faults; an unknown id is `Ok(None)`.
    fn find_by_id(&self, id: i64) -> Result<Option<Conversation>>;

    /// Append a reply to a conversation.
    ///
    /// Returns the stored post with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error for backend faults.
    fn add_reply(&self, conversation: &Conversation, post: Post) -> Result<Post>;
}
