//! # emberbb Actions
//!
//! The concrete actions of the application, their collaborator traits,
//! and the default registration table wiring them into a
//! [`Server`](emberbb_server::Server).
//!
//! Every action here follows the same shape: collaborators injected at
//! construction, business logic in `run()`, outcome reported through the
//! per-run [`Execution`](emberbb_core::Execution) state. Nothing in this
//! crate knows about HTTP, HTML, or storage internals.

pub mod events;
pub mod login;
pub mod logout;
pub mod models;
pub mod providers;
pub mod reply;
pub mod validators;
pub mod view_conversation;

pub use events::UserHasPosted;
pub use login::Login;
pub use logout::Logout;
pub use models::{Conversation, Credentials, Post, User};
pub use providers::{AuthProvider, ConversationRepository};
pub use reply::Reply;
pub use validators::PostValidator;
pub use view_conversation::ViewConversation;

use emberbb_core::environment::{Clock, EventSink};
use emberbb_core::Pipeline;
use emberbb_server::Server;
use std::sync::Arc;

/// The collaborators the default actions are wired with.
#[derive(Clone)]
pub struct Collaborators {
    /// Authentication provider.
    pub auth: Arc<dyn AuthProvider>,
    /// Conversation store.
    pub conversations: Arc<dyn ConversationRepository>,
    /// Domain event sink.
    pub events: Arc<dyn EventSink>,
    /// Time source.
    pub clock: Arc<dyn Clock>,
}

/// Register the default actions and validators under their canonical
/// request names.
pub fn register_defaults(server: &mut Server, collaborators: &Collaborators) {
    let auth = Arc::clone(&collaborators.auth);
    server.register_action("handle_login", move || {
        Pipeline::new(Login::new(Arc::clone(&auth)))
    });

    let auth = Arc::clone(&collaborators.auth);
    server.register_action("logout", move || {
        Pipeline::new(Logout::new(Arc::clone(&auth)))
    });

    let conversations = Arc::clone(&collaborators.conversations);
    server.register_action("conversation", move || {
        Pipeline::new(ViewConversation::new(Arc::clone(&conversations)))
    });

    let collaborators = collaborators.clone();
    server.register_action("reply_handler", move || {
        Pipeline::new(Reply::new(
            Arc::clone(&collaborators.conversations),
            Arc::clone(&collaborators.auth),
            Arc::clone(&collaborators.events),
            Arc::clone(&collaborators.clock),
        ))
    });

    server.register_validator("reply_handler", PostValidator);
}
