//! The conversation page action.

use crate::providers::ConversationRepository;
use emberbb_core::{Action, Execution, Request, RunError};
use std::sync::Arc;

/// Handles `conversation`: loads one conversation for display.
///
/// Produces a data payload on success; an unknown or missing id is a
/// user-recoverable error routed back to `index`.
pub struct ViewConversation {
    conversations: Arc<dyn ConversationRepository>,
}

impl ViewConversation {
    /// Wrap the repository collaborator.
    #[must_use]
    pub fn new(conversations: Arc<dyn ConversationRepository>) -> Self {
        Self { conversations }
    }
}

impl Action for ViewConversation {
    fn run(&mut self, exec: &mut Execution) -> Result<(), RunError> {
        exec.on_error_redirect_to(Request::new("index"));

        let conversation = match exec.request().get_i64("id") {
            Some(id) => self.conversations.find_by_id(id)?,
            None => None,
        };

        match conversation {
            Some(conversation) => {
                exec.set("id", conversation.id);
                exec.set("title", conversation.title);
            }
            None => {
                exec.add_error("The requested conversation does not exist.");
            }
        }

        Ok(())
    }
}
