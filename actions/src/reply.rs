//! The reply action.

use crate::events::UserHasPosted;
use crate::providers::{AuthProvider, ConversationRepository};
use anyhow::{anyhow, Context};
use emberbb_core::environment::{Clock, EventSink};
use emberbb_core::{Action, Execution, Request, RunError};
use std::sync::Arc;
use tracing::debug;

/// Handles `reply_handler`: appends a post to an existing conversation.
///
/// Declares its error target (back to the conversation) before the
/// write, stores the reply, raises [`UserHasPosted`], and redirects to
/// the new post. A missing conversation or an unauthenticated caller is
/// a fault — the validator chain and the transport layer are expected to
/// keep those requests out.
pub struct Reply {
    conversations: Arc<dyn ConversationRepository>,
    auth: Arc<dyn AuthProvider>,
    events: Arc<dyn EventSink>,
    clock: Arc<dyn Clock>,
}

impl Reply {
    /// Wrap the collaborators.
    #[must_use]
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        auth: Arc<dyn AuthProvider>,
        events: Arc<dyn EventSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            conversations,
            auth,
            events,
            clock,
        }
    }
}

impl Action for Reply {
    fn run(&mut self, exec: &mut Execution) -> Result<(), RunError> {
        let id = exec
            .request()
            .get_i64("id")
            .ok_or_else(|| anyhow!("reply request carries no conversation id"))?;
        let conversation = self
            .conversations
            .find_by_id(id)?
            .ok_or_else(|| anyhow!("unknown conversation: {id}"))?;

        let creator = self.auth.current_user()?;

        exec.on_error_redirect_to(Request::new("conversation").param("id", conversation.id));

        let post = crate::models::Post {
            id: 0,
            poster: creator.username.clone(),
            poster_id: creator.id,
            message: exec
                .request()
                .get_str("message")
                .unwrap_or_default()
                .to_owned(),
            posted: self.clock.now(),
        };

        let post = self.conversations.add_reply(&conversation, post)?;
        debug!(conversation = conversation.id, post = post.id, "reply stored");

        let event = UserHasPosted {
            user: creator,
            post: post.clone(),
        }
        .into_event()
        .context("serialize user_has_posted event")?;
        self.events.publish(event);

        exec.redirect_to(
            Request::new("viewpost").param("id", post.id),
            "Your reply has been posted.",
        );

        Ok(())
    }
}
