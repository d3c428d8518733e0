//! # emberbb Testing
//!
//! Mock collaborators and test helpers for the emberbb dispatch layer.
//!
//! This crate provides:
//! - Recording mock implementations of the collaborator traits
//!   (`AuthProvider`, `ConversationRepository`, `EventSink`)
//! - A deterministic clock
//! - A tracing initializer for tests that want log output
//!
//! ## Example
//!
//! ```
//! use emberbb_testing::mocks::MockAuth;
//! use emberbb_actions::Credentials;
//! use emberbb_actions::providers::AuthProvider;
//!
//! let auth = MockAuth::rejecting();
//! let verdict = auth
//!     .attempt(&Credentials { username: "bob".into(), password: "bad".into() }, false)
//!     .unwrap();
//! assert!(!verdict);
//! assert_eq!(auth.attempts().len(), 1);
//! ```

use std::sync::PoisonError;

/// Mock implementations of the collaborator traits.
pub mod mocks {
    use super::PoisonError;
    use anyhow::{anyhow, Result};
    use chrono::{DateTime, Utc};
    use emberbb_actions::models::{Conversation, Credentials, Post, User};
    use emberbb_actions::providers::{AuthProvider, ConversationRepository};
    use emberbb_core::environment::{Clock, DomainEvent, EventSink};
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Fixed clock for deterministic tests.
    ///
    /// Always returns the same time, making timestamps reproducible.
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time.
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC).
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to
    /// parse, which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Recording [`AuthProvider`] with a scripted verdict.
    pub struct MockAuth {
        verdict: bool,
        broken: bool,
        user: Option<User>,
        attempts: Mutex<Vec<(Credentials, bool)>>,
        logouts: AtomicUsize,
    }

    impl MockAuth {
        /// An auth provider that accepts every attempt and reports the
        /// given user as currently authenticated.
        #[must_use]
        pub fn accepting(user: User) -> Self {
            Self {
                verdict: true,
                broken: false,
                user: Some(user),
                attempts: Mutex::new(Vec::new()),
                logouts: AtomicUsize::new(0),
            }
        }

        /// An auth provider that rejects every attempt.
        #[must_use]
        pub fn rejecting() -> Self {
            Self {
                verdict: false,
                broken: false,
                user: None,
                attempts: Mutex::new(Vec::new()),
                logouts: AtomicUsize::new(0),
            }
        }

        /// An auth provider whose backend fails on every call.
        #[must_use]
        pub fn broken() -> Self {
            Self {
                verdict: false,
                broken: true,
                user: None,
                attempts: Mutex::new(Vec::new()),
                logouts: AtomicUsize::new(0),
            }
        }

        /// Every credential attempt made, in call order.
        #[must_use]
        pub fn attempts(&self) -> Vec<(Credentials, bool)> {
            self.attempts
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// How many times `logout()` has been called.
        #[must_use]
        pub fn logout_calls(&self) -> usize {
            self.logouts.load(Ordering::SeqCst)
        }
    }

    impl AuthProvider for MockAuth {
        fn attempt(&self, credentials: &Credentials, remember: bool) -> Result<bool> {
            if self.broken {
                return Err(anyhow!("auth backend unavailable"));
            }
            self.attempts
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((credentials.clone(), remember));
            Ok(self.verdict)
        }

        fn logout(&self) -> Result<()> {
            if self.broken {
                return Err(anyhow!("auth backend unavailable"));
            }
            self.logouts.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn current_user(&self) -> Result<User> {
            self.user
                .clone()
                .ok_or_else(|| anyhow!("no authenticated user"))
        }
    }

    #[derive(Default)]
    struct ConversationState {
        conversations: BTreeMap<i64, Conversation>,
        posts: Vec<Post>,
        next_post_id: i64,
    }

    /// In-memory [`ConversationRepository`] with sequential post ids.
    #[derive(Default)]
    pub struct InMemoryConversations {
        state: Mutex<ConversationState>,
    }

    impl InMemoryConversations {
        /// An empty repository.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Seed a conversation, consuming and returning the repository.
        #[must_use]
        pub fn with_conversation(self, conversation: Conversation) -> Self {
            self.state
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .conversations
                .insert(conversation.id, conversation);
            self
        }

        /// Every post stored so far, in insertion order.
        #[must_use]
        pub fn posts(&self) -> Vec<Post> {
            self.state
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .posts
                .clone()
        }
    }

    impl ConversationRepository for InMemoryConversations {
        fn find_by_id(&self, id: i64) -> Result<Option<Conversation>> {
            Ok(self
                .state
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .conversations
                .get(&id)
                .cloned())
        }

        fn add_reply(&self, conversation: &Conversation, mut post: Post) -> Result<Post> {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if !state.conversations.contains_key(&conversation.id) {
                return Err(anyhow!("unknown conversation: {}", conversation.id));
            }
            state.next_post_id += 1;
            post.id = state.next_post_id;
            state.posts.push(post.clone());
            Ok(post)
        }
    }

    /// An [`EventSink`] that records every published event.
    #[derive(Default)]
    pub struct RecordingEvents {
        events: Mutex<Vec<DomainEvent>>,
    }

    impl RecordingEvents {
        /// An empty sink.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Every event published so far, in publish order.
        #[must_use]
        pub fn published(&self) -> Vec<DomainEvent> {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }
    }

    impl EventSink for RecordingEvents {
        fn publish(&self, event: DomainEvent) {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(event);
        }
    }
}

/// Test helpers.
pub mod helpers {
    /// Install a tracing subscriber for test output.
    ///
    /// Respects `RUST_LOG`; a second call is a no-op, so every test can
    /// call it unconditionally.
    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
}
