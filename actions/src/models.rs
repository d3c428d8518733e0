//! Domain models exchanged between actions and their collaborators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable user id.
    pub id: i64,
    /// Display / login name.
    pub username: String,
}

/// One post inside a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Post id, assigned by the repository when the post is stored.
    pub id: i64,
    /// Username of the poster at posting time.
    pub poster: String,
    /// Id of the posting user.
    pub poster_id: i64,
    /// Message body.
    pub message: String,
    /// When the post was made.
    pub posted: DateTime<Utc>,
}

/// A conversation posts are attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// Stable conversation id.
    pub id: i64,
    /// Conversation title.
    pub title: String,
}

/// Login credentials as submitted by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Submitted username.
    pub username: String,
    /// Submitted password, in the clear — hashing belongs to the auth
    /// provider.
    pub password: String,
}
