//! # Domain Models
//!
//! These structs represent the core entities of Chirp.
//! Identifiers are store-generated 64-bit integers.

use chrono::{DateTime, Utc};

/// A registered account. The credential is stored only as an irreversible
/// hash; the struct deliberately implements neither `Serialize` nor a
/// derived `Debug` so the hash cannot leak through a projection or a log
/// line.
#[derive(Clone, PartialEq)]
pub struct User {
    pub id: i64,
    /// Unique handle. Uniqueness is case-insensitive at the store.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Argon2 PHC string. Never plaintext, never serialized.
    pub password_hash: String,
    /// Optional display name; falls back to `username` when absent.
    pub display_name: Option<String>,
    /// Optional free-text biography.
    pub bio: Option<String>,
    /// Capability/role bitfield, see [`crate::flags`].
    pub flags: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Display name if set, otherwise the username.
    pub fn effective_display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("display_name", &self.display_name)
            .field("bio", &self.bio)
            .field("flags", &self.flags)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Input for creating a user. Carries the already-hashed credential; the
/// strength policy runs before hashing, in the account service.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Partial profile update. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub bio: Option<String>,
}

/// The fundamental unit of conversation. `reply_to` present makes the post
/// a reply; absent makes it a root post. Posts are immutable after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    /// Parent post id for replies. The reply graph is a forest in healthy
    /// data; the thread assembler tolerates cycles and dangling parents.
    pub reply_to: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn is_reply(&self) -> bool {
        self.reply_to.is_some()
    }
}

/// Input for creating a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: i64,
    pub content: String,
    pub reply_to: Option<i64>,
}

/// A directed subscription edge: `follower_id` follows `following_id`.
/// At most one edge per ordered pair; self-loops are rejected upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct Follow {
    pub follower_id: i64,
    pub following_id: i64,
    pub created_at: DateTime<Utc>,
}

/// One like by one user on one post. Unique per (user, post) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Like {
    pub user_id: i64,
    pub post_id: i64,
    pub created_at: DateTime<Utc>,
}
