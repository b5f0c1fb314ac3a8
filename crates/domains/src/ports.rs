//! # Core Traits (Ports)
//!
//! Any adapter must implement these traits to be used by the binary.
//! Store ports surface uniqueness violations as [`AppError::Conflict`]
//! so services can report duplicates distinctly from other failures.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Follow, Like, NewPost, NewUser, Post, ProfileChanges, User};

/// Persistence contract for accounts.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Inserts a new account. A duplicate username (case-insensitive) or
    /// email maps to `Conflict`.
    async fn create(&self, new_user: NewUser) -> Result<User>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Exact username match.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Exact email match, used by the login lookup.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Case-insensitive existence check, used to pre-validate username changes.
    async fn username_taken(&self, username: &str) -> Result<bool>;

    async fn email_taken(&self, email: &str) -> Result<bool>;

    /// Applies the non-`None` fields and returns the updated account.
    async fn update_profile(&self, id: i64, changes: ProfileChanges) -> Result<User>;

    async fn update_email(&self, id: i64, email: &str) -> Result<User>;

    async fn update_password_hash(&self, id: i64, password_hash: &str) -> Result<User>;
}

/// Persistence contract for the follow graph.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait FollowRepo: Send + Sync {
    /// Inserts one edge. An existing (follower, following) pair maps to
    /// `Conflict`. Self-loops are rejected by the service before this call.
    async fn create(&self, follower_id: i64, following_id: i64) -> Result<Follow>;

    /// Removes the edge, returning the number of rows deleted (0 or 1).
    async fn delete(&self, follower_id: i64, following_id: i64) -> Result<u64>;

    async fn exists(&self, follower_id: i64, following_id: i64) -> Result<bool>;

    /// Edges pointing at `user_id`. Read live, never cached.
    async fn follower_count(&self, user_id: i64) -> Result<i64>;

    /// Edges originating from `user_id`. Read live, never cached.
    async fn following_count(&self, user_id: i64) -> Result<i64>;

    /// Accounts following `user_id`.
    async fn followers_of(&self, user_id: i64) -> Result<Vec<User>>;

    /// Accounts `user_id` follows.
    async fn following_of(&self, user_id: i64) -> Result<Vec<User>>;
}

/// Persistence contract for posts.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PostRepo: Send + Sync {
    async fn create(&self, new_post: NewPost) -> Result<Post>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>>;

    /// A user's posts, newest first.
    async fn list_by_author(&self, user_id: i64) -> Result<Vec<Post>>;

    /// Direct replies to a post, newest first.
    async fn list_replies(&self, post_id: i64) -> Result<Vec<Post>>;

    /// Count of posts whose `reply_to` equals `post_id`. Read live.
    async fn reply_count(&self, post_id: i64) -> Result<i64>;

    /// Posts the user has liked, newest first.
    async fn list_liked_by(&self, user_id: i64) -> Result<Vec<Post>>;
}

/// Persistence contract for the like set.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait LikeRepo: Send + Sync {
    /// Inserts one like. An existing (user, post) pair maps to `Conflict`,
    /// not a silent dedup.
    async fn create(&self, user_id: i64, post_id: i64) -> Result<Like>;

    /// Removes the like, returning the number of rows deleted (0 or 1).
    async fn delete(&self, user_id: i64, post_id: i64) -> Result<u64>;

    /// Cardinality of the like set for a post. Read live.
    async fn count_for_post(&self, post_id: i64) -> Result<i64>;
}

/// Credential hashing contract. Hashing is one-way, salted, and
/// deliberately expensive; both operations are suspension points.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String>;

    /// Constant-time comparison via the underlying primitive.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool>;
}

/// Bearer-token contract: time-bounded tokens carrying an account id.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user_id: i64) -> Result<String>;

    /// Returns the account id or `Unauthorized` for a missing/expired/
    /// malformed token.
    fn verify(&self, token: &str) -> Result<i64>;
}
