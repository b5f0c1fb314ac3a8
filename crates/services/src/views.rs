//! # View models
//!
//! Read-side projections computed per request, never persisted. Field
//! names serialize in camelCase to match the public JSON contract. None of
//! these structs can carry a credential hash.

use chrono::{DateTime, Utc};
use domains::models::{Post, User};
use serde::Serialize;

/// Author block embedded in post views: `{id, username, displayName}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSummary {
    pub id: i64,
    pub username: String,
    pub display_name: String,
}

impl From<&User> for AuthorSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            display_name: user.effective_display_name().to_string(),
        }
    }
}

/// A fully formatted post: live counts plus the ancestor chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedPost {
    pub id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub reply_to: Option<i64>,
    /// `null` when the author record is missing.
    pub author: Option<AuthorSummary>,
    pub like_count: i64,
    pub reply_count: i64,
    pub is_reply: bool,
    /// Nearest ancestor first, root last.
    pub parent_chain: Vec<PostSummary>,
}

/// One ancestor inside a parent chain, or one entry of a liked-posts
/// listing. Carries its own like count but no nested chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: Option<AuthorSummary>,
    pub like_count: i64,
}

impl PostSummary {
    pub fn new(post: &Post, author: Option<AuthorSummary>, like_count: i64) -> Self {
        Self {
            id: post.id,
            content: post.content.clone(),
            created_at: post.created_at,
            updated_at: post.updated_at,
            author,
            like_count,
        }
    }
}

/// Public profile of an account, annotated for the requesting viewer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub flags: i64,
    pub follower_count: i64,
    pub following_count: i64,
    /// Always false for requests without a viewer identity.
    pub is_following: bool,
}

/// The caller's own account view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeView {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub bio: Option<String>,
    pub flags: i64,
}

impl From<&User> for MeView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            display_name: user.effective_display_name().to_string(),
            email: user.email.clone(),
            bio: user.bio.clone(),
            flags: user.flags,
        }
    }
}

/// Account settings. Unlike [`MeView`], `displayName` is the raw stored
/// value here (nullable), not the username fallback.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsView {
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
}

impl From<&User> for SettingsView {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            bio: user.bio.clone(),
        }
    }
}

/// Response of a profile-settings patch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSettingsView {
    pub username: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
}

impl From<&User> for ProfileSettingsView {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            bio: user.bio.clone(),
        }
    }
}

/// One entry of a followers/following listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowerView {
    pub id: i64,
    pub username: String,
    pub flags: i64,
}

impl From<&User> for FollowerView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            flags: user.flags,
        }
    }
}
