//! # Follow graph
//!
//! Directed follow edges between accounts, plus the profile projection
//! that combines identity, edge counts, and the viewer annotation.

use std::sync::Arc;

use domains::models::User;
use domains::ports::{FollowRepo, UserRepo};
use domains::{AppError, Result};

use crate::views::{FollowerView, ProfileView};

pub struct SocialService {
    users: Arc<dyn UserRepo>,
    follows: Arc<dyn FollowRepo>,
}

impl SocialService {
    pub fn new(users: Arc<dyn UserRepo>, follows: Arc<dyn FollowRepo>) -> Self {
        Self { users, follows }
    }

    /// Creates one follow edge. Self-follows and duplicate edges conflict.
    pub async fn follow(&self, viewer_id: i64, username: &str) -> Result<()> {
        let target = self.resolve(username).await?;
        if target.id == viewer_id {
            return Err(AppError::Conflict("Cannot follow yourself".to_string()));
        }
        match self.follows.create(viewer_id, target.id).await {
            Err(AppError::Conflict(_)) => Err(AppError::Conflict(
                "Already following this user".to_string(),
            )),
            Err(other) => Err(other),
            Ok(_) => Ok(()),
        }
    }

    /// Removes exactly one edge; a missing edge is a client error distinct
    /// from a missing user.
    pub async fn unfollow(&self, viewer_id: i64, username: &str) -> Result<()> {
        let target = self.resolve(username).await?;
        let deleted = self.follows.delete(viewer_id, target.id).await?;
        if deleted == 0 {
            return Err(AppError::Conflict("Not following this user".to_string()));
        }
        Ok(())
    }

    /// Profile projection: identity, live edge counts, and — only when a
    /// viewer identity is present — whether that viewer follows the profile.
    pub async fn profile(&self, username: &str, viewer_id: Option<i64>) -> Result<ProfileView> {
        let user = self.resolve(username).await?;

        let follower_count = self.follows.follower_count(user.id).await?;
        let following_count = self.follows.following_count(user.id).await?;
        let is_following = match viewer_id {
            Some(viewer) => self.follows.exists(viewer, user.id).await?,
            None => false,
        };

        Ok(ProfileView {
            id: user.id,
            username: user.username.clone(),
            display_name: user.effective_display_name().to_string(),
            bio: user.bio.clone(),
            flags: user.flags,
            follower_count,
            following_count,
            is_following,
        })
    }

    pub async fn followers(&self, username: &str) -> Result<Vec<FollowerView>> {
        let user = self.resolve(username).await?;
        let followers = self.follows.followers_of(user.id).await?;
        Ok(followers.iter().map(FollowerView::from).collect())
    }

    pub async fn following(&self, username: &str) -> Result<Vec<FollowerView>> {
        let user = self.resolve(username).await?;
        let following = self.follows.following_of(user.id).await?;
        Ok(following.iter().map(FollowerView::from).collect())
    }

    async fn resolve(&self, username: &str) -> Result<User> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
