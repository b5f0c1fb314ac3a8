//! # Posts and the thread assembler
//!
//! Post creation, the like set, and the formatting pipeline that turns a
//! stored post into its public view: author summary, live like/reply
//! counts, and the ordered ancestor chain.

use std::collections::HashSet;
use std::sync::Arc;

use domains::models::{NewPost, Post};
use domains::ports::{LikeRepo, PostRepo, UserRepo};
use domains::{AppError, Result};

use crate::views::{AuthorSummary, FormattedPost, PostSummary};

pub struct PostService {
    posts: Arc<dyn PostRepo>,
    users: Arc<dyn UserRepo>,
    likes: Arc<dyn LikeRepo>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepo>,
        users: Arc<dyn UserRepo>,
        likes: Arc<dyn LikeRepo>,
    ) -> Self {
        Self { posts, users, likes }
    }

    /// Creates a post. Content must be non-empty; a given parent must exist
    /// at creation time (checked once, not re-verified later).
    pub async fn create_post(
        &self,
        author_id: i64,
        content: &str,
        reply_to: Option<i64>,
    ) -> Result<FormattedPost> {
        if content.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Content cannot be empty".to_string(),
            ));
        }

        if let Some(parent_id) = reply_to {
            if self.posts.find_by_id(parent_id).await?.is_none() {
                return Err(AppError::NotFound("Parent post not found".to_string()));
            }
        }

        let post = self
            .posts
            .create(NewPost {
                user_id: author_id,
                content: content.to_string(),
                reply_to,
            })
            .await?;

        self.format_post(&post).await
    }

    pub async fn like(&self, user_id: i64, post_id: i64) -> Result<()> {
        if self.posts.find_by_id(post_id).await?.is_none() {
            return Err(AppError::NotFound("Post not found".to_string()));
        }
        match self.likes.create(user_id, post_id).await {
            Err(AppError::Conflict(_)) => Err(AppError::Conflict(
                "User already liked this post".to_string(),
            )),
            Err(other) => Err(other),
            Ok(_) => Ok(()),
        }
    }

    /// Removes exactly one like; a missing like fails distinctly instead of
    /// silently succeeding.
    pub async fn unlike(&self, user_id: i64, post_id: i64) -> Result<()> {
        if self.posts.find_by_id(post_id).await?.is_none() {
            return Err(AppError::NotFound("Post not found".to_string()));
        }
        let deleted = self.likes.delete(user_id, post_id).await?;
        if deleted == 0 {
            return Err(AppError::Conflict(
                "User has not liked this post".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn get_post(&self, post_id: i64) -> Result<FormattedPost> {
        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;
        self.format_post(&post).await
    }

    /// A user's posts, formatted, newest first.
    pub async fn posts_by(&self, username: &str) -> Result<Vec<FormattedPost>> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        let posts = self.posts.list_by_author(user.id).await?;
        self.format_all(&posts).await
    }

    /// Direct replies to one of `username`'s posts, formatted, newest first.
    pub async fn replies(&self, username: &str, post_id: i64) -> Result<Vec<FormattedPost>> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .filter(|p| p.user_id == user.id)
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;
        let replies = self.posts.list_replies(post.id).await?;
        self.format_all(&replies).await
    }

    /// Posts a user has liked, as flat summaries (no chains), newest first.
    pub async fn liked_posts(&self, username: &str) -> Result<Vec<PostSummary>> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        let posts = self.posts.list_liked_by(user.id).await?;
        let mut views = Vec::with_capacity(posts.len());
        for post in &posts {
            views.push(self.summarize(post).await?);
        }
        Ok(views)
    }

    /// Formats one post: author summary, live counts, ancestor chain.
    pub async fn format_post(&self, post: &Post) -> Result<FormattedPost> {
        let author = self.author_of(post).await?;
        let like_count = self.likes.count_for_post(post.id).await?;
        let reply_count = self.posts.reply_count(post.id).await?;
        let parent_chain = self.parent_chain(post).await?;

        Ok(FormattedPost {
            id: post.id,
            content: post.content.clone(),
            created_at: post.created_at,
            updated_at: post.updated_at,
            reply_to: post.reply_to,
            author,
            like_count,
            reply_count,
            is_reply: post.is_reply(),
            parent_chain,
        })
    }

    /// Walks the ancestor chain from the immediate parent up to the root,
    /// one store read per step, nearest ancestor first.
    ///
    /// The walk is self-defending: a dangling parent reference ends the
    /// chain without failing the request, and a repeated id (a cycle in
    /// stored data) ends the walk, so traversal terminates regardless of
    /// stored data integrity. Counts are read live at every step; nothing
    /// is memoized within or across requests.
    pub async fn parent_chain(&self, post: &Post) -> Result<Vec<PostSummary>> {
        let mut chain = Vec::new();
        let mut seen = HashSet::from([post.id]);
        let mut next = post.reply_to;

        while let Some(parent_id) = next {
            if !seen.insert(parent_id) {
                break;
            }
            let Some(parent) = self.posts.find_by_id(parent_id).await? else {
                break;
            };
            let author = self.author_of(&parent).await?;
            let like_count = self.likes.count_for_post(parent.id).await?;
            chain.push(PostSummary::new(&parent, author, like_count));
            next = parent.reply_to;
        }

        Ok(chain)
    }

    async fn format_all(&self, posts: &[Post]) -> Result<Vec<FormattedPost>> {
        let mut views = Vec::with_capacity(posts.len());
        for post in posts {
            views.push(self.format_post(post).await?);
        }
        Ok(views)
    }

    async fn summarize(&self, post: &Post) -> Result<PostSummary> {
        let author = self.author_of(post).await?;
        let like_count = self.likes.count_for_post(post.id).await?;
        Ok(PostSummary::new(post, author, like_count))
    }

    async fn author_of(&self, post: &Post) -> Result<Option<AuthorSummary>> {
        Ok(self
            .users
            .find_by_id(post.user_id)
            .await?
            .as_ref()
            .map(AuthorSummary::from))
    }
}
