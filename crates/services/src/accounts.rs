//! # Account lifecycle
//!
//! Signup (strength policy, hashing, best-effort auto-follow), login with
//! a unified failure response, and the profile/settings mutations.

use std::sync::Arc;

use domains::models::{NewUser, ProfileChanges, User};
use domains::ports::{CredentialHasher, FollowRepo, UserRepo};
use domains::{AppError, Result};

use crate::password::PasswordPolicy;
use crate::views::{MeView, ProfileSettingsView, SettingsView};

/// Login failures never reveal whether the account exists.
const LOGIN_FAILED: &str = "Invalid username or password";

#[derive(Debug, Clone, Default)]
pub struct Signup {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct Login {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: String,
}

pub struct AccountService {
    users: Arc<dyn UserRepo>,
    follows: Arc<dyn FollowRepo>,
    hasher: Arc<dyn CredentialHasher>,
    policy: PasswordPolicy,
    /// Username of the account every signup auto-follows, if configured.
    default_follow: Option<String>,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepo>,
        follows: Arc<dyn FollowRepo>,
        hasher: Arc<dyn CredentialHasher>,
        policy: PasswordPolicy,
        default_follow: Option<String>,
    ) -> Self {
        Self {
            users,
            follows,
            hasher,
            policy,
            default_follow,
        }
    }

    /// Creates an account. The strength policy runs before hashing; the
    /// auto-follow of the default account is a second, independent write
    /// and never rolls back a completed signup.
    pub async fn signup(&self, req: Signup) -> Result<MeView> {
        let username = req.username.trim();
        let email = req.email.trim();
        if username.is_empty() {
            return Err(AppError::ValidationError(
                "Username cannot be empty".to_string(),
            ));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::ValidationError(
                "A valid email address is required".to_string(),
            ));
        }
        self.policy.validate(&req.password)?;

        if self.users.username_taken(username).await? {
            return Err(AppError::Conflict("Username already taken".to_string()));
        }
        if self.users.email_taken(email).await? {
            return Err(AppError::Conflict("Email already in use".to_string()));
        }

        let password_hash = self.hasher.hash(&req.password).await?;
        let user = self
            .users
            .create(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?;

        self.auto_follow_default(&user).await;

        Ok(MeView::from(&user))
    }

    /// Verifies a login attempt and returns the account. Unknown account
    /// and wrong password produce the same `Unauthorized` error.
    pub async fn authenticate(&self, req: Login) -> Result<User> {
        if req.email.is_none() && req.username.is_none() {
            return Err(AppError::ValidationError(
                "Email or username is required".to_string(),
            ));
        }

        let mut found = None;
        if let Some(email) = req.email.as_deref() {
            found = self.users.find_by_email(email).await?;
        }
        if found.is_none() {
            if let Some(username) = req.username.as_deref() {
                found = self.users.find_by_username(username).await?;
            }
        }
        let user = found.ok_or_else(|| AppError::Unauthorized(LOGIN_FAILED.to_string()))?;

        if !self.hasher.verify(&req.password, &user.password_hash).await? {
            return Err(AppError::Unauthorized(LOGIN_FAILED.to_string()));
        }

        Ok(user)
    }

    pub async fn me(&self, user_id: i64) -> Result<MeView> {
        Ok(MeView::from(&self.current(user_id).await?))
    }

    /// Patches the caller's display name and/or bio.
    pub async fn update_me(
        &self,
        user_id: i64,
        display_name: Option<String>,
        bio: Option<String>,
    ) -> Result<MeView> {
        self.current(user_id).await?;
        let user = self
            .users
            .update_profile(
                user_id,
                ProfileChanges {
                    username: None,
                    display_name,
                    bio,
                },
            )
            .await?;
        Ok(MeView::from(&user))
    }

    pub async fn settings(&self, user_id: i64) -> Result<SettingsView> {
        Ok(SettingsView::from(&self.current(user_id).await?))
    }

    /// Patches profile settings. A username change is re-validated for
    /// (case-insensitive) uniqueness.
    pub async fn update_settings_profile(
        &self,
        user_id: i64,
        changes: ProfileChanges,
    ) -> Result<ProfileSettingsView> {
        let current = self.current(user_id).await?;
        let ProfileChanges {
            username,
            display_name,
            bio,
        } = changes;

        let username = match username {
            Some(name) if !name.eq_ignore_ascii_case(&current.username) => {
                if self.users.username_taken(&name).await? {
                    return Err(AppError::Conflict("Username already taken".to_string()));
                }
                Some(name)
            }
            other => other,
        };

        let user = self
            .users
            .update_profile(
                user_id,
                ProfileChanges {
                    username,
                    display_name,
                    bio,
                },
            )
            .await?;
        Ok(ProfileSettingsView::from(&user))
    }

    /// Changes the email after re-verifying the current password.
    pub async fn change_email(&self, user_id: i64, email: &str, password: &str) -> Result<()> {
        let user = self.current(user_id).await?;

        if !self.hasher.verify(password, &user.password_hash).await? {
            return Err(AppError::ValidationError("Invalid password".to_string()));
        }
        if self.users.email_taken(email).await? {
            return Err(AppError::Conflict("Email already in use".to_string()));
        }

        self.users.update_email(user_id, email).await?;
        Ok(())
    }

    /// Changes the password: current password re-verified, the new one
    /// policy-checked, then hashed and stored.
    pub async fn change_password(
        &self,
        user_id: i64,
        current_password: &str,
        new_password: &str,
    ) -> Result<()> {
        let user = self.current(user_id).await?;

        if !self
            .hasher
            .verify(current_password, &user.password_hash)
            .await?
        {
            return Err(AppError::ValidationError(
                "Invalid current password".to_string(),
            ));
        }
        self.policy.validate(new_password)?;

        let hash = self.hasher.hash(new_password).await?;
        self.users.update_password_hash(user_id, &hash).await?;
        Ok(())
    }

    /// Resolves an authenticated id. A token for a vanished account reads
    /// as an auth failure, not a 404.
    async fn current(&self, user_id: i64) -> Result<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))
    }

    /// Best effort, by design two independent writes: a failure here is
    /// logged and the signup stands.
    async fn auto_follow_default(&self, user: &User) {
        let Some(handle) = self.default_follow.as_deref() else {
            return;
        };
        let followed = async {
            let target = self
                .users
                .find_by_username(handle)
                .await?
                .ok_or_else(|| AppError::NotFound("default account missing".to_string()))?;
            if target.id == user.id {
                return Ok(());
            }
            self.follows.create(user.id, target.id).await.map(|_| ())
        }
        .await;

        if let Err(err) = followed {
            tracing::warn!(
                username = %user.username,
                default_follow = %handle,
                error = %err,
                "auto-follow of the default account failed"
            );
        }
    }
}
