// User Service - account management use cases (Phase 1)

use crate::domain::user::{validate_password, validate_username};
use crate::domain::{User, UserId, DELETED_USER};
use crate::error::{AppError, Result};
use crate::port::{IdProvider, PasswordHasher, SessionStore, TimeProvider, UserRepository};
use std::sync::Arc;
use tracing::info;

/// Account use cases: register, authenticate, profile updates, deletion.
///
/// Raw passwords stop here: everything below this layer sees only the
/// Argon2id hash.
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    session_store: Arc<dyn SessionStore>,
    password_hasher: Arc<dyn PasswordHasher>,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
}

impl UserService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        session_store: Arc<dyn SessionStore>,
        password_hasher: Arc<dyn PasswordHasher>,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            user_repo,
            session_store,
            password_hasher,
            id_provider,
            time_provider,
        }
    }

    /// Create an account. Conflict if the username is taken.
    pub async fn register(&self, username: &str, password: &str) -> Result<User> {
        validate_username(username)?;
        validate_password(password)?;

        if self.user_repo.find_by_username(username).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "username {} already taken",
                username
            )));
        }

        let user = User::new(
            self.id_provider.generate_id(),
            username,
            self.password_hasher.hash(password)?,
            self.time_provider.now_millis(),
        );
        self.user_repo.insert(&user).await?;

        info!(user_id = %user.id, username, "user registered");
        Ok(user)
    }

    /// Check credentials. Unknown username and wrong password are
    /// indistinguishable to the caller.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User> {
        let user = match self.user_repo.find_by_username(username).await? {
            Some(user) => user,
            None => return Err(AppError::Unauthenticated("invalid credentials".to_string())),
        };
        if !self.password_hasher.verify(password, &user.password_hash)? {
            return Err(AppError::Unauthenticated("invalid credentials".to_string()));
        }
        Ok(user)
    }

    pub async fn get_by_username(&self, username: &str) -> Result<User> {
        self.user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {} not found", username)))
    }

    pub async fn get_by_id(&self, id: &str) -> Result<User> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::user_not_found(id))
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        self.user_repo.list().await
    }

    /// Change the username; uniqueness is re-checked.
    pub async fn update_username(&self, user_id: &str, new_username: &str) -> Result<User> {
        validate_username(new_username)?;

        if let Some(existing) = self.user_repo.find_by_username(new_username).await? {
            if existing.id != user_id {
                return Err(AppError::Conflict(format!(
                    "username {} already taken",
                    new_username
                )));
            }
        }

        let mut user = self.get_by_id(user_id).await?;
        user.username = new_username.to_string();
        user.updated_at = self.time_provider.now_millis();
        self.user_repo.update(&user).await?;
        Ok(user)
    }

    /// Change the password; the current one must verify first.
    pub async fn update_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<()> {
        let mut user = self.get_by_id(user_id).await?;
        if !self
            .password_hasher
            .verify(current_password, &user.password_hash)?
        {
            return Err(AppError::Unauthenticated(
                "current password does not match".to_string(),
            ));
        }
        validate_password(new_password)?;

        user.password_hash = self.password_hasher.hash(new_password)?;
        user.updated_at = self.time_provider.now_millis();
        self.user_repo.update(&user).await?;
        Ok(())
    }

    /// Delete the account and end every session it holds.
    pub async fn delete(&self, user_id: &str) -> Result<()> {
        self.user_repo.delete(user_id).await?;
        let ended = self.session_store.delete_for_user(user_id).await?;
        info!(user_id, ended_sessions = ended, "user deleted");
        Ok(())
    }

    /// Bulk ID -> username resolution for display. IDs of deleted users
    /// render as DELETED_USER instead of failing the whole view.
    pub async fn usernames_for(&self, ids: &[UserId]) -> Result<Vec<String>> {
        let mut usernames = Vec::with_capacity(ids.len());
        for id in ids {
            let username = match self.user_repo.find_by_id(id).await? {
                Some(user) => user.username,
                None => DELETED_USER.to_string(),
            };
            usernames.push(username);
        }
        Ok(usernames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::id_provider::mocks::SequentialIdProvider;
    use crate::port::password_hasher::mocks::PlainTextHasher;
    use crate::port::session_store::mocks::MemSessionStore;
    use crate::port::time_provider::mocks::FixedTimeProvider;
    use crate::port::user_repository::mocks::MemUserRepository;

    fn service() -> (UserService, Arc<MemSessionStore>) {
        let sessions = Arc::new(MemSessionStore::new());
        let service = UserService::new(
            Arc::new(MemUserRepository::new()),
            sessions.clone(),
            Arc::new(PlainTextHasher),
            Arc::new(SequentialIdProvider::new("user")),
            Arc::new(FixedTimeProvider::new(1_000)),
        );
        (service, sessions)
    }

    #[tokio::test]
    async fn test_register_and_authenticate() {
        let (service, _) = service();

        let user = service.register("alice", "hunter2hunter2").await.unwrap();
        assert_eq!(user.username, "alice");
        assert_ne!(user.password_hash, "hunter2hunter2");

        let authed = service
            .authenticate("alice", "hunter2hunter2")
            .await
            .unwrap();
        assert_eq!(authed.id, user.id);
    }

    #[tokio::test]
    async fn test_register_duplicate_username_is_conflict() {
        let (service, _) = service();

        service.register("alice", "hunter2hunter2").await.unwrap();
        let err = service
            .register("alice", "other-password")
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_look_identical() {
        let (service, _) = service();
        service.register("alice", "hunter2hunter2").await.unwrap();

        let wrong = service
            .authenticate("alice", "bad-password")
            .await
            .unwrap_err();
        let unknown = service
            .authenticate("nobody", "bad-password")
            .await
            .unwrap_err();

        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn test_update_password_requires_current() {
        let (service, _) = service();
        let user = service.register("alice", "hunter2hunter2").await.unwrap();

        let err = service
            .update_password(&user.id, "wrong-current", "new-password-1")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated(_)));

        service
            .update_password(&user.id, "hunter2hunter2", "new-password-1")
            .await
            .unwrap();
        service
            .authenticate("alice", "new-password-1")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_ends_sessions() {
        let (service, sessions) = service();
        let user = service.register("alice", "hunter2hunter2").await.unwrap();

        sessions
            .insert(&crate::domain::Session::new("tok-1", &user.id, 1_000, 60_000))
            .await
            .unwrap();
        assert_eq!(sessions.session_count(), 1);

        service.delete(&user.id).await.unwrap();

        assert_eq!(sessions.session_count(), 0);
        assert!(service.get_by_id(&user.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_usernames_for_renders_deleted_users() {
        let (service, _) = service();
        let alice = service.register("alice", "hunter2hunter2").await.unwrap();
        let bob = service.register("bob", "hunter2hunter2").await.unwrap();
        service.delete(&bob.id).await.unwrap();

        let names = service
            .usernames_for(&[alice.id.clone(), bob.id.clone()])
            .await
            .unwrap();

        assert_eq!(names, vec!["alice".to_string(), DELETED_USER.to_string()]);
    }

    #[tokio::test]
    async fn test_update_username_to_own_name_is_allowed() {
        let (service, _) = service();
        let user = service.register("alice", "hunter2hunter2").await.unwrap();

        let updated = service.update_username(&user.id, "alice").await.unwrap();
        assert_eq!(updated.username, "alice");
    }
}
