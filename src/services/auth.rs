use color_eyre::Result;

use crate::db::models::AuthUser;
use crate::db::Db;

// ---------------------------------------------------------------------------
// AuthRepository trait (DIP: service defines the abstraction it needs)
// ---------------------------------------------------------------------------

#[cfg_attr(test, mockall::automock)]
pub trait AuthRepository: Send + Sync {
    fn email_exists(&self, email: &str) -> impl std::future::Future<Output = Result<bool>> + Send;

    fn create_user(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> impl std::future::Future<Output = Result<i64>> + Send;

    fn create_user_session(
        &self,
        user_id: i64,
    ) -> impl std::future::Future<Output = Result<String>> + Send;

    fn verify_user_password(
        &self,
        identifier: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;

    fn find_user_by_identifier(
        &self,
        identifier: &str,
    ) -> impl std::future::Future<Output = Result<Option<AuthUser>>> + Send;

    fn delete_user_session(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

// ---------------------------------------------------------------------------
// Outcome enums
// ---------------------------------------------------------------------------

pub enum RegisterOutcome {
    /// User created and session started. Contains the session token.
    LoggedIn(String),
    /// Required fields were empty.
    EmptyFields,
    /// Email already in use.
    EmailTaken,
}

pub enum LoginOutcome {
    /// Login succeeded. Contains the session token.
    Success(String),
    /// Password was incorrect (or the identifier matched no account).
    InvalidCredentials,
}

// ---------------------------------------------------------------------------
// AuthService
// ---------------------------------------------------------------------------

pub struct AuthService<R: AuthRepository = Db> {
    repo: R,
}

impl<R: AuthRepository + Clone> Clone for AuthService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// `identifier` is an email address or a display name; the caller can't
    /// tell from the outcome which part of the credential pair was wrong.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<LoginOutcome> {
        let verified = self.repo.verify_user_password(identifier, password).await?;

        if !verified {
            return Ok(LoginOutcome::InvalidCredentials);
        }

        let user = self
            .repo
            .find_user_by_identifier(identifier)
            .await?
            .ok_or_else(|| color_eyre::eyre::eyre!("user not found after password verification"))?;

        let session_token = self.repo.create_user_session(user.id).await?;

        Ok(LoginOutcome::Success(session_token))
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<RegisterOutcome> {
        let email = email.trim();
        let display_name = display_name.trim();

        if email.is_empty() || password.is_empty() || display_name.is_empty() {
            return Ok(RegisterOutcome::EmptyFields);
        }

        let exists = self.repo.email_exists(email).await?;
        if exists {
            return Ok(RegisterOutcome::EmailTaken);
        }

        let user_id = self.repo.create_user(email, password, display_name).await?;
        let session_token = self.repo.create_user_session(user_id).await?;

        Ok(RegisterOutcome::LoggedIn(session_token))
    }

    pub async fn logout(&self, session_id: &str) -> Result<()> {
        self.repo.delete_user_session(session_id).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service(mock_repo: MockAuthRepository) -> AuthService<MockAuthRepository> {
        AuthService::new(mock_repo)
    }

    fn demo_user(id: i64) -> AuthUser {
        AuthUser {
            id,
            email: "test@example.com".to_string(),
            display_name: "Test".to_string(),
            role: "student".to_string(),
            gems: 100,
            lives: 5,
            streak: 0,
        }
    }

    // ----- login tests -----

    #[tokio::test]
    async fn login_success_returns_session_token() {
        let mut mock = MockAuthRepository::new();
        mock.expect_verify_user_password()
            .returning(|_, _| Box::pin(async { Ok(true) }));
        mock.expect_find_user_by_identifier()
            .returning(|_| Box::pin(async { Ok(Some(demo_user(1))) }));
        mock.expect_create_user_session()
            .returning(|_| Box::pin(async { Ok("session-token-123".to_string()) }));

        let svc = service(mock);
        let outcome = svc.login("test@example.com", "password").await.unwrap();

        assert!(matches!(outcome, LoginOutcome::Success(ref t) if t == "session-token-123"));
    }

    #[tokio::test]
    async fn login_accepts_display_name_identifier() {
        let mut mock = MockAuthRepository::new();
        mock.expect_verify_user_password()
            .withf(|identifier, _| identifier == "Test")
            .returning(|_, _| Box::pin(async { Ok(true) }));
        mock.expect_find_user_by_identifier()
            .withf(|identifier| identifier == "Test")
            .returning(|_| Box::pin(async { Ok(Some(demo_user(1))) }));
        mock.expect_create_user_session()
            .returning(|_| Box::pin(async { Ok("session-abc".to_string()) }));

        let svc = service(mock);
        let outcome = svc.login("Test", "password").await.unwrap();

        assert!(matches!(outcome, LoginOutcome::Success(_)));
    }

    #[tokio::test]
    async fn login_wrong_password_returns_invalid_credentials() {
        let mut mock = MockAuthRepository::new();
        mock.expect_verify_user_password()
            .returning(|_, _| Box::pin(async { Ok(false) }));

        let svc = service(mock);
        let outcome = svc.login("test@example.com", "wrong").await.unwrap();

        assert!(matches!(outcome, LoginOutcome::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_unknown_identifier_returns_invalid_credentials() {
        // Unknown account and wrong password are indistinguishable.
        let mut mock = MockAuthRepository::new();
        mock.expect_verify_user_password()
            .returning(|_, _| Box::pin(async { Ok(false) }));

        let svc = service(mock);
        let outcome = svc.login("nobody@example.com", "password").await.unwrap();

        assert!(matches!(outcome, LoginOutcome::InvalidCredentials));
    }

    // ----- register tests -----

    #[tokio::test]
    async fn register_empty_fields_returns_empty_fields() {
        let mock = MockAuthRepository::new();
        let svc = service(mock);

        let outcome = svc.register("", "pass", "name").await.unwrap();
        assert!(matches!(outcome, RegisterOutcome::EmptyFields));

        let mock = MockAuthRepository::new();
        let svc = service(mock);
        let outcome = svc.register("a@b.com", "", "name").await.unwrap();
        assert!(matches!(outcome, RegisterOutcome::EmptyFields));

        let mock = MockAuthRepository::new();
        let svc = service(mock);
        let outcome = svc.register("a@b.com", "pass", "  ").await.unwrap();
        assert!(matches!(outcome, RegisterOutcome::EmptyFields));
    }

    #[tokio::test]
    async fn register_email_taken_returns_email_taken() {
        let mut mock = MockAuthRepository::new();
        mock.expect_email_exists()
            .returning(|_| Box::pin(async { Ok(true) }));

        let svc = service(mock);
        let outcome = svc
            .register("taken@example.com", "password123", "name")
            .await
            .unwrap();

        assert!(matches!(outcome, RegisterOutcome::EmailTaken));
    }

    #[tokio::test]
    async fn register_success_returns_logged_in() {
        let mut mock = MockAuthRepository::new();
        mock.expect_email_exists()
            .returning(|_| Box::pin(async { Ok(false) }));
        mock.expect_create_user()
            .returning(|_, _, _| Box::pin(async { Ok(1) }));
        mock.expect_create_user_session()
            .returning(|_| Box::pin(async { Ok("session-abc".to_string()) }));

        let svc = service(mock);
        let outcome = svc
            .register("new@example.com", "password123", "Name")
            .await
            .unwrap();

        assert!(matches!(outcome, RegisterOutcome::LoggedIn(ref t) if t == "session-abc"));
    }

    #[tokio::test]
    async fn register_accepts_short_passwords() {
        // No minimum length rule; any non-empty password is stored hashed.
        let mut mock = MockAuthRepository::new();
        mock.expect_email_exists()
            .returning(|_| Box::pin(async { Ok(false) }));
        mock.expect_create_user()
            .returning(|_, _, _| Box::pin(async { Ok(2) }));
        mock.expect_create_user_session()
            .returning(|_| Box::pin(async { Ok("session-x".to_string()) }));

        let svc = service(mock);
        let outcome = svc.register("a@example.com", "x", "A").await.unwrap();

        assert!(matches!(outcome, RegisterOutcome::LoggedIn(_)));
    }

    // ----- logout tests -----

    #[tokio::test]
    async fn logout_deletes_session() {
        let mut mock = MockAuthRepository::new();
        mock.expect_delete_user_session()
            .withf(|id| id == "session-123")
            .returning(|_| Box::pin(async { Ok(()) }));

        let svc = service(mock);
        svc.logout("session-123").await.unwrap();
    }
}
