//! Authentication service - login, signup, and password flows.

use deiquest_domain::{Profile, UserId};
use deiquest_protocol::{
    paths, CreateAccountRequest, ForgotPasswordRequest, LoginRequest, LoginSessionRecord,
    SetPasswordRequest, UserSummaryRecord,
};

use crate::application::api::Api;
use crate::application::convert;
use crate::application::error::ServiceError;
use crate::application::session::{AuthSession, SessionStore};

#[derive(Clone)]
pub struct AuthService {
    api: Api,
    session: SessionStore,
}

impl AuthService {
    pub fn new(api: Api, session: SessionStore) -> Self {
        Self { api, session }
    }

    /// Log in with credentials.
    ///
    /// On success the Bearer token is installed on the HTTP client, the
    /// session is persisted, and the profile (id plus permissions,
    /// fetched from the user directory) becomes the active identity.
    pub async fn login(&self, email: &str, password: &str) -> Result<Profile, ServiceError> {
        if email.trim().is_empty() || password.trim().is_empty() {
            return Err(ServiceError::validation(
                "Please enter your login credentials.",
            ));
        }

        let record: LoginSessionRecord = self
            .api
            .post(
                paths::LOGIN,
                &LoginRequest {
                    email: email.to_string(),
                    password: password.to_string(),
                },
            )
            .await
            .map_err(|e| {
                // The server answers 401 for a bad password and 404 for an
                // unknown email; both surface as the same fixed message.
                if e.is_unauthorized() || e.is_not_found() {
                    ServiceError::BadCredentials
                } else {
                    ServiceError::Api(e)
                }
            })?;

        let session = AuthSession::from(record);
        self.api.set_auth_token(Some(session.token.clone()));
        self.session.set_session(session.clone());

        let profile = self.fetch_profile(session.user_id).await?;
        self.session.set_profile(profile.clone());
        tracing::info!(user = %profile.id, "logged in");
        Ok(profile)
    }

    /// Re-install the persisted Bearer token after hydration.
    pub fn resume(&self) {
        if let Some(token) = self.session.auth_token() {
            self.api.set_auth_token(Some(token));
        }
    }

    /// Log out: best-effort server call, then forget everything local.
    pub async fn logout(&self) {
        if let Err(e) = self
            .api
            .delete(paths::LOGOUT, &serde_json::Value::Null)
            .await
        {
            // Local logout proceeds regardless; the session token just
            // ages out server-side.
            tracing::debug!("logout call failed: {e}");
        }
        self.api.set_auth_token(None);
        self.session.clear();
    }

    /// Create a new account. The account starts unapproved.
    pub async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ServiceError> {
        if name.trim().is_empty() || email.trim().is_empty() || password.trim().is_empty() {
            return Err(ServiceError::validation("Please enter required fields."));
        }
        self.api
            .post_no_response(
                paths::CREATE_ACCOUNT,
                &CreateAccountRequest {
                    name: name.to_string(),
                    email: email.to_string(),
                    password: password.to_string(),
                },
            )
            .await?;
        Ok(())
    }

    /// Initiate a password reset for the given email.
    pub async fn forgot_password(&self, email: &str) -> Result<(), ServiceError> {
        if email.trim().is_empty() {
            return Err(ServiceError::validation("Please enter your email."));
        }
        self.api
            .post_no_response(
                paths::FORGOT_PASSWORD,
                &ForgotPasswordRequest {
                    email: email.to_string(),
                },
            )
            .await?;
        Ok(())
    }

    /// Set a new password for an account (self, or anyone as super user).
    pub async fn set_password(&self, user_id: UserId, password: &str) -> Result<(), ServiceError> {
        if password.trim().is_empty() {
            return Err(ServiceError::validation("Please enter a password."));
        }
        self.api
            .put_no_response(
                &paths::set_password(user_id),
                &SetPasswordRequest {
                    password: password.to_string(),
                },
            )
            .await?;
        Ok(())
    }

    /// Re-fetch the active profile's permissions from the directory.
    pub async fn refresh_profile(&self) -> Result<Profile, ServiceError> {
        let current = self.session.profile().ok_or(ServiceError::NotSignedIn)?;
        let profile = self.fetch_profile(current.id).await?;
        self.session.set_profile(profile.clone());
        Ok(profile)
    }

    async fn fetch_profile(&self, user_id: UserId) -> Result<Profile, ServiceError> {
        let summary: UserSummaryRecord = self.api.get(&paths::user(user_id)).await?;
        let user = convert::user(summary);
        Ok(Profile::new(user.id, user.permissions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::session::SessionState;
    use crate::infrastructure::testing::{MemoryStorage, ScriptedApi};
    use crate::ports::outbound::ApiError;
    use serde_json::json;
    use std::sync::Arc;

    fn setup() -> (Arc<ScriptedApi>, SessionStore, AuthService) {
        let scripted = Arc::new(ScriptedApi::new());
        let session = SessionStore::new(Arc::new(MemoryStorage::new()));
        session.hydrate();
        let service = AuthService::new(Api::new(scripted.clone()), session.clone());
        (scripted, session, service)
    }

    #[tokio::test]
    async fn login_installs_token_and_profile() {
        let (scripted, session, auth) = setup();
        scripted.stub(
            "POST",
            "/auth/login",
            json!({"id": 7, "token": "tok", "start_time": 1, "time_to_live": 2_592_000}),
        );
        scripted.stub(
            "GET",
            "/user/7",
            json!({
                "id": 7, "name": "Ada", "roles": [],
                "permissions": [{"type": "Approved"}]
            }),
        );

        let profile = auth.login("ada@example.com", "pw").await.unwrap();
        assert_eq!(profile.id, UserId::new(7));
        assert!(profile.permissions.is_approved());
        assert_eq!(scripted.token().as_deref(), Some("tok"));
        assert!(session.state().is_active());
    }

    #[tokio::test]
    async fn empty_credentials_block_the_request() {
        let (scripted, session, auth) = setup();
        let err = auth.login("  ", "").await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(scripted.calls().is_empty());
        assert_eq!(session.state(), SessionState::LoggedOut);
    }

    #[tokio::test]
    async fn bad_credentials_map_to_fixed_message() {
        let (scripted, session, auth) = setup();
        scripted.stub_error(
            "POST",
            "/auth/login",
            ApiError::Status {
                status: 401,
                message: "no".to_string(),
            },
        );
        let err = auth.login("ada@example.com", "wrong").await.unwrap_err();
        assert_eq!(err, ServiceError::BadCredentials);
        assert_eq!(session.state(), SessionState::LoggedOut);
        assert_eq!(scripted.token(), None);
    }

    #[tokio::test]
    async fn logout_clears_session_even_if_server_fails() {
        let (scripted, session, auth) = setup();
        scripted.stub(
            "POST",
            "/auth/login",
            json!({"id": 7, "token": "tok", "start_time": 1, "time_to_live": 10}),
        );
        scripted.stub("GET", "/user/7", json!({"id": 7, "name": "Ada"}));
        auth.login("a@b.c", "pw").await.unwrap();

        // No DELETE stub: the server call fails, the local logout holds.
        auth.logout().await;
        assert_eq!(session.state(), SessionState::LoggedOut);
        assert_eq!(scripted.token(), None);
    }

    #[tokio::test]
    async fn resume_reinstalls_persisted_token() {
        let storage = Arc::new(MemoryStorage::new());
        let scripted = Arc::new(ScriptedApi::new());
        let session = SessionStore::new(storage.clone());
        session.set_session(AuthSession {
            user_id: UserId::new(7),
            token: "persisted".to_string(),
            start_time: 0,
            time_to_live: 10,
        });

        let fresh_session = SessionStore::new(storage);
        fresh_session.hydrate();
        let auth = AuthService::new(Api::new(scripted.clone()), fresh_session);
        auth.resume();
        assert_eq!(scripted.token().as_deref(), Some("persisted"));
    }

    #[tokio::test]
    async fn sign_up_validates_before_sending() {
        let (scripted, _, auth) = setup();
        assert!(auth.sign_up("", "a@b.c", "pw").await.is_err());
        assert!(scripted.calls().is_empty());

        scripted.stub("POST", "/auth/account", json!(null));
        auth.sign_up("Ada", "a@b.c", "pw").await.unwrap();
        assert_eq!(scripted.calls_to("POST /auth/account"), 1);
    }
}
