//! Authentication and account endpoints

use super::{ApiClient, ApiRequest, Transport};
use crate::core::error::ApiError;
use crate::core::models::{
    ChangePasswordRequest, LoginRequest, LoginResponse, ProfileUpdate, RefreshRequest,
    RefreshResponse, RegisterRequest, User,
};
use crate::core::storage::TokenStorage;
use crate::core::validation::{ChangePasswordForm, LoginForm};

impl<T: Transport, S: TokenStorage> ApiClient<T, S> {
    /// `POST /auth/login/`, then store the user and tokens in the session
    pub async fn login(&self, credentials: &LoginRequest) -> Result<User, ApiError> {
        let request = ApiRequest::post("/auth/login/")
            .json(credentials)?
            .anonymous();
        let response: LoginResponse = self.send(request).await?;

        if let Err(e) = self
            .session()
            .login(response.user.clone(), response.access, response.refresh)
        {
            tracing::warn!(error = %e, "tokens could not be persisted");
        }
        Ok(response.user)
    }

    /// Validate the form, then sign in. Invalid input never reaches the network.
    pub async fn sign_in(&self, form: &LoginForm) -> Result<User, ApiError> {
        let credentials = form.validate()?;
        self.login(&credentials).await
    }

    /// `POST /auth/users/register/`
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        self.send(ApiRequest::post("/auth/users/register/").json(request)?)
            .await
    }

    /// `GET /auth/users/me/`
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.send(ApiRequest::get("/auth/users/me/")).await
    }

    /// Fetch the signed-in user and store it in the session.
    ///
    /// Used after restoring persisted tokens at start-up.
    pub async fn load_current_user(&self) -> Result<User, ApiError> {
        let user = self.current_user().await?;
        self.session().set_user(user.clone());
        Ok(user)
    }

    /// `PUT /auth/users/update_profile/`; the session user is replaced
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        let user: User = self
            .send(ApiRequest::put("/auth/users/update_profile/").json(update)?)
            .await?;
        self.session().set_user(user.clone());
        Ok(user)
    }

    /// `POST /auth/users/change_password/`
    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<(), ApiError> {
        self.send_empty(ApiRequest::post("/auth/users/change_password/").json(request)?)
            .await
    }

    /// Validate the form, then change the password
    pub async fn submit_password_change(&self, form: &ChangePasswordForm) -> Result<(), ApiError> {
        let request = form.validate()?;
        self.change_password(&request).await
    }

    /// `POST /auth/token/refresh/` with the stored refresh token.
    ///
    /// Only updates the access token (and the refresh token when rotated).
    /// Nothing calls this automatically.
    pub async fn refresh_access_token(&self) -> Result<(), ApiError> {
        let refresh = self
            .session()
            .refresh_token()
            .ok_or(ApiError::Unauthorized)?;

        let request = ApiRequest::post("/auth/token/refresh/")
            .json(&RefreshRequest { refresh })?
            .anonymous();
        let response: RefreshResponse = self.send(request).await?;

        self.session().set_access_token(response.access)?;
        if let Some(rotated) = response.refresh {
            self.session().set_refresh_token(rotated)?;
        }
        Ok(())
    }

    /// Client-side sign out: tokens are dropped, no endpoint is called
    pub fn logout(&self) {
        self.session().logout();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api::Method;
    use crate::core::config::ClientConfig;
    use crate::core::models::{Location, Role};
    use crate::core::session::SessionStore;
    use crate::core::storage::{ACCESS_TOKEN_KEY, MemoryStorage, REFRESH_TOKEN_KEY};
    use crate::core::test_support::{MockTransport, sample_user, sample_user_json};
    use serde_json::json;
    use std::sync::Arc;

    fn client(transport: MockTransport) -> ApiClient<MockTransport, MemoryStorage> {
        ApiClient::new(
            transport,
            Arc::new(SessionStore::new(MemoryStorage::new())),
            ClientConfig::new("http://api.test"),
        )
    }

    #[tokio::test]
    async fn test_login_populates_session() {
        let client = client(MockTransport::with_json(
            200,
            json!({ "access": "t1", "refresh": "t2", "user": sample_user_json() }),
        ));

        let user = client
            .sign_in(&LoginForm::new("a@b.com", "x"))
            .await
            .unwrap();

        assert_eq!(user.first_name, "Awa");
        let session = client.session();
        assert!(session.is_authenticated());
        assert_eq!(session.storage().get(ACCESS_TOKEN_KEY).as_deref(), Some("t1"));
        assert_eq!(session.storage().get(REFRESH_TOKEN_KEY).as_deref(), Some("t2"));

        let sent = &client.transport().requests()[0];
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.url, "http://api.test/auth/login/");
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(sent.body.as_deref().unwrap()).unwrap(),
            json!({ "email": "a@b.com", "password": "x" })
        );
    }

    #[tokio::test]
    async fn test_invalid_form_sends_nothing() {
        let client = client(MockTransport::new());

        let err = client
            .sign_in(&LoginForm::new("malformed", ""))
            .await
            .unwrap_err();

        match err {
            ApiError::Validation(errors) => {
                assert!(errors.get("email").is_some());
                assert!(errors.get("password").is_some());
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(client.transport().requests().is_empty());
        assert!(!client.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_failed_login_leaves_session_empty() {
        let client = client(MockTransport::with_json(
            401,
            json!({
                "success": false,
                "error": { "message": "Aucun compte actif", "code": 401 }
            }),
        ));

        let err = client
            .sign_in(&LoginForm::new("a@b.com", "wrong"))
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "Aucun compte actif");
        assert!(!client.session().is_authenticated());
        assert_eq!(client.transport().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_load_current_user_after_restore() {
        let client = client(MockTransport::with_json(200, sample_user_json()));
        client.session().storage().set(ACCESS_TOKEN_KEY, "t1").unwrap();
        assert!(client.session().restore());

        let user = client.load_current_user().await.unwrap();

        assert_eq!(user.id, 1);
        assert!(!client.session().snapshot().needs_user());
        let sent = &client.transport().requests()[0];
        assert_eq!(sent.url, "http://api.test/auth/users/me/");
        assert_eq!(sent.header("Authorization"), Some("Bearer t1"));
    }

    #[tokio::test]
    async fn test_restore_with_rejected_token_signs_out() {
        let client = client(MockTransport::with_json(
            401,
            json!({ "success": false, "error": { "message": "Token invalide", "code": 401 } }),
        ));
        client.session().storage().set(ACCESS_TOKEN_KEY, "old").unwrap();
        client.session().restore();

        assert!(client.load_current_user().await.is_err());
        assert!(!client.session().is_authenticated());
        assert!(client.session().storage().get(ACCESS_TOKEN_KEY).is_none());
    }

    #[tokio::test]
    async fn test_update_profile_replaces_session_user() {
        let mut updated = sample_user_json();
        updated["first_name"] = json!("Aminata");
        let client = client(MockTransport::with_json(200, updated));
        client.session().login(sample_user(), "t1", "t2").unwrap();

        let update = ProfileUpdate {
            first_name: Some("Aminata".into()),
            ..Default::default()
        };
        client.update_profile(&update).await.unwrap();

        assert_eq!(
            client.session().user().map(|u| u.first_name).as_deref(),
            Some("Aminata")
        );
        let sent = &client.transport().requests()[0];
        assert_eq!(sent.method, Method::Put);
        assert_eq!(sent.body.as_deref(), Some(r#"{"first_name":"Aminata"}"#));
    }

    #[tokio::test]
    async fn test_register_sends_payload() {
        let mut created = sample_user_json();
        created["id"] = json!(12);
        created["role"] = json!("MIDWIFE");
        created["location"] = json!("GRAND_BASSAM");
        let client = client(MockTransport::with_json(201, created));

        let request = RegisterRequest {
            email: "sf@adjahi.org".into(),
            phone: "+2250102030405".into(),
            first_name: "Mariam".into(),
            last_name: "Traoré".into(),
            role: Role::Midwife,
            location: Location::GrandBassam,
            password: "secret-solide".into(),
            password_confirm: "secret-solide".into(),
        };
        let user = client.register(&request).await.unwrap();

        assert_eq!(user.id, 12);
        assert_eq!(user.role, Role::Midwife);
        assert_eq!(user.location, Location::GrandBassam);
        // Registering someone else never touches the current session
        assert!(client.session().user().is_none());

        let sent = &client.transport().requests()[0];
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.url, "http://api.test/auth/users/register/");
        let body: serde_json::Value =
            serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["email"], "sf@adjahi.org");
        assert_eq!(body["role"], "MIDWIFE");
        assert_eq!(body["location"], "GRAND_BASSAM");
        assert_eq!(body["password_confirm"], "secret-solide");
    }

    #[tokio::test]
    async fn test_change_password_body() {
        let client = client(MockTransport::with_json(200, json!({ "message": "ok" })));
        client.session().login(sample_user(), "t1", "t2").unwrap();

        let form = ChangePasswordForm {
            old_password: "ancien-secret".into(),
            new_password: "nouveau-secret".into(),
            new_password_confirm: "nouveau-secret".into(),
        };
        client.submit_password_change(&form).await.unwrap();

        let sent = &client.transport().requests()[0];
        assert_eq!(sent.url, "http://api.test/auth/users/change_password/");
        let body: serde_json::Value =
            serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["old_password"], "ancien-secret");
        assert_eq!(body["new_password_confirm"], "nouveau-secret");
    }

    #[tokio::test]
    async fn test_change_password_mismatch_is_local() {
        let client = client(MockTransport::new());
        let form = ChangePasswordForm {
            old_password: "ancien-secret".into(),
            new_password: "nouveau-secret".into(),
            new_password_confirm: "autre-secret".into(),
        };
        assert!(matches!(
            client.submit_password_change(&form).await,
            Err(ApiError::Validation(_))
        ));
        assert!(client.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_updates_access_token_only() {
        let client = client(MockTransport::with_json(200, json!({ "access": "t3" })));
        client.session().login(sample_user(), "t1", "t2").unwrap();

        client.refresh_access_token().await.unwrap();

        assert_eq!(client.session().access_token().as_deref(), Some("t3"));
        assert_eq!(client.session().refresh_token().as_deref(), Some("t2"));
        let sent = &client.transport().requests()[0];
        assert!(sent.header("Authorization").is_none());
        assert_eq!(sent.body.as_deref(), Some(r#"{"refresh":"t2"}"#));
    }

    #[tokio::test]
    async fn test_refresh_without_token() {
        let client = client(MockTransport::new());
        assert_eq!(
            client.refresh_access_token().await,
            Err(ApiError::Unauthorized)
        );
        assert!(client.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn test_logout_clears_tokens() {
        let client = client(MockTransport::new());
        client.session().login(sample_user(), "t1", "t2").unwrap();
        client.logout();
        assert!(client.session().storage().is_empty());
        assert!(!client.session().is_authenticated());
    }
}
