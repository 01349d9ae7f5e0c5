use entity::user::UserRole;
use oauth2::{AuthorizationCode, TokenResponse};
use serde::Deserialize;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{UpsertUserParam, User},
    service::auth::AuthService,
};

/// Profile returned by the userinfo endpoint.
#[derive(Debug, Deserialize)]
struct UserInfo {
    sub: String,
    email: String,
    name: Option<String>,
}

impl<'a> AuthService<'a> {
    /// Completes a login by exchanging the authorization code.
    ///
    /// Fetches the user's profile with the access token and upserts the user. The role
    /// is only written when `grant_admin` is set, so repeat logins keep existing roles.
    ///
    /// # Arguments
    /// - `authorization_code` - Code from the callback query
    /// - `grant_admin` - A valid admin code was presented at login
    ///
    /// # Returns
    /// - `Ok(User)` - Signed-in user
    /// - `Err(AuthError::TokenExchange)` - The provider rejected the code
    /// - `Err(AppError::ReqwestErr)` - Userinfo request failed
    pub async fn callback(
        &self,
        authorization_code: String,
        grant_admin: bool,
    ) -> Result<User, AppError> {
        let token = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(authorization_code))
            .request_async(self.http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        let info = self
            .http_client
            .get(self.userinfo_url)
            .bearer_auth(token.access_token().secret())
            .send()
            .await?
            .error_for_status()?
            .json::<UserInfo>()
            .await?;

        let name = info.name.unwrap_or_else(|| info.email.clone());

        let user = UserRepository::new(self.db)
            .upsert(UpsertUserParam {
                subject: info.sub,
                email: info.email,
                name,
                role: grant_admin.then_some(UserRole::Admin),
            })
            .await?;

        tracing::info!(user_id = user.id, role = ?user.role, "User signed in");

        Ok(user)
    }
}
