use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, user::UserDto},
    server::{
        error::{auth::AuthError, AppError},
        middleware::{
            auth::AuthGuard,
            session::{AuthSession, CsrfSession, OAuthFlowSession},
        },
        service::auth::AuthService,
        state::AppState,
    },
};

/// Tag for grouping authentication endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

#[derive(Deserialize)]
pub struct LoginParams {
    /// One-time code granting the admin role on this login.
    pub admin_code: Option<String>,
}

/// Query parameters for the OAuth callback endpoint.
#[derive(Deserialize)]
pub struct CallbackParams {
    /// CSRF state token to be validated against the session value.
    pub state: String,
    /// Authorization code for the token exchange.
    pub code: String,
}

/// Start the OAuth2 login flow.
///
/// Stores a CSRF token in the session and redirects to the identity provider. A valid
/// `admin_code` flags the session so the callback grants the admin role.
///
/// # Returns
/// - `307 Temporary Redirect` - Redirect to the identity provider
/// - `400 Bad Request` - Invalid or expired admin code
#[utoipa::path(
    get,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    params(
        ("admin_code" = Option<String>, Query, description = "One-time admin bootstrap code")
    ),
    responses(
        (status = 307, description = "Redirect to the identity provider"),
        (status = 400, description = "Invalid or expired admin code", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<LoginParams>,
) -> Result<impl IntoResponse, AppError> {
    let grant_admin = match params.admin_code {
        Some(code) => {
            if !state.admin_code_service.validate_and_consume(&code).await {
                return Err(AuthError::InvalidAdminCode.into());
            }
            true
        }
        None => false,
    };

    let auth_service = AuthService::new(
        &state.db,
        &state.http_client,
        &state.oauth_client,
        &state.oauth_userinfo_url,
    );
    let (url, csrf_token) = auth_service.login_url();

    CsrfSession::new(&session)
        .set_token(csrf_token.secret().clone())
        .await?;
    OAuthFlowSession::new(&session)
        .set_admin_flag(grant_admin)
        .await?;

    Ok(Redirect::temporary(url.as_str()))
}

/// Complete the OAuth2 login flow.
///
/// Validates the CSRF state, exchanges the code, upserts the user and signs them in.
///
/// # Returns
/// - `307 Temporary Redirect` - Redirect to the application
/// - `400 Bad Request` - CSRF state mismatch
/// - `500 Internal Server Error` - Token exchange or userinfo request failed
#[utoipa::path(
    get,
    path = "/api/auth/callback",
    tag = AUTH_TAG,
    params(
        ("state" = String, Query, description = "CSRF state returned by the identity provider"),
        ("code" = String, Query, description = "Authorization code")
    ),
    responses(
        (status = 307, description = "Signed in, redirect to the application"),
        (status = 400, description = "CSRF validation failed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    validate_csrf(&session, &params.state).await?;

    let grant_admin = OAuthFlowSession::new(&session).take_admin_flag().await?;

    let auth_service = AuthService::new(
        &state.db,
        &state.http_client,
        &state.oauth_client,
        &state.oauth_userinfo_url,
    );
    let user = auth_service.callback(params.code, grant_admin).await?;

    AuthSession::new(&session).set_user_id(user.id).await?;

    Ok(Redirect::temporary(&state.app_url))
}

/// Sign out and clear the session.
#[utoipa::path(
    get,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 307, description = "Signed out, redirect to the application")
    ),
)]
pub async fn logout(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).clear().await;

    Ok(Redirect::temporary(&state.app_url))
}

/// Get the signed-in user.
///
/// # Returns
/// - `200 OK` - Current user
/// - `401 Unauthorized` - Not signed in
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Signed-in user", body = UserDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Compares the callback state with the session token.
///
/// The token is removed from the session whether or not it matches.
async fn validate_csrf(session: &Session, csrf_state: &str) -> Result<(), AppError> {
    let stored = CsrfSession::new(session).take_token().await?;

    match stored {
        Some(token) if token == csrf_state => Ok(()),
        _ => Err(AuthError::CsrfValidationFailed.into()),
    }
}
