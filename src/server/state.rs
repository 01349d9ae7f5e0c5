//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;

use super::service::{admin::code::AdminCodeService, paypal::PayPalClient};

/// Type alias for the OAuth2 client configured for the identity provider.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone: the database connection and HTTP clients share
/// their pools, and the services keep their mutable state behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// HTTP client for identity provider requests.
    ///
    /// Configured with redirects disabled to prevent SSRF vulnerabilities.
    pub http_client: reqwest::Client,

    /// OAuth2 client for the authorization code login flow.
    pub oauth_client: OAuth2Client,

    /// Endpoint returning the signed-in user's `sub`, `email` and `name`.
    pub oauth_userinfo_url: String,

    /// Service for managing temporary admin codes.
    pub admin_code_service: AdminCodeService,

    /// PayPal REST client with a shared access token cache.
    pub paypal: PayPalClient,

    /// Application base URL for redirects and payment return URLs.
    pub app_url: String,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `http_client` - HTTP client for identity provider requests
    /// - `oauth_client` - OAuth2 client for login
    /// - `oauth_userinfo_url` - Identity provider userinfo endpoint
    /// - `admin_code_service` - Service for managing admin codes
    /// - `paypal` - Payment provider client
    /// - `app_url` - Application base URL
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        oauth_client: OAuth2Client,
        oauth_userinfo_url: String,
        admin_code_service: AdminCodeService,
        paypal: PayPalClient,
        app_url: String,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
            oauth_userinfo_url,
            admin_code_service,
            paypal,
            app_url,
        }
    }
}
