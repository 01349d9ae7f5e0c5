use oauth2::{basic::BasicClient, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use sea_orm::DatabaseConnection;
use time::Duration;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;
use url::Url;

use crate::server::{
    config::Config,
    data::user::UserRepository,
    error::{config::ConfigError, internal::InternalError, AppError},
    service::{admin::code::AdminCodeService, paypal::PayPalClient},
    state::OAuth2Client,
};

/// Days of inactivity after which a session expires.
const SESSION_INACTIVITY_DAYS: i64 = 7;

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then runs all pending SeaORM migrations. This must complete before the
/// application can access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the session layer backed by the application database.
///
/// The session table is created if missing. Sessions expire after seven days without
/// a request.
///
/// # Arguments
/// - `db` - Database connection whose SQLite pool stores the sessions
///
/// # Returns
/// - `Ok(SessionManagerLayer)` - Layer to wrap the router with
/// - `Err(AppError::DbErr)` - Failed to create the session table
pub async fn connect_to_session(
    db: &DatabaseConnection,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    let pool = db.get_sqlite_connection_pool();
    let session_store = SqliteStore::new(pool.clone());

    session_store
        .migrate()
        .await
        .map_err(|e| sea_orm::DbErr::Custom(e.to_string()))?;

    let layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(Duration::days(SESSION_INACTIVITY_DAYS)));

    Ok(layer)
}

/// Builds the HTTP client shared by the identity provider and PayPal calls.
///
/// Redirects are disabled so a provider response cannot point the server at an
/// arbitrary host.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

/// Builds the OAuth2 client for the authorization code login flow.
///
/// # Returns
/// - `Ok(OAuth2Client)` - Client with authorization, token and redirect URLs set
/// - `Err(ConfigError::InvalidEnvVar)` - One of the OAuth URLs is not a valid URL
pub fn setup_oauth_client(config: &Config) -> Result<OAuth2Client, AppError> {
    let invalid = |name: &str, e: url::ParseError| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason: e.to_string(),
    };

    let auth_url = AuthUrl::new(config.oauth_auth_url.clone())
        .map_err(|e| invalid("OAUTH_AUTH_URL", e))?;
    let token_url = TokenUrl::new(config.oauth_token_url.clone())
        .map_err(|e| invalid("OAUTH_TOKEN_URL", e))?;
    let redirect_url = RedirectUrl::new(config.oauth_redirect_url.clone())
        .map_err(|e| invalid("OAUTH_REDIRECT_URL", e))?;

    let client = BasicClient::new(ClientId::new(config.oauth_client_id.clone()))
        .set_client_secret(ClientSecret::new(config.oauth_client_secret.clone()))
        .set_auth_uri(auth_url)
        .set_token_uri(token_url)
        .set_redirect_uri(redirect_url);

    Ok(client)
}

pub fn setup_paypal_client(config: &Config, http_client: reqwest::Client) -> PayPalClient {
    PayPalClient::new(
        http_client,
        &config.paypal_api_base,
        &config.paypal_client_id,
        &config.paypal_client_secret,
        &config.paypal_webhook_id,
    )
}

/// Issues an admin bootstrap code when no admin exists.
///
/// The login URL carrying the code is logged so the operator can claim the admin role.
///
/// # Arguments
/// - `db` - Database connection
/// - `config` - Configuration providing the application URL
/// - `admin_code_service` - Service holding the outstanding code
///
/// # Returns
/// - `Ok(())` - An admin exists or a login URL was logged
/// - `Err(AppError::DbErr)` - Failed to query users
/// - `Err(InternalError::InvalidUrl)` - The application URL cannot be joined
pub async fn check_for_admin(
    db: &DatabaseConnection,
    config: &Config,
    admin_code_service: &AdminCodeService,
) -> Result<(), AppError> {
    if UserRepository::new(db).admin_exists().await? {
        return Ok(());
    }

    let code = admin_code_service.generate().await;
    let login_url = admin_login_url(&config.app_url, &code)?;

    tracing::info!(
        "No admin user found, sign in with this link to claim the admin role: {}",
        login_url
    );

    Ok(())
}

fn admin_login_url(app_url: &str, code: &str) -> Result<Url, InternalError> {
    let value = format!("{}/api/auth/login", app_url);

    Url::parse_with_params(&value, &[("admin_code", code)])
        .map_err(|source| InternalError::InvalidUrl { value, source })
}
