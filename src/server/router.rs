//! Route table and OpenAPI document.

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{
        admin::{self, ADMIN_TAG},
        auth::{self, AUTH_TAG},
        category::{self, CATEGORY_TAG},
        course::{self, COURSE_TAG},
        curriculum::{self, CURRICULUM_TAG},
        purchase::{self, PURCHASE_TAG},
        webhook::{self, WEBHOOK_TAG},
    },
    error::{config::ConfigError, AppError},
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Academy API",
        description = "Course marketplace: catalogue, curriculum, checkout and payment webhooks"
    ),
    tags(
        (name = AUTH_TAG, description = "OAuth2 login and session"),
        (name = ADMIN_TAG, description = "User and purchase administration"),
        (name = CATEGORY_TAG, description = "Category tree"),
        (name = COURSE_TAG, description = "Course catalogue and authoring"),
        (name = CURRICULUM_TAG, description = "Sections and lessons"),
        (name = PURCHASE_TAG, description = "Checkout and purchase history"),
        (name = WEBHOOK_TAG, description = "PayPal webhook receiver")
    )
)]
struct ApiDoc;

/// Collects every API route together with its OpenAPI operation.
fn api_router() -> OpenApiRouter<AppState> {
    OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(auth::login))
        .routes(routes!(auth::callback))
        .routes(routes!(auth::logout))
        .routes(routes!(auth::get_user))
        .routes(routes!(admin::get_all_users))
        .routes(routes!(admin::set_user_role))
        .routes(routes!(admin::get_all_purchases))
        .routes(routes!(
            category::get_category_tree,
            category::create_category
        ))
        .routes(routes!(
            category::get_category,
            category::update_category,
            category::delete_category
        ))
        .routes(routes!(course::list_courses, course::create_course))
        .routes(routes!(
            course::get_course,
            course::update_course,
            course::delete_course
        ))
        .routes(routes!(course::get_instructor_courses))
        .routes(routes!(curriculum::create_section))
        .routes(routes!(
            curriculum::get_section,
            curriculum::update_section,
            curriculum::delete_section
        ))
        .routes(routes!(curriculum::create_lesson))
        .routes(routes!(
            curriculum::get_lesson,
            curriculum::update_lesson,
            curriculum::delete_lesson
        ))
        .routes(routes!(purchase::start_purchase))
        .routes(routes!(purchase::get_purchase))
        .routes(routes!(purchase::capture_purchase))
        .routes(routes!(purchase::get_user_purchases))
        .routes(routes!(webhook::paypal_webhook))
}

/// Builds the application router.
///
/// Swagger UI is served at `/api/docs`. CORS admits credentialed requests from the
/// application URL only.
///
/// # Arguments
/// - `app_url` - Origin allowed by CORS
///
/// # Returns
/// - `Ok(Router)` - Router awaiting its state and session layer
/// - `Err(ConfigError::InvalidEnvVar)` - `app_url` is not a valid header value
pub fn router(app_url: &str) -> Result<Router<AppState>, AppError> {
    let origin = app_url
        .parse::<HeaderValue>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            name: "APP_URL".to_string(),
            reason: e.to_string(),
        })?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let (router, api) = api_router().split_for_parts();

    let router = router
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", api))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    Ok(router)
}
