use crate::server::{
    error::{auth::AuthError, payment::PaymentError, AppError},
    model::user::User,
    service::purchase::{checkout::CheckoutService, PurchaseService},
};
use entity::{course::CourseStatus, purchase::PurchaseStatus};
use serde_json::json;
use test_utils::{builder::TestBuilder, factory};
use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

use super::{mock_capture, mock_token, paypal_client};

mod capture;

const APP_URL: &str = "http://localhost:8080";
