use crate::server::{
    data::payment_event::{PaymentEventRepository, PROCESSING_OUTCOME},
    model::payment::{ClaimPaymentEventParams, WebhookOutcome},
};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};
