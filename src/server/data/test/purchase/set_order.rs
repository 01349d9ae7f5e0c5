use super::*;

/// Tests storing the provider order on a purchase.
///
/// Expected: Ok(Some) with order id and approval URL
#[tokio::test]
async fn stores_order_and_approval_url() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let buyer = factory::user::create_user(db).await?;
    let purchase = factory::purchase::create_purchase(db, buyer.id, course.id).await?;

    let repo = PurchaseRepository::new(db);
    let updated = repo
        .set_order(
            purchase.id,
            "ORDER-1".to_string(),
            Some("https://paypal.test/approve".to_string()),
        )
        .await?
        .unwrap();

    assert_eq!(updated.provider_order_id.as_deref(), Some("ORDER-1"));
    assert_eq!(
        updated.approval_url.as_deref(),
        Some("https://paypal.test/approve")
    );
    assert!(repo
        .set_order(purchase.id + 10, "ORDER-2".to_string(), None)
        .await?
        .is_none());

    Ok(())
}
