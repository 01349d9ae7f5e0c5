use super::*;

/// Tests purchase visibility.
///
/// Expected: buyer and admin pass, another student is denied
#[tokio::test]
async fn purchase_visible_to_buyer_and_admin() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let (_, course, _, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let buyer = factory::user::create_user(db).await?;
    let stranger = factory::user::create_user(db).await?;
    let admin = factory::user::UserFactory::new(db)
        .role(UserRole::Admin)
        .build()
        .await?;
    let purchase = factory::purchase::create_purchase(db, buyer.id, course.id).await?;
    let guard = AuthGuard::new(db, session);
    let permission = [Permission::ViewPurchase(purchase.id)];

    AuthSession::new(session).set_user_id(buyer.id).await?;
    assert!(guard.require(&permission).await.is_ok());

    AuthSession::new(session).set_user_id(admin.id).await?;
    assert!(guard.require(&permission).await.is_ok());

    AuthSession::new(session).set_user_id(stranger.id).await?;
    assert!(matches!(
        guard.require(&permission).await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    assert!(matches!(
        guard.require(&[Permission::ViewPurchase(purchase.id + 1)]).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}
