use super::*;

/// Tests changing the role of an existing user.
///
/// Expected: Ok(Some) with the new role persisted
#[tokio::test]
async fn updates_role() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;

    let repo = UserRepository::new(db);
    let updated = repo.set_role(user.id, UserRole::Instructor).await?;

    assert_eq!(updated.map(|u| u.role), Some(UserRole::Instructor));

    let stored = repo.find_by_id(user.id).await?.unwrap();
    assert_eq!(stored.role, UserRole::Instructor);

    Ok(())
}

/// Tests changing the role of a missing user.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);

    assert!(repo.set_role(99, UserRole::Admin).await?.is_none());

    Ok(())
}
