use super::*;

/// Tests promoting a student to instructor.
///
/// Expected: Ok with the new role stored
#[tokio::test]
async fn promotes_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::user::UserFactory::new(db)
        .role(UserRole::Admin)
        .build()
        .await?;
    let student = factory::user::create_user(db).await?;

    let updated = UserService::new(db)
        .set_role(&User::from_entity(admin), student.id, UserRole::Instructor)
        .await?;

    assert_eq!(updated.id, student.id);
    assert_eq!(updated.role, UserRole::Instructor);

    Ok(())
}

/// Tests that an admin cannot demote themself.
///
/// Expected: Err(BadRequest) and the role is kept
#[tokio::test]
async fn rejects_self_demotion() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::user::UserFactory::new(db)
        .role(UserRole::Admin)
        .build()
        .await?;
    let admin = User::from_entity(admin);

    let result = UserService::new(db)
        .set_role(&admin, admin.id, UserRole::Student)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let stored = entity::prelude::User::find_by_id(admin.id).one(db).await?.unwrap();
    assert_eq!(stored.role, UserRole::Admin);

    Ok(())
}

/// Tests changing the role of an unknown user.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn fails_for_missing_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::user::UserFactory::new(db)
        .role(UserRole::Admin)
        .build()
        .await?;

    let result = UserService::new(db)
        .set_role(&User::from_entity(admin), 999, UserRole::Instructor)
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
