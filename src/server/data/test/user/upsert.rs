use super::*;

/// Tests creating a new user on first login.
///
/// Verifies that a user without an explicit role is stored as a student.
///
/// Expected: Ok with user created as Student
#[tokio::test]
async fn creates_new_user_as_student() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .upsert(UpsertUserParam {
            subject: "sub-1".to_string(),
            email: "ada@example.com".to_string(),
            name: "Ada".to_string(),
            role: None,
        })
        .await?;

    assert_eq!(user.subject, "sub-1");
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.name, "Ada");
    assert_eq!(user.role, UserRole::Student);

    Ok(())
}

/// Tests a repeat login refreshing profile fields.
///
/// Verifies that upserting an existing subject updates email and name, keeps the id
/// and leaves the role untouched when no role is given.
///
/// Expected: Ok with same id, new profile, unchanged role
#[tokio::test]
async fn refreshes_profile_without_changing_role() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = factory::user::UserFactory::new(db)
        .subject("sub-2")
        .role(UserRole::Instructor)
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let user = repo
        .upsert(UpsertUserParam {
            subject: "sub-2".to_string(),
            email: "new@example.com".to_string(),
            name: "Renamed".to_string(),
            role: None,
        })
        .await?;

    assert_eq!(user.id, existing.id);
    assert_eq!(user.email, "new@example.com");
    assert_eq!(user.name, "Renamed");
    assert_eq!(user.role, UserRole::Instructor);

    Ok(())
}

/// Tests granting a role during login.
///
/// Expected: Ok with existing user promoted to Admin
#[tokio::test]
async fn writes_role_when_provided() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .subject("sub-3")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let user = repo
        .upsert(UpsertUserParam {
            subject: "sub-3".to_string(),
            email: "admin@example.com".to_string(),
            name: "Admin".to_string(),
            role: Some(UserRole::Admin),
        })
        .await?;

    assert_eq!(user.role, UserRole::Admin);

    Ok(())
}
