use super::*;

/// Tests the course outline.
///
/// Expected: sections in position order with their lessons attached
#[tokio::test]
async fn returns_outline() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, course, first, lesson) =
        factory::helpers::create_published_course_with_lesson(db).await?;
    let second = factory::section::SectionFactory::new(db, course.id)
        .position(first.position + 1)
        .build()
        .await?;

    let detail = CourseService::new(db)
        .get(course.id, &Ability::anonymous())
        .await?;

    assert_eq!(detail.course.id, course.id);
    assert_eq!(detail.sections.len(), 2);
    assert_eq!(detail.sections[0].section.id, first.id);
    assert_eq!(detail.sections[0].lessons.len(), 1);
    assert_eq!(detail.sections[0].lessons[0].id, lesson.id);
    assert_eq!(detail.sections[1].section.id, second.id);
    assert!(detail.sections[1].lessons.is_empty());

    Ok(())
}

/// Tests draft visibility.
///
/// Expected: Err(NotFound) for students, Ok for the owner and admins
#[tokio::test]
async fn hides_drafts_from_non_owners() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (instructor, course) = factory::helpers::create_course_with_instructor(db).await?;
    let student = factory::user::create_user(db).await?;
    let admin = factory::user::UserFactory::new(db)
        .role(UserRole::Admin)
        .build()
        .await?;

    let service = CourseService::new(db);
    let owner = User::from_entity(instructor);
    let student = User::from_entity(student);
    let admin = User::from_entity(admin);

    let result = service
        .get(course.id, &Ability::for_user(Some(&student)))
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let result = service.get(course.id, &Ability::anonymous()).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    assert!(service
        .get(course.id, &Ability::for_user(Some(&owner)))
        .await
        .is_ok());
    assert!(service
        .get(course.id, &Ability::for_user(Some(&admin)))
        .await
        .is_ok());

    Ok(())
}
