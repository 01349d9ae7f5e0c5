use super::*;

/// Tests anonymous access to preview lessons.
///
/// Expected: Ok(None) for a preview lesson of a published course
#[tokio::test]
async fn anonymous_reads_preview_lesson() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let (_, course, section, _) = factory::helpers::create_published_course_with_lesson(db).await?;
    let preview = factory::lesson::LessonFactory::new(db, section.id)
        .preview(true)
        .build()
        .await?;

    let viewer = AuthGuard::new(db, session)
        .permit(&[Permission::ViewCourseContent(course.id, preview.id)])
        .await?;

    assert!(viewer.is_none());

    Ok(())
}

/// Tests anonymous access to locked lessons.
///
/// Expected: Err(AuthError::UserNotInSession) so the client is asked to sign in
#[tokio::test]
async fn anonymous_denied_locked_lesson() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let (_, course, _, lesson) = factory::helpers::create_published_course_with_lesson(db).await?;

    let result = AuthGuard::new(db, session)
        .permit(&[Permission::ViewCourseContent(course.id, lesson.id)])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInSession))
    ));

    Ok(())
}

/// Tests preview lessons of draft courses.
///
/// Expected: Err(AppError::NotFound) for visitors, Ok for the owner
#[tokio::test]
async fn draft_course_content_hidden_from_visitors() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let (owner, course) = factory::helpers::create_course_with_instructor(db).await?;
    let section = factory::section::create_section(db, course.id).await?;
    let lesson = factory::lesson::LessonFactory::new(db, section.id)
        .preview(true)
        .build()
        .await?;
    let guard = AuthGuard::new(db, session);
    let permission = [Permission::ViewCourseContent(course.id, lesson.id)];

    assert!(matches!(
        guard.permit(&permission).await,
        Err(AppError::NotFound(_))
    ));

    AuthSession::new(session).set_user_id(owner.id).await?;
    let viewer = guard.permit(&permission).await?;

    assert_eq!(viewer.map(|u| u.id), Some(owner.id));

    Ok(())
}
