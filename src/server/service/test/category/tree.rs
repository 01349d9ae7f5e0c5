use super::*;

/// Tests building the category forest.
///
/// Expected: two roots ordered by name, nested children under their parents
#[tokio::test]
async fn builds_forest_ordered_by_name() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_category_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let programming = factory::category::CategoryFactory::new(db)
        .name("Programming")
        .build()
        .await?;
    factory::category::CategoryFactory::new(db)
        .name("Design")
        .build()
        .await?;
    let web = factory::category::CategoryFactory::new(db)
        .name("Web")
        .parent(programming.id)
        .build()
        .await?;
    factory::category::CategoryFactory::new(db)
        .name("Embedded")
        .parent(programming.id)
        .build()
        .await?;
    factory::category::CategoryFactory::new(db)
        .name("Frontend")
        .parent(web.id)
        .build()
        .await?;

    let tree = CategoryService::new(db).tree().await?;

    let roots: Vec<&str> = tree.iter().map(|n| n.category.name.as_str()).collect();
    assert_eq!(roots, vec!["Design", "Programming"]);

    let programming = &tree[1];
    let children: Vec<&str> = programming
        .children
        .iter()
        .map(|n| n.category.name.as_str())
        .collect();
    assert_eq!(children, vec!["Embedded", "Web"]);
    assert_eq!(programming.children[1].children.len(), 1);
    assert_eq!(programming.children[1].children[0].category.name, "Frontend");

    Ok(())
}
