use super::*;

/// Tests creating an account with a password hash.
///
/// Expected: Ok with the row readable by id and by email
#[tokio::test]
async fn creates_user_and_finds_by_email() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .create(CreateUserParams {
            email: "ann@example.com".to_string(),
            name: "Ann".to_string(),
            username: None,
            role: UserRole::User,
            password_hash: Some("hash".to_string()),
        })
        .await?;

    let by_id = repo.find_by_id(user.id).await?.unwrap();
    let by_email = repo.find_by_email("ann@example.com").await?.unwrap();

    assert_eq!(by_id, by_email);
    assert_eq!(by_id.role, UserRole::User);
    assert!(!by_id.banned);

    Ok(())
}

/// Tests that a second account with the same email violates the unique index.
///
/// Expected: Err on the second insert
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = factory::create_user(db).await?;

    let result = UserRepository::new(db)
        .create(CreateUserParams {
            email: existing.email.clone(),
            name: "Copy".to_string(),
            username: None,
            role: UserRole::User,
            password_hash: None,
        })
        .await;

    assert!(result.is_err());

    Ok(())
}

/// Tests counting users created since a cutoff.
///
/// Expected: Ok counting only the recent user
#[tokio::test]
async fn counts_users_created_since() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .created_at(Utc::now() - Duration::days(90))
        .build()
        .await?;
    factory::create_user(db).await?;

    let repo = UserRepository::new(db);

    assert_eq!(repo.count().await?, 2);
    assert_eq!(
        repo.count_created_since(Utc::now() - Duration::days(1)).await?,
        1
    );

    Ok(())
}
