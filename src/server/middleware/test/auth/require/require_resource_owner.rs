use super::*;

/// Tests the owner of a record passes the ownership check.
///
/// Expected: Ok(User)
#[tokio::test]
async fn grants_access_to_owner_of_record() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::create_user(db).await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let returned_user = AuthGuard::new(db, session)
        .require(&[Permission::ResourceOwner(user.id)])
        .await?;

    assert_eq!(returned_user.id, user.id);

    Ok(())
}

/// Tests admins do not bypass ownership.
///
/// Expected: Err(AuthError::AccessDenied)
#[tokio::test]
async fn admin_is_not_owner_of_others_records() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let admin = factory::user::create_admin(db).await?;
    let other = factory::create_user(db).await?;
    AuthSession::new(session).set_user_id(admin.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::ResourceOwner(other.id)])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(..)))
    ));
    assert!(!Permission::ResourceOwner(other.id).allows(&admin));
    assert!(Permission::Admin.allows(&admin));

    Ok(())
}
