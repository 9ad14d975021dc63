use super::*;

/// Tests admin user successfully passes admin permission check.
///
/// Expected: Ok(User) with an admin role
#[tokio::test]
async fn grants_access_to_admin_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::user::UserFactory::new(db)
        .name("AdminUser")
        .admin()
        .build()
        .await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let returned_user = AuthGuard::new(db, session)
        .require(&[Permission::Admin])
        .await?;

    assert_eq!(returned_user.name, "AdminUser");
    assert!(returned_user.role.is_admin());

    Ok(())
}

/// Tests the owner counts as an admin.
///
/// Expected: Ok(User)
#[tokio::test]
async fn grants_access_to_owner() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let owner = factory::user::UserFactory::new(db).owner().build().await?;
    AuthSession::new(session).set_user_id(owner.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::Admin])
        .await;

    assert!(result.is_ok());

    Ok(())
}

/// Tests non-admin user is denied admin permission.
///
/// Expected: Err(AuthError::AccessDenied)
#[tokio::test]
async fn denies_access_to_non_admin_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::create_user(db).await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::Admin])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::AccessDenied(user_id, message))) => {
            assert_eq!(user_id, user.id);
            assert!(message.contains("Admin"));
        }
        other => panic!("Expected AccessDenied error, got: {:?}", other),
    }

    Ok(())
}

/// Tests admin routes without a session use the admin message.
///
/// Expected: Err(AuthError::AdminNotInSession)
#[tokio::test]
async fn admin_route_without_session() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let result = AuthGuard::new(db, session)
        .require(&[Permission::Admin])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AdminNotInSession))
    ));

    Ok(())
}

/// Tests user administration routes without a session use their own message.
///
/// Expected: Err(AuthError::UserAdminNotInSession)
#[tokio::test]
async fn user_admin_route_without_session() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let result = AuthGuard::new(db, session)
        .require(&[Permission::UserAdmin])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserAdminNotInSession))
    ));

    Ok(())
}

/// Tests non-admin user is denied the user administration permission.
///
/// Expected: Err(AuthError::UserAdminDenied)
#[tokio::test]
async fn denies_user_admin_to_non_admin_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::create_user(db).await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::UserAdmin])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserAdminDenied(id))) if id == user.id
    ));

    Ok(())
}
