mod common;

use common::TestServer;
use entity::user::UserRole;
use signupboard::client::api::UserListQuery;

/// Tests the owner cannot be demoted, banned or deleted.
///
/// Expected: 403 for each attempt
#[tokio::test]
async fn owner_is_protected() {
    let server = TestServer::spawn().await;
    let (_, owner) = server
        .sign_up_as("owner@example.com", UserRole::Owner)
        .await;
    let (admin, _) = server.admin().await;

    let err = admin.set_user_role(owner.id, "user").await.unwrap_err();
    assert_eq!(err.status, 403);
    assert_eq!(err.message, "Cannot modify owner role");

    let err = admin.ban_user(owner.id, None, None).await.unwrap_err();
    assert_eq!(err.status, 403);

    let err = admin.delete_user(owner.id).await.unwrap_err();
    assert_eq!(err.status, 403);
    assert_eq!(err.message, "Cannot delete owner");
}

/// Tests banning locks a user out until unbanned.
///
/// Expected: 403 on the banned session, access again after unban
#[tokio::test]
async fn ban_and_unban() {
    let server = TestServer::spawn().await;
    let (admin, _) = server.admin().await;
    let (user, me) = server.sign_up("player@example.com").await;

    let banned = admin
        .ban_user(me.id, Some("spam".to_string()), Some(3600))
        .await
        .unwrap();
    assert!(banned.banned);
    assert!(banned.ban_expires.is_some());

    let err = user.list_teams().await.unwrap_err();
    assert_eq!(err.status, 403);
    assert_eq!(err.message, "Your account has been banned");

    admin.unban_user(me.id).await.unwrap();

    assert!(user.list_teams().await.unwrap().is_empty());
}

/// Tests the user list search and the dashboard counters.
///
/// Expected: name search finds one user, stats count both accounts
#[tokio::test]
async fn list_users_and_stats() {
    let server = TestServer::spawn().await;
    let (admin, _) = server.admin().await;
    server.sign_up("zhang@example.com").await;

    let page = admin
        .list_users(&UserListQuery {
            search_value: Some("zhang".to_string()),
            search_field: Some("name".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.users[0].email, "zhang@example.com");

    let stats = admin.get_stats().await.unwrap();
    assert_eq!(stats.users_count, 2);
    assert_eq!(stats.games_count, 0);
}

/// Tests an admin cannot delete their own account.
///
/// Expected: 400 `Cannot delete yourself`
#[tokio::test]
async fn admin_cannot_delete_self() {
    let server = TestServer::spawn().await;
    let (admin, me) = server.admin().await;

    let err = admin.delete_user(me.id).await.unwrap_err();

    assert_eq!(err.status, 400);
    assert_eq!(err.message, "Cannot delete yourself");
}
