mod common;

use common::{open_game_payload, TestServer, PASSWORD};
use signupboard::client::api::ActivityLogQuery;

/// Tests protected routes without a session.
///
/// Expected: 401 with the user message, and each admin surface's own message
#[tokio::test]
async fn anonymous_requests_are_unauthorized() {
    let server = TestServer::spawn().await;
    let client = server.client();

    let err = client.list_teams().await.unwrap_err();
    assert_eq!(err.status, 401);
    assert_eq!(err.message, "請先登入");

    let err = client.get_stats().await.unwrap_err();
    assert_eq!(err.status, 401);
    assert_eq!(err.message, "Unauthorized - No session");

    let err = client
        .create_game(&open_game_payload("Spring Cup"))
        .await
        .unwrap_err();
    assert_eq!(err.status, 401);
    assert_eq!(err.message, "未授權");
}

/// Tests signed-in users are refused admin surfaces.
///
/// Expected: 403 on admin routes, game management and the activity log
#[tokio::test]
async fn users_are_forbidden_on_admin_routes() {
    let server = TestServer::spawn().await;
    let (user, _) = server.sign_up("player@example.com").await;

    let err = user.get_stats().await.unwrap_err();
    assert_eq!(err.status, 403);
    assert_eq!(err.message, "Forbidden - Insufficient permissions");

    let err = user
        .create_game(&open_game_payload("Spring Cup"))
        .await
        .unwrap_err();
    assert_eq!(err.status, 403);
    assert_eq!(err.message, "權限不足");

    let err = user
        .list_activity_logs(&ActivityLogQuery::default())
        .await
        .unwrap_err();
    assert_eq!(err.status, 403);
    assert_eq!(err.message, "權限不足");
}

/// Tests the session survives sign-in and ends with sign-out.
///
/// Expected: session user after sign-in, 401 after sign-out
#[tokio::test]
async fn sign_in_and_out() {
    let server = TestServer::spawn().await;
    let (first, me) = server.sign_up("player@example.com").await;
    first.sign_out().await.unwrap();

    let client = server.client();
    let err = client
        .sign_in("player@example.com", "wrong-password")
        .await
        .unwrap_err();
    assert_eq!(err.status, 401);

    client.sign_in("player@example.com", PASSWORD).await.unwrap();
    let session = client.get_session().await.unwrap();
    assert_eq!(session.id, me.id);
    assert!(client.has_credential().await.unwrap());

    client.sign_out().await.unwrap();
    let err = client.get_session().await.unwrap_err();
    assert_eq!(err.status, 401);
}

/// Tests members of someone else's team are out of reach.
///
/// Expected: 403 listing another user's members, 404 reading the team
#[tokio::test]
async fn team_members_are_owner_only() {
    let server = TestServer::spawn().await;
    let (owner, _) = server.sign_up("owner@example.com").await;
    let (stranger, _) = server.sign_up("stranger@example.com").await;

    let team = owner.create_team("Harbor Hawks").await.unwrap();

    let err = stranger.list_team_members(team.id).await.unwrap_err();
    assert_eq!(err.status, 403);

    let err = stranger.get_team(team.id).await.unwrap_err();
    assert_eq!(err.status, 404);
    assert_eq!(err.message, "隊伍不存在");
}
