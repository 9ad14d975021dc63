mod common;

use common::{create_open_game, TestServer};
use signupboard::model::{
    game::{GameStatus, UpsertGameDto},
    registration::{ParticipantInputDto, SignupDto},
    user_player::CreateUserPlayerDto,
};

fn dated_game(signup_end: &str) -> UpsertGameDto {
    UpsertGameDto {
        name: Some("Winter Cup".to_string()),
        region: Some("keelung".to_string()),
        venue: Some("Hall".to_string()),
        address: Some("Harbor Rd.".to_string()),
        signup_start: Some("2025-01-01".to_string()),
        signup_end: Some(signup_end.to_string()),
        game_start: Some("2025-01-15".to_string()),
        game_end: Some("2025-01-16".to_string()),
        ..Default::default()
    }
}

/// Tests game creation enforces the window ordering.
///
/// Expected: 201 for an ordered window, 400 when signup ends after the game starts
#[tokio::test]
async fn create_game_checks_window_order() {
    let server = TestServer::spawn().await;
    let (admin, _) = server.admin().await;

    let game = admin.create_game(&dated_game("2025-01-10")).await.unwrap();

    assert_eq!(game.game.name, "Winter Cup");
    assert_eq!(game.game.region_name, "基隆市");
    assert_eq!(game.game.status, GameStatus::Ended);

    let err = admin
        .create_game(&dated_game("2025-01-20"))
        .await
        .unwrap_err();

    assert_eq!(err.status, 400);
    assert_eq!(err.message, "報名結束時間必須早於賽事開始時間");
}

/// Tests non-admins cannot create games and anyone may list them.
///
/// Expected: 403 for a user, the created game in the public list
#[tokio::test]
async fn games_are_public_but_admin_managed() {
    let server = TestServer::spawn().await;
    let (admin, _) = server.admin().await;
    let (user, _) = server.sign_up("player@example.com").await;

    let err = user.create_game(&dated_game("2025-01-10")).await.unwrap_err();
    assert_eq!(err.status, 403);

    let game = create_open_game(&admin, "Spring Open").await;

    let games = server.client().list_games(None).await.unwrap();
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].game.id, game.game.id);
    assert_eq!(games[0].category_count, 1);
    assert_eq!(games[0].game.status, GameStatus::Registration);

    let fees = server
        .client()
        .list_game_fees(Some(game.game.id), None)
        .await
        .unwrap();
    assert_eq!(fees.len(), 1);
    assert_eq!(fees[0].category_id, Some(game.categories[0].id));
}

/// Tests a game with registrations cannot be deleted.
///
/// Expected: 400 while a registration exists
#[tokio::test]
async fn delete_game_blocked_by_registrations() {
    let server = TestServer::spawn().await;
    let (admin, _) = server.admin().await;
    let (user, _) = server.sign_up("player@example.com").await;

    let game = create_open_game(&admin, "Spring Open").await;
    let player = user
        .create_user_player(&CreateUserPlayerDto {
            name: Some("Lin".to_string()),
            gender: Some("F".to_string()),
            birthday: Some("2000-02-03".to_string()),
        })
        .await
        .unwrap();
    user.signup(
        game.game.id,
        &SignupDto {
            category_id: Some(game.categories[0].id),
            participants: vec![ParticipantInputDto::player(player.id, true)],
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let err = admin.delete_game(game.game.id).await.unwrap_err();

    assert_eq!(err.status, 400);
    assert_eq!(err.message, "已有隊伍報名，無法刪除賽事");

    let empty = create_open_game(&admin, "Empty Open").await;
    let deleted = admin.delete_game(empty.game.id).await.unwrap();
    assert!(deleted.success);

    let err = admin.get_game(empty.game.id).await.unwrap_err();
    assert_eq!(err.status, 404);
}
