mod common;

use common::{create_open_game, TestServer};
use signupboard::model::{
    registration::{ParticipantInputDto, RegistrationStatusDto, ResubmitDto, SignupDto},
    team::TeamMemberInputDto,
    user_player::{CreateUserPlayerDto, UpdateUserPlayerDto},
};

fn player(name: &str) -> CreateUserPlayerDto {
    CreateUserPlayerDto {
        name: Some(name.to_string()),
        gender: Some("M".to_string()),
        birthday: Some("1999-09-09".to_string()),
    }
}

/// Tests a banned player cannot be signed up.
///
/// Expected: 400 `部分隊員不存在或已被禁賽`
#[tokio::test]
async fn banned_player_is_rejected() {
    let server = TestServer::spawn().await;
    let (admin, _) = server.admin().await;
    let (user, _) = server.sign_up("player@example.com").await;
    let game = create_open_game(&admin, "Spring Open").await;

    let banned = user.create_user_player(&player("Chen")).await.unwrap();
    user.update_user_player(
        banned.id,
        &UpdateUserPlayerDto {
            is_banned: Some(true),
            ban_reason: Some("misconduct".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let err = user
        .signup(
            game.game.id,
            &SignupDto {
                category_id: Some(game.categories[0].id),
                participants: vec![ParticipantInputDto::player(banned.id, true)],
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.status, 400);
    assert_eq!(err.message, "部分隊員不存在或已被禁賽");
}

/// Tests the full review cycle: signup, reject, resubmit, approve.
///
/// Expected: status moves pending → rejected → pending → approved, then edits are refused
#[tokio::test]
async fn review_cycle() {
    let server = TestServer::spawn().await;
    let (admin, admin_user) = server.admin().await;
    let (user, me) = server.sign_up("captain@example.com").await;
    let game = create_open_game(&admin, "Spring Open").await;

    let team = user.create_team("Harbor Hawks").await.unwrap();
    let members = user
        .create_team_members_batch(
            team.id,
            vec![
                TeamMemberInputDto {
                    name: "Wang".to_string(),
                    gender: "M".to_string(),
                    birthday: "2001-01-01".to_string(),
                    ..Default::default()
                },
                TeamMemberInputDto {
                    name: "Huang".to_string(),
                    gender: "F".to_string(),
                    birthday: "2002-02-02".to_string(),
                    ..Default::default()
                },
            ],
        )
        .await
        .unwrap();

    let signup = SignupDto {
        category_id: Some(game.categories[0].id),
        team_id: Some(team.id),
        participants: members
            .iter()
            .enumerate()
            .map(|(i, m)| ParticipantInputDto::member(m.id, i == 0))
            .collect(),
        note: Some("first try".to_string()),
    };
    let created = user.signup(game.game.id, &signup).await.unwrap();
    assert!(created.success);
    assert_eq!(created.data.status, RegistrationStatusDto::Pending);
    assert_eq!(created.data.registrant_user_id, me.id);
    assert_eq!(created.data.participants.len(), 2);

    let err = user.signup(game.game.id, &signup).await.unwrap_err();
    assert_eq!(err.message, "此隊伍已經報名此類別");

    let rejected = admin.reject_registration(created.data.id).await.unwrap();
    assert_eq!(rejected.registration.status, RegistrationStatusDto::Rejected);
    assert_eq!(rejected.registration.reviewed_by, Some(admin_user.id));

    let resubmitted = user
        .resubmit_registration(
            created.data.id,
            &ResubmitDto {
                participants: vec![ParticipantInputDto::member(members[1].id, true)],
                note: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(resubmitted.registration.status, RegistrationStatusDto::Pending);
    assert_eq!(resubmitted.registration.reviewed_by, None);
    assert_eq!(resubmitted.registration.note, None);
    assert_eq!(resubmitted.registration.participants.len(), 1);

    admin.approve_registration(created.data.id).await.unwrap();

    let err = user
        .resubmit_registration(created.data.id, &ResubmitDto::default())
        .await
        .unwrap_err();
    assert_eq!(err.status, 400);

    let mine = user
        .list_my_registrations(Some(game.game.id), Some(RegistrationStatusDto::Approved))
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);

    let logs = admin
        .list_activity_logs(&Default::default())
        .await
        .unwrap();
    assert!(logs.total >= 2);
}

/// Tests registrations are private to their registrant.
///
/// Expected: 404 for another user, 403 for the game listing as a non-admin
#[tokio::test]
async fn registrations_are_private() {
    let server = TestServer::spawn().await;
    let (admin, _) = server.admin().await;
    let (user, _) = server.sign_up("a@example.com").await;
    let (other, _) = server.sign_up("b@example.com").await;
    let game = create_open_game(&admin, "Spring Open").await;

    let p = user.create_user_player(&player("Kao")).await.unwrap();
    let created = user
        .signup(
            game.game.id,
            &SignupDto {
                category_id: Some(game.categories[0].id),
                participants: vec![ParticipantInputDto::player(p.id, true)],
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let err = other.get_registration(created.data.id).await.unwrap_err();
    assert_eq!(err.status, 404);

    let err = other
        .list_game_registrations(game.game.id)
        .await
        .unwrap_err();
    assert_eq!(err.status, 403);

    let all = admin.list_game_registrations(game.game.id).await.unwrap();
    assert_eq!(all.len(), 1);
}
