use chrono::{Duration, TimeZone, Utc};
use entity::registration::RegistrationStatus;
use sea_orm::{DbErr, EntityTrait};
use test_utils::{
    builder::TestBuilder,
    factory::{
        self, game::GameFactory, helpers::create_open_game_for_user,
        registration::RegistrationFactory, team_member::TeamMemberFactory,
        user_player::UserPlayerFactory,
    },
};

use super::*;
use crate::model::registration::ParticipantInputDto;

fn signup(
    game_id: i32,
    category_id: i32,
    team_id: Option<i32>,
    participants: Vec<ParticipantInputDto>,
) -> SignupParams {
    SignupParams {
        game_id,
        category_id,
        team_id,
        participants,
        note: None,
    }
}

/// Tests a signup with the caller's own player inside the window.
///
/// Expected: Pending registration with the player flagged as main
#[tokio::test]
async fn signs_up_own_player() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, game, category) = create_open_game_for_user(db).await?;
    let player = factory::create_user_player(db, user.id).await?;

    let created = RegistrationService::new(db)
        .signup(
            &user,
            signup(
                game.id,
                category.id,
                None,
                vec![ParticipantInputDto::player(player.id, false)],
            ),
            Utc::now(),
        )
        .await
        .unwrap();

    assert_eq!(created.registration.status, RegistrationStatus::Pending);
    assert_eq!(created.registration.registrant_user_id, user.id);
    assert_eq!(created.participants.len(), 1);
    assert!(created.participants[0].is_main_player);

    Ok(())
}

/// Tests signup on the window bounds and outside of them.
///
/// Expected: Both bounds succeed, one second before or after is rejected
#[tokio::test]
async fn enforces_signup_window() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let service = RegistrationService::new(db);

    let user = factory::create_user(db).await?;
    let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap();
    let game = GameFactory::new(db)
        .signup_window(start, end)
        .game_window(
            Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 1, 16, 0, 0, 0).unwrap(),
        )
        .build()
        .await?;
    let category = factory::create_category(db, game.id).await?;
    let player = factory::create_user_player(db, user.id).await?;
    let params = || {
        signup(
            game.id,
            category.id,
            None,
            vec![ParticipantInputDto::player(player.id, true)],
        )
    };

    let err = service
        .signup(&user, params(), start - Duration::seconds(1))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "報名尚未開始");

    let err = service
        .signup(&user, params(), end + Duration::seconds(1))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "報名已截止");

    assert!(service.signup(&user, params(), start).await.is_ok());
    assert!(service.signup(&user, params(), end).await.is_ok());

    Ok(())
}

/// Tests signup with a category belonging to another game.
///
/// Expected: Err(NotFound) "找不到此比賽類別"
#[tokio::test]
async fn category_must_belong_to_game() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, game, _) = create_open_game_for_user(db).await?;
    let other_game = factory::create_open_game(db).await?;
    let foreign = factory::create_category(db, other_game.id).await?;
    let player = factory::create_user_player(db, user.id).await?;

    let err = RegistrationService::new(db)
        .signup(
            &user,
            signup(
                game.id,
                foreign.id,
                None,
                vec![ParticipantInputDto::player(player.id, true)],
            ),
            Utc::now(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(err.to_string(), "找不到此比賽類別");

    Ok(())
}

/// Tests signup referencing a banned player.
///
/// Expected: Err(BadRequest) "部分隊員不存在或已被禁賽" and nothing inserted
#[tokio::test]
async fn banned_player_is_rejected() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let service = RegistrationService::new(db);

    let (user, game, category) = create_open_game_for_user(db).await?;
    let banned = UserPlayerFactory::new(db, user.id)
        .banned(None)
        .build()
        .await?;

    let err = service
        .signup(
            &user,
            signup(
                game.id,
                category.id,
                None,
                vec![ParticipantInputDto::player(banned.id, true)],
            ),
            Utc::now(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "部分隊員不存在或已被禁賽");
    assert!(service.list_mine(&user, None, None).await.unwrap().is_empty());

    Ok(())
}

/// Tests that another user's player cannot be entered.
///
/// Expected: Err(BadRequest) "部分隊員不存在或已被禁賽"
#[tokio::test]
async fn foreign_player_is_rejected() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, game, category) = create_open_game_for_user(db).await?;
    let stranger = factory::create_user(db).await?;
    let foreign = factory::create_user_player(db, stranger.id).await?;

    let err = RegistrationService::new(db)
        .signup(
            &user,
            signup(
                game.id,
                category.id,
                None,
                vec![ParticipantInputDto::player(foreign.id, true)],
            ),
            Utc::now(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "部分隊員不存在或已被禁賽");

    Ok(())
}

/// Tests team signups: ownership, a member whose ban expired and a duplicate entry.
///
/// Expected: First signup succeeds, the second one for the same category is rejected and a
/// stranger's team is forbidden
#[tokio::test]
async fn team_signup_rules() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let service = RegistrationService::new(db);

    let (user, game, category) = create_open_game_for_user(db).await?;
    let team = factory::create_team(db, user.id).await?;
    let member = TeamMemberFactory::new(db, team.id)
        .banned(true)
        .banned_until(Utc::now() - Duration::hours(1))
        .build()
        .await?;
    let members = || vec![ParticipantInputDto::member(member.id, true)];

    let created = service
        .signup(
            &user,
            signup(game.id, category.id, Some(team.id), members()),
            Utc::now(),
        )
        .await
        .unwrap();
    assert_eq!(created.registration.team_id, Some(team.id));

    let err = service
        .signup(
            &user,
            signup(game.id, category.id, Some(team.id), members()),
            Utc::now(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "此隊伍已經報名此類別");

    let stranger = factory::create_user(db).await?;
    let err = service
        .signup(
            &stranger,
            signup(game.id, category.id, Some(team.id), members()),
            Utc::now(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    Ok(())
}

/// Tests that team members cannot be entered without their team.
///
/// Expected: Err(BadRequest) "部分隊員不存在或已被禁賽"
#[tokio::test]
async fn member_without_team_is_rejected() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, game, category) = create_open_game_for_user(db).await?;
    let team = factory::create_team(db, user.id).await?;
    let member = factory::create_team_member(db, team.id).await?;

    let err = RegistrationService::new(db)
        .signup(
            &user,
            signup(
                game.id,
                category.id,
                None,
                vec![ParticipantInputDto::member(member.id, true)],
            ),
            Utc::now(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "部分隊員不存在或已被禁賽");

    Ok(())
}

/// Tests approving a registration.
///
/// Expected: Status approved, reviewer is the admin and an activity entry is written
#[tokio::test]
async fn review_records_reviewer_and_log() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, game, category) = create_open_game_for_user(db).await?;
    let admin = factory::user::create_admin(db).await?;
    let registration = factory::create_registration(db, game.id, category.id, user.id).await?;

    let reviewed = RegistrationService::new(db)
        .review(
            &admin,
            registration.id,
            ReviewDecision::Approve,
            &ClientInfo::default(),
        )
        .await
        .unwrap();

    assert_eq!(reviewed.registration.status, RegistrationStatus::Approved);
    assert_eq!(reviewed.registration.reviewed_by, Some(admin.id));
    assert!(reviewed.registration.reviewed_at.is_some());

    let logs = entity::prelude::ActivityLog::find().all(db).await?;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, "approve");
    assert_eq!(logs[0].entity, "registration");
    assert_eq!(logs[0].user_id, Some(admin.id));

    let err = RegistrationService::new(db)
        .review(&admin, 9999, ReviewDecision::Reject, &ClientInfo::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), NOT_FOUND);

    Ok(())
}

/// Tests resubmitting a rejected registration.
///
/// Expected: Status back to pending, review fields cleared, participants replaced
#[tokio::test]
async fn resubmit_rejected_returns_to_pending() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, game, category) = create_open_game_for_user(db).await?;
    let first = factory::create_user_player(db, user.id).await?;
    let second = factory::create_user_player(db, user.id).await?;
    let registration = RegistrationFactory::new(db, game.id, category.id, user.id)
        .status(RegistrationStatus::Rejected)
        .build()
        .await?;
    factory::registration::add_player_participant(db, registration.id, first.id, true).await?;

    let updated = RegistrationService::new(db)
        .resubmit(
            &user,
            ResubmitParams {
                registration_id: registration.id,
                participants: vec![ParticipantInputDto::player(second.id, true)],
                note: Some("Updated roster".to_string()),
            },
            Utc::now(),
        )
        .await
        .unwrap();

    assert_eq!(updated.registration.status, RegistrationStatus::Pending);
    assert_eq!(updated.registration.reviewed_at, None);
    assert_eq!(updated.registration.reviewed_by, None);
    assert_eq!(updated.registration.note.as_deref(), Some("Updated roster"));
    assert_eq!(updated.participants.len(), 1);
    assert_eq!(updated.participants[0].user_player_id, Some(second.id));

    Ok(())
}

/// Tests a resubmission without a note replaces the stored one.
///
/// Expected: Ok with the note cleared
#[tokio::test]
async fn resubmit_without_note_clears_it() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, game, category) = create_open_game_for_user(db).await?;
    let player = factory::create_user_player(db, user.id).await?;
    let registration = RegistrationFactory::new(db, game.id, category.id, user.id)
        .note("Bring spare rackets")
        .build()
        .await?;

    let updated = RegistrationService::new(db)
        .resubmit(
            &user,
            ResubmitParams {
                registration_id: registration.id,
                participants: vec![ParticipantInputDto::player(player.id, true)],
                note: None,
            },
            Utc::now(),
        )
        .await
        .unwrap();

    assert_eq!(updated.registration.note, None);

    Ok(())
}

/// Tests resubmitting locked, foreign and late registrations.
///
/// Expected: Confirmed → 400, other user → 404, after signup end → 400
#[tokio::test]
async fn resubmit_guards() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let service = RegistrationService::new(db);

    let (user, game, category) = create_open_game_for_user(db).await?;
    let player = factory::create_user_player(db, user.id).await?;
    let params = |registration_id| ResubmitParams {
        registration_id,
        participants: vec![ParticipantInputDto::player(player.id, true)],
        note: None,
    };

    let confirmed = RegistrationFactory::new(db, game.id, category.id, user.id)
        .status(RegistrationStatus::Confirmed)
        .build()
        .await?;
    let err = service
        .resubmit(&user, params(confirmed.id), Utc::now())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "已確認的報名無法修改");

    let pending = factory::create_registration(db, game.id, category.id, user.id).await?;
    let stranger = factory::create_user(db).await?;
    let err = service
        .resubmit(&stranger, params(pending.id), Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = service
        .resubmit(&user, params(pending.id), game.signup_end + Duration::minutes(1))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "報名時間已截止");

    Ok(())
}

/// Tests who can read a single registration.
///
/// Expected: Registrant and admin see it, another user gets 404
#[tokio::test]
async fn get_is_limited_to_registrant_and_admin() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let service = RegistrationService::new(db);

    let (user, game, category) = create_open_game_for_user(db).await?;
    let registration = factory::create_registration(db, game.id, category.id, user.id).await?;
    let admin = factory::user::create_admin(db).await?;
    let stranger = factory::create_user(db).await?;

    assert!(service.get(&user, registration.id).await.is_ok());
    assert!(service.get(&admin, registration.id).await.is_ok());
    assert!(matches!(
        service.get(&stranger, registration.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}
