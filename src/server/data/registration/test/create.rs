use super::*;

/// Tests inserting a registration with a user player and a team member.
///
/// Verifies the registration starts pending, both participants are stored and their names
/// are resolved from the referenced rows.
///
/// Expected: Ok with two named participants
#[tokio::test]
async fn creates_pending_registration_with_participants() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_registration_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, game, category) = factory::helpers::create_open_game_for_user(db).await?;
    let team = factory::create_team(db, user.id).await?;
    let member = factory::team_member::TeamMemberFactory::new(db, team.id)
        .name("Member A")
        .build()
        .await?;
    let player = factory::user_player::UserPlayerFactory::new(db, user.id)
        .name("Player B")
        .build()
        .await?;

    let repo = RegistrationRepository::new(db);
    let created = repo
        .create(CreateRegistrationParams {
            game_id: game.id,
            category_id: category.id,
            team_id: Some(team.id),
            registrant_user_id: user.id,
            note: Some("first".to_string()),
            participants: vec![
                ParticipantParams {
                    reference: ParticipantRef::TeamMember(member.id),
                    is_main_player: true,
                },
                ParticipantParams {
                    reference: ParticipantRef::UserPlayer(player.id),
                    is_main_player: false,
                },
            ],
        })
        .await?;

    assert_eq!(created.status, RegistrationStatus::Pending);
    assert!(created.reviewed_at.is_none());

    let loaded = repo.find_with_participants(created.id).await?.unwrap();
    let names: Vec<&str> = loaded.participants.iter().map(|p| p.name.as_str()).collect();

    assert_eq!(names, vec!["Member A", "Player B"]);
    assert!(loaded.participants[0].is_main_player);
    assert!(repo.exists_for_team(game.id, category.id, team.id).await?);

    Ok(())
}

/// Tests replacing participants.
///
/// Expected: Ok with only the new participant remaining
#[tokio::test]
async fn replaces_participants() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_registration_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, game, category) = factory::helpers::create_open_game_for_user(db).await?;
    let old = factory::create_user_player(db, user.id).await?;
    let new = factory::create_user_player(db, user.id).await?;
    let registration = factory::create_registration(db, game.id, category.id, user.id).await?;
    factory::registration::add_player_participant(db, registration.id, old.id, true).await?;

    let repo = RegistrationRepository::new(db);
    repo.replace_participants(
        registration.id,
        &[ParticipantParams {
            reference: ParticipantRef::UserPlayer(new.id),
            is_main_player: true,
        }],
    )
    .await?;

    let loaded = repo.find_with_participants(registration.id).await?.unwrap();

    assert_eq!(loaded.participants.len(), 1);
    assert_eq!(loaded.participants[0].user_player_id, Some(new.id));

    Ok(())
}
