use super::*;

/// Tests banning and unbanning a user.
///
/// Expected: Ok with ban fields set, then cleared
#[tokio::test]
async fn ban_then_unban() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let repo = UserRepository::new(db);

    let expires = Utc::now() + Duration::hours(1);
    let banned = repo.ban(user, "spam".to_string(), Some(expires)).await?;

    assert!(banned.banned);
    assert_eq!(banned.ban_reason.as_deref(), Some("spam"));
    assert!(banned.is_banned_at(Utc::now()));

    let unbanned = repo.unban(banned).await?;

    assert!(!unbanned.banned);
    assert_eq!(unbanned.ban_reason, None);
    assert_eq!(unbanned.ban_expires, None);

    Ok(())
}

/// Tests that only expired, time-limited bans are lifted.
///
/// Expected: Ok(1), permanent and future bans untouched
#[tokio::test]
async fn lifts_only_expired_bans() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let expired = factory::user::UserFactory::new(db)
        .banned(Some(now - Duration::minutes(5)))
        .build()
        .await?;
    let future = factory::user::UserFactory::new(db)
        .banned(Some(now + Duration::days(1)))
        .build()
        .await?;
    let permanent = factory::user::UserFactory::new(db)
        .banned(None)
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let lifted = repo.lift_expired_bans(now).await?;

    assert_eq!(lifted, 1);
    assert!(!repo.find_by_id(expired.id).await?.unwrap().banned);
    assert!(repo.find_by_id(future.id).await?.unwrap().banned);
    assert!(repo.find_by_id(permanent.id).await?.unwrap().banned);

    Ok(())
}
