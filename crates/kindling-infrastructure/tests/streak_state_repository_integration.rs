use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};

use kindling_domain::shared::{DomainError, UserId};
use kindling_domain::streak::{StreakKind, StreakStateRepository, UserStreakState};
use kindling_infrastructure::persistence::repositories::SqliteStreakStateRepository;


fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn streak_state_round_trip() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteStreakStateRepository::new(Arc::new(pool));

    let user = UserId::new();
    let now = Utc::now();

    let mut state = UserStreakState::new(user.clone());
    state.advance(StreakKind::Presence, day(2026, 3, 1), now, Duration::days(7));
    state.advance(StreakKind::Presence, day(2026, 3, 3), now, Duration::days(7));
    state.advance(StreakKind::Kindness, day(2026, 3, 3), now, Duration::days(7));

    repo.insert(&state).await.expect("insert");

    let fetched = repo
        .find_by_user(&user)
        .await
        .expect("find")
        .expect("should exist");

    assert_eq!(fetched.presence().count, 2);
    assert_eq!(fetched.presence().last_active_date, Some(day(2026, 3, 3)));
    assert_eq!(fetched.kindness().count, 1);
    assert_eq!(fetched.response().count, 0);
    assert_eq!(fetched.total_active_days(), 2);
    assert!(fetched.grace_period_used_at().is_some());
    assert_eq!(fetched.version(), 0);
}

#[tokio::test]
async fn streak_state_missing_user_is_none() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteStreakStateRepository::new(Arc::new(pool));

    let found = repo.find_by_user(&UserId::new()).await.expect("find");
    assert!(found.is_none());
}

#[tokio::test]
async fn streak_state_update_bumps_version() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteStreakStateRepository::new(Arc::new(pool));

    let user = UserId::new();
    let now = Utc::now();

    let mut state = UserStreakState::new(user.clone());
    state.advance(StreakKind::Presence, day(2026, 3, 1), now, Duration::days(7));
    repo.insert(&state).await.expect("insert");

    let mut loaded = repo
        .find_by_user(&user)
        .await
        .expect("find")
        .expect("exists");
    loaded.advance(StreakKind::Presence, day(2026, 3, 2), now, Duration::days(7));
    repo.update(&loaded).await.expect("update");

    let reloaded = repo
        .find_by_user(&user)
        .await
        .expect("find")
        .expect("exists");
    assert_eq!(reloaded.presence().count, 2);
    assert_eq!(reloaded.version(), 1);
}

#[tokio::test]
async fn streak_state_stale_update_is_rejected() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteStreakStateRepository::new(Arc::new(pool));

    let user = UserId::new();
    let now = Utc::now();

    let mut state = UserStreakState::new(user.clone());
    state.advance(StreakKind::Presence, day(2026, 3, 1), now, Duration::days(7));
    repo.insert(&state).await.expect("insert");

    // Two loads of the same version; the second writer must lose.
    let mut first = repo.find_by_user(&user).await.unwrap().unwrap();
    let mut second = repo.find_by_user(&user).await.unwrap().unwrap();

    first.advance(StreakKind::Presence, day(2026, 3, 2), now, Duration::days(7));
    repo.update(&first).await.expect("first update wins");

    second.advance(StreakKind::Response, day(2026, 3, 2), now, Duration::days(7));
    match repo.update(&second).await {
        Err(DomainError::StaleState(_)) => {}
        other => panic!("Expected StaleState, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn streak_state_double_insert_is_stale_state() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteStreakStateRepository::new(Arc::new(pool));

    let user = UserId::new();
    let state = UserStreakState::new(user.clone());

    repo.insert(&state).await.expect("insert");
    match repo.insert(&state).await {
        Err(DomainError::StaleState(_)) => {}
        other => panic!("Expected StaleState, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn streak_state_list_user_ids_pages() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteStreakStateRepository::new(Arc::new(pool));

    for i in 0..5 {
        let state = UserStreakState::new(UserId::from_string(&format!("user-{}", i)));
        repo.insert(&state).await.expect("insert");
    }

    let page_one = repo.list_user_ids(0, 3).await.expect("page one");
    let page_two = repo.list_user_ids(3, 3).await.expect("page two");

    assert_eq!(page_one.len(), 3);
    assert_eq!(page_two.len(), 2);
    assert_eq!(page_one[0].as_str(), "user-0");
    assert_eq!(page_two[1].as_str(), "user-4");
}
