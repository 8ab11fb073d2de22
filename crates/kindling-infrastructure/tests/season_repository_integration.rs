use std::sync::Arc;

use chrono::NaiveDate;

use kindling_domain::season::{
    SeasonAnnouncementRepository, SeasonCounterRepository, SeasonDefinitionRepository,
    SeasonalEventDefinition, SeasonalRule, SeasonalRuleType,
};
use kindling_domain::shared::UserId;
use kindling_infrastructure::persistence::repositories::{
    SqliteSeasonAnnouncementRepository, SqliteSeasonCounterRepository,
    SqliteSeasonDefinitionRepository,
};


fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn valentine() -> SeasonalEventDefinition {
    SeasonalEventDefinition::new(
        "VALENTINE_2026".to_string(),
        "Valentine Week".to_string(),
        2026,
        day(2026, 2, 7),
        day(2026, 2, 14),
        vec![
            SeasonalRule {
                rule_type: SeasonalRuleType::SendPositive,
                bonus_credits: 3,
                max_total: 5,
            },
            SeasonalRule {
                rule_type: SeasonalRuleType::Respond,
                bonus_credits: 2,
                max_total: 5,
            },
        ],
        true,
    )
    .expect("valid definition")
}

#[tokio::test]
async fn season_definition_round_trip_and_window_query() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteSeasonDefinitionRepository::new(Arc::new(pool));

    repo.save(&valentine()).await.expect("save");

    let fetched = repo
        .find_by_id("VALENTINE_2026")
        .await
        .expect("find")
        .expect("exists");
    assert_eq!(fetched.name(), "Valentine Week");
    assert_eq!(fetched.rules().len(), 2);

    let open = repo.find_open_on(day(2026, 2, 10)).await.expect("open");
    assert_eq!(open.len(), 1);

    let before = repo.find_open_on(day(2026, 2, 6)).await.expect("before");
    assert!(before.is_empty());

    let after = repo.find_open_on(day(2026, 2, 15)).await.expect("after");
    assert!(after.is_empty());
}

#[tokio::test]
async fn season_definition_save_is_upsert() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteSeasonDefinitionRepository::new(Arc::new(pool));

    repo.save(&valentine()).await.expect("save");

    let deactivated = SeasonalEventDefinition::new(
        "VALENTINE_2026".to_string(),
        "Valentine Week".to_string(),
        2026,
        day(2026, 2, 7),
        day(2026, 2, 14),
        vec![],
        false,
    )
    .expect("valid definition");
    repo.save(&deactivated).await.expect("re-save");

    let all = repo.find_all().await.expect("find all");
    assert_eq!(all.len(), 1);
    assert!(!all[0].is_active());

    let open = repo.find_open_on(day(2026, 2, 10)).await.expect("open");
    assert!(open.is_empty());
}

#[tokio::test]
async fn season_counter_stops_at_cap() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteSeasonCounterRepository::new(Arc::new(pool));

    let user = UserId::new();

    for expected in 1..=3u32 {
        let count = repo
            .try_increment(&user, "VALENTINE_2026", SeasonalRuleType::SendPositive, 3)
            .await
            .expect("increment");
        assert_eq!(count, Some(expected));
    }

    // Fourth attempt hits the cap; the counter stays pinned.
    let capped = repo
        .try_increment(&user, "VALENTINE_2026", SeasonalRuleType::SendPositive, 3)
        .await
        .expect("capped increment");
    assert_eq!(capped, None);

    let count = repo
        .count(&user, "VALENTINE_2026", SeasonalRuleType::SendPositive)
        .await
        .expect("count");
    assert_eq!(count, 3);
}

#[tokio::test]
async fn season_counter_is_scoped_per_user_season_and_rule() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteSeasonCounterRepository::new(Arc::new(pool));

    let alice = UserId::new();
    let bob = UserId::new();

    repo.try_increment(&alice, "VALENTINE_2026", SeasonalRuleType::SendPositive, 3)
        .await
        .expect("increment");

    // Other user, other rule, other season: all still at zero.
    assert_eq!(
        repo.count(&bob, "VALENTINE_2026", SeasonalRuleType::SendPositive)
            .await
            .expect("count"),
        0
    );
    assert_eq!(
        repo.count(&alice, "VALENTINE_2026", SeasonalRuleType::Respond)
            .await
            .expect("count"),
        0
    );
    assert_eq!(
        repo.count(&alice, "VALENTINE_2027", SeasonalRuleType::SendPositive)
            .await
            .expect("count"),
        0
    );
}

#[tokio::test]
async fn season_counter_zero_cap_never_pays() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteSeasonCounterRepository::new(Arc::new(pool));

    let result = repo
        .try_increment(&UserId::new(), "VALENTINE_2026", SeasonalRuleType::Comeback, 0)
        .await
        .expect("increment");
    assert_eq!(result, None);
}

#[tokio::test]
async fn season_announcement_marks_once() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteSeasonAnnouncementRepository::new(Arc::new(pool));

    let user = UserId::new();

    assert!(repo
        .try_mark_announced(&user, "VALENTINE_2026")
        .await
        .expect("first mark"));
    assert!(!repo
        .try_mark_announced(&user, "VALENTINE_2026")
        .await
        .expect("second mark"));

    // A different season announces independently.
    assert!(repo
        .try_mark_announced(&user, "NEW_YEAR_2027")
        .await
        .expect("other season"));
}
