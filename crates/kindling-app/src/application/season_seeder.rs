use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use log::warn;
use serde::Deserialize;
use tracing::info;

use kindling_domain::season::{
    SeasonDefinitionRepository, SeasonalEventDefinition, SeasonalRule, SeasonalRuleType,
};
use kindling_domain::shared::DomainError;

#[derive(Debug, Deserialize)]
struct BuiltinSeasonRule {
    rule_type: SeasonalRuleType,
    bonus_credits: i64,
    max_total: u32,
}

#[derive(Debug, Deserialize)]
struct BuiltinSeasonConfig {
    id: String,
    name: String,
    year: i32,
    start_date: NaiveDate,
    end_date: NaiveDate,
    active: Option<bool>,
    rules: Vec<BuiltinSeasonRule>,
}

fn builtin_season_configs() -> Result<Vec<BuiltinSeasonConfig>, DomainError> {
    const RAW_CONFIG: &str = include_str!("../../../../config/seasons/builtin_seasons.json");
    serde_json::from_str(RAW_CONFIG).map_err(|e| {
        DomainError::Deserialization(format!("Failed to parse builtin seasons: {e}"))
    })
}

/// Ensure built-in seasonal campaigns from configuration exist in the
/// database. Existing definitions are left untouched so operators can
/// edit them after seeding.
pub async fn seed_builtin_seasons(
    definition_repo: Arc<dyn SeasonDefinitionRepository>,
) -> Result<(), DomainError> {
    let configs = builtin_season_configs()?;
    if configs.is_empty() {
        return Ok(());
    }

    let mut existing = definition_repo.find_all().await?;
    let existing_ids: HashSet<String> = existing
        .iter()
        .map(|definition| definition.id().to_string())
        .collect();

    let mut seeded_count = 0;
    for config in configs {
        if existing_ids.contains(&config.id) {
            continue;
        }

        let rules = config
            .rules
            .iter()
            .map(|r| SeasonalRule {
                rule_type: r.rule_type,
                bonus_credits: r.bonus_credits,
                max_total: r.max_total,
            })
            .collect();

        let definition = SeasonalEventDefinition::new(
            config.id.clone(),
            config.name.clone(),
            config.year,
            config.start_date,
            config.end_date,
            rules,
            config.active.unwrap_or(true),
        )?;

        // Same-year active windows may not overlap; skip offenders
        // instead of corrupting the live schedule.
        if let Some(conflict) = existing.iter().find(|d| d.overlaps_window(&definition)) {
            warn!(
                "Skipping built-in season {}: window overlaps {}",
                definition.id(),
                conflict.id()
            );
            continue;
        }

        definition_repo.save(&definition).await?;
        info!("Seeded built-in season: {} ({})", config.name, config.id);
        existing.push(definition);
        seeded_count += 1;
    }

    if seeded_count > 0 {
        info!("Seeded {} built-in season definition(s)", seeded_count);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_config_parses_and_validates() {
        let configs = builtin_season_configs().expect("embedded config parses");
        assert!(!configs.is_empty());

        let mut definitions: Vec<SeasonalEventDefinition> = Vec::new();
        for config in configs {
            // Every embedded definition must construct cleanly.
            let rules = config
                .rules
                .iter()
                .map(|r| SeasonalRule {
                    rule_type: r.rule_type,
                    bonus_credits: r.bonus_credits,
                    max_total: r.max_total,
                })
                .collect();

            let definition = SeasonalEventDefinition::new(
                config.id.clone(),
                config.name,
                config.year,
                config.start_date,
                config.end_date,
                rules,
                config.active.unwrap_or(true),
            )
            .expect("valid builtin season");

            // Ids encode the year by convention.
            assert!(
                definition.id().ends_with(&definition.year().to_string()),
                "season id {} does not encode year",
                definition.id()
            );

            // Active same-year windows must stay disjoint.
            for other in &definitions {
                assert!(
                    !definition.overlaps_window(other),
                    "builtin seasons {} and {} overlap",
                    definition.id(),
                    other.id()
                );
            }
            definitions.push(definition);
        }
    }
}
