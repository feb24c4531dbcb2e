use std::collections::HashMap;

use crate::model::resource::Resource;
use crate::model::stats::{ContributorStats, TranslationEvent};

/// Folds the raw dataset into per-contributor statistics and a flat list of
/// translation events. Records without an attributed contributor are skipped
/// entirely. Output order is not significant; the report writer sorts.
pub fn aggregate(
    dataset: &[Resource],
) -> (HashMap<String, ContributorStats>, Vec<TranslationEvent>) {
    let mut users: HashMap<String, ContributorStats> = HashMap::new();
    let mut events: Vec<TranslationEvent> = Vec::new();

    for resource in dataset {
        for record in &resource.strings {
            let Some(user) = record.contributor() else {
                continue;
            };

            users
                .entry(user.to_string())
                .or_insert_with(|| ContributorStats::new(user))
                .add_translation(&record.last_update);

            events.push(TranslationEvent {
                source_string: record.source_string.clone(),
                last_update: record.last_update.clone(),
                user: user.to_string(),
                resource_name: resource.name.clone(),
            });
        }
    }

    (users, events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::resource::StringRecord;
    use crate::model::stats::EPOCH;

    fn record(user: Option<&str>, source: &str, last_update: &str) -> StringRecord {
        StringRecord {
            source_string: source.to_string(),
            translation: String::new(),
            user: user.map(str::to_string),
            last_update: last_update.to_string(),
        }
    }

    fn resource(name: &str, strings: Vec<StringRecord>) -> Resource {
        Resource {
            name: name.to_string(),
            slug: name.to_lowercase(),
            strings,
        }
    }

    #[test]
    fn counts_cover_exactly_the_attributed_records() {
        let dataset = vec![
            resource(
                "Core",
                vec![
                    record(Some("alice"), "One", "2021-01-02T00:00:00.000"),
                    record(Some(""), "Two", "2021-01-03T00:00:00.000"),
                    record(None, "Three", "2021-01-04T00:00:00.000"),
                ],
            ),
            resource(
                "Extras",
                vec![
                    record(Some("bob"), "Four", "2021-01-01T00:00:00.000"),
                    record(Some("alice"), "Five", "2021-01-05T00:00:00.000"),
                ],
            ),
        ];

        let (users, events) = aggregate(&dataset);

        let total: u64 = users.values().map(|u| u.count).sum();
        assert_eq!(total, 3);
        assert_eq!(events.len(), 3);
        assert_eq!(users["alice"].count, 2);
        assert_eq!(users["bob"].count, 1);
    }

    #[test]
    fn per_user_count_matches_their_events() {
        let dataset = vec![resource(
            "Core",
            vec![
                record(Some("alice"), "One", "2021-01-01T00:00:00.000"),
                record(Some("bob"), "Two", "2021-01-02T00:00:00.000"),
                record(Some("alice"), "Three", "2021-01-03T00:00:00.000"),
            ],
        )];

        let (users, events) = aggregate(&dataset);

        for stats in users.values() {
            let matching = events.iter().filter(|e| e.user == stats.name).count();
            assert_eq!(stats.count as usize, matching);
        }
    }

    #[test]
    fn last_update_is_the_maximum_over_the_users_records() {
        let dataset = vec![resource(
            "Core",
            vec![
                record(Some("alice"), "One", "2021-03-01T00:00:00.000"),
                record(Some("alice"), "Two", "2021-05-01T12:00:00.000"),
                record(Some("alice"), "Three", "2021-04-01T00:00:00.000"),
            ],
        )];

        let (users, _) = aggregate(&dataset);
        assert_eq!(users["alice"].last_update, "2021-05-01T12:00:00.000");
        assert!(users["alice"].last_update.as_str() > EPOCH);
    }

    #[test]
    fn events_carry_the_owning_resource_name() {
        let dataset = vec![
            resource("Core", vec![record(Some("alice"), "One", "2021-01-01T00:00:00.000")]),
            resource("Extras", vec![record(Some("bob"), "Two", "2021-01-02T00:00:00.000")]),
        ];

        let (_, events) = aggregate(&dataset);
        let alice = events.iter().find(|e| e.user == "alice").unwrap();
        let bob = events.iter().find(|e| e.user == "bob").unwrap();
        assert_eq!(alice.resource_name, "Core");
        assert_eq!(bob.resource_name, "Extras");
    }

    #[test]
    fn empty_dataset_aggregates_to_nothing() {
        let (users, events) = aggregate(&[]);
        assert!(users.is_empty());
        assert!(events.is_empty());
    }
}
