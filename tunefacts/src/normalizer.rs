//! Credit normalizer
//!
//! Maps a fetched [`RecordingEntity`] into a [`NormalizedRecord`]: earliest
//! release, credited artists, and relation records classified into
//! composer/lyricist/producer/performer.

use crate::models::{CreditRole, Credits, NormalizedRecord, RecordingEntity, Relation, Release};

/// Sorts after any real date string
const MISSING_DATE_SENTINEL: &str = "9999-99-99";

/// Normalize a recording entity; never fails on missing optional fields
pub fn normalize_recording(entity: &RecordingEntity) -> NormalizedRecord {
    let artists = entity
        .artist_credit
        .iter()
        .map(|ac| ac.name.trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    let (release_title, release_date) = earliest_release(&entity.releases)
        .map(|r| (r.title.clone(), r.date.clone()))
        .unwrap_or((None, None));

    let credits = classify_relations(entity.relation_records());

    tracing::debug!(
        mbid = %entity.id,
        composers = credits.composer.len(),
        lyricists = credits.lyricist.len(),
        producers = credits.producer.len(),
        performers = credits.performer.len(),
        "Normalized recording credits"
    );

    NormalizedRecord {
        title: entity.title.clone().unwrap_or_default(),
        artists,
        release_title,
        release_date,
        length_ms: entity.length,
        credits,
        source_id: entity.id.clone(),
    }
}

/// Release with the lexicographically smallest date string
///
/// Missing or blank dates sort last; the first of equal dates wins. Dates
/// of mixed precision compare as plain strings, so "1975" sorts before
/// "1975-10-31" and after "1974-12-31".
pub fn earliest_release(releases: &[Release]) -> Option<&Release> {
    releases
        .iter()
        .min_by_key(|r| {
            r.date
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or(MISSING_DATE_SENTINEL)
        })
}

/// Name attached to a relation, by source-schema priority
///
/// Nested artist name, then `target-credit`, then a string `target`. The
/// first populated, non-blank value wins.
pub fn relation_name(relation: &Relation) -> Option<String> {
    let nested = relation.artist.as_ref().and_then(|a| a.name.as_deref());
    let credited = relation.target_credit.as_deref();
    let target = relation.target.as_ref().and_then(|t| t.as_str());

    [nested, credited, target]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|name| !name.is_empty())
        .map(str::to_string)
}

/// Sort relations into role lists; one relation may fill several roles
pub fn classify_relations(relations: &[Relation]) -> Credits {
    let mut credits = Credits::default();

    for relation in relations {
        let Some(name) = relation_name(relation) else {
            continue;
        };
        for role in CreditRole::ALL {
            if role.matches(&relation.relation_type) {
                credits.add(role, &name);
            }
        }
    }

    credits
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entity(value: serde_json::Value) -> RecordingEntity {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_bare_entity_normalizes() {
        let record = normalize_recording(&entity(json!({"id": "abc"})));
        assert_eq!(record.title, "");
        assert!(record.artists.is_empty());
        assert_eq!(record.release_title, None);
        assert_eq!(record.release_date, None);
        assert_eq!(record.length_ms, None);
        assert!(record.credits.is_empty());
        assert_eq!(record.source_id, "abc");
    }

    #[test]
    fn test_earliest_release_missing_date_sorts_last() {
        let record = normalize_recording(&entity(json!({
            "id": "x",
            "releases": [
                {"title": "Undated"},
                {"title": "Compilation", "date": "1999-01-01"},
                {"title": "Original", "date": "1975-10-31"}
            ]
        })));
        assert_eq!(record.release_title.as_deref(), Some("Original"));
        assert_eq!(record.release_date.as_deref(), Some("1975-10-31"));
    }

    #[test]
    fn test_earliest_release_blank_date_sorts_last() {
        let record = normalize_recording(&entity(json!({
            "id": "x",
            "releases": [
                {"title": "Original", "date": "1975-10-31"},
                {"title": "Bootleg", "date": ""},
                {"title": "Promo", "date": "  "}
            ]
        })));
        assert_eq!(record.release_title.as_deref(), Some("Original"));
        assert_eq!(record.release_date.as_deref(), Some("1975-10-31"));
    }

    #[test]
    fn test_earliest_release_all_undated_takes_first() {
        let record = normalize_recording(&entity(json!({
            "id": "x",
            "releases": [{"title": "First"}, {"title": "Second"}]
        })));
        assert_eq!(record.release_title.as_deref(), Some("First"));
        assert_eq!(record.release_date, None);
    }

    #[test]
    fn test_mixed_precision_dates_compare_as_strings() {
        let releases = vec![
            Release {
                title: Some("Full".to_string()),
                date: Some("1975-01-01".to_string()),
                ..Default::default()
            },
            Release {
                title: Some("Year".to_string()),
                date: Some("1975".to_string()),
                ..Default::default()
            },
        ];
        assert_eq!(earliest_release(&releases).unwrap().title.as_deref(), Some("Year"));
    }

    #[test]
    fn test_artists_skip_empty_names() {
        let record = normalize_recording(&entity(json!({
            "id": "x",
            "artist-credit": [{"name": "Travis Scott"}, {"name": ""}, {"name": "  "}, {"name": "Tame Impala"}]
        })));
        assert_eq!(record.artists, vec!["Travis Scott", "Tame Impala"]);
    }

    #[test]
    fn test_relation_name_priority() {
        let rel: Relation = serde_json::from_value(json!({
            "type": "producer",
            "artist": {"name": "Nested"},
            "target-credit": "Credited",
            "target": "Target"
        }))
        .unwrap();
        assert_eq!(relation_name(&rel).as_deref(), Some("Nested"));

        let rel: Relation = serde_json::from_value(json!({
            "type": "producer",
            "target-credit": "",
            "target": "Target"
        }))
        .unwrap();
        assert_eq!(relation_name(&rel).as_deref(), Some("Target"));

        let rel: Relation = serde_json::from_value(json!({
            "type": "producer",
            "target": {"id": "not-a-name"}
        }))
        .unwrap();
        assert_eq!(relation_name(&rel), None);
    }

    #[test]
    fn test_classification_and_multi_role() {
        let record = normalize_recording(&entity(json!({
            "id": "x",
            "relations": [
                {"type": "producer", "artist": {"name": "Kevin Parker"}},
                {"type": "composer", "target-credit": "Travis Scott"},
                {"type": "written by", "target": "Kevin Parker"},
                {"type": "lyricist", "artist": {"name": "Travis Scott"}},
                {"type": "instrument performer", "artist": {"name": "Kevin Parker"}},
                {"type": "composer & producer", "artist": {"name": "Mike Dean"}},
                {"type": "mix", "artist": {"name": "Mixer"}},
                {"type": "producer"}
            ]
        })));
        assert_eq!(record.credits.producer, vec!["Kevin Parker", "Mike Dean"]);
        assert_eq!(record.credits.composer, vec!["Travis Scott", "Kevin Parker", "Mike Dean"]);
        assert_eq!(record.credits.lyricist, vec!["Travis Scott"]);
        assert_eq!(record.credits.performer, vec!["Kevin Parker"]);
    }

    #[test]
    fn test_legacy_relation_list_is_read() {
        let record = normalize_recording(&entity(json!({
            "id": "x",
            "relation-list": [{"type": "Producer", "artist": {"name": "Quincy Jones"}}]
        })));
        assert_eq!(record.credits.producer, vec!["Quincy Jones"]);
    }

    #[test]
    fn test_duplicate_credits_removed() {
        let record = normalize_recording(&entity(json!({
            "id": "x",
            "relations": [
                {"type": "producer", "artist": {"name": "A"}},
                {"type": "producer", "artist": {"name": "B"}},
                {"type": "producer", "target-credit": "A"}
            ]
        })));
        assert_eq!(record.credits.producer, vec!["A", "B"]);
    }
}
