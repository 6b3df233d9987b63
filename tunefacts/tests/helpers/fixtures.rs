//! Catalog fixtures shaped like MusicBrainz JSON

use serde_json::json;
use tunefacts::models::{CandidateRecording, RecordingEntity};

/// Search result entry with one credited artist and an optional release
pub fn candidate(id: &str, title: &str, artist: &str, release: Option<(&str, &str)>) -> CandidateRecording {
    let releases = match release {
        Some((title, date)) => json!([{"id": format!("rel-{id}"), "title": title, "date": date}]),
        None => json!([]),
    };
    serde_json::from_value(json!({
        "id": id,
        "title": title,
        "artist-credit": [{"name": artist}],
        "releases": releases
    }))
    .unwrap()
}

/// Recording with a dated release and no relations
pub fn bohemian_rhapsody() -> RecordingEntity {
    serde_json::from_value(json!({
        "id": "b1a9c0e9-d987-4042-ae91-78d6a3267d69",
        "title": "Bohemian Rhapsody",
        "length": 354_000,
        "artist-credit": [{"name": "Queen", "joinphrase": ""}],
        "releases": [
            {"id": "r2", "title": "Greatest Hits", "date": "1981-10-26"},
            {"id": "r1", "title": "A Night at the Opera", "date": "1975-10-31"}
        ]
    }))
    .unwrap()
}

/// Recording whose relations list the given producers
pub fn skeletons(producers: &[&str]) -> RecordingEntity {
    let relations: Vec<_> = producers
        .iter()
        .map(|name| json!({"type": "producer", "artist": {"name": name}}))
        .collect();
    serde_json::from_value(json!({
        "id": "skeletons-mbid",
        "title": "Skeletons",
        "artist-credit": [{"name": "Travis Scott"}],
        "releases": [{"id": "astro", "title": "Astroworld", "date": "2018-08-03"}],
        "relations": relations
    }))
    .unwrap()
}
