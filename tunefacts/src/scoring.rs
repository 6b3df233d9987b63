//! Candidate scoring
//!
//! Two independent strategies:
//! - **Best guess** ([`choose_best_recording`]): weighted edit-distance
//!   similarity, used when one answer is picked without asking.
//! - **Shortlist** ([`rank_shortlist`]): coarse exact/substring rules, used to
//!   order the top-N shown to a person.
//!
//! They may disagree on the top pick for the same result set.

use crate::models::CandidateRecording;

/// Weight of title similarity in the best-guess score
pub const TITLE_WEIGHT: f64 = 0.6;
/// Weight of artist similarity in the best-guess score
pub const ARTIST_WEIGHT: f64 = 0.4;

const SHORTLIST_EXACT_TITLE: f64 = 0.7;
const SHORTLIST_PARTIAL_TITLE: f64 = 0.5;
const SHORTLIST_ARTIST: f64 = 0.3;
const SHORTLIST_RELEASE_BONUS: f64 = 0.01;

/// Candidate paired with the score that ranked it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate<'a> {
    pub candidate: &'a CandidateRecording,
    pub score: f64,
}

/// Normalized Levenshtein similarity over case-folded strings (0.0-1.0)
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(&a.to_lowercase(), &b.to_lowercase())
}

fn credited_artists(candidate: &CandidateRecording) -> String {
    candidate.artist_names().collect::<Vec<_>>().join(" ")
}

/// `0.6 * sim(title) + 0.4 * sim(artist)`; artist term is 0 without a hypothesis
pub fn best_guess_score(candidate: &CandidateRecording, title: &str, artist: Option<&str>) -> f64 {
    let mut score = TITLE_WEIGHT * similarity(title, &candidate.title);
    if let Some(artist) = artist {
        score += ARTIST_WEIGHT * similarity(artist, &credited_artists(candidate));
    }
    score
}

/// Highest best-guess score; earlier candidates win ties
pub fn choose_best_recording<'a>(
    candidates: &'a [CandidateRecording],
    title: &str,
    artist: Option<&str>,
) -> Option<ScoredCandidate<'a>> {
    let mut best: Option<ScoredCandidate<'a>> = None;

    for candidate in candidates {
        let score = best_guess_score(candidate, title, artist);
        if best.map_or(true, |b| score > b.score) {
            best = Some(ScoredCandidate { candidate, score });
        }
    }

    if let Some(winner) = &best {
        tracing::debug!(
            id = %winner.candidate.id,
            title = %winner.candidate.title,
            score = winner.score,
            "Best-guess candidate selected"
        );
    }
    best
}

fn contains_either_way(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

/// Coarse presentation score
///
/// Exact case-insensitive title 0.7, else substring either direction 0.5;
/// artist substring either direction 0.3; 0.01 when any release is listed.
pub fn shortlist_score(candidate: &CandidateRecording, title: &str, artist: Option<&str>) -> f64 {
    let mut score = 0.0;

    let wanted_title = title.to_lowercase();
    let candidate_title = candidate.title.to_lowercase();
    if !wanted_title.is_empty() && !candidate_title.is_empty() {
        if wanted_title == candidate_title {
            score += SHORTLIST_EXACT_TITLE;
        } else if contains_either_way(&wanted_title, &candidate_title) {
            score += SHORTLIST_PARTIAL_TITLE;
        }
    }

    if let Some(artist) = artist.filter(|a| !a.is_empty()) {
        let credited = credited_artists(candidate).to_lowercase();
        if !credited.is_empty() && contains_either_way(&artist.to_lowercase(), &credited) {
            score += SHORTLIST_ARTIST;
        }
    }

    if !candidate.releases.is_empty() {
        score += SHORTLIST_RELEASE_BONUS;
    }

    score
}

/// Greedy top-`n` by shortlist score, extracted without replacement
///
/// Each round takes the current best of the remaining pool (first-seen wins
/// ties) and removes it, until `n` are chosen or the pool is exhausted.
pub fn rank_shortlist<'a>(
    candidates: &'a [CandidateRecording],
    title: &str,
    artist: Option<&str>,
    n: usize,
) -> Vec<ScoredCandidate<'a>> {
    let mut pool: Vec<ScoredCandidate<'a>> = candidates
        .iter()
        .map(|candidate| ScoredCandidate {
            candidate,
            score: shortlist_score(candidate, title, artist),
        })
        .collect();
    let mut ranked = Vec::with_capacity(n.min(pool.len()));

    while ranked.len() < n && !pool.is_empty() {
        let mut best_idx = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (idx, scored) in pool.iter().enumerate() {
            if scored.score > best_score {
                best_score = scored.score;
                best_idx = idx;
            }
        }
        ranked.push(pool.remove(best_idx));
    }

    tracing::debug!(
        pool = candidates.len(),
        shortlisted = ranked.len(),
        top_score = ?ranked.first().map(|s| s.score),
        "Shortlist ranked"
    );
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArtistCredit, Release};

    fn recording(id: &str, title: &str, artists: &[&str], with_release: bool) -> CandidateRecording {
        CandidateRecording {
            id: id.to_string(),
            title: title.to_string(),
            artist_credit: artists
                .iter()
                .map(|a| ArtistCredit { name: a.to_string() })
                .collect(),
            releases: if with_release {
                vec![Release {
                    title: Some("Album".to_string()),
                    ..Default::default()
                }]
            } else {
                vec![]
            },
        }
    }

    #[test]
    fn test_similarity_is_case_insensitive() {
        assert_eq!(similarity("Queen", "QUEEN"), 1.0);
        assert!(similarity("Queen", "Queens") > 0.8);
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn test_best_guess_prefers_matching_artist() {
        let candidates = vec![
            recording("a", "Hurt", &["Nine Inch Nails"], false),
            recording("b", "Hurt", &["Johnny Cash"], false),
        ];
        let best = choose_best_recording(&candidates, "Hurt", Some("Johnny Cash")).unwrap();
        assert_eq!(best.candidate.id, "b");
        assert!((best.score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_best_guess_ties_keep_first() {
        let candidates = vec![
            recording("first", "Yesterday", &["The Beatles"], false),
            recording("second", "Yesterday", &["The Beatles"], true),
        ];
        for _ in 0..5 {
            let best = choose_best_recording(&candidates, "Yesterday", Some("The Beatles")).unwrap();
            assert_eq!(best.candidate.id, "first");
        }
    }

    #[test]
    fn test_best_guess_without_artist_uses_title_only() {
        let c = recording("a", "Yesterday", &["The Beatles"], false);
        assert!((best_guess_score(&c, "yesterday", None) - TITLE_WEIGHT).abs() < 1e-9);
    }

    #[test]
    fn test_best_guess_empty_set() {
        assert!(choose_best_recording(&[], "Hurt", None).is_none());
    }

    #[test]
    fn test_best_guess_non_empty_set_always_picks() {
        let candidates = vec![recording("a", "xyz", &[], false)];
        assert!(choose_best_recording(&candidates, "abc", None).is_some());
    }

    #[test]
    fn test_shortlist_score_rules() {
        let exact = recording("a", "Hurt", &["Johnny Cash"], true);
        assert!((shortlist_score(&exact, "hurt", Some("cash")) - 1.01).abs() < 1e-9);

        let partial = recording("b", "Hurt (Live)", &["Johnny Cash"], false);
        assert!((shortlist_score(&partial, "Hurt", None) - 0.5).abs() < 1e-9);

        let unrelated = recording("c", "Ring of Fire", &["Johnny Cash"], false);
        assert!((shortlist_score(&unrelated, "Hurt", Some("Nine Inch Nails"))).abs() < 1e-9);
    }

    #[test]
    fn test_shortlist_ignores_uncredited_artist() {
        let uncredited = recording("a", "Other", &[], false);
        assert_eq!(shortlist_score(&uncredited, "Hurt", Some("Johnny Cash")), 0.0);
    }

    #[test]
    fn test_rank_shortlist_greedy_top_three() {
        let candidates = vec![
            recording("partial", "Hurt (Live)", &["Johnny Cash"], false),
            recording("none", "Ring of Fire", &["Johnny Cash"], false),
            recording("exact", "Hurt", &["Johnny Cash"], false),
            recording("exact-release", "Hurt", &["Johnny Cash"], true),
            recording("partial-2", "Hurt (Remastered)", &["Johnny Cash"], false),
        ];
        let ranked = rank_shortlist(&candidates, "Hurt", Some("Johnny Cash"), 3);
        let ids: Vec<_> = ranked.iter().map(|s| s.candidate.id.as_str()).collect();
        assert_eq!(ids, vec!["exact-release", "exact", "partial"]);
    }

    #[test]
    fn test_rank_shortlist_small_pool() {
        let candidates = vec![
            recording("a", "Zzz", &[], false),
            recording("b", "Zzz", &[], false),
        ];
        let ranked = rank_shortlist(&candidates, "Hurt", None, 3);
        let ids: Vec<_> = ranked.iter().map(|s| s.candidate.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_strategies_can_disagree() {
        // Near-miss spelling: edit distance favours it, substring rules do not
        let candidates = vec![
            recording("typo", "Yesterdy", &["The Beatles"], false),
            recording("longer", "Yesterday (Remastered 2009 Anniversary Edition)", &["Other"], true),
        ];
        let best = choose_best_recording(&candidates, "Yesterday", None).unwrap();
        let ranked = rank_shortlist(&candidates, "Yesterday", None, 3);
        assert_eq!(best.candidate.id, "typo");
        assert_eq!(ranked[0].candidate.id, "longer");
    }
}
