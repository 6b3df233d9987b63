//! Disambiguation of multiple catalog candidates
//!
//! Zero candidates resolve to nothing, one resolves to itself without any
//! scoring, and several are narrowed to a ranked shortlist that a
//! [`CandidatePrompt`] resolves to exactly one entry or a cancellation.

use crate::models::CandidateRecording;
use crate::scoring::{rank_shortlist, ScoredCandidate};

/// Maximum entries offered for selection
pub const SHORTLIST_SIZE: usize = 3;

/// Interpretation of one line of selection input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceInput {
    /// Empty input: take the first-ranked entry
    Default,
    /// Zero-based index into the shortlist
    Pick(usize),
    Cancel,
    /// A number that is not one of the shown entries
    OutOfRange,
    Invalid,
}

/// Parse selection input against a shortlist of `shown` entries
///
/// Accepts exactly `1`, `2`, `3`, `c` (any case) or an empty line.
pub fn parse_choice(raw: &str, shown: usize) -> ChoiceInput {
    let choice = raw.trim().to_lowercase();
    match choice.as_str() {
        "" => ChoiceInput::Default,
        "c" => ChoiceInput::Cancel,
        "1" | "2" | "3" => {
            let idx = usize::from(choice.as_bytes()[0] - b'1');
            if idx < shown.min(SHORTLIST_SIZE) {
                ChoiceInput::Pick(idx)
            } else {
                ChoiceInput::OutOfRange
            }
        }
        _ => ChoiceInput::Invalid,
    }
}

/// Interaction point used when more than one candidate is plausible
///
/// Implementations block until a line of input is available; the pipeline
/// resumes with the answer.
pub trait CandidatePrompt {
    /// Show the ranked shortlist
    fn present(&mut self, shortlist: &[ScoredCandidate<'_>]);

    /// Next line of selection input, or `None` when input is closed
    fn read_choice(&mut self) -> Option<String>;

    /// Explain why the last input was not accepted
    fn reject(&mut self, message: &str);
}

/// Resolve a candidate set to one recording
///
/// Returns `None` for an empty set or when the prompt cancels.
pub fn disambiguate<'a>(
    candidates: &'a [CandidateRecording],
    title: &str,
    artist: Option<&str>,
    prompt: &mut dyn CandidatePrompt,
) -> Option<&'a CandidateRecording> {
    match candidates {
        [] => return None,
        [only] => return Some(only),
        _ => {}
    }

    let shortlist = rank_shortlist(candidates, title, artist, SHORTLIST_SIZE);
    if shortlist.is_empty() {
        tracing::warn!("Shortlist empty for non-empty pool, using first result");
        return candidates.first();
    }

    prompt.present(&shortlist);

    loop {
        let Some(raw) = prompt.read_choice() else {
            tracing::debug!("Selection input closed, cancelling");
            return None;
        };

        match parse_choice(&raw, shortlist.len()) {
            ChoiceInput::Default => return Some(shortlist[0].candidate),
            ChoiceInput::Pick(idx) => return Some(shortlist[idx].candidate),
            ChoiceInput::Cancel => {
                tracing::debug!("Selection cancelled");
                return None;
            }
            ChoiceInput::OutOfRange => {
                prompt.reject("Invalid selection (not present in list). Try again.")
            }
            ChoiceInput::Invalid => {
                prompt.reject("Invalid input. Enter 1,2,3, c, or Enter for default.")
            }
        }
    }
}
