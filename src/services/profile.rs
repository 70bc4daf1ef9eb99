use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Mood, SessionState};

static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:my name is|i am|call me) ([a-zA-Z]{2,})").expect("name pattern is valid")
});

const POSITIVE_WORDS: &[&str] = &["good", "great", "excellent", "happy", "well", "thanks", "thank you"];
const NEGATIVE_WORDS: &[&str] = &["bad", "terrible", "awful", "sad", "angry", "frustrated", "hurt"];

/// Applies the profile side effects of one utterance. Runs before the
/// utterance is classified.
pub fn update(state: &mut SessionState, utterance: &str) {
    state.turn_count += 1;

    if state.name.is_none() {
        if let Some(caps) = NAME_PATTERN.captures(utterance) {
            state.name = Some(caps[1].to_string());
        }
    }

    if let Some(mood) = infer_mood(utterance) {
        state.mood = mood;
    }
}

fn infer_mood(utterance: &str) -> Option<Mood> {
    let text = utterance.to_lowercase();
    if POSITIVE_WORDS.iter().any(|w| text.contains(w)) {
        Some(Mood::Positive)
    } else if NEGATIVE_WORDS.iter().any(|w| text.contains(w)) {
        Some(Mood::Negative)
    } else {
        None
    }
}
