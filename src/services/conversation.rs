use chrono::Utc;
use serde::Serialize;

use crate::models::{ClassificationResult, ConversationTurn, KnowledgeBase, Session};
use crate::services::picker::TemplatePicker;
use crate::services::{classifier, profile, responder};

pub const FALLBACK_REPLY: &str =
    "I apologize for the confusion. Could you please rephrase your question?";

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TurnReply {
    Answered {
        text: String,
        classification: ClassificationResult,
    },
    /// Reply generation failed; `text` is the apology message.
    Fallback {
        text: String,
        classification: ClassificationResult,
    },
}

impl TurnReply {
    pub fn text(&self) -> &str {
        match self {
            TurnReply::Answered { text, .. } | TurnReply::Fallback { text, .. } => text,
        }
    }

    pub fn classification(&self) -> &ClassificationResult {
        match self {
            TurnReply::Answered { classification, .. }
            | TurnReply::Fallback { classification, .. } => classification,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, TurnReply::Fallback { .. })
    }
}

/// Runs one visitor turn against `session`.
///
/// Blank input is not a turn: `None` is returned and the session is left
/// untouched. Otherwise the turn is always answered and logged, with a
/// fallback reply standing in if reply generation fails.
pub fn process_message(
    session: &mut Session,
    utterance: &str,
    kb: &KnowledgeBase,
    picker: &dyn TemplatePicker,
) -> Option<TurnReply> {
    let utterance = utterance.trim();
    if utterance.is_empty() {
        return None;
    }

    profile::update(&mut session.state, utterance);

    let classification = classifier::classify(utterance, session.state.last_intent);

    tracing::info!(
        session = %session.id,
        intent = classification.category.as_str(),
        confidence = classification.confidence,
        turn = session.state.turn_count,
        "processing message"
    );

    let reply = match responder::dispatch(&classification, &mut session.state, kb, picker) {
        Ok(text) => TurnReply::Answered {
            text,
            classification,
        },
        Err(e) => {
            tracing::error!(error = %e, session = %session.id, "reply generation failed");
            TurnReply::Fallback {
                text: FALLBACK_REPLY.to_string(),
                classification,
            }
        }
    };

    session.log.append(ConversationTurn {
        utterance: utterance.to_string(),
        reply: reply.text().to_string(),
        classification: reply.classification().clone(),
        timestamp: Utc::now().naive_utc(),
    });

    Some(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Mood, Symptom};
    use crate::services::picker::FixedPicker;
    use crate::services::responder::MEDICAL_DISCLAIMER;

    fn kb() -> KnowledgeBase {
        KnowledgeBase::builtin().unwrap()
    }

    fn run(session: &mut Session, utterance: &str) -> TurnReply {
        process_message(session, utterance, &kb(), &FixedPicker(0)).unwrap()
    }

    #[test]
    fn test_hello_scenario() {
        let mut session = Session::new(30);
        let reply = run(&mut session, "hello");
        assert!(!reply.is_fallback());
        assert_eq!(reply.classification().category, Category::Greeting);
        assert_eq!(session.state.last_intent, Some(Category::Greeting));
        assert_eq!(session.log.len(), 1);
    }

    #[test]
    fn test_greeting_continuity_across_turns() {
        let mut session = Session::new(30);
        run(&mut session, "hi");
        let reply = run(&mut session, "hello again");
        assert_eq!(reply.classification().category, Category::Greeting);
        assert_eq!(reply.classification().confidence, 7);
    }

    #[test]
    fn test_fever_headache_scenario() {
        let mut session = Session::new(30);
        let reply = run(&mut session, "I have a fever and headache");
        let classification = reply.classification();
        assert_eq!(classification.category, Category::MedicalQuestion);
        assert_eq!(
            classification.entities.symptoms,
            Some(vec![Symptom::Fever, Symptom::Headache])
        );
        assert!(reply.text().contains("For fever management"));
        assert!(reply.text().contains("For headaches"));
        assert!(reply.text().ends_with(MEDICAL_DISCLAIMER));
    }

    #[test]
    fn test_name_and_mood_scenario() {
        let mut session = Session::new(30);
        let reply = run(&mut session, "My name is Amani, thank you");
        assert_eq!(session.state.name.as_deref(), Some("Amani"));
        assert_eq!(session.state.mood, Mood::Positive);
        assert_eq!(reply.classification().category, Category::Feedback);

        // a later greeting addresses the visitor by name
        let reply = run(&mut session, "hello");
        assert!(reply.text().contains("Amani"));
    }

    #[test]
    fn test_blank_input_is_not_a_turn() {
        let mut session = Session::new(30);
        assert!(process_message(&mut session, "   ", &kb(), &FixedPicker(0)).is_none());
        assert_eq!(session.state.turn_count, 0);
        assert!(session.log.is_empty());
    }

    #[test]
    fn test_log_tracks_turn_count() {
        let mut session = Session::new(30);
        for utterance in ["hi", "where is your location", "tell me a joke", "zzz"] {
            run(&mut session, utterance);
        }
        assert_eq!(session.log.len(), 4);
        assert_eq!(session.state.turn_count, 4);

        let categories: Vec<Category> = session
            .log
            .turns()
            .iter()
            .map(|t| t.classification.category)
            .collect();
        assert_eq!(
            categories,
            vec![Category::Greeting, Category::Location, Category::Joke, Category::SmallTalk]
        );
        assert_eq!(session.state.last_intent, Some(Category::SmallTalk));
    }

    #[test]
    fn test_logged_turn_matches_reply() {
        let mut session = Session::new(30);
        let reply = run(&mut session, "  what are your prices?  ");
        let turn = session.log.last().unwrap();
        assert_eq!(turn.utterance, "what are your prices?");
        assert_eq!(turn.reply, reply.text());
        assert_eq!(turn.classification.category, Category::Cost);
    }

    #[test]
    fn test_failed_reply_falls_back() {
        let mut kb = kb();
        kb.doctors.clear();
        let mut session = Session::new(30);

        let reply = process_message(&mut session, "tell me about the doctor", &kb, &FixedPicker(0)).unwrap();
        assert!(reply.is_fallback());
        assert_eq!(reply.text(), FALLBACK_REPLY);
        assert_eq!(session.state.last_intent, Some(Category::DoctorInfo));
        assert_eq!(session.log.len(), 1);
        assert_eq!(session.log.last().unwrap().reply, FALLBACK_REPLY);
    }

    struct PastTheEnd;

    impl TemplatePicker for PastTheEnd {
        fn pick(&self, len: usize) -> usize {
            len
        }
    }

    #[test]
    fn test_bad_template_pick_falls_back() {
        let mut session = Session::new(30);
        let reply = process_message(&mut session, "hello", &kb(), &PastTheEnd).unwrap();
        assert!(reply.is_fallback());
        assert_eq!(reply.text(), FALLBACK_REPLY);
        assert_eq!(reply.classification().category, Category::Greeting);
        assert_eq!(session.log.len(), 1);
    }
}
