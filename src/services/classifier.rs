use crate::models::{Category, ClassificationResult, CATEGORY_PRIORITY};

use super::entities;

/// Keyword, weight and the categories the weight is credited to.
///
/// Weights are product-tuned constants. Several keywords carry a weight
/// but credit no category; they are kept so the table stays the single
/// source of truth for the vocabulary.
const KEYWORDS: &[(&str, u32, &[Category])] = &[
    ("appointment", 10, &[Category::Appointment]),
    ("book", 8, &[Category::Appointment]),
    ("schedule", 7, &[]),
    ("doctor", 9, &[Category::DoctorInfo]),
    ("dr.", 8, &[Category::DoctorInfo]),
    ("physician", 7, &[]),
    ("service", 8, &[Category::ServiceInquiry]),
    ("treatment", 7, &[Category::ServiceInquiry]),
    ("consult", 6, &[]),
    ("emergency", 10, &[Category::Emergency]),
    ("urgent", 9, &[Category::Emergency]),
    ("help now", 10, &[]),
    ("location", 6, &[Category::Location]),
    ("address", 6, &[Category::Location]),
    ("where", 5, &[]),
    ("hour", 5, &[Category::Hours]),
    ("time", 4, &[Category::Hours]),
    ("open", 5, &[]),
    ("cost", 6, &[Category::Cost]),
    ("price", 6, &[Category::Cost]),
    ("fee", 6, &[]),
    ("pain", 8, &[Category::MedicalQuestion]),
    ("fever", 8, &[Category::MedicalQuestion]),
    ("headache", 7, &[]),
    ("cough", 7, &[]),
    ("medicine", 6, &[]),
    ("prescription", 6, &[]),
    ("pharmacy", 6, &[]),
    ("test", 6, &[]),
    ("lab", 6, &[]),
    ("result", 5, &[]),
    ("thank", 3, &[Category::Feedback]),
    ("feedback", 4, &[Category::Feedback]),
    ("complain", 4, &[]),
    ("hello", 2, &[Category::Greeting]),
    ("hi", 2, &[Category::Greeting]),
    ("hey", 2, &[]),
    ("joke", 1, &[Category::Joke]),
    ("funny", 1, &[Category::Joke]),
    ("laugh", 1, &[]),
];

const QUESTION_WORDS: [&str; 3] = ["what", "how", "when"];
pub const QUESTION_BONUS: u32 = 3;
pub const GREETING_CONTINUITY_BONUS: u32 = 5;

/// One accumulator per category, indexed by [`Category::index`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntentScores([u32; 12]);

impl IntentScores {
    pub fn get(&self, category: Category) -> u32 {
        self.0[category.index()]
    }

    fn add(&mut self, category: Category, weight: u32) {
        self.0[category.index()] += weight;
    }

    /// Highest score wins; ties keep the earlier category in
    /// [`CATEGORY_PRIORITY`]. All zeros resolve to small talk.
    pub fn winner(&self) -> (Category, u32) {
        let mut best = (Category::SmallTalk, 0);
        for category in CATEGORY_PRIORITY {
            let score = self.get(category);
            if score > best.1 {
                best = (category, score);
            }
        }
        best
    }
}

pub fn normalize(utterance: &str) -> String {
    utterance.to_lowercase().trim().to_string()
}

pub fn score(utterance: &str, last_intent: Option<Category>) -> IntentScores {
    let text = normalize(utterance);
    let mut scores = IntentScores::default();

    for (keyword, weight, categories) in KEYWORDS {
        if text.contains(keyword) {
            for category in categories.iter() {
                scores.add(*category, *weight);
            }
        }
    }

    if text.contains('?') && QUESTION_WORDS.iter().any(|w| text.contains(w)) {
        scores.add(Category::MedicalQuestion, QUESTION_BONUS);
    }

    if last_intent == Some(Category::Greeting) && scores.get(Category::Greeting) > 0 {
        scores.add(Category::Greeting, GREETING_CONTINUITY_BONUS);
    }

    scores
}

pub fn classify(utterance: &str, last_intent: Option<Category>) -> ClassificationResult {
    let (category, confidence) = score(utterance, last_intent).winner();
    let entities = entities::extract(utterance, category);

    tracing::debug!(
        intent = category.as_str(),
        confidence,
        "classified utterance"
    );

    ClassificationResult {
        category,
        confidence,
        entities,
        source_utterance: utterance.to_string(),
    }
}
