use chrono::{Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::intent::{Category, ClassificationResult};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    #[default]
    Neutral,
    Positive,
    Negative,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Neutral => "neutral",
            Mood::Positive => "positive",
            Mood::Negative => "negative",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "positive" => Mood::Positive,
            "negative" => Mood::Negative,
            _ => Mood::Neutral,
        }
    }
}

/// Per-conversation profile. The only field that feeds back into
/// classification is `last_intent`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionState {
    pub name: Option<String>,
    pub last_intent: Option<Category>,
    pub turn_count: u32,
    pub mood: Mood,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversationTurn {
    pub utterance: String,
    pub reply: String,
    pub classification: ClassificationResult,
    pub timestamp: NaiveDateTime,
}

/// Append-only record of a session's turns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationLog {
    turns: Vec<ConversationTurn>,
}

impl ConversationLog {
    pub fn from_turns(turns: Vec<ConversationTurn>) -> Self {
        Self { turns }
    }

    pub fn append(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// Longest idle lifetime a session may be given: one year.
pub const MAX_SESSION_TTL_MINUTES: i64 = 525_600;

fn expiry_after(now: NaiveDateTime, ttl_minutes: i64) -> NaiveDateTime {
    now + Duration::minutes(ttl_minutes.clamp(1, MAX_SESSION_TTL_MINUTES))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub state: SessionState,
    pub log: ConversationLog,
    pub created_at: NaiveDateTime,
    pub last_activity: NaiveDateTime,
    pub expires_at: NaiveDateTime,
}

impl Session {
    pub fn new(ttl_minutes: i64) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            state: SessionState::default(),
            log: ConversationLog::default(),
            created_at: now,
            last_activity: now,
            expires_at: expiry_after(now, ttl_minutes),
        }
    }

    pub fn touch(&mut self, ttl_minutes: i64) {
        let now = Utc::now().naive_utc();
        self.last_activity = now;
        self.expires_at = expiry_after(now, ttl_minutes);
    }
}
