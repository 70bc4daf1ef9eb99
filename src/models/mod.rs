pub mod condition;
pub mod intent;
pub mod knowledge;
pub mod session;

pub use condition::{Condition, ConditionSection};
pub use intent::{Category, ClassificationResult, Entities, ServiceKey, Symptom, CATEGORY_PRIORITY};
pub use knowledge::{DoctorRecord, EmergencyInfo, KnowledgeBase, ServiceRecord};
pub use session::{
    ConversationLog, ConversationTurn, Mood, Session, SessionState, MAX_SESSION_TTL_MINUTES,
};
