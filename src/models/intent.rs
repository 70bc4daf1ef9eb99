use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Greeting,
    Appointment,
    ServiceInquiry,
    DoctorInfo,
    MedicalQuestion,
    Emergency,
    Location,
    Hours,
    Cost,
    Feedback,
    SmallTalk,
    Joke,
}

/// Tie-break order for the classifier. Earlier entries win ties, so this
/// list is part of the classification contract and must not be reordered.
pub const CATEGORY_PRIORITY: [Category; 12] = [
    Category::Greeting,
    Category::Appointment,
    Category::ServiceInquiry,
    Category::DoctorInfo,
    Category::MedicalQuestion,
    Category::Emergency,
    Category::Location,
    Category::Hours,
    Category::Cost,
    Category::Feedback,
    Category::SmallTalk,
    Category::Joke,
];

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Greeting => "greeting",
            Category::Appointment => "appointment",
            Category::ServiceInquiry => "service_inquiry",
            Category::DoctorInfo => "doctor_info",
            Category::MedicalQuestion => "medical_question",
            Category::Emergency => "emergency",
            Category::Location => "location",
            Category::Hours => "hours",
            Category::Cost => "cost",
            Category::Feedback => "feedback",
            Category::SmallTalk => "small_talk",
            Category::Joke => "joke",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        CATEGORY_PRIORITY.iter().copied().find(|c| c.as_str() == s)
    }

    /// Position in [`CATEGORY_PRIORITY`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKey {
    Laboratory,
    Pharmacy,
    Maternal,
    Outpatient,
}

impl ServiceKey {
    pub const ALL: [ServiceKey; 4] = [
        ServiceKey::Laboratory,
        ServiceKey::Pharmacy,
        ServiceKey::Maternal,
        ServiceKey::Outpatient,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKey::Laboratory => "laboratory",
            ServiceKey::Pharmacy => "pharmacy",
            ServiceKey::Maternal => "maternal",
            ServiceKey::Outpatient => "outpatient",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Symptom {
    Fever,
    Pain,
    Headache,
    Cough,
    Cold,
    Vomit,
    Dizzy,
    Rash,
}

impl Symptom {
    /// Vocabulary in declaration order; extraction preserves this order.
    pub const VOCABULARY: [Symptom; 8] = [
        Symptom::Fever,
        Symptom::Pain,
        Symptom::Headache,
        Symptom::Cough,
        Symptom::Cold,
        Symptom::Vomit,
        Symptom::Dizzy,
        Symptom::Rash,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Symptom::Fever => "fever",
            Symptom::Pain => "pain",
            Symptom::Headache => "headache",
            Symptom::Cough => "cough",
            Symptom::Cold => "cold",
            Symptom::Vomit => "vomit",
            Symptom::Dizzy => "dizzy",
            Symptom::Rash => "rash",
        }
    }
}

/// Slots pulled out of an utterance. Only the slot belonging to the
/// classified category is ever populated; the rest stay `None` and are
/// omitted when serialized.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<Vec<Symptom>>,
}

impl Entities {
    pub fn is_empty(&self) -> bool {
        self.service.is_none() && self.doctor.is_none() && self.symptoms.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassificationResult {
    pub category: Category,
    pub confidence: u32,
    pub entities: Entities,
    pub source_utterance: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_matches_declaration_order() {
        for (i, category) in CATEGORY_PRIORITY.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn test_parse_round_trips_names() {
        assert_eq!(Category::parse("service_inquiry"), Some(Category::ServiceInquiry));
        assert_eq!(Category::parse("small_talk"), Some(Category::SmallTalk));
        assert_eq!(Category::parse("smalltalk"), None);
    }

    #[test]
    fn test_empty_entities_serialize_as_empty_object() {
        let json = serde_json::to_string(&Entities::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_symptoms_serialize_in_snake_case() {
        let entities = Entities {
            symptoms: Some(vec![Symptom::Fever, Symptom::Headache]),
            ..Default::default()
        };
        let json = serde_json::to_value(&entities).unwrap();
        assert_eq!(json, serde_json::json!({"symptoms": ["fever", "headache"]}));
    }
}
