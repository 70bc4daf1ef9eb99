use crate::models::{Category, Entities, ServiceKey, Symptom};

// Priority order: the first rule with any matching cue wins.
const SERVICE_RULES: &[(&[&str], ServiceKey)] = &[
    (&["general", "outpatient"], ServiceKey::Outpatient),
    (&["maternal", "child"], ServiceKey::Maternal),
    (&["pharmacy", "medicine"], ServiceKey::Pharmacy),
    (&["lab", "test"], ServiceKey::Laboratory),
];

const DOCTOR_ALIASES: &[(&[&str], &str)] = &[
    (&["nekesa", "sarah"], "Dr. Sarah Nekesa"),
    (&["kuria"], "Dr. Terry Kuria"),
    (&["gitaka"], "Dr. Jesse Gitaka"),
];

pub fn extract(utterance: &str, category: Category) -> Entities {
    let text = utterance.to_lowercase();
    let mentions = |cues: &[&str]| cues.iter().any(|cue| text.contains(cue));

    match category {
        Category::ServiceInquiry => Entities {
            service: SERVICE_RULES
                .iter()
                .find(|(cues, _)| mentions(*cues))
                .map(|(_, key)| *key),
            ..Default::default()
        },
        Category::DoctorInfo => Entities {
            doctor: DOCTOR_ALIASES
                .iter()
                .find(|(cues, _)| mentions(*cues))
                .map(|(_, name)| name.to_string()),
            ..Default::default()
        },
        Category::MedicalQuestion => Entities {
            symptoms: Some(
                Symptom::VOCABULARY
                    .into_iter()
                    .filter(|s| text.contains(s.as_str()))
                    .collect(),
            ),
            ..Default::default()
        },
        _ => Entities::default(),
    }
}
