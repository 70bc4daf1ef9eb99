use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionSection {
    pub heading: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    #[serde(default)]
    pub items: Vec<String>,
}

impl ConditionSection {
    fn text(&self) -> String {
        let mut parts = vec![self.heading.as_str()];
        if let Some(intro) = &self.intro {
            parts.push(intro);
        }
        parts.extend(self.items.iter().map(String::as_str));
        parts.join("\n")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    pub id: String,
    pub title: String,
    pub severity: String,
    pub overview: String,
    pub sections: Vec<ConditionSection>,
    pub urgent_care: ConditionSection,
}

impl Condition {
    /// All body text, lowercased, for substring search.
    pub fn searchable_text(&self) -> String {
        let mut parts = vec![self.overview.clone()];
        parts.extend(self.sections.iter().map(ConditionSection::text));
        parts.push(self.urgent_care.text());
        parts.join("\n").to_lowercase()
    }
}
