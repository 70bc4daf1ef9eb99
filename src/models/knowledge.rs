use std::collections::BTreeMap;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::intent::{ServiceKey, Symptom};

static BUILTIN_KNOWLEDGE_BASE: &str = include_str!("../../data/knowledge_base.json");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicInfo {
    pub name: String,
    pub short_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub area: String,
    pub street: String,
    pub county: String,
    pub landmarks: String,
    pub accessibility: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub key: ServiceKey,
    pub display_name: String,
    pub tagline: String,
    pub description: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorRecord {
    pub name: String,
    pub title: String,
    pub specialty: String,
    pub experience: String,
    pub years: String,
    pub education: String,
    pub availability: String,
}

impl DoctorRecord {
    /// "Dr. Jesse Gitaka" -> "Jesse".
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().nth(1).unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyInfo {
    pub phone: String,
    pub hotline: String,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoursLine {
    pub days: String,
    pub time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatingHours {
    pub summary: String,
    pub regular: Vec<HoursLine>,
    pub laboratory: Vec<HoursLine>,
    #[serde(default)]
    pub round_the_clock: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceLine {
    pub item: String,
    pub price: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostInfo {
    pub items: Vec<PriceLine>,
    pub payment_methods: String,
}

/// Static clinic reference data. Loaded once at startup and shared
/// read-only by every session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub clinic: ClinicInfo,
    pub services: Vec<ServiceRecord>,
    pub doctors: Vec<DoctorRecord>,
    pub emergency: EmergencyInfo,
    pub hours: OperatingHours,
    pub costs: CostInfo,
    #[serde(default)]
    pub health_tips: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub symptom_advice: BTreeMap<String, String>,
}

impl KnowledgeBase {
    pub fn from_json(s: &str) -> anyhow::Result<Self> {
        let kb: KnowledgeBase =
            serde_json::from_str(s).context("failed to parse knowledge base JSON")?;
        kb.validate()?;
        Ok(kb)
    }

    /// The AfyaNex data compiled into the binary.
    pub fn builtin() -> anyhow::Result<Self> {
        Self::from_json(BUILTIN_KNOWLEDGE_BASE)
    }

    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read knowledge base file: {path}"))?;
                Self::from_json(&raw)
            }
            None => Self::builtin(),
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.doctors.is_empty(), "knowledge base has no doctors");
        for key in ServiceKey::ALL {
            anyhow::ensure!(
                self.get_service(key).is_some(),
                "knowledge base is missing service '{}'",
                key.as_str()
            );
        }
        Ok(())
    }

    pub fn get_service(&self, key: ServiceKey) -> Option<&ServiceRecord> {
        self.services.iter().find(|s| s.key == key)
    }

    pub fn get_doctor(&self, name: &str) -> Option<&DoctorRecord> {
        self.doctors.iter().find(|d| d.name == name)
    }

    /// First doctor on the roster.
    pub fn lead_physician(&self) -> Option<&DoctorRecord> {
        self.doctors.first()
    }

    pub fn emergency_info(&self) -> &EmergencyInfo {
        &self.emergency
    }

    pub fn health_tips(&self, category: &str) -> Option<&[String]> {
        self.health_tips.get(category).map(Vec::as_slice)
    }

    pub fn symptom_advice(&self, symptom: Symptom) -> Option<&str> {
        self.symptom_advice.get(symptom.as_str()).map(String::as_str)
    }
}
