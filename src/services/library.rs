use std::collections::{BTreeMap, HashSet};

use anyhow::Context;
use serde::Deserialize;

use crate::models::Condition;

static BUILTIN_CONDITIONS: &str = include_str!("../../data/conditions.json");

#[derive(Deserialize)]
struct LibraryFile {
    conditions: Vec<Condition>,
    #[serde(default)]
    categories: BTreeMap<String, Vec<String>>,
}

/// Health condition reference pages. Independent of the chat engine.
pub struct ConditionLibrary {
    conditions: Vec<Condition>,
    search_text: Vec<String>,
    categories: BTreeMap<String, Vec<String>>,
}

impl ConditionLibrary {
    pub fn from_json(s: &str) -> anyhow::Result<Self> {
        let file: LibraryFile =
            serde_json::from_str(s).context("failed to parse condition library JSON")?;

        let mut ids = HashSet::new();
        for condition in &file.conditions {
            anyhow::ensure!(
                ids.insert(condition.id.as_str()),
                "duplicate condition id '{}'",
                condition.id
            );
        }
        for (category, members) in &file.categories {
            for id in members {
                anyhow::ensure!(
                    ids.contains(id.as_str()),
                    "category '{category}' references unknown condition '{id}'"
                );
            }
        }

        let search_text = file
            .conditions
            .iter()
            .map(|c| format!("{}\n{}", c.title.to_lowercase(), c.searchable_text()))
            .collect();

        Ok(Self {
            conditions: file.conditions,
            search_text,
            categories: file.categories,
        })
    }

    pub fn builtin() -> anyhow::Result<Self> {
        Self::from_json(BUILTIN_CONDITIONS)
    }

    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read condition library file: {path}"))?;
                Self::from_json(&raw)
            }
            None => Self::builtin(),
        }
    }

    /// Ids of conditions whose title or body contains the query.
    pub fn search(&self, query: &str) -> Vec<String> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        self.conditions
            .iter()
            .zip(&self.search_text)
            .filter(|(_, text)| text.contains(&query))
            .map(|(c, _)| c.id.clone())
            .collect()
    }

    pub fn condition(&self, id: &str) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.id == id)
    }

    pub fn category_conditions(&self, category: &str) -> Vec<String> {
        self.categories.get(category).cloned().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}
