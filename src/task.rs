use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Task priority. Unrecognized values in a saved file land on `Unknown`,
/// which ranks below `Low` when sorting by priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Unknown,
}

// Hand-rolled so that an unrecognized name maps to `Unknown` instead of
// failing the load of the whole file.
impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(match name.as_str() {
            "low" => Priority::Low,
            "medium" => Priority::Medium,
            "high" => Priority::High,
            _ => Priority::Unknown,
        })
    }
}

impl Priority {
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
            Priority::Unknown => 0,
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "low" | "l" => Some(Priority::Low),
            "medium" | "m" => Some(Priority::Medium),
            "high" | "h" => Some(Priority::High),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Unknown => "?",
        }
    }
}

/// A single to-do item. Field names are camelCase on disk, matching the
/// saved format of earlier versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub due: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    pub created_at: i64,
}

impl Task {
    pub fn new(title: String, due: Option<String>, priority: Priority) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            due,
            priority,
            completed: false,
            created_at: Utc::now().timestamp_millis(),
        }
    }

    /// Key used by the due-date orderings. A missing date compares as the
    /// empty string, the lowest possible key.
    pub fn due_key(&self) -> &str {
        self.due.as_deref().unwrap_or("")
    }
}
