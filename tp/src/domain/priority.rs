//! Priority levels for planned tasks

use serde::{Deserialize, Serialize};

/// Priority level for a Task
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Normalize an untrusted JSON priority value
    ///
    /// Missing and falsy values fall back to medium, strings are matched
    /// case-insensitively, and anything unrecognized is medium too. Arrays
    /// are matched on their comma-joined text, so `["High"]` is high.
    pub fn normalize(value: Option<&serde_json::Value>) -> Self {
        value
            .and_then(priority_text)
            .and_then(|text| text.parse().ok())
            .unwrap_or_default()
    }
}

/// Text form of a priority value; objects have none that could match
fn priority_text(value: &serde_json::Value) -> Option<String> {
    use serde_json::Value;

    match value {
        Value::String(s) => Some(s.clone()),
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => items
            .iter()
            .map(priority_text)
            .collect::<Option<Vec<_>>>()
            .map(|parts| parts.join(",")),
        Value::Object(_) => None,
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!("low".parse::<Priority>().unwrap(), Priority::Low);
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_normalize_case_insensitive() {
        assert_eq!(Priority::normalize(Some(&json!("High"))), Priority::High);
        assert_eq!(Priority::normalize(Some(&json!("LOW"))), Priority::Low);
    }

    #[test]
    fn test_normalize_fallbacks() {
        assert_eq!(Priority::normalize(None), Priority::Medium);
        assert_eq!(Priority::normalize(Some(&json!("URGENT"))), Priority::Medium);
        assert_eq!(Priority::normalize(Some(&json!(""))), Priority::Medium);
        assert_eq!(Priority::normalize(Some(&json!(null))), Priority::Medium);
        assert_eq!(Priority::normalize(Some(&json!(1))), Priority::Medium);
        assert_eq!(Priority::normalize(Some(&json!(true))), Priority::Medium);
        // Not trimmed
        assert_eq!(Priority::normalize(Some(&json!(" high"))), Priority::Medium);
    }

    #[test]
    fn test_normalize_array_uses_joined_text() {
        assert_eq!(Priority::normalize(Some(&json!(["High"]))), Priority::High);
        assert_eq!(Priority::normalize(Some(&json!([["low"]]))), Priority::Low);
        assert_eq!(Priority::normalize(Some(&json!(["high", "low"]))), Priority::Medium);
        assert_eq!(Priority::normalize(Some(&json!([]))), Priority::Medium);
        assert_eq!(Priority::normalize(Some(&json!([{"level": "high"}]))), Priority::Medium);
        assert_eq!(Priority::normalize(Some(&json!({"level": "high"}))), Priority::Medium);
    }

    #[test]
    fn test_priority_serde() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        let priority: Priority = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(priority, Priority::Low);
    }
}
