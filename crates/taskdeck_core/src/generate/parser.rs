//! Model-response parsing into item drafts.
//!
//! # Responsibility
//! - Locate the first JSON-array-shaped substring in free-form model text.
//! - Validate each element into a `GeneratedItemDraft`.
//!
//! # Invariants
//! - Drafts preserve the source array order.
//! - Priority ambiguity never rejects an element; a blank title drops it.
//! - No array, or an array that is not valid JSON, is a hard failure,
//!   never an empty list returned silently.

use crate::model::checklist::GeneratedItemDraft;
use crate::model::priority::Priority;
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

// Heuristic boundary search, not JSON-in-text recovery: the model may wrap
// the array in prose, but the array substring itself must be valid JSON.
static ITEM_ARRAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\[\s*\{.*\}\s*\]").expect("valid item array regex"));

/// Parse failure for a model response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No JSON-array-shaped substring in the text.
    NoItemArray,
    /// The located substring is not valid JSON of the expected shape.
    InvalidJson(String),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoItemArray => write!(f, "no item array found in model response"),
            Self::InvalidJson(message) => {
                write!(f, "item array is not valid JSON: {message}")
            }
        }
    }
}

impl Error for ParseError {}

#[derive(Debug, Deserialize)]
struct RawDraft {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    due_date: Option<String>,
}

/// Extracts and validates the item drafts from raw model text.
///
/// Elements with a blank title fail validation and are dropped with a
/// warning; all other element fields are recoverable with defaults.
pub fn parse_generated_items(raw: &str) -> Result<Vec<GeneratedItemDraft>, ParseError> {
    let matched = ITEM_ARRAY_RE.find(raw).ok_or(ParseError::NoItemArray)?;
    let elements: Vec<RawDraft> = serde_json::from_str(matched.as_str())
        .map_err(|err| ParseError::InvalidJson(err.to_string()))?;

    let mut drafts = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        let title = match element.title {
            Some(title) if !title.trim().is_empty() => title.trim().to_string(),
            _ => {
                warn!(
                    "event=draft_dropped module=generate status=invalid index={index} reason=missing_title"
                );
                continue;
            }
        };

        drafts.push(GeneratedItemDraft {
            title,
            priority: Priority::coerce(element.priority.as_deref()),
            due_date: element.due_date,
        });
    }

    Ok(drafts)
}

#[cfg(test)]
mod tests {
    use super::{parse_generated_items, ParseError};
    use crate::model::priority::Priority;

    #[test]
    fn extracts_array_surrounded_by_prose_in_order() {
        let raw = "Here you go:\n[{\"title\":\"Wireframe\",\"priority\":\"high\",\"due_date\":\"1 week\"},{\"title\":\"Copy review\",\"priority\":\"low\",\"due_date\":\"none\"}]\nEnjoy!";
        let drafts = parse_generated_items(raw).expect("array should parse");
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].title, "Wireframe");
        assert_eq!(drafts[0].priority, Priority::High);
        assert_eq!(drafts[0].due_date.as_deref(), Some("1 week"));
        assert_eq!(drafts[1].title, "Copy review");
        assert_eq!(drafts[1].priority, Priority::Low);
    }

    #[test]
    fn fails_when_no_array_shaped_substring_exists() {
        let err = parse_generated_items("Sorry, I cannot help with that.").unwrap_err();
        assert_eq!(err, ParseError::NoItemArray);
    }

    #[test]
    fn fails_when_array_substring_is_not_valid_json() {
        let err = parse_generated_items("ok: [{\"title\": \"a\",}]").unwrap_err();
        assert!(matches!(err, ParseError::InvalidJson(_)));
    }

    #[test]
    fn unrecognized_priority_coerces_to_medium_instead_of_rejecting() {
        let raw = r#"[{"title":"Kickoff","priority":"URGENT"}]"#;
        let drafts = parse_generated_items(raw).expect("element should survive");
        assert_eq!(drafts[0].priority, Priority::Medium);
        assert_eq!(drafts[0].due_date, None);
    }

    #[test]
    fn blank_title_drops_the_element_but_keeps_siblings() {
        let raw = r#"[{"title":"  "},{"priority":"low"},{"title":"Review"}]"#;
        let drafts = parse_generated_items(raw).expect("array should parse");
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].title, "Review");
    }
}
