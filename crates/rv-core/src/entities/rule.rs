use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::nullable;
use crate::errors::CoreError;
use crate::ids::RecordId;
use crate::text::{BULLET_SEPARATOR, non_empty};

/// A single line of card content.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Bullet {
    pub id: RecordId,
    #[serde(default, deserialize_with = "nullable")]
    pub text: String,
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Vec<String>,
}

/// A titled group of bullets inside a rule.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Card {
    pub id: RecordId,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub bullets: Vec<Bullet>,
}

/// A displayable policy/FAQ entry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Rule {
    pub id: RecordId,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub cards: Vec<Card>,
}

impl Rule {
    /// Trimmed category, if any.
    #[must_use]
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_deref().and_then(non_empty)
    }

    /// Trimmed body, if any.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        self.body.as_deref().and_then(non_empty)
    }

    /// Every bullet's raw text, card by card.
    pub fn bullet_texts(&self) -> impl Iterator<Item = &str> {
        self.cards
            .iter()
            .flat_map(|card| card.bullets.iter().map(|bullet| bullet.text.as_str()))
    }

    /// The rule's displayable text: the body when present, otherwise the
    /// non-empty bullet texts joined with a bullet separator.
    #[must_use]
    pub fn display_text(&self) -> String {
        if let Some(body) = self.body_text() {
            return body.to_string();
        }
        self.bullet_texts()
            .filter_map(non_empty)
            .collect::<Vec<_>>()
            .join(BULLET_SEPARATOR)
    }

    /// Collapsed-row preview: the body, or the first non-empty bullet of
    /// the first card.
    #[must_use]
    pub fn preview(&self) -> &str {
        if let Some(body) = self.body_text() {
            return body;
        }
        self.cards
            .first()
            .and_then(|card| card.bullets.iter().find_map(|b| non_empty(&b.text)))
            .unwrap_or("")
    }
}

/// Envelope returned by `GET /api/rules/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RulesResponse {
    #[serde(default, deserialize_with = "nullable")]
    pub results: Vec<Rule>,
}

impl RulesResponse {
    /// Decode a rules payload.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Json`] when the payload is not a JSON object of
    /// the expected shape.
    pub fn from_json(payload: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(payload)?)
    }
}
