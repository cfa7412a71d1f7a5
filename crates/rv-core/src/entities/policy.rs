use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::nullable;
use crate::errors::CoreError;
use crate::ids::RecordId;
use crate::text::strip_tags;

/// A policy answer: either a single HTML paragraph or a list of items.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    Items(Vec<String>),
}

impl Default for Answer {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl Answer {
    /// Items joined with spaces, markup removed.
    #[must_use]
    pub fn plain(&self) -> String {
        match self {
            Self::Text(text) => strip_tags(text),
            Self::Items(items) => strip_tags(&items.join(" ")),
        }
    }
}

/// An entry of the static `policies.json` document.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Policy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "nullable")]
    pub titulo: String,
    #[serde(default, deserialize_with = "nullable")]
    pub perguntas: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub categoria: String,
    #[serde(default, deserialize_with = "nullable")]
    pub perfil: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub resposta: Answer,
    #[serde(default, deserialize_with = "nullable")]
    pub excecoes: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub responsavel: String,
    #[serde(default)]
    pub fonte_oficial: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub versao: String,
    #[serde(default, deserialize_with = "nullable")]
    pub vigencia_inicio: String,
    #[serde(default)]
    pub vigencia_fim: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub ultima_atualizacao: String,
}

impl Policy {
    /// Whether the policy applies to `profile`; `"Todos"` applies to all.
    #[must_use]
    pub fn applies_to(&self, profile: &str) -> bool {
        self.perfil.iter().any(|p| p == profile || p == "Todos")
    }
}

/// The whole policies document: a top-level JSON array.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(transparent)]
pub struct PolicyDocument {
    pub policies: Vec<Policy>,
}

impl PolicyDocument {
    /// Decode a policies document.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Json`] if the payload is not an array of policies.
    pub fn from_json(payload: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(payload)?)
    }
}
