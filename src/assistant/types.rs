//! Study assistant types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What the reader asked for help with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyContextKind {
    Text,
    Page,
    Chapter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyContext {
    #[serde(rename = "type")]
    pub kind: StudyContextKind,
    pub content: String,
    pub textbook_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Textbook,
    KhanAcademy,
    Youtube,
    AiExplanation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// A resource suggested for the current context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedResource {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// 0.0-1.0
    pub relevance_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textbook_page: Option<u32>,
    /// Video length, e.g. "45:30"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiExplanation {
    pub id: String,
    pub topic: String,
    pub explanation: String,
    pub examples: Vec<String>,
    pub key_terms: Vec<String>,
    pub related_concepts: Vec<String>,
    pub difficulty: Difficulty,
}

/// Snapshot of the assistant panel
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyAssistantState {
    pub is_open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_context: Option<StudyContext>,
    pub related_resources: Vec<RelatedResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_explanation: Option<AiExplanation>,
    pub is_loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Lookup failures
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Resource search failed: {0}")]
    Search(String),

    #[error("Explanation failed: {0}")]
    Explanation(String),
}

pub type AssistantResult<T> = Result<T, AssistantError>;
