//! Flashcards built from annotations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::annotations::Annotation;
use crate::error::{ReaderError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl std::str::FromStr for Difficulty {
    type Err = ReaderError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(ReaderError::invalid_value("difficulty", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: String,
    pub textbook_id: String,
    pub question: String,
    pub answer: String,
    pub source_annotation_id: String,
    pub difficulty: Difficulty,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review: Option<DateTime<Utc>>,
    pub times_reviewed: u32,
    pub correct_count: u32,
}

/// User input for a new card
#[derive(Debug, Clone, PartialEq)]
pub struct FlashcardDraft {
    pub textbook_id: String,
    pub question: String,
    pub answer: String,
    pub source_annotation_id: String,
    pub difficulty: Difficulty,
}

impl FlashcardDraft {
    /// Start a draft for `annotation` with the default answer filled in
    pub fn for_annotation(annotation: &Annotation) -> Self {
        Self {
            textbook_id: annotation.textbook_id.clone(),
            question: String::new(),
            answer: default_answer(annotation).to_string(),
            source_annotation_id: annotation.id.clone(),
            difficulty: Difficulty::default(),
        }
    }
}

fn first_words(text: &str, n: usize) -> String {
    text.split(' ').take(n).collect::<Vec<_>>().join(" ")
}

/// Question prompts offered for an annotation
pub fn suggested_questions(annotation: &Annotation) -> Vec<String> {
    let text = &annotation.selected_text;
    vec![
        format!("What is {}?", first_words(text, 3)),
        format!("Define: {}", first_words(text, 5)),
        format!("Explain the concept of {}", first_words(text, 4)),
        format!("What does \"{}\" mean?", text),
    ]
}

/// The note if there is one, otherwise the selected text
pub fn default_answer(annotation: &Annotation) -> &str {
    annotation
        .note
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or(&annotation.selected_text)
}

/// The user's study deck
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlashcardDeck {
    cards: Vec<Flashcard>,
}

impl FlashcardDeck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and add a card
    ///
    /// Question and answer are trimmed; either one empty is rejected.
    pub fn create(&mut self, draft: FlashcardDraft) -> Result<&Flashcard> {
        let question = draft.question.trim();
        let answer = draft.answer.trim();
        if question.is_empty() || answer.is_empty() {
            return Err(ReaderError::InvalidInput(
                "Please provide both a question and an answer".to_string(),
            ));
        }

        let card = Flashcard {
            id: Uuid::new_v4().to_string(),
            textbook_id: draft.textbook_id,
            question: question.to_string(),
            answer: answer.to_string(),
            source_annotation_id: draft.source_annotation_id,
            difficulty: draft.difficulty,
            last_reviewed: None,
            next_review: None,
            times_reviewed: 0,
            correct_count: 0,
        };
        tracing::debug!(id = %card.id, textbook_id = %card.textbook_id, "Flashcard created");

        let index = self.cards.len();
        self.cards.push(card);
        Ok(&self.cards[index])
    }

    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
