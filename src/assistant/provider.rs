//! Study lookup providers
//!
//! Defines the lookup trait and the canned implementation used until a real
//! content service is wired in.

use std::time::Duration;

use async_trait::async_trait;

use super::types::{
    AiExplanation, AssistantResult, Difficulty, RelatedResource, ResourceType, StudyContext,
};
use crate::config::AssistantConfig;

/// Source of related resources and explanations
#[async_trait]
pub trait StudyLookup: Send + Sync {
    /// Resources related to the context, most relevant first
    async fn search_resources(&self, context: &StudyContext) -> AssistantResult<Vec<RelatedResource>>;

    /// An explanation of the context
    async fn explain(&self, context: &StudyContext) -> AssistantResult<AiExplanation>;
}

/// Returns fixed sample data after a simulated delay
#[derive(Debug, Clone)]
pub struct MockStudyLookup {
    resource_delay: Duration,
    explanation_delay: Duration,
}

impl Default for MockStudyLookup {
    fn default() -> Self {
        Self::from_config(&AssistantConfig::default())
    }
}

impl MockStudyLookup {
    pub fn new(resource_delay: Duration, explanation_delay: Duration) -> Self {
        Self {
            resource_delay,
            explanation_delay,
        }
    }

    pub fn from_config(config: &AssistantConfig) -> Self {
        Self::new(
            Duration::from_millis(config.resource_delay_ms),
            Duration::from_millis(config.explanation_delay_ms),
        )
    }

    /// No simulated latency
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }
}

#[async_trait]
impl StudyLookup for MockStudyLookup {
    async fn search_resources(&self, _context: &StudyContext) -> AssistantResult<Vec<RelatedResource>> {
        tokio::time::sleep(self.resource_delay).await;

        Ok(vec![
            RelatedResource {
                id: "1".to_string(),
                title: "Khan Academy: Physics Fundamentals".to_string(),
                description: "Interactive lessons on basic physics concepts".to_string(),
                resource_type: ResourceType::KhanAcademy,
                url: Some("https://khanacademy.org/physics".to_string()),
                thumbnail: None,
                relevance_score: 0.95,
                textbook_page: None,
                duration: None,
                difficulty: Some(Difficulty::Beginner),
            },
            RelatedResource {
                id: "2".to_string(),
                title: "MIT Physics Lecture".to_string(),
                description: "Comprehensive video lecture series".to_string(),
                resource_type: ResourceType::Youtube,
                url: Some("https://youtube.com/watch?v=example".to_string()),
                thumbnail: Some("/placeholder.svg".to_string()),
                relevance_score: 0.88,
                textbook_page: None,
                duration: Some("45:30".to_string()),
                difficulty: Some(Difficulty::Advanced),
            },
            RelatedResource {
                id: "3".to_string(),
                title: "Related Chapter: Mechanics".to_string(),
                description: "Chapter 3 discusses similar concepts".to_string(),
                resource_type: ResourceType::Textbook,
                url: None,
                thumbnail: None,
                relevance_score: 0.82,
                textbook_page: Some(67),
                duration: None,
                difficulty: Some(Difficulty::Intermediate),
            },
        ])
    }

    async fn explain(&self, _context: &StudyContext) -> AssistantResult<AiExplanation> {
        tokio::time::sleep(self.explanation_delay).await;

        Ok(AiExplanation {
            id: "1".to_string(),
            topic: "Physics Concepts".to_string(),
            explanation: "This concept involves the fundamental principles of motion and forces. \
                          When an object is in motion, it follows Newton's laws of physics..."
                .to_string(),
            examples: vec![
                "A ball thrown in the air follows a parabolic path".to_string(),
                "A car accelerating from rest demonstrates changing velocity".to_string(),
            ],
            key_terms: ["velocity", "acceleration", "force", "motion"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            related_concepts: ["Newton's Laws", "Kinematics", "Dynamics"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            difficulty: Difficulty::Intermediate,
        })
    }
}
