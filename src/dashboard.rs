//! Study dashboard
//!
//! Aggregate statistics over reading sessions, progress, annotations and
//! flashcards.

use serde::Serialize;

use crate::annotations::{Annotation, AnnotationType};
use crate::flashcards::Flashcard;
use crate::library::{ReadingProgress, StudySession, Textbook};

const RECENTLY_READ_LIMIT: usize = 3;
const RECENT_ITEMS_LIMIT: usize = 10;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats<'a> {
    /// Sum over finished sessions; open sessions count as zero
    pub total_reading_minutes: f64,
    pub books_in_progress: usize,
    /// 0-100
    pub average_completion: f64,
    pub total_annotations: usize,
    pub highlight_count: usize,
    pub note_count: usize,
    pub flashcard_count: usize,
    pub recently_read: Vec<&'a Textbook>,
    pub recent_annotations: &'a [Annotation],
    pub recent_flashcards: &'a [Flashcard],
}

impl<'a> DashboardStats<'a> {
    pub fn compute(
        books: &'a [Textbook],
        progress: &[ReadingProgress],
        sessions: &[StudySession],
        annotations: &'a [Annotation],
        flashcards: &'a [Flashcard],
    ) -> Self {
        let total_reading_minutes = sessions.iter().map(StudySession::duration_minutes).sum();

        let count_type = |t: AnnotationType| {
            annotations.iter().filter(|a| a.annotation_type == t).count()
        };

        let average_completion = if progress.is_empty() {
            0.0
        } else {
            progress.iter().map(|p| p.completion_percentage).sum::<f64>() / progress.len() as f64
        };

        let mut by_recency: Vec<&ReadingProgress> = progress.iter().collect();
        by_recency.sort_by(|a, b| b.last_read_at.cmp(&a.last_read_at));
        let recently_read = by_recency
            .into_iter()
            .take(RECENTLY_READ_LIMIT)
            .filter_map(|p| books.iter().find(|b| b.id() == p.textbook_id))
            .collect();

        Self {
            total_reading_minutes,
            books_in_progress: progress.len(),
            average_completion,
            total_annotations: annotations.len(),
            highlight_count: count_type(AnnotationType::Highlight),
            note_count: count_type(AnnotationType::Note),
            flashcard_count: flashcards.len(),
            recently_read,
            recent_annotations: &annotations[..annotations.len().min(RECENT_ITEMS_LIMIT)],
            recent_flashcards: &flashcards[..flashcards.len().min(RECENT_ITEMS_LIMIT)],
        }
    }

    /// Whole hours and remaining rounded minutes of reading time
    pub fn reading_time_split(&self) -> (u64, u64) {
        let total = self.total_reading_minutes.max(0.0).round() as u64;
        (total / 60, total % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::{AnnotationDraft, HighlightColor};
    use crate::library::Catalog;
    use chrono::{Duration, TimeZone, Utc};

    fn session(minutes: Option<i64>) -> StudySession {
        let start = Utc.with_ymd_and_hms(2024, 1, 20, 10, 0, 0).unwrap();
        StudySession {
            id: "s".to_string(),
            textbook_id: "physics-101".to_string(),
            start_time: start,
            end_time: minutes.map(|m| start + Duration::minutes(m)),
            pages_read: 5,
            annotations_created: 1,
        }
    }

    fn annotations() -> Vec<Annotation> {
        let mut list: Vec<Annotation> = (0..11)
            .map(|i| {
                Annotation::from_draft(AnnotationDraft::highlight(
                    "physics-101",
                    i + 1,
                    "Velocity",
                    HighlightColor::Yellow,
                ))
            })
            .collect();
        list.push(Annotation::from_draft(
            AnnotationDraft::note("physics-101", 2, "Acceleration", HighlightColor::Pink, "dv/dt")
                .unwrap(),
        ));
        list
    }

    #[test]
    fn test_compute() {
        let catalog = Catalog::bundled().unwrap();
        let sessions = vec![session(Some(90)), session(Some(45)), session(None)];
        let annotations = annotations();

        let stats = DashboardStats::compute(
            catalog.textbooks(),
            catalog.all_progress(),
            &sessions,
            &annotations,
            &[],
        );

        assert!((stats.total_reading_minutes - 135.0).abs() < 1e-9);
        assert_eq!(stats.reading_time_split(), (2, 15));
        assert_eq!(stats.books_in_progress, 3);
        assert_eq!(stats.total_annotations, 12);
        assert_eq!(stats.highlight_count, 11);
        assert_eq!(stats.note_count, 1);
        assert_eq!(stats.recent_annotations.len(), 10);
        assert_eq!(stats.flashcard_count, 0);
        assert_eq!(stats.recently_read.len(), 3);
        assert_eq!(stats.recently_read[0].id(), "physics-101");
    }

    #[test]
    fn test_empty_inputs() {
        let stats = DashboardStats::compute(&[], &[], &[], &[], &[]);
        assert_eq!(stats.average_completion, 0.0);
        assert_eq!(stats.reading_time_split(), (0, 0));
        assert!(stats.recently_read.is_empty());
    }

    #[test]
    fn test_average_completion() {
        let catalog = Catalog::bundled().unwrap();
        let progress = vec![
            ReadingProgress {
                completion_percentage: 20.0,
                ..ReadingProgress::new("physics-101", 350)
            },
            ReadingProgress {
                completion_percentage: 60.0,
                ..ReadingProgress::new("missing", 100)
            },
        ];

        let stats = DashboardStats::compute(catalog.textbooks(), &progress, &[], &[], &[]);
        assert!((stats.average_completion - 40.0).abs() < 1e-9);
        // progress for unknown books is skipped
        assert_eq!(stats.recently_read.len(), 1);
    }
}
