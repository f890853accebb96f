//! Annotation search panel filters

use serde::{Deserialize, Serialize};

use super::types::{Annotation, AnnotationType, HighlightColor};

/// Sort order for search results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Newest first
    #[default]
    Date,
    /// Ascending page number
    Page,
}

/// Filters for listing annotations
#[derive(Debug, Clone, Default)]
pub struct AnnotationQuery {
    /// Case-insensitive match against selected text or note
    pub text: String,
    pub annotation_type: Option<AnnotationType>,
    pub color: Option<HighlightColor>,
    pub sort_by: SortBy,
}

/// Filtered view over a set of annotations
#[derive(Debug, Clone)]
pub struct SearchResults {
    pub annotations: Vec<Annotation>,
    /// Size of the unfiltered set
    pub total: usize,
}

impl SearchResults {
    /// "N of M annotations"
    pub fn summary(&self) -> String {
        format!("{} of {} annotations", self.annotations.len(), self.total)
    }
}

impl AnnotationQuery {
    /// Whether any criterion differs from the defaults
    pub fn is_filtered(&self) -> bool {
        !self.text.is_empty()
            || self.annotation_type.is_some()
            || self.color.is_some()
            || self.sort_by != SortBy::Date
    }

    pub fn matches(&self, annotation: &Annotation) -> bool {
        let needle = self.text.to_lowercase();
        let matches_text = needle.is_empty()
            || annotation.selected_text.to_lowercase().contains(&needle)
            || annotation
                .note
                .as_ref()
                .is_some_and(|n| n.to_lowercase().contains(&needle));

        let matches_type = self
            .annotation_type
            .map_or(true, |t| annotation.annotation_type == t);
        let matches_color = self.color.map_or(true, |c| annotation.color == c);

        matches_text && matches_type && matches_color
    }

    /// Apply the filters and ordering to `annotations`
    pub fn apply(&self, annotations: &[Annotation]) -> SearchResults {
        let mut filtered: Vec<Annotation> = annotations
            .iter()
            .filter(|a| self.matches(a))
            .cloned()
            .collect();

        match self.sort_by {
            SortBy::Date => filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortBy::Page => filtered.sort_by_key(|a| a.page_number),
        }

        SearchResults {
            annotations: filtered,
            total: annotations.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::AnnotationDraft;
    use chrono::{Duration, Utc};

    fn sample() -> Vec<Annotation> {
        let base = Utc::now();
        let mut out = Vec::new();

        let drafts = vec![
            AnnotationDraft::highlight("physics-101", 5, "Velocity is the rate", HighlightColor::Yellow),
            AnnotationDraft::note("physics-101", 2, "Displacement", HighlightColor::Blue, "change in position")
                .unwrap(),
            AnnotationDraft::highlight("physics-101", 9, "acceleration", HighlightColor::Blue),
        ];

        for (i, draft) in drafts.into_iter().enumerate() {
            let mut a = Annotation::from_draft(draft);
            a.created_at = base + Duration::seconds(i as i64);
            out.push(a);
        }
        out
    }

    #[test]
    fn test_default_query_sorts_newest_first() {
        let query = AnnotationQuery::default();
        assert!(!query.is_filtered());

        let results = query.apply(&sample());
        let texts: Vec<_> = results.annotations.iter().map(|a| a.selected_text.as_str()).collect();
        assert_eq!(texts, vec!["acceleration", "Displacement", "Velocity is the rate"]);
        assert_eq!(results.summary(), "3 of 3 annotations");
    }

    #[test]
    fn test_text_matches_note_case_insensitively() {
        let query = AnnotationQuery {
            text: "POSITION".to_string(),
            ..Default::default()
        };

        let results = query.apply(&sample());
        assert_eq!(results.annotations.len(), 1);
        assert_eq!(results.annotations[0].selected_text, "Displacement");
        assert_eq!(results.total, 3);
    }

    #[test]
    fn test_type_and_color_filters() {
        let query = AnnotationQuery {
            annotation_type: Some(AnnotationType::Highlight),
            color: Some(HighlightColor::Blue),
            ..Default::default()
        };
        assert!(query.is_filtered());

        let results = query.apply(&sample());
        assert_eq!(results.annotations.len(), 1);
        assert_eq!(results.annotations[0].selected_text, "acceleration");
    }

    #[test]
    fn test_sort_by_page() {
        let query = AnnotationQuery {
            sort_by: SortBy::Page,
            ..Default::default()
        };

        let pages: Vec<_> = query.apply(&sample()).annotations.iter().map(|a| a.page_number).collect();
        assert_eq!(pages, vec![2, 5, 9]);
    }
}
