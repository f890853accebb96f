//! Highlight injection into page HTML
//!
//! Wraps the selected text of each highlight annotation in a tagged span.
//! Injection is idempotent: a span carries the annotation id in a data
//! attribute, and annotations whose id is already present are skipped, so
//! the same content can be re-rendered any number of times.

use std::collections::HashSet;
use std::ops::Range;

use lol_html::html_content::{ContentType, TextType};
use lol_html::{doc_text, element, rewrite_str, RewriteStrSettings};
use regex::Regex;

use crate::annotations::Annotation;

/// Named, decimal and hex character references
const ENTITY_PATTERN: &str = r"&(?:[A-Za-z][A-Za-z0-9]*|#[0-9]+|#[xX][0-9A-Fa-f]+);";

/// Configuration for highlight injection
#[derive(Debug, Clone)]
pub struct HighlightConfig {
    /// CSS class prefix; the color is appended as `{prefix}-{color}`
    pub class_prefix: String,
    /// Data attribute carrying the annotation ID
    pub id_attribute: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            class_prefix: "highlight".to_string(),
            id_attribute: "data-annotation-id".to_string(),
        }
    }
}

/// Result of highlight injection
#[derive(Debug)]
pub struct InjectionResult {
    /// The processed HTML with highlight spans
    pub html: String,
    /// Number of highlights injected by this call
    pub injected_count: usize,
    /// Annotations whose text could not be located
    pub failed_annotations: Vec<String>,
}

/// Errors while inspecting page markup
#[derive(Debug, thiserror::Error)]
pub enum InjectError {
    #[error("HTML rewrite failed: {0}")]
    RewriteError(String),
}

/// Inject highlight spans into HTML content
///
/// Annotations are applied longest selected text first so a shorter quote
/// that is contained in a longer one cannot split the longer match. Each
/// selected text is matched literally (pattern metacharacters escaped) and
/// only its first occurrence in text content is wrapped. Text that cannot
/// be found is skipped and reported in `failed_annotations`; it is not an
/// error.
pub fn inject_highlights(
    html: &str,
    annotations: &[Annotation],
    config: &HighlightConfig,
) -> InjectionResult {
    if annotations.is_empty() {
        return InjectionResult {
            html: html.to_string(),
            injected_count: 0,
            failed_annotations: vec![],
        };
    }

    let mut marked = existing_markers(html, config).unwrap_or_else(|e| {
        tracing::warn!("Could not scan existing highlight markers: {}", e);
        HashSet::new()
    });

    let mut ordered: Vec<&Annotation> = annotations.iter().filter(|a| a.is_highlight()).collect();
    ordered.sort_by(|a, b| {
        b.selected_text
            .chars()
            .count()
            .cmp(&a.selected_text.chars().count())
    });

    let entities = match Regex::new(ENTITY_PATTERN) {
        Ok(re) => re,
        Err(e) => {
            tracing::warn!("Entity pattern rejected: {}", e);
            return InjectionResult {
                html: html.to_string(),
                injected_count: 0,
                failed_annotations: ordered.iter().map(|a| a.id.clone()).collect(),
            };
        }
    };

    let mut output = html.to_string();
    let mut injected_count = 0;
    let mut failed_annotations = Vec::new();

    for annotation in ordered {
        if marked.contains(&annotation.id) || output.contains(&marker(annotation, config)) {
            continue;
        }

        let pattern = match Regex::new(&regex::escape(&annotation.selected_text)) {
            Ok(re) => re,
            Err(e) => {
                tracing::warn!(id = %annotation.id, "Highlight pattern rejected: {}", e);
                failed_annotations.push(annotation.id.clone());
                continue;
            }
        };

        match wrap_first_match(&output, &pattern, &entities, annotation, config) {
            Ok(Some(html)) => {
                output = html;
                marked.insert(annotation.id.clone());
                injected_count += 1;
            }
            Ok(None) => {
                tracing::debug!(
                    id = %annotation.id,
                    page = annotation.page_number,
                    "Highlight text not found in page content"
                );
                failed_annotations.push(annotation.id.clone());
            }
            Err(e) => {
                tracing::warn!(id = %annotation.id, "Highlight injection failed: {}", e);
                failed_annotations.push(annotation.id.clone());
            }
        }
    }

    InjectionResult {
        html: output,
        injected_count,
        failed_annotations,
    }
}

/// Inject highlights with the default configuration and return only the HTML
pub fn render_highlights(content: &str, annotations: &[Annotation]) -> String {
    inject_highlights(content, annotations, &HighlightConfig::default()).html
}

/// Collect annotation ids already carried by elements in `html`
pub fn existing_markers(html: &str, config: &HighlightConfig) -> Result<HashSet<String>, InjectError> {
    let mut ids = HashSet::new();
    let selector = format!("[{}]", config.id_attribute);

    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![element!(selector, |el| {
                if let Some(id) = el.get_attribute(&config.id_attribute) {
                    ids.insert(id);
                }
                Ok(())
            })],
            ..RewriteStrSettings::default()
        },
    )
    .map_err(|e| InjectError::RewriteError(e.to_string()))?;

    Ok(ids)
}

/// The attribute text that marks `annotation` as injected
fn marker(annotation: &Annotation, config: &HighlightConfig) -> String {
    format!(
        "{}=\"{}\"",
        config.id_attribute,
        html_escape::encode_double_quoted_attribute(&annotation.id)
    )
}

/// Wrap the first occurrence of `pattern` in the document's text content
///
/// Matching runs over lol_html text chunks, so tags, attribute values,
/// comments and raw-text elements are never touched. Returns `None` when
/// no chunk contains a match.
fn wrap_first_match(
    html: &str,
    pattern: &Regex,
    entities: &Regex,
    annotation: &Annotation,
    config: &HighlightConfig,
) -> Result<Option<String>, InjectError> {
    let mut wrapped = false;

    let output = rewrite_str(
        html,
        RewriteStrSettings {
            document_content_handlers: vec![doc_text!(|t| {
                if wrapped || !matches!(t.text_type(), TextType::Data) {
                    return Ok(());
                }

                let text = t.as_str().to_string();
                if let Some(range) = first_text_match(&text, pattern, entities) {
                    let replaced = format!(
                        "{}{}{}",
                        &text[..range.start],
                        format_highlight_span(annotation, &text[range.clone()], config),
                        &text[range.end..]
                    );
                    t.replace(&replaced, ContentType::Html);
                    wrapped = true;
                }
                Ok(())
            })],
            ..RewriteStrSettings::default()
        },
    )
    .map_err(|e| InjectError::RewriteError(e.to_string()))?;

    Ok(wrapped.then_some(output))
}

/// First match in raw text that does not start or end inside an entity reference
fn first_text_match(text: &str, pattern: &Regex, entities: &Regex) -> Option<Range<usize>> {
    let refs: Vec<Range<usize>> = entities.find_iter(text).map(|m| m.range()).collect();
    let splits_entity = |pos: usize| refs.iter().any(|r| r.start < pos && pos < r.end);

    pattern
        .find_iter(text)
        .map(|m| m.range())
        .find(|m| !splits_entity(m.start) && !splits_entity(m.end))
}

/// Format a highlight span element
fn format_highlight_span(annotation: &Annotation, text: &str, config: &HighlightConfig) -> String {
    format!(
        "<span class=\"{}\" {}>{}</span>",
        annotation.highlight_class(&config.class_prefix),
        marker(annotation, config),
        text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::{AnnotationDraft, HighlightColor};

    fn highlight(text: &str, color: HighlightColor) -> Annotation {
        Annotation::from_draft(AnnotationDraft::highlight("physics-101", 1, text, color))
    }

    #[test]
    fn test_inject_single_highlight() {
        let html = "<p>Hello world, this is a test.</p>";
        let annotation = highlight("world", HighlightColor::Yellow);

        let result = inject_highlights(html, &[annotation.clone()], &HighlightConfig::default());

        assert_eq!(result.injected_count, 1);
        assert_eq!(
            result.html,
            format!(
                "<p>Hello <span class=\"highlight highlight-yellow\" data-annotation-id=\"{}\">world</span>, this is a test.</p>",
                annotation.id
            )
        );
        assert!(result.failed_annotations.is_empty());
    }

    #[test]
    fn test_inject_no_annotations() {
        let html = "<p>Hello world</p>";
        let result = inject_highlights(html, &[], &HighlightConfig::default());

        assert_eq!(result.injected_count, 0);
        assert_eq!(result.html, html);
        assert_eq!(render_highlights(html, &[]), html);
    }

    #[test]
    fn test_render_is_idempotent() {
        let html = "<h2>1.1 Kinematics</h2><p>Velocity is the rate of change of position.</p>";
        let annotations = vec![
            highlight("Velocity", HighlightColor::Green),
            highlight("rate of change", HighlightColor::Blue),
            highlight("not on this page", HighlightColor::Pink),
        ];

        let once = render_highlights(html, &annotations);
        let twice = render_highlights(&once, &annotations);

        assert_eq!(once, twice);
        assert_eq!(once.matches("<span").count(), 2);
    }

    #[test]
    fn test_longest_text_wins() {
        let html = "<p>Kinematics is the branch of mechanics.</p>";
        let short = highlight("Kinematics", HighlightColor::Yellow);
        let long = highlight("Kinematics is the branch", HighlightColor::Green);

        // short first in input order; longer must still be wrapped intact
        let out = render_highlights(html, &[short.clone(), long.clone()]);

        let long_open = format!(
            "<span class=\"highlight highlight-green\" data-annotation-id=\"{}\">",
            long.id
        );
        let start = out.find(&long_open).unwrap();
        let inner = &out[start + long_open.len()..];
        assert!(inner.contains("is the branch</span>"));
        assert!(inner.starts_with(&format!(
            "<span class=\"highlight highlight-yellow\" data-annotation-id=\"{}\">Kinematics</span>",
            short.id
        )));
        assert_eq!(out.matches("<span").count(), out.matches("</span>").count());
    }

    #[test]
    fn test_special_characters_match_literally() {
        let html = "<p>Solve f(x) = [a.b]* for x, not f(x)= axb.</p>";
        let annotation = highlight("f(x) = [a.b]*", HighlightColor::Orange);

        let result = inject_highlights(html, &[annotation.clone()], &HighlightConfig::default());

        assert_eq!(result.injected_count, 1);
        assert!(result.html.contains(&format!(
            "data-annotation-id=\"{}\">f(x) = [a.b]*</span> for x",
            annotation.id
        )));
    }

    #[test]
    fn test_replacement_text_is_not_expanded() {
        let html = "<p>It costs $1 and $2.</p>";
        let out = render_highlights(html, &[highlight("$1", HighlightColor::Yellow)]);
        assert!(out.contains(">$1</span> and $2."));
    }

    #[test]
    fn test_only_first_occurrence_wrapped() {
        let html = "<p>energy in, energy out</p>";
        let out = render_highlights(html, &[highlight("energy", HighlightColor::Yellow)]);

        assert_eq!(out.matches("<span").count(), 1);
        assert!(out.starts_with("<p><span"));
        assert!(out.ends_with(", energy out</p>"));
    }

    #[test]
    fn test_missing_text_is_skipped() {
        let html = "<p>Position and displacement</p>";
        let annotation = highlight("Position  and", HighlightColor::Yellow);

        let result = inject_highlights(html, &[annotation.clone()], &HighlightConfig::default());

        assert_eq!(result.html, html);
        assert_eq!(result.failed_annotations, vec![annotation.id]);
    }

    #[test]
    fn test_markup_is_not_matched() {
        let html = "<p class=\"intro\">An intro paragraph</p>";
        let out = render_highlights(html, &[highlight("intro", HighlightColor::Yellow)]);

        assert!(out.starts_with("<p class=\"intro\">An <span"));
    }

    #[test]
    fn test_entities_are_not_split() {
        let html = "<p>Salt &amp; pepper; amp up</p>";
        let annotation = highlight("amp", HighlightColor::Yellow);

        let result = inject_highlights(html, &[annotation.clone()], &HighlightConfig::default());

        assert_eq!(result.injected_count, 1);
        assert!(result.html.starts_with("<p>Salt &amp; pepper; <span"));
        assert!(result.html.ends_with(&format!(
            "data-annotation-id=\"{}\">amp</span> up</p>",
            annotation.id
        )));
    }

    #[test]
    fn test_entity_only_match_is_skipped() {
        let html = "<p>A&nbsp;B &#8322;</p>";
        let result = inject_highlights(
            html,
            &[highlight("nbsp", HighlightColor::Yellow), highlight("8322", HighlightColor::Blue)],
            &HighlightConfig::default(),
        );

        assert_eq!(result.html, html);
        assert_eq!(result.failed_annotations.len(), 2);
    }

    #[test]
    fn test_quoted_angle_bracket_in_attribute() {
        let html = r#"<p title="a>Kinematics">Kinematics</p>"#;
        let annotation = highlight("Kinematics", HighlightColor::Yellow);

        let out = render_highlights(html, &[annotation.clone()]);

        assert_eq!(
            out,
            format!(
                r#"<p title="a>Kinematics"><span class="highlight highlight-yellow" data-annotation-id="{}">Kinematics</span></p>"#,
                annotation.id
            )
        );
    }

    #[test]
    fn test_comments_and_scripts_are_not_matched() {
        let html = "<!-- Velocity --><script>var Velocity = 1;</script><p>Velocity</p>";
        let out = render_highlights(html, &[highlight("Velocity", HighlightColor::Green)]);

        assert!(out.starts_with("<!-- Velocity --><script>var Velocity = 1;</script><p><span"));
        assert_eq!(out.matches("<span").count(), 1);
    }

    #[test]
    fn test_custom_class_prefix() {
        let config = HighlightConfig {
            class_prefix: "hl".to_string(),
            ..HighlightConfig::default()
        };
        let annotation = highlight("world", HighlightColor::Pink);

        let result = inject_highlights("<p>world</p>", &[annotation], &config);
        assert!(result.html.contains("<span class=\"hl hl-pink\" data-annotation-id="));
    }

    #[test]
    fn test_notes_are_not_rendered() {
        let html = "<p>Velocity</p>";
        let note = Annotation::from_draft(
            AnnotationDraft::note("physics-101", 1, "Velocity", HighlightColor::Blue, "dx/dt").unwrap(),
        );
        assert_eq!(render_highlights(html, &[note]), html);
    }

    #[test]
    fn test_existing_markers() {
        let html = r#"<p><span class="highlight" data-annotation-id="abc">x</span><span data-annotation-id='def'>y</span></p>"#;
        let ids = existing_markers(html, &HighlightConfig::default()).unwrap();

        assert_eq!(ids.len(), 2);
        assert!(ids.contains("abc"));
        assert!(ids.contains("def"));
    }
}
