//! Field matcher: carves field values out of a target document by locating
//! template anchors left to right.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::diagnostics::Diagnostic;
use crate::models::config::MatcherConfig;
use crate::models::extraction::{DocumentExtraction, PageOutcome};
use crate::models::template::{Template, TemplatePage};

/// Matches normalized document pages against a compiled template.
pub struct FieldMatcher {
    config: MatcherConfig,
}

impl FieldMatcher {
    /// Create a matcher with the given configuration.
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Extract field values from every page of a document.
    ///
    /// `pages` must be whitespace-normalized. A missing anchor only ends
    /// matching for its own page; values from later pages overwrite earlier
    /// values of the same field.
    pub fn match_document<S: AsRef<str>>(
        &self,
        template: &Template,
        pages: &[S],
        source: &str,
    ) -> DocumentExtraction {
        let mut result = DocumentExtraction::new(source);

        if pages.len() != template.page_count() {
            result.diagnostics.push(Diagnostic::PageCountMismatch {
                document: source.to_string(),
                expected: template.page_count(),
                actual: pages.len(),
            });
        }

        for (idx, page) in template.pages.iter().enumerate() {
            let outcome = match pages.get(idx) {
                Some(text) => self.match_page(
                    page,
                    text.as_ref(),
                    idx + 1,
                    source,
                    &mut result.fields,
                    &mut result.diagnostics,
                ),
                None => PageOutcome::Missing,
            };
            result.pages.push(outcome);
        }

        debug!(
            "{}: extracted {} fields from {} pages",
            source,
            result.fields.len(),
            result.pages.len()
        );

        result
    }

    fn match_page(
        &self,
        page: &TemplatePage,
        text: &str,
        page_number: usize,
        source: &str,
        fields: &mut BTreeMap<String, String>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> PageOutcome {
        let final_anchor = page.segments.len().saturating_sub(1);
        let mut last_end = page.leading().len();
        let mut matched = 0;

        for (i, (field, anchor)) in page.fields.iter().zip(page.segments.iter().skip(1)).enumerate() {
            let Some(loc) = find_anchor(text, anchor, last_end, i + 1 == final_anchor) else {
                diagnostics.push(Diagnostic::AnchorNotFound {
                    document: source.to_string(),
                    page: page_number,
                    anchor: anchor.clone(),
                    field: field.clone(),
                });
                return PageOutcome::Aborted {
                    matched,
                    missing_anchor: anchor.clone(),
                };
            };

            if !self.config.is_ignored(field) {
                trace!("Page {}: {} = {:?}", page_number, field, &text[last_end..loc]);
                fields.insert(field.clone(), text[last_end..loc].to_string());
            }

            last_end = loc + anchor.len();
            matched += 1;
        }

        PageOutcome::Complete { matched }
    }
}

impl Default for FieldMatcher {
    fn default() -> Self {
        Self::new(MatcherConfig::default())
    }
}

/// Find the first occurrence of `anchor` in `text` at or after `from`.
///
/// An empty final anchor stands for the end of the page. A cursor outside
/// the text or off a character boundary finds nothing.
fn find_anchor(text: &str, anchor: &str, from: usize, is_final: bool) -> Option<usize> {
    let rest = text.get(from..)?;
    if anchor.is_empty() && is_final {
        return Some(text.len());
    }
    rest.find(anchor).map(|offset| from + offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateCompiler;
    use pretty_assertions::assert_eq;

    fn compile(pages: &[&str]) -> Template {
        TemplateCompiler::new().compile(pages).unwrap().template
    }

    fn values(result: &DocumentExtraction) -> Vec<(&str, &str)> {
        result
            .fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn test_match_basic_page() {
        let template = compile(&["Name:{NAME}Date:{DATE}"]);
        let result = FieldMatcher::default().match_document(
            &template,
            &["Name:JohnDate:2024-01-01"],
            "a.pdf",
        );

        assert_eq!(values(&result), vec![("DATE", "2024-01-01"), ("NAME", "John")]);
        assert_eq!(result.source, "a.pdf");
        assert!(result.diagnostics.is_empty());
        assert!(result.is_complete());
    }

    #[test]
    fn test_missing_anchor_leaves_its_field_unset() {
        let template = compile(&["Name:{NAME}Date:{DATE}"]);
        let result = FieldMatcher::default().match_document(
            &template,
            &["Name:JohnXX:2024-01-01"],
            "b.pdf",
        );

        // "Date:" ends NAME, so NAME is never assigned
        assert!(result.fields.is_empty());
        assert_eq!(
            result.diagnostics,
            vec![Diagnostic::AnchorNotFound {
                document: "b.pdf".to_string(),
                page: 1,
                anchor: "Date:".to_string(),
                field: "NAME".to_string(),
            }]
        );
        assert_eq!(
            result.pages,
            vec![PageOutcome::Aborted {
                matched: 0,
                missing_anchor: "Date:".to_string(),
            }]
        );
    }

    #[test]
    fn test_abort_is_limited_to_one_page() {
        let template = compile(&["A:{A}B:{B}C:{C}end", "X:{X}Y:{Y}"]);
        let result = FieldMatcher::default().match_document(
            &template,
            &["A:1B:2Q:3end", "X:9Y:8"],
            "c.pdf",
        );

        assert_eq!(values(&result), vec![("A", "1"), ("X", "9"), ("Y", "8")]);
        assert_eq!(
            result.pages[0],
            PageOutcome::Aborted {
                matched: 1,
                missing_anchor: "C:".to_string(),
            }
        );
        assert_eq!(result.pages[1], PageOutcome::Complete { matched: 2 });
        assert_eq!(result.diagnostics.len(), 1);
    }

    #[test]
    fn test_ignored_fields_are_dropped() {
        let template = compile(&["Ref:{IGNORE}Name:{NAME}Stamp:{IGNORE}."]);
        let result = FieldMatcher::default().match_document(
            &template,
            &["Ref:XYZ-99Name:AnnStamp:2024."],
            "d.pdf",
        );

        assert_eq!(values(&result), vec![("NAME", "Ann")]);
        assert_eq!(result.pages[0], PageOutcome::Complete { matched: 3 });
    }

    #[test]
    fn test_custom_ignore_field() {
        let template = compile(&["Ref:{SKIP}Name:{NAME}"]);
        let matcher = FieldMatcher::new(MatcherConfig {
            ignore_field: "SKIP".to_string(),
        });
        let result = matcher.match_document(&template, &["Ref:42Name:Ann"], "e.pdf");

        assert_eq!(values(&result), vec![("NAME", "Ann")]);
    }

    #[test]
    fn test_substituted_values_are_recovered() {
        let template_text = "Invoice{NO}Issued{DATE}Buyer{BUYER}Total{TOTAL}PLNThankyou";
        let template = compile(&[template_text]);
        let substitutions = [
            ("{NO}", "FV/2024/0017"),
            ("{DATE}", "03.02.2024"),
            ("{BUYER}", "ACMESp.zo.o."),
            ("{TOTAL}", "1230,00"),
        ];
        let mut target = template_text.to_string();
        for (placeholder, value) in substitutions {
            target = target.replace(placeholder, value);
        }

        let result = FieldMatcher::default().match_document(&template, &[target], "f.pdf");

        assert_eq!(result.get("NO"), Some("FV/2024/0017"));
        assert_eq!(result.get("DATE"), Some("03.02.2024"));
        assert_eq!(result.get("BUYER"), Some("ACMESp.zo.o."));
        assert_eq!(result.get("TOTAL"), Some("1230,00"));
        assert!(result.is_complete());
    }

    #[test]
    fn test_leading_placeholder_and_empty_values() {
        let template = compile(&["{CODE}|{NOTE}|"]);
        let result = FieldMatcher::default().match_document(&template, &["AB12||"], "g.pdf");

        assert_eq!(values(&result), vec![("CODE", "AB12"), ("NOTE", "")]);
    }

    #[test]
    fn test_static_page_has_no_fields() {
        let template = compile(&["Termsandconditions", "Name:{NAME}"]);
        let result = FieldMatcher::default().match_document(
            &template,
            &["Somethingelseentirely", "Name:Bo"],
            "h.pdf",
        );

        assert_eq!(values(&result), vec![("NAME", "Bo")]);
        assert_eq!(result.pages[0], PageOutcome::Complete { matched: 0 });
    }

    #[test]
    fn test_later_page_overwrites_duplicate_field() {
        let template = compile(&["A:{NAME}", "B:{NAME}"]);
        let result =
            FieldMatcher::default().match_document(&template, &["A:first", "B:second"], "i.pdf");

        assert_eq!(result.get("NAME"), Some("second"));
    }

    #[test]
    fn test_short_document_leaves_pages_missing() {
        let template = compile(&["A:{A}", "B:{B}"]);
        let result = FieldMatcher::default().match_document(&template, &["A:1"], "j.pdf");

        assert_eq!(values(&result), vec![("A", "1")]);
        assert_eq!(result.pages[1], PageOutcome::Missing);
        assert_eq!(
            result.diagnostics,
            vec![Diagnostic::PageCountMismatch {
                document: "j.pdf".to_string(),
                expected: 2,
                actual: 1,
            }]
        );
    }

    #[test]
    fn test_extra_document_pages_are_ignored() {
        let template = compile(&["A:{A}"]);
        let result =
            FieldMatcher::default().match_document(&template, &["A:1", "A:2"], "k.pdf");

        assert_eq!(result.get("A"), Some("1"));
        assert_eq!(result.pages.len(), 1);
        assert_eq!(result.diagnostics.len(), 1);
    }

    #[test]
    fn test_target_shorter_than_leading_segment() {
        let template = compile(&["Averylongheader:{X}"]);
        let result = FieldMatcher::default().match_document(&template, &["Short"], "l.pdf");

        assert!(result.fields.is_empty());
        assert!(!result.is_complete());
    }

    #[test]
    fn test_malformed_page_pairs_up_to_shorter_list() {
        let template = Template::new(vec![TemplatePage::new(
            vec!["A".to_string(), "B".to_string()],
            vec!["a".to_string(), "b".to_string()],
        )]);
        let result = FieldMatcher::default().match_document(&template, &["a1b2"], "m.pdf");

        assert_eq!(values(&result), vec![("A", "1")]);
    }

    #[test]
    fn test_find_anchor() {
        assert_eq!(find_anchor("abcabc", "bc", 0, false), Some(1));
        assert_eq!(find_anchor("abcabc", "bc", 2, false), Some(4));
        assert_eq!(find_anchor("abc", "", 1, false), Some(1));
        assert_eq!(find_anchor("abc", "", 1, true), Some(3));
        assert_eq!(find_anchor("abc", "a", 4, false), None);
        assert_eq!(find_anchor("żółw", "w", 1, false), None);
    }
}
