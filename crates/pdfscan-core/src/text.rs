//! Text normalization shared by template and target documents.

/// Remove every whitespace character.
///
/// Anchors are compared on this form, so template pages and target pages
/// must both go through it.
pub fn normalize(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Normalize every page of a document.
pub fn normalize_pages<S: AsRef<str>>(pages: &[S]) -> Vec<String> {
    pages.iter().map(|page| normalize(page.as_ref())).collect()
}
