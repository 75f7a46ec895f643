//! Placeholder token pattern.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `{FIELD_NAME}`: uppercase ASCII letters, digits and underscore in braces.
    pub static ref PLACEHOLDER: Regex = Regex::new(r"\{([A-Z0-9_]+)\}").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_accepts_field_names() {
        assert!(PLACEHOLDER.is_match("{NAME}"));
        assert!(PLACEHOLDER.is_match("{INVOICE_NO_2}"));
        assert_eq!(&PLACEHOLDER.captures("x{A_1}y").unwrap()[1], "A_1");
    }

    #[test]
    fn test_placeholder_rejects_other_braces() {
        assert!(!PLACEHOLDER.is_match("{name}"));
        assert!(!PLACEHOLDER.is_match("{}"));
        assert!(!PLACEHOLDER.is_match("{NAME-1}"));
        assert!(!PLACEHOLDER.is_match("(NAME)"));
    }
}
