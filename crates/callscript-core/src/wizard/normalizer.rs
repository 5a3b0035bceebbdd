//! Extraction-field normalization applied on submission.

use callscript_types::agent::NormalizedExtractionField;
use callscript_types::draft::ExtractionField;

/// Turn a human-readable field name into its storage key.
///
/// Rules, applied in order:
/// - Trim and lowercase
/// - Collapse each run of whitespace into a single `_`
/// - Drop every character outside `[a-z0-9_]`
///
/// `" Phone #1 "` -> `"phone_1"`, `"Email Address"` -> `"email_address"`.
pub fn normalize_field_key(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect()
}

/// Normalize extraction fields for persistence.
///
/// Trims names and descriptions and drops entries whose trimmed name is
/// empty. The trimmed original name is kept as `display_name`.
pub fn normalize_extraction_fields(fields: &[ExtractionField]) -> Vec<NormalizedExtractionField> {
    fields
        .iter()
        .filter_map(|field| {
            let display_name = field.name.trim();
            if display_name.is_empty() {
                return None;
            }
            Some(NormalizedExtractionField {
                name: normalize_field_key(display_name),
                display_name: display_name.to_string(),
                description: field.description.trim().to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_phone_number_example() {
        assert_eq!(normalize_field_key(" Phone #1 "), "phone_1");
    }

    #[test]
    fn test_email_address_example() {
        assert_eq!(normalize_field_key("Email Address"), "email_address");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(normalize_field_key("Preferred \t  Call\nTime"), "preferred_call_time");
    }

    #[test]
    fn test_punctuation_stripped() {
        assert_eq!(normalize_field_key("Customer's (Full) Name!"), "customers_full_name");
        assert_eq!(normalize_field_key("zip-code"), "zipcode");
    }

    #[test]
    fn test_existing_underscores_kept() {
        assert_eq!(normalize_field_key("order_id"), "order_id");
    }

    #[test]
    fn test_blank_names_dropped() {
        let fields = vec![
            ExtractionField::new("  ", "ignored"),
            ExtractionField::new(" Email Address ", "  Work email  "),
            ExtractionField::new("", ""),
        ];
        let normalized = normalize_extraction_fields(&fields);
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized[0].name, "email_address");
        assert_eq!(normalized[0].display_name, "Email Address");
        assert_eq!(normalized[0].description, "Work email");
    }

    proptest! {
        #[test]
        fn prop_key_only_contains_allowed_chars(name in "\\PC{0,40}") {
            let key = normalize_field_key(&name);
            prop_assert!(key.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
        }

        #[test]
        fn prop_whitespace_never_doubles_underscores(
            words in proptest::collection::vec("[A-Za-z0-9]{1,8}", 1..6),
            gaps in proptest::collection::vec("[ \t]{1,4}", 5),
        ) {
            let mut name = String::from("  ");
            for (i, word) in words.iter().enumerate() {
                if i > 0 {
                    name.push_str(&gaps[i - 1]);
                }
                name.push_str(word);
            }
            name.push(' ');

            let key = normalize_field_key(&name);
            prop_assert!(!key.contains("__"));
            prop_assert!(!key.starts_with('_'));
            prop_assert!(!key.ends_with('_'));
            prop_assert_eq!(key.split('_').count(), words.len());
        }
    }
}
