//! Batch file segmentation

/// Literal token separating consecutive emails in a batch file
pub const EMAIL_SEPARATOR: &str = "---EMAIL_SEPARATOR---";

/// Split a batch file into raw email segments.
///
/// This is a plain substring split: a file without any separator is a single
/// segment, and segments keep their surrounding whitespace. Callers decide
/// what an empty segment means.
///
/// # Examples
///
/// ```
/// use shipmail_domain::split_emails;
///
/// assert_eq!(split_emails("A---EMAIL_SEPARATOR---B"), vec!["A", "B"]);
/// assert_eq!(split_emails("just one"), vec!["just one"]);
/// ```
pub fn split_emails(text: &str) -> Vec<&str> {
    text.split(EMAIL_SEPARATOR).collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: text without the token is returned whole
        #[test]
        fn test_text_without_separator_is_single_segment(text in "[a-zA-Z0-9 \n{}]*") {
            prop_assert_eq!(split_emails(&text), vec![text.as_str()]);
        }

        /// Property: n separators produce n + 1 segments in order
        #[test]
        fn test_segment_count_follows_separators(
            bodies in proptest::collection::vec("[a-z ]{0,12}", 1..6)
        ) {
            let text = bodies.join(EMAIL_SEPARATOR);
            let segments = split_emails(&text);
            prop_assert_eq!(segments.len(), bodies.len());
            for (segment, body) in segments.iter().zip(&bodies) {
                prop_assert_eq!(*segment, body.as_str());
            }
        }
    }
}
