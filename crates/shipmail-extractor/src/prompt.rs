//! LLM prompt engineering for shipment extraction

/// System message sent alongside every extraction prompt
pub const SYSTEM_PERSONA: &str = "You are a helpful assistant that extracts data from emails.";

/// Builds the extraction prompt for one email
///
/// The email text is embedded verbatim; nothing is escaped.
pub struct PromptBuilder<'a> {
    email: &'a str,
    technique_note: bool,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(email: &'a str) -> Self {
        Self {
            email,
            technique_note: false,
        }
    }

    /// Append the request to explain the extraction techniques used
    pub fn with_technique_note(mut self, enabled: bool) -> Self {
        self.technique_note = enabled;
        self
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(
            EXTRACTION_INSTRUCTIONS.len() + self.email.len() + OUTPUT_FORMAT.len() + 64,
        );

        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        prompt.push_str("Email:\n");
        prompt.push_str(self.email);
        prompt.push_str("\n\n");

        prompt.push_str(OUTPUT_FORMAT);

        if self.technique_note {
            prompt.push_str("\n\n");
            prompt.push_str(TECHNIQUE_NOTE);
        }

        prompt
    }
}

const EXTRACTION_INSTRUCTIONS: &str = "You will be given a shipment notification email. \
Extract the following details and provide them in JSON format:
1. PO numbers (list of strings)
2. Part numbers (list of strings)
3. Quantities (list of integers)
4. Tracking number (string)
5. Source of the email (string)
6. Type of email (string)";

const OUTPUT_FORMAT: &str = r#"Provide the details in the following JSON format and ensure it is a valid JSON:
{
  "po_numbers": ["PO1", "PO2", ...],
  "part_numbers": ["Part1", "Part2", ...],
  "quantities": [Quantity1, Quantity2, ...],
  "tracking_number": "TrackingNumber",
  "source": "Source",
  "type_of_email": "TypeOfEmail"
}"#;

const TECHNIQUE_NOTE: &str =
    "At the conclusion of the task explain the machine learning or NLP techniques you used.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_email_verbatim() {
        let email = "PO# 4500123 shipped via UPS {tracking: 1Z999}";
        let prompt = PromptBuilder::new(email).build();
        assert!(prompt.contains(&format!("Email:\n{}\n\n", email)));
    }

    #[test]
    fn test_prompt_lists_all_keys() {
        let prompt = PromptBuilder::new("body").build();
        for key in [
            "\"po_numbers\"",
            "\"part_numbers\"",
            "\"quantities\"",
            "\"tracking_number\"",
            "\"source\"",
            "\"type_of_email\"",
        ] {
            assert!(prompt.contains(key), "missing {}", key);
        }
    }

    #[test]
    fn test_prompt_describes_field_shapes() {
        let prompt = PromptBuilder::new("body").build();
        assert!(prompt.starts_with("You will be given a shipment notification email."));
        assert!(prompt.contains("1. PO numbers (list of strings)"));
        assert!(prompt.contains("3. Quantities (list of integers)"));
        assert!(prompt.contains("6. Type of email (string)"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(
            PromptBuilder::new("same").build(),
            PromptBuilder::new("same").build()
        );
    }

    #[test]
    fn test_empty_email_still_builds() {
        let prompt = PromptBuilder::new("").build();
        assert!(prompt.contains("Email:\n\n\n"));
    }

    #[test]
    fn test_technique_note_is_opt_in() {
        let plain = PromptBuilder::new("body").build();
        assert!(plain.ends_with('}'));
        assert!(!plain.contains("techniques"));

        let noted = PromptBuilder::new("body").with_technique_note(true).build();
        assert!(noted.ends_with(TECHNIQUE_NOTE));
    }
}
