//! LLM prompt engineering for contract classification and analysis

use clausewise_domain::Tier;

/// Characters of contract text sent for type detection
pub const DETECTION_SAMPLE_CHARS: usize = 2000;

/// Builds prompts over one contract's text
pub struct PromptBuilder<'a> {
    text: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Classification prompt over the first [`DETECTION_SAMPLE_CHARS`] characters
    pub fn detection(&self) -> String {
        let sample = truncate_chars(self.text, DETECTION_SAMPLE_CHARS);

        let mut prompt = String::with_capacity(DETECTION_INSTRUCTIONS.len() + sample.len() + 32);
        prompt.push_str(DETECTION_INSTRUCTIONS);
        prompt.push_str("\n\nContract text:\n");
        prompt.push_str(sample);
        prompt
    }

    /// Tier-specific analysis prompt over the full, untruncated text
    pub fn analysis(&self, tier: Tier, contract_type: &str) -> String {
        let (points, format) = match tier {
            Tier::Premium => (PREMIUM_POINTS, PREMIUM_FORMAT),
            Tier::Free => (FREE_POINTS, FREE_FORMAT),
        };

        let mut prompt = String::with_capacity(
            points.len() + format.len() + self.text.len() + 512,
        );

        // 1. Numbered instructions
        prompt.push_str(&format!(
            "Analyze the following {} contract and provide:\n",
            contract_type.trim()
        ));
        prompt.push_str(&item_points(tier));
        prompt.push_str(points);
        prompt.push_str("\n\n");

        // 2. Expected JSON shape
        prompt.push_str("Format your response as a JSON object with the following structure:\n");
        prompt.push_str(format);
        prompt.push_str("\n\n");

        // 3. Output discipline
        prompt.push_str(OUTPUT_FORMAT_REMINDER);
        prompt.push_str("\n\n");

        // 4. The contract itself, last
        prompt.push_str("Contract text:\n");
        prompt.push_str(self.text);

        prompt
    }
}

/// Points 1 and 2: risks and opportunities, at least [`Tier::minimum_items`] of each
fn item_points(tier: Tier) -> String {
    let count = tier.minimum_items();
    let (risk_rating, opportunity_rating) = match tier {
        Tier::Premium => (
            " and severity level (low, medium, high)",
            " and impact level (low, medium, high)",
        ),
        Tier::Free => ("", ""),
    };

    format!(
        "1. A list of at least {count} potential risks for the party receiving the contract, each with a brief explanation{risk_rating}.\n\
         2. A list of at least {count} potential opportunities or benefits for the receiving party, each with a brief explanation{opportunity_rating}.\n"
    )
}

/// Longest prefix of `text` holding at most `max` characters
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

const DETECTION_INSTRUCTIONS: &str = r#"Analyze the following contract text and determine the type of contract it is.
Provide only the contract type as a single string (e.g., "Employment", "Non-Disclosure Agreement", "Sales", "Lease", etc.).
Do not include any additional explanation or text."#;

const PREMIUM_POINTS: &str = r#"3. A comprehensive summary of the contract, including key terms and conditions.
4. Any recommendations for improving the contract from the receiving party's perspective.
5. A list of key clauses in the contract.
6. An assessment of the contract's legal compliance.
7. A list of potential negotiation points.
8. The contract duration or term, if applicable.
9. A summary of termination conditions, if applicable.
10. A breakdown of any financial terms or compensation structure, if applicable.
11. Any performance metrics or KPIs mentioned, if applicable.
12. A summary of any specific clauses relevant to this type of contract (e.g., intellectual property for employment contracts, warranties for sales contracts).
13. An overall score from 1 to 100, with 100 being the highest. This score represents the overall favorability of the contract based on the identified risks and opportunities."#;

const PREMIUM_FORMAT: &str = r#"{
  "risks": [{"risk": "Risk description", "explanation": "Brief explanation", "severity": "low|medium|high"}],
  "opportunities": [{"opportunity": "Opportunity description", "explanation": "Brief explanation", "impact": "low|medium|high"}],
  "summary": "Comprehensive summary of the contract",
  "recommendations": ["Recommendation 1", "Recommendation 2"],
  "keyClauses": ["Clause 1", "Clause 2"],
  "legalCompliance": "Assessment of legal compliance",
  "negotiationPoints": ["Point 1", "Point 2"],
  "contractDuration": "Duration of the contract, if applicable",
  "terminationConditions": "Summary of termination conditions, if applicable",
  "overallScore": "Overall score from 1 to 100",
  "financialTerms": {
    "description": "Overview of financial terms",
    "details": ["Detail 1", "Detail 2"]
  },
  "performanceMetrics": ["Metric 1", "Metric 2"],
  "specificClauses": "Summary of clauses specific to this contract type"
}"#;

const FREE_POINTS: &str = r#"3. A brief summary of the contract.
4. An overall score from 1 to 100, with 100 being the highest. This score represents the overall favorability of the contract based on the identified risks and opportunities."#;

const FREE_FORMAT: &str = r#"{
  "risks": [{"risk": "Risk description", "explanation": "Brief explanation"}],
  "opportunities": [{"opportunity": "Opportunity description", "explanation": "Brief explanation"}],
  "summary": "Brief summary of the contract",
  "overallScore": "Overall score from 1 to 100"
}"#;

const OUTPUT_FORMAT_REMINDER: &str = "Important: Return only the JSON object, without any additional text, explanations, or markdown formatting.";

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_detection_prompt_includes_text() {
        let prompt = PromptBuilder::new("This Lease is entered into").detection();
        assert!(prompt.contains("determine the type of contract"));
        assert!(prompt.ends_with("This Lease is entered into"));
    }

    #[test]
    fn test_detection_prompt_truncates_to_2000_chars() {
        let text = format!("{}{}", "a".repeat(2000), "TAIL");
        let prompt = PromptBuilder::new(&text).detection();
        assert!(prompt.ends_with(&"a".repeat(2000)));
        assert!(!prompt.contains("TAIL"));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("短い契約", 3), "短い契");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 0), "");
    }

    #[test]
    fn test_free_prompt_content() {
        let prompt = PromptBuilder::new("text").analysis(Tier::Free, "Employment");
        assert!(prompt.starts_with("Analyze the following Employment contract"));
        assert!(prompt.contains(
            "at least 5 potential risks for the party receiving the contract, \
             each with a brief explanation.\n2. "
        ));
        assert!(prompt.contains("at least 5 potential opportunities"));
        assert!(!prompt.contains("at least 10"));
        assert!(!prompt.contains("severity"));
        assert!(!prompt.contains("impact"));
        assert!(prompt.contains("4. An overall score"));
        assert!(!prompt.contains("5. "));
        assert!(!prompt.contains("keyClauses"));
    }

    #[test]
    fn test_premium_prompt_content() {
        let prompt = PromptBuilder::new("text").analysis(Tier::Premium, "Lease");
        assert!(prompt.contains(
            "1. A list of at least 10 potential risks for the party receiving the contract, \
             each with a brief explanation and severity level (low, medium, high).\n"
        ));
        assert!(prompt.contains("at least 10 potential opportunities"));
        assert!(prompt.contains("severity level"));
        assert!(prompt.contains("impact level"));
        for point in 1..=13 {
            assert!(prompt.contains(&format!("\n{}. ", point)), "missing point {}", point);
        }
        for key in [
            "\"risks\"",
            "\"opportunities\"",
            "\"summary\"",
            "\"recommendations\"",
            "\"keyClauses\"",
            "\"legalCompliance\"",
            "\"negotiationPoints\"",
            "\"contractDuration\"",
            "\"terminationConditions\"",
            "\"overallScore\"",
            "\"financialTerms\"",
            "\"performanceMetrics\"",
            "\"specificClauses\"",
        ] {
            assert!(prompt.contains(key), "missing key {}", key);
        }
    }

    #[test]
    fn test_analysis_prompt_ends_with_full_text() {
        let text = "x".repeat(10_000);
        for tier in [Tier::Free, Tier::Premium] {
            let prompt = PromptBuilder::new(&text).analysis(tier, "Sales");
            assert!(prompt.contains("Return only the JSON object"));
            assert!(prompt.ends_with(&format!("Contract text:\n{}", text)));
        }
    }

    proptest! {
        #[test]
        fn prop_detection_sample_is_prefix(text in "\\PC{0,3000}") {
            let sample = truncate_chars(&text, DETECTION_SAMPLE_CHARS);
            prop_assert!(text.starts_with(sample));
            prop_assert!(sample.chars().count() <= DETECTION_SAMPLE_CHARS);
            prop_assert_eq!(
                sample.chars().count(),
                text.chars().count().min(DETECTION_SAMPLE_CHARS)
            );
        }
    }
}
