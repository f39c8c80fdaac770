//! LLM prompt engineering for policy classification

use crate::types::Policy;

/// Builds the classification prompt for one policy
///
/// Rendering is pure: the same policy always produces the same bytes.
pub struct PromptBuilder<'a> {
    policy: &'a Policy,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(policy: &'a Policy) -> Self {
        Self { policy }
    }

    /// Build the complete classification prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Role, rules and output schema
        prompt.push_str(CLASSIFICATION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        // 2. Few-shot examples
        prompt.push_str("Examples (for style):\n");
        prompt.push_str(FEW_SHOT_EXAMPLES);
        prompt.push_str("\n\n");

        // 3. The policy to analyze, pretty-printed with 2-space indent in document order
        prompt.push_str("NOW ANALYZE THE FOLLOWING POLICY and return JSON only.\n\n");
        prompt.push_str("POLICY:\n");
        prompt.push_str(&format!("{:#}", self.policy));

        prompt
    }
}

/// Build the classification prompt for `policy`
pub fn build_prompt(policy: &Policy) -> String {
    PromptBuilder::new(policy).build()
}

const CLASSIFICATION_INSTRUCTIONS: &str = r#"You are a cloud security analyst. Analyze the IAM policy and classify it STRICTLY as either "Weak" or "Strong".

Rules:
- Only return a single JSON object and nothing else.
- Do not wrap the JSON in markdown code blocks and do not add commentary before or after it.
- The object must match the schema: {"classification": "Weak"|"Strong", "reason": "<concise explanation>"}
- The object must contain exactly these two keys and no others.
- `classification` must be exactly "Weak" or "Strong" (case-sensitive).
- `reason` must be a short, security-focused justification (one sentence preferred, at most 120 words).
- Avoid speculation; judge only what the policy grants."#;

const FEW_SHOT_EXAMPLES: &str = r#"Policy:
{"Statement":[{"Effect":"Allow","Action":"s3:*","Resource":"*"}]}
-> {"classification": "Weak", "reason": "Allows all S3 actions on all resources (wildcard action+resource), violates least privilege."}

Policy:
{"Statement":[{"Effect":"Allow","Action":["s3:GetObject"],"Resource":["arn:aws:s3:::my-bucket/*"]}]}
-> {"classification": "Strong", "reason": "Restricts actions to specific read operations and scopes resource to a single bucket."}"#;


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    proptest! {
        /// Property: rendering twice yields byte-identical prompts
        #[test]
        fn test_prompt_determinism(
            action in "[a-z0-9]{1,8}:[A-Za-z*]{1,12}",
            resource in "[ -~]{0,40}",
            allow in any::<bool>(),
        ) {
            let policy = json!({
                "Statement": [{
                    "Effect": if allow { "Allow" } else { "Deny" },
                    "Action": action,
                    "Resource": resource,
                }]
            });
            prop_assert_eq!(build_prompt(&policy), build_prompt(&policy.clone()));
        }
    }
}
