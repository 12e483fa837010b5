//! Asks the completion service which character a hint describes.

use std::sync::Arc;

use crate::infrastructure::ports::{ChatMessage, LlmPort, LlmRequest};

/// Low temperature and a tight nucleus favour repeatable answers.
pub const GUESS_TEMPERATURE: f32 = 0.1;
pub const GUESS_TOP_P: f32 = 0.5;
/// A character name, nothing more.
pub const GUESS_MAX_TOKENS: u32 = 50;

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("AI response failed: {0}")]
    Failed(String),
    #[error("AI response failed: empty answer")]
    Empty,
}

/// Build the single-message prompt for one hint.
pub fn build_guess_prompt(priority_names: &[&str], all_names: &[&str], hint: &str) -> String {
    format!(
        r#"You are playing a character guessing game.

Priority characters (most likely): {priority}
All possible characters: {all}

Player hint: "{hint}"

Examples:
- Hint: "Tall wizard with long beard" -> Gandalf
- Hint: "Fast red hedgehog" -> Sonic

Instructions:
- Choose the character that BEST matches the hint.
- Prefer characters from the Priority list when appropriate.
- Return only the exact character name as it appears in the character list.
"#,
        priority = priority_names.join(", "),
        all = all_names.join(", "),
        hint = hint,
    )
}

/// Trim, drop one surrounding pair of double quotes, flatten newlines.
pub fn sanitize_guess(raw: &str) -> String {
    let trimmed = raw.trim();
    let unquoted = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let unquoted = unquoted.strip_suffix('"').unwrap_or(unquoted);
    unquoted.replace(['\n', '\r'], " ").trim().to_string()
}

/// One completion call per hint. Never retried.
pub struct GuessRequester {
    llm: Arc<dyn LlmPort>,
}

impl GuessRequester {
    pub fn new(llm: Arc<dyn LlmPort>) -> Self {
        Self { llm }
    }

    pub async fn request_guess(
        &self,
        priority_names: &[&str],
        all_names: &[&str],
        hint: &str,
    ) -> Result<String, CompletionError> {
        let prompt = build_guess_prompt(priority_names, all_names, hint);
        let request = LlmRequest::new(vec![ChatMessage::user(prompt)])
            .with_temperature(GUESS_TEMPERATURE)
            .with_top_p(GUESS_TOP_P)
            .with_max_tokens(Some(GUESS_MAX_TOKENS));

        let response = self
            .llm
            .generate(request)
            .await
            .map_err(|e| CompletionError::Failed(e.to_string()))?;

        let guess = sanitize_guess(&response.content);
        if guess.is_empty() {
            return Err(CompletionError::Empty);
        }

        tracing::debug!(
            raw = %response.content,
            guess = %guess,
            finish_reason = ?response.finish_reason,
            prompt_tokens = ?response.usage.map(|u| u.prompt_tokens),
            completion_tokens = ?response.usage.map(|u| u.completion_tokens),
            total_tokens = ?response.usage.map(|u| u.total_tokens),
            "Completion service answered"
        );
        Ok(guess)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{
        FinishReason, LlmError, LlmResponse, MockLlmPort, TokenUsage,
    };

    #[test]
    fn prompt_lists_both_candidate_sets_and_quotes_the_hint() {
        let prompt = build_guess_prompt(
            &["Gandalf", "Frodo"],
            &["Gandalf", "Frodo", "Mario"],
            "Tall wizard with staff",
        );
        assert!(prompt.contains("Priority characters (most likely): Gandalf, Frodo\n"));
        assert!(prompt.contains("All possible characters: Gandalf, Frodo, Mario\n"));
        assert!(prompt.contains("Player hint: \"Tall wizard with staff\""));
        assert!(prompt.contains("Return only the exact character name"));
    }

    #[test]
    fn sanitize_strips_one_quote_pair_and_newlines() {
        assert_eq!(sanitize_guess("  \"Gandalf\"  "), "Gandalf");
        assert_eq!(sanitize_guess("Gandalf\nthe Grey"), "Gandalf the Grey");
        assert_eq!(sanitize_guess("\"\"Mario\"\""), "\"Mario\"");
        assert_eq!(sanitize_guess("\"\""), "");
        assert_eq!(sanitize_guess(" \n "), "");
    }

    #[tokio::test]
    async fn request_uses_low_temperature_single_message() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .withf(|req| {
                req.messages.len() == 1
                    && req.messages[0].content.contains("wizard")
                    && req.temperature == Some(GUESS_TEMPERATURE)
                    && req.top_p == Some(GUESS_TOP_P)
                    && req.max_tokens == Some(GUESS_MAX_TOKENS)
            })
            .times(1)
            .returning(|_| Ok(LlmResponse::text("\"Gandalf\"\n")));

        let requester = GuessRequester::new(Arc::new(llm));
        let guess = requester
            .request_guess(&["Gandalf"], &["Gandalf"], "wizard")
            .await
            .expect("guess");
        assert_eq!(guess, "Gandalf");
    }

    #[tokio::test]
    async fn truncated_answer_with_usage_still_yields_guess() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate().returning(|_| {
            Ok(LlmResponse {
                content: "Frodo Baggins".to_string(),
                finish_reason: FinishReason::Length,
                usage: Some(TokenUsage {
                    prompt_tokens: 40,
                    completion_tokens: 5,
                    total_tokens: 45,
                }),
            })
        });

        let requester = GuessRequester::new(Arc::new(llm));
        let guess = requester
            .request_guess(&["Frodo"], &["Frodo"], "hobbit")
            .await
            .expect("guess");
        assert_eq!(guess, "Frodo Baggins");
    }

    #[tokio::test]
    async fn blank_answer_is_an_error() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .returning(|_| Ok(LlmResponse::text("  \"\"  ")));

        let requester = GuessRequester::new(Arc::new(llm));
        let result = requester.request_guess(&[], &[], "wizard").await;
        assert!(matches!(result, Err(CompletionError::Empty)));
    }

    #[tokio::test]
    async fn service_failure_is_an_error() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .returning(|_| Err(LlmError::RequestFailed("503".to_string())));

        let requester = GuessRequester::new(Arc::new(llm));
        let result = requester.request_guess(&[], &[], "wizard").await;
        assert!(matches!(result, Err(CompletionError::Failed(_))));
    }
}
