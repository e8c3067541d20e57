use std::sync::Arc;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Flow;
use crate::error::FlowError;
use crate::llm::PromptExecutor;
use crate::prompt::Prompt;
use crate::validate::{Checks, FieldError, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuSuggestionsInput {
    /// The budget for the catering menu.
    pub budget: f64,
    /// The type of event (e.g., wedding, corporate).
    pub event_type: String,
    /// The number of guests attending the event.
    pub number_of_guests: u32,
    /// The cultural preferences for the menu (e.g., Italian, Indian).
    pub cultural_preferences: String,
}

impl Default for MenuSuggestionsInput {
    fn default() -> Self {
        Self {
            budget: 1000.0,
            event_type: "Wedding".to_string(),
            number_of_guests: 50,
            cultural_preferences: "Italian".to_string(),
        }
    }
}

impl Validate for MenuSuggestionsInput {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        Checks::new()
            .at_least_one("budget", self.budget, "Budget is required.")
            .not_blank("eventType", &self.event_type, "Event type is required.")
            .at_least_one(
                "numberOfGuests",
                f64::from(self.number_of_guests),
                "Number of guests is required.",
            )
            .not_blank(
                "culturalPreferences",
                &self.cultural_preferences,
                "Cultural preferences are required.",
            )
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuSuggestionsOutput {
    /// An array of suggested menu items.
    pub menu_suggestions: Vec<String>,
    /// Explanation of why the suggestions are appropriate for the given criteria.
    pub rationale: String,
}

const MENU_PROMPT: Prompt<MenuSuggestionsInput, MenuSuggestionsOutput> = Prompt::new(
    "menuSuggestionsPrompt",
    r#"You are an AI assistant specializing in generating catering menu suggestions for events.

Based on the following criteria, suggest a list of menu items suitable for the event.

Budget: {{{budget}}}
Event Type: {{{eventType}}}
Number of Guests: {{{numberOfGuests}}}
Cultural Preferences: {{{culturalPreferences}}}

Provide specific menu item suggestions, and explain why these suggestions align well with the provided criteria, considering both cost-effectiveness and guest satisfaction."#,
);

/// Catering menu suggestions.
pub struct MenuFlow {
    executor: Arc<dyn PromptExecutor>,
}

impl MenuFlow {
    pub fn new(executor: Arc<dyn PromptExecutor>) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl Flow for MenuFlow {
    type Input = MenuSuggestionsInput;
    type Output = MenuSuggestionsOutput;

    fn name(&self) -> &'static str {
        "generateMenuSuggestionsFlow"
    }

    async fn run(&self, input: MenuSuggestionsInput) -> Result<MenuSuggestionsOutput, FlowError> {
        input.validate()?;
        MENU_PROMPT.call(self.executor.as_ref(), &input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::testing::ScriptedExecutor;
    use serde_json::json;

    fn reply() -> serde_json::Value {
        json!({
            "menuSuggestions": ["Bruschetta", "Risotto ai funghi", "Tiramisu"],
            "rationale": "Classic Italian courses that scale to fifty guests."
        })
    }

    #[tokio::test]
    async fn prompt_contains_every_input_value() {
        let executor = Arc::new(ScriptedExecutor::replying(reply()));
        let flow = MenuFlow::new(executor.clone());

        let output = flow
            .run(MenuSuggestionsInput {
                budget: 1000.0,
                event_type: "Wedding".to_string(),
                number_of_guests: 50,
                cultural_preferences: "Italian".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(output.menu_suggestions.len(), 3);
        assert_eq!(executor.calls(), 1);
        let prompt = executor.last_prompt();
        for needle in ["1000", "Wedding", "50", "Italian"] {
            assert!(prompt.contains(needle), "prompt is missing {needle}: {prompt}");
        }
        assert!(prompt.lines().any(|line| line == "Budget: 1000"), "{prompt}");
        assert!(prompt.lines().any(|line| line == "Number of Guests: 50"), "{prompt}");
    }

    #[tokio::test]
    async fn output_schema_is_sent_with_the_prompt() {
        let executor = Arc::new(ScriptedExecutor::replying(reply()));
        MenuFlow::new(executor.clone())
            .run(MenuSuggestionsInput::default())
            .await
            .unwrap();

        let prompts = executor.prompts.lock().unwrap();
        assert_eq!(prompts[0].name, "menuSuggestionsPrompt");
        assert!(prompts[0].output_schema["properties"]["menuSuggestions"].is_object());
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_the_model() {
        let executor = Arc::new(ScriptedExecutor::replying(reply()));
        let flow = MenuFlow::new(executor.clone());

        let err = flow
            .run(MenuSuggestionsInput {
                number_of_guests: 0,
                ..Default::default()
            })
            .await
            .unwrap_err();

        match err {
            FlowError::Invalid(errors) => assert_eq!(errors[0].field, "numberOfGuests"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(executor.calls(), 0);
    }

    #[tokio::test]
    async fn model_failure_propagates() {
        let executor = Arc::new(ScriptedExecutor::failing("503 Service Unavailable"));
        let err = MenuFlow::new(executor)
            .run(MenuSuggestionsInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, FlowError::Model(_)));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn mismatched_output_is_rejected() {
        let executor = Arc::new(ScriptedExecutor::replying(json!({ "menu": "pasta" })));
        let err = MenuFlow::new(executor)
            .run(MenuSuggestionsInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, FlowError::Output(_)));
    }
}
