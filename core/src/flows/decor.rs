use std::sync::Arc;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::Flow;
use crate::error::FlowError;
use crate::llm::{ImageGenerator, PromptExecutor};
use crate::prompt::Prompt;
use crate::validate::{Checks, FieldError, Validate};

/// Stands in for a theme's visual aid when its image could not be generated.
pub const NO_IMAGE_AVAILABLE: &str = "No image available";

pub const VENUE_SIZES: [&str; 3] = ["Small", "Medium", "Large"];
pub const OCCASION_TONES: [&str; 5] = ["Elegant", "Minimal", "Traditional", "Royal", "Modern"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DecorRecommendationsInput {
    /// The budget for the decor in USD.
    pub budget: f64,
    /// The size of the venue (e.g., small, medium, large).
    pub venue_size: String,
    /// The type of event (e.g., wedding, corporate, birthday).
    pub event_type: String,
    /// The tone of the occasion (e.g., elegant, minimal, traditional, royal, modern).
    pub occasion_tone: String,
}

impl Default for DecorRecommendationsInput {
    fn default() -> Self {
        Self {
            budget: 5000.0,
            venue_size: "Medium".to_string(),
            event_type: "Wedding".to_string(),
            occasion_tone: "Elegant".to_string(),
        }
    }
}

impl Validate for DecorRecommendationsInput {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        Checks::new()
            .at_least_one("budget", self.budget, "Budget is required.")
            .not_blank("venueSize", &self.venue_size, "Venue size is required.")
            .not_blank("eventType", &self.event_type, "Event type is required.")
            .not_blank("occasionTone", &self.occasion_tone, "Occasion tone is required.")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DecorRecommendationsOutput {
    /// A list of decor theme suggestions.
    pub theme_suggestions: Vec<String>,
    /// Suggested budget allocation for different decor elements.
    pub budget_allocation: String,
    /// Optional visual aids to visualize decor themes, one image reference per theme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_aids: Option<Vec<String>>,
}

const DECOR_PROMPT: Prompt<DecorRecommendationsInput, DecorRecommendationsOutput> = Prompt::new(
    "decorRecommendationsPrompt",
    r#"You are an AI event decorator assistant. Based on the user's input, suggest decor themes, budget allocation and generate visual aids to help the user visualize and plan the event's ambiance effectively.

Budget: {{{budget}}}
Venue Size: {{{venueSize}}}
Event Type: {{{eventType}}}
Occasion Tone: {{{occasionTone}}}

Provide theme suggestions tailored to the budget, venue size, event type, and occasion tone.
Suggest budget allocation for different decor elements.
Generate visual aids to visualize decor themes.

Format your response as a JSON object matching the schema. Make sure to generate at least 3 theme suggestions. For each theme suggestion, consider generating visual aid."#,
);

/// Décor themes and budget split, with one generated image per theme when an
/// image generator is configured.
pub struct DecorFlow {
    executor: Arc<dyn PromptExecutor>,
    images: Option<Arc<dyn ImageGenerator>>,
}

impl DecorFlow {
    pub fn new(executor: Arc<dyn PromptExecutor>, images: Option<Arc<dyn ImageGenerator>>) -> Self {
        Self { executor, images }
    }

    async fn visual_aids(
        &self,
        images: &dyn ImageGenerator,
        input: &DecorRecommendationsInput,
        themes: &[String],
    ) -> Vec<String> {
        let mut aids = Vec::with_capacity(themes.len());
        for theme in themes {
            let prompt = image_prompt(theme, input);
            match images.generate_image(&prompt).await {
                Ok(reference) => aids.push(reference),
                Err(e) => {
                    error!("Failed to generate image for {}: {:#}", theme, e);
                    aids.push(NO_IMAGE_AVAILABLE.to_string());
                }
            }
        }
        aids
    }
}

fn image_prompt(theme: &str, input: &DecorRecommendationsInput) -> String {
    format!(
        "Generate an image of {} decor theme for {} event with {} tone.",
        theme, input.event_type, input.occasion_tone
    )
}

#[async_trait]
impl Flow for DecorFlow {
    type Input = DecorRecommendationsInput;
    type Output = DecorRecommendationsOutput;

    fn name(&self) -> &'static str {
        "provideDecorRecommendationsFlow"
    }

    async fn run(
        &self,
        input: DecorRecommendationsInput,
    ) -> Result<DecorRecommendationsOutput, FlowError> {
        input.validate()?;
        let mut output = DECOR_PROMPT.call(self.executor.as_ref(), &input).await?;

        match &self.images {
            Some(images) => {
                info!(
                    "Generating {} visual aids for {}",
                    output.theme_suggestions.len(),
                    input.event_type
                );
                let aids = self
                    .visual_aids(images.as_ref(), &input, &output.theme_suggestions)
                    .await;
                output.visual_aids = Some(aids);
            }
            // Anything the model put here is not a real image.
            None => output.visual_aids = None,
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::testing::{FlakyImages, ScriptedExecutor};
    use serde_json::json;
    use tracing_test::traced_test;

    fn reply() -> serde_json::Value {
        json!({
            "themeSuggestions": ["Rustic Garden", "Art Deco Glam", "Coastal Breeze"],
            "budgetAllocation": "40% florals, 30% lighting, 30% linens",
            "visualAids": ["https://example.invalid/made-up.png"]
        })
    }

    fn flow(
        executor: Arc<ScriptedExecutor>,
        images: Option<Arc<FlakyImages>>,
    ) -> DecorFlow {
        DecorFlow::new(executor, images.map(|i| i as Arc<dyn ImageGenerator>))
    }

    #[tokio::test]
    async fn one_image_per_theme_in_order() {
        let executor = Arc::new(ScriptedExecutor::replying(reply()));
        let images = Arc::new(FlakyImages::default());

        let output = flow(executor.clone(), Some(images.clone()))
            .run(DecorRecommendationsInput::default())
            .await
            .unwrap();

        assert_eq!(
            output.visual_aids,
            Some(vec![
                "data:image/png;base64,IMG1".to_string(),
                "data:image/png;base64,IMG2".to_string(),
                "data:image/png;base64,IMG3".to_string(),
            ])
        );
        let prompts = images.prompts.lock().unwrap();
        assert_eq!(
            prompts[0],
            "Generate an image of Rustic Garden decor theme for Wedding event with Elegant tone."
        );
        assert!(prompts[2].contains("Coastal Breeze"));
    }

    #[tokio::test]
    #[traced_test]
    async fn failed_image_becomes_sentinel_at_same_position() {
        let executor = Arc::new(ScriptedExecutor::replying(reply()));
        let images = Arc::new(FlakyImages {
            failing_on: vec!["Art Deco".to_string()],
            ..Default::default()
        });

        let output = flow(executor, Some(images.clone()))
            .run(DecorRecommendationsInput::default())
            .await
            .unwrap();

        let aids = output.visual_aids.unwrap();
        assert_eq!(aids.len(), output.theme_suggestions.len());
        assert_eq!(aids[1], NO_IMAGE_AVAILABLE);
        assert_ne!(aids[0], NO_IMAGE_AVAILABLE);
        assert_ne!(aids[2], NO_IMAGE_AVAILABLE);
        // The loop keeps going after a failure.
        assert_eq!(images.prompts.lock().unwrap().len(), 3);
        assert!(logs_contain("Failed to generate image for Art Deco Glam"));
    }

    #[tokio::test]
    async fn every_image_failing_still_matches_theme_count() {
        let executor = Arc::new(ScriptedExecutor::replying(reply()));
        let images = Arc::new(FlakyImages {
            failing_on: vec!["decor theme".to_string()],
            ..Default::default()
        });

        let output = flow(executor, Some(images))
            .run(DecorRecommendationsInput::default())
            .await
            .unwrap();

        assert_eq!(output.visual_aids, Some(vec![NO_IMAGE_AVAILABLE.to_string(); 3]));
    }

    #[tokio::test]
    async fn without_image_generator_visual_aids_are_dropped() {
        let executor = Arc::new(ScriptedExecutor::replying(reply()));
        let output = flow(executor, None)
            .run(DecorRecommendationsInput::default())
            .await
            .unwrap();

        assert_eq!(output.theme_suggestions.len(), 3);
        assert_eq!(output.visual_aids, None);
    }

    #[tokio::test]
    async fn prompt_contains_every_input_value() {
        let executor = Arc::new(ScriptedExecutor::replying(reply()));
        flow(executor.clone(), None)
            .run(DecorRecommendationsInput {
                budget: 7250.0,
                venue_size: "Large".to_string(),
                event_type: "Corporate Gala".to_string(),
                occasion_tone: "Royal".to_string(),
            })
            .await
            .unwrap();

        let prompt = executor.last_prompt();
        for needle in ["7250", "Large", "Corporate Gala", "Royal"] {
            assert!(prompt.contains(needle), "prompt is missing {needle}");
        }
    }

    #[tokio::test]
    async fn model_failure_skips_image_generation() {
        let executor = Arc::new(ScriptedExecutor::failing("connection reset"));
        let images = Arc::new(FlakyImages::default());

        let err = flow(executor, Some(images.clone()))
            .run(DecorRecommendationsInput::default())
            .await
            .unwrap_err();

        assert!(matches!(err, FlowError::Model(_)));
        assert!(images.prompts.lock().unwrap().is_empty());
    }

    #[test]
    fn blank_tone_is_rejected() {
        let errors = DecorRecommendationsInput {
            occasion_tone: String::new(),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors, vec![FieldError::new("occasionTone", "Occasion tone is required.")]);
    }
}
