use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, CreateImageRequestArgs, Image, ImageModel,
        ImageResponseFormat, ResponseFormat, ResponseFormatJsonSchema,
    },
    Client,
};
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::Settings;

/// A rendered prompt ready to be sent to the model.
#[derive(Debug, Clone)]
pub struct CompiledPrompt {
    pub name: String,
    pub text: String,
    pub output_schema: Value,
}

/// The model invocation boundary: one prompt in, one structured JSON value out.
#[async_trait]
pub trait PromptExecutor: Send + Sync {
    async fn execute(&self, prompt: &CompiledPrompt) -> Result<Value>;
}

/// The image boundary: a text prompt in, an image reference (URL or data URI) out.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> Result<String>;
}

/// Client for an OpenAI-compatible endpoint (Gemini's by default).
pub struct ModelClient {
    client: Client<OpenAIConfig>,
    text_model: String,
    image_model: String,
}

impl ModelClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let config = OpenAIConfig::new()
            .with_api_base(&settings.api_base)
            .with_api_key(&settings.api_key);
        // One request per call: the first error is returned, never retried.
        let no_retry = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();
        let client = Client::with_config(config).with_backoff(no_retry);

        info!(
            "Model client ready. Text model: {}, image model: {}",
            settings.text_model, settings.image_model
        );
        Ok(Self {
            client,
            text_model: settings.text_model.clone(),
            image_model: settings.image_model.clone(),
        })
    }

    pub async fn say_hello(&self) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.text_model)
            .messages([user_message("Hello! Reply with 'System Online'.")?])
            .build()?;

        let response = self.client.chat().create(request).await?;
        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }
}

#[async_trait]
impl PromptExecutor for ModelClient {
    async fn execute(&self, prompt: &CompiledPrompt) -> Result<Value> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.text_model)
            .messages([user_message(&prompt.text)?])
            .response_format(ResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    name: prompt.name.clone(),
                    description: None,
                    schema: Some(prompt.output_schema.clone()),
                    strict: Some(false),
                },
            })
            .build()?;

        debug!("Sending prompt '{}' ({} chars)", prompt.name, prompt.text.len());
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .with_context(|| format!("prompt '{}' was rejected", prompt.name))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .context("model returned no output")?;

        serde_json::from_str(strip_code_fence(&content))
            .with_context(|| format!("prompt '{}' returned non-JSON output", prompt.name))
    }
}

#[async_trait]
impl ImageGenerator for ModelClient {
    async fn generate_image(&self, prompt: &str) -> Result<String> {
        let request = CreateImageRequestArgs::default()
            .prompt(prompt)
            .model(ImageModel::Other(self.image_model.clone()))
            .n(1)
            .response_format(ImageResponseFormat::B64Json)
            .build()?;

        let response = self.client.images().create(request).await?;
        let image = response
            .data
            .first()
            .context("image service returned no images")?;

        Ok(match &**image {
            Image::Url { url, .. } => url.clone(),
            Image::B64Json { b64_json, .. } => format!("data:image/png;base64,{}", b64_json),
        })
    }
}

fn user_message(text: &str) -> Result<ChatCompletionRequestMessage> {
    Ok(ChatCompletionRequestMessage::User(
        ChatCompletionRequestUserMessageArgs::default()
            .content(text)
            .build()?,
    ))
}

/// Some models wrap JSON in a markdown fence even in JSON mode.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
