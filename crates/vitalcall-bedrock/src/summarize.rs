use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, InferenceConfiguration, Message, SystemContentBlock,
};
use tracing::{info, warn};
use uuid::Uuid;
use vitalcall_core::models::summary::{GeneratedSummary, SummaryRequest};
use vitalcall_core::models::token_count::TokenUsage;
use vitalcall_core::ports::SummaryGenerator;
use vitalcall_core::{BoxFuture, CollaboratorError};

use crate::error::{self, BedrockError};
use crate::{prompt, tokens, validate};

pub const DEFAULT_MODEL_ID: &str = "us.anthropic.claude-3-5-haiku-20241022-v1:0";
pub const DEFAULT_MAX_TOKENS: i32 = 300;
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Summary generator backed by a Bedrock model.
#[derive(Clone)]
pub struct BedrockSummarizer {
    client: Client,
    model_id: String,
    max_tokens: i32,
    temperature: f32,
}

impl BedrockSummarizer {
    pub fn new(client: Client, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Generate and validate one summary.
    pub async fn summarize(&self, request: &SummaryRequest) -> Result<GeneratedSummary, BedrockError> {
        let invocation_id = Uuid::new_v4();
        info!(
            invocation_id = %invocation_id,
            model = %self.model_id,
            patient_id = %request.patient_id,
            "generating vitals summary"
        );

        let user_prompt = prompt::build_user_prompt(request);
        let (text, usage) = self.invoke_converse(prompt::SYSTEM_PROMPT, &user_prompt).await?;

        let word_count = match validate::validate_summary(&text, &request.patient_id) {
            Ok(words) => words,
            Err(e) => {
                warn!(invocation_id = %invocation_id, error = %e, "generated summary rejected");
                return Err(e);
            }
        };

        info!(
            invocation_id = %invocation_id,
            words = word_count,
            input_tokens = usage.tokens.input,
            output_tokens = usage.tokens.output,
            cost_usd = usage.cost_usd,
            "vitals summary generated"
        );

        Ok(GeneratedSummary {
            text: text.trim().to_string(),
            word_count,
            model_id: self.model_id.clone(),
            usage,
            generated_at: jiff::Timestamp::now(),
        })
    }

    /// Single Converse call. Returns the response text and token usage.
    async fn invoke_converse(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<(String, TokenUsage), BedrockError> {
        let message = Message::builder()
            .role(ConversationRole::User)
            .content(ContentBlock::Text(user_message.to_string()))
            .build()
            .map_err(|e| BedrockError::Request(e.to_string()))?;

        let inference = InferenceConfiguration::builder()
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
            .build();

        let response = self
            .client
            .converse()
            .model_id(&self.model_id)
            .system(SystemContentBlock::Text(system_prompt.to_string()))
            .messages(message)
            .inference_config(inference)
            .send()
            .await
            .map_err(|e| BedrockError::Invocation {
                kind: error::classify_converse_error(&e),
                message: e.into_service_error().to_string(),
            })?;

        let output_message = response
            .output()
            .and_then(|o| o.as_message().ok())
            .ok_or_else(|| BedrockError::ResponseParse("no message in response".to_string()))?;

        let text = output_message
            .content()
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("");

        let usage = tokens::usage_for(&self.model_id, response.usage());
        Ok((text, usage))
    }
}

impl SummaryGenerator for BedrockSummarizer {
    fn generate<'a>(
        &'a self,
        request: &'a SummaryRequest,
    ) -> BoxFuture<'a, Result<GeneratedSummary, CollaboratorError>> {
        Box::pin(async move { Ok(self.summarize(request).await?) })
    }
}
