use aws_sdk_bedrockruntime::types::TokenUsage as ConverseTokenUsage;
use vitalcall_core::models::token_count::{ModelPricing, TokenCount, TokenUsage};

/// Token counts reported by a Converse response. Negative counts read as zero.
pub fn extract_token_count(usage: &ConverseTokenUsage) -> TokenCount {
    TokenCount {
        input: u64::try_from(usage.input_tokens).unwrap_or(0),
        output: u64::try_from(usage.output_tokens).unwrap_or(0),
    }
}

/// Usage and estimated cost for a response. Unknown models cost zero.
pub fn usage_for(model_id: &str, usage: Option<&ConverseTokenUsage>) -> TokenUsage {
    let tokens = usage.map(extract_token_count).unwrap_or_default();
    let cost_usd = get_pricing(model_id)
        .map(|p| p.estimate_cost(tokens))
        .unwrap_or(0.0);
    TokenUsage { tokens, cost_usd }
}

/// Known on-demand pricing (USD per million tokens).
pub fn get_pricing(model_id: &str) -> Option<ModelPricing> {
    match model_id {
        id if id.contains("claude-3-5-haiku") || id.contains("claude-haiku-4") => {
            Some(ModelPricing {
                input_per_million: 0.80,
                output_per_million: 4.0,
            })
        }
        id if id.contains("claude-3-haiku") => Some(ModelPricing {
            input_per_million: 0.25,
            output_per_million: 1.25,
        }),
        id if id.contains("claude-3-5-sonnet") || id.contains("claude-sonnet-4") => {
            Some(ModelPricing {
                input_per_million: 3.0,
                output_per_million: 15.0,
            })
        }
        _ => None,
    }
}
