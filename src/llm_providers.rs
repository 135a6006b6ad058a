use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Anything that can turn a prompt into generated text. The definition
/// service only depends on this seam, so tests can substitute a scripted
/// generator for the real HTTP providers.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `prompt`. With `json_output` the provider is asked
    /// for a machine-readable JSON body instead of free-form prose.
    async fn generate(&self, prompt: &str, json_output: bool) -> Result<String>;

    fn provider_name(&self) -> &'static str;
}

/// Enum-based provider dispatch, one variant per supported remote service.
#[derive(Debug, Clone)]
pub enum LLMProvider {
    Gemini(GeminiProvider),
    OpenAI(OpenAIProvider),
}

#[async_trait]
impl TextGenerator for LLMProvider {
    async fn generate(&self, prompt: &str, json_output: bool) -> Result<String> {
        match self {
            LLMProvider::Gemini(provider) => provider.generate(prompt, json_output).await,
            LLMProvider::OpenAI(provider) => provider.generate(prompt, json_output).await,
        }
    }

    fn provider_name(&self) -> &'static str {
        match self {
            LLMProvider::Gemini(_) => "Gemini",
            LLMProvider::OpenAI(_) => "OpenAI",
        }
    }
}

impl LLMProvider {
    pub fn model_name(&self) -> &str {
        match self {
            LLMProvider::Gemini(provider) => &provider.model,
            LLMProvider::OpenAI(provider) => &provider.model,
        }
    }
}

/// Google generative-language API provider.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

impl GeminiProvider {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url
                .unwrap_or_else(|| "https://generativelanguage.googleapis.com/v1beta".to_string()),
            model: model.unwrap_or_else(|| "gemini-2.5-flash-preview-04-17".to_string()),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiProvider {
    async fn generate(&self, prompt: &str, json_output: bool) -> Result<String> {
        let request_body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: json_output.then(|| GeminiGenerationConfig {
                response_mime_type: "application/json".to_string(),
            }),
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        info!(
            provider = self.provider_name(),
            model = %self.model,
            json_output,
            prompt_length = prompt.len(),
            "Making generation request"
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(
                provider = self.provider_name(),
                status = %status,
                error = %error_text,
                "Generation request failed"
            );
            return Err(anyhow::anyhow!("Gemini API request failed: {}", error_text));
        }

        let gemini_response: GeminiResponse = response.json().await?;
        let text = gemini_response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| anyhow::anyhow!("No candidates in Gemini response"))?;

        info!(
            provider = self.provider_name(),
            response_length = text.len(),
            "Received generation response"
        );
        Ok(text)
    }

    fn provider_name(&self) -> &'static str {
        "Gemini"
    }
}

/// OpenAI-compatible chat-completion provider.
#[derive(Debug, Clone)]
pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: ChatMessage,
}

impl OpenAIProvider {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            model: model.unwrap_or_else(|| "gpt-4o-mini".to_string()),
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAIProvider {
    async fn generate(&self, prompt: &str, json_output: bool) -> Result<String> {
        let request_body = OpenAIRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            response_format: json_output.then(|| ResponseFormat {
                format: "json_object".to_string(),
            }),
        };

        info!(
            provider = self.provider_name(),
            model = %self.model,
            json_output,
            prompt_length = prompt.len(),
            "Making generation request"
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(
                provider = self.provider_name(),
                status = %status,
                error = %error_text,
                "Generation request failed"
            );
            return Err(anyhow::anyhow!("OpenAI API request failed: {}", error_text));
        }

        let openai_response: OpenAIResponse = response.json().await?;
        let text = openai_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| anyhow::anyhow!("No choices in OpenAI response"))?;

        info!(
            provider = self.provider_name(),
            response_length = text.len(),
            "Received generation response"
        );
        Ok(text)
    }

    fn provider_name(&self) -> &'static str {
        "OpenAI"
    }
}

/// Parser for LLM responses that may wrap their JSON body in a markdown
/// code fence.
pub struct JsonResponseParser;

impl JsonResponseParser {
    /// Strip one optional surrounding code fence, including a language tag
    /// on the opening line. Content without a fence is returned trimmed.
    pub fn strip_code_fence(content: &str) -> &str {
        let trimmed = content.trim();
        let Some(rest) = trimmed.strip_prefix("```") else {
            return trimmed;
        };
        let rest = rest.strip_suffix("```").unwrap_or(rest);

        let (first_line, remainder) = match rest.split_once('\n') {
            Some((first, remainder)) => (first, remainder),
            None => (rest, ""),
        };
        let is_language_tag = !first_line.is_empty()
            && first_line.trim().chars().all(|c| c.is_ascii_alphanumeric());
        if is_language_tag {
            remainder.trim()
        } else {
            rest.trim()
        }
    }

    /// Strip the fence, then parse. No partial recovery: any JSON error is
    /// returned to the caller as-is.
    pub fn parse_json_response<T>(content: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let json_content = Self::strip_code_fence(content);
        serde_json::from_str::<T>(json_content)
            .map_err(|e| anyhow::anyhow!("Failed to parse JSON response: {}", e))
    }
}

/// Factory for creating providers based on the configured provider type.
pub struct LLMProviderFactory;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LLMProviderType {
    Gemini,
    OpenAI,
}

impl LLMProviderType {
    /// Parse a provider name from configuration. Unknown names fall back to
    /// Gemini, the provider the application was built against.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "gemini" | "google" => LLMProviderType::Gemini,
            "openai" | "chatgpt" | "gpt" => LLMProviderType::OpenAI,
            _ => {
                info!("Unknown LLM provider '{}', defaulting to Gemini", name);
                LLMProviderType::Gemini
            }
        }
    }
}

impl LLMProviderFactory {
    pub fn create_provider(
        provider_type: LLMProviderType,
        api_key: String,
        base_url: Option<String>,
        model: Option<String>,
    ) -> LLMProvider {
        match provider_type {
            LLMProviderType::Gemini => {
                LLMProvider::Gemini(GeminiProvider::new(api_key, base_url, model))
            }
            LLMProviderType::OpenAI => {
                LLMProvider::OpenAI(OpenAIProvider::new(api_key, base_url, model))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_code_fence_handles_tagged_fences() {
        let fenced = "```json\n[{\"term\":\"candida\",\"definition\":\"a yeast\"}]\n```";
        assert_eq!(
            JsonResponseParser::strip_code_fence(fenced),
            "[{\"term\":\"candida\",\"definition\":\"a yeast\"}]"
        );
    }

    #[test]
    fn strip_code_fence_handles_untagged_and_bare_content() {
        assert_eq!(JsonResponseParser::strip_code_fence("```\n[1, 2]\n```"), "[1, 2]");
        assert_eq!(JsonResponseParser::strip_code_fence("```[1, 2]```"), "[1, 2]");
        assert_eq!(JsonResponseParser::strip_code_fence("  [1, 2]  "), "[1, 2]");
    }

    #[test]
    fn parse_json_response_rejects_non_json() {
        let result = JsonResponseParser::parse_json_response::<Vec<u32>>("not json at all");
        assert!(result.is_err());
    }

    #[test]
    fn provider_names_parse_with_gemini_fallback() {
        for (input, expected) in [
            ("gemini", LLMProviderType::Gemini),
            ("Google", LLMProviderType::Gemini),
            ("openai", LLMProviderType::OpenAI),
            ("ChatGPT", LLMProviderType::OpenAI),
            ("gpt", LLMProviderType::OpenAI),
            ("mystery", LLMProviderType::Gemini),
        ] {
            assert_eq!(LLMProviderType::from_name(input), expected, "input: {input}");
        }
    }

    #[test]
    fn factory_builds_the_requested_provider() {
        let gemini = LLMProviderFactory::create_provider(
            LLMProviderType::Gemini,
            "test-key".to_string(),
            None,
            None,
        );
        assert_eq!(gemini.provider_name(), "Gemini");
        assert_eq!(gemini.model_name(), "gemini-2.5-flash-preview-04-17");

        let openai = LLMProviderFactory::create_provider(
            LLMProviderType::OpenAI,
            "test-key".to_string(),
            None,
            Some("gpt-4o".to_string()),
        );
        assert_eq!(openai.provider_name(), "OpenAI");
        assert_eq!(openai.model_name(), "gpt-4o");
    }
}
