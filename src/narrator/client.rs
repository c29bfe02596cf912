//! Narrator client for ranked-quote explanations.
//!
//! Supports Ollama API for local LLM inference.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::{FamilyProfile, RankedQuote};

/// Default prompt for explaining a ranked batch of quotes.
/// Placeholders: {region}, {family_size}, {income_level}, {plans}, {question}.
pub const DEFAULT_EXPLAIN_PROMPT: &str = r#"You are a senior health insurance advisor. Analyze the following insurance quotes and recommend ONE best plan.

### CONTEXT
Region: {region}
Family size: {family_size}
Income level: {income_level}

### PLANS DATA
{plans}

### QUESTION
{question}

### INSTRUCTIONS
1. Interpret coinsurance correctly: "0.2" means the member pays 20% after the deductible.
2. Prefer comprehensive plans for larger families or higher incomes.
3. Format the output exactly like this:

### Analysis
- 3-5 concise bullet points comparing cost, deductible, and coverage
- Mention trade-offs clearly

### Recommended Plan
**Plan Name:** (Best Plan)
**Reasons:**
- Reason 1
- Reason 2
- Reason 3

### Summary
One short paragraph summarizing why this plan is ideal for this family context."#;

/// Configuration for the narrator client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarratorConfig {
    /// Whether narration is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Ollama API endpoint (default: http://localhost:11434)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Model to use for explanations
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum tokens in response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Temperature for generation (0.0 - 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Custom explanation prompt (see DEFAULT_EXPLAIN_PROMPT placeholders)
    #[serde(default)]
    pub explain_prompt: Option<String>,
    /// Maximum characters of plan data to send
    #[serde(default = "default_max_context_chars")]
    pub max_context_chars: usize,
}

fn default_enabled() -> bool {
    true
}
fn default_endpoint() -> String {
    "http://localhost:11434".to_string()
}
fn default_model() -> String {
    "llama3.2:latest".to_string()
}
fn default_max_tokens() -> u32 {
    750
}
fn default_temperature() -> f32 {
    0.5
}
fn default_max_context_chars() -> usize {
    12000
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            endpoint: default_endpoint(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            explain_prompt: None,
            max_context_chars: default_max_context_chars(),
        }
    }
}

impl NarratorConfig {
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Get the explanation prompt, using custom or default.
    pub fn get_explain_prompt(&self) -> &str {
        self.explain_prompt
            .as_deref()
            .unwrap_or(DEFAULT_EXPLAIN_PROMPT)
    }
}

/// Narrator client for ranked-quote explanations.
pub struct NarratorClient {
    config: NarratorConfig,
    client: Client,
}

/// Ollama API request format.
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

/// Ollama API response format.
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
    #[allow(dead_code)]
    done: bool,
}

impl NarratorClient {
    /// Create a new narrator client with the given configuration.
    pub fn new(config: NarratorConfig) -> Result<Self, NarratorError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(300)) // 5 min timeout for slow models
            .build()
            .map_err(|e| NarratorError::Connection(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Get the config.
    pub fn config(&self) -> &NarratorConfig {
        &self.config
    }

    /// Check if the narrator service is available.
    pub async fn is_available(&self) -> bool {
        if !self.config.enabled {
            return false;
        }
        let url = format!("{}/api/tags", self.config.endpoint);
        match self.client.get(&url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    /// Explain a ranked batch for the given family context.
    pub async fn explain(
        &self,
        ranked: &[RankedQuote],
        question: &str,
        profile: &FamilyProfile,
    ) -> Result<String, NarratorError> {
        if !self.config.enabled {
            return Err(NarratorError::Disabled);
        }

        let prompt = self.build_prompt(ranked, question, profile)?;

        debug!("requesting explanation for {} plans", ranked.len());
        let response = self.call_ollama(&prompt).await?;

        let answer = response.trim().to_string();
        if answer.is_empty() {
            return Err(NarratorError::Parse("empty explanation response".to_string()));
        }

        Ok(answer)
    }

    /// Fill the prompt template with plan data and family context.
    fn build_prompt(
        &self,
        ranked: &[RankedQuote],
        question: &str,
        profile: &FamilyProfile,
    ) -> Result<String, NarratorError> {
        let plans =
            serde_json::to_string_pretty(ranked).map_err(|e| NarratorError::Parse(e.to_string()))?;
        let plans = truncate_utf8(&plans, self.config.max_context_chars);

        Ok(self
            .config
            .get_explain_prompt()
            .replace("{region}", &profile.region)
            .replace("{family_size}", &profile.family_size.to_string())
            .replace("{income_level}", &profile.income_level)
            .replace("{plans}", plans)
            .replace("{question}", question))
    }

    /// Call Ollama API with a prompt.
    async fn call_ollama(&self, prompt: &str) -> Result<String, NarratorError> {
        let request = OllamaRequest {
            model: self.config.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: OllamaOptions {
                temperature: self.config.temperature,
                num_predict: self.config.max_tokens,
            },
        };

        let url = format!("{}/api/generate", self.config.endpoint);
        let resp = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| NarratorError::Connection(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(NarratorError::Api(format!("HTTP {}: {}", status, body)));
        }

        let ollama_resp: OllamaResponse = resp
            .json()
            .await
            .map_err(|e| NarratorError::Parse(e.to_string()))?;

        Ok(ollama_resp.response)
    }
}

/// Truncate to a maximum byte length at a valid UTF-8 boundary.
fn truncate_utf8(text: &str, max_chars: usize) -> &str {
    if text.len() <= max_chars {
        return text;
    }
    let mut end = max_chars;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Errors that can occur during narration.
#[derive(Debug, Error)]
pub enum NarratorError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("narrator is disabled")]
    Disabled,
}
