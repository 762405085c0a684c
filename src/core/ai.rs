// provider integration - turns plain english into build plans

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::prompts::{self, CLASSIFY_PROMPT};
use crate::core::template::TemplateKind;
use crate::error::Error;

const GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const CLAUDE_URL: &str = "https://api.anthropic.com/v1/messages";

// generation settings used for every call, matching what the artifact
// format was tuned against
const TEMPERATURE: f32 = 0.9;
const MAX_OUTPUT_TOKENS: u32 = 8000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    Gemini,
    Claude,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Gemini, Provider::Claude];

    pub fn name(self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::Claude => "claude",
        }
    }

    pub fn model(self) -> &'static str {
        match self {
            Provider::Gemini => "gemini-2.0-flash",
            Provider::Claude => "claude-sonnet-4-20250514",
        }
    }

    // common env var names for each provider's api key
    fn env_keys(self) -> [&'static str; 2] {
        match self {
            Provider::Gemini => ["GEMINI_API_KEY", "GOOGLE_API_KEY"],
            Provider::Claude => ["ANTHROPIC_API_KEY", "CLAUDE_API_KEY"],
        }
    }
}

/// One turn of conversation, provider-neutral. The wire structs below
/// translate these into whatever shape each API wants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

pub struct Ai {
    client: reqwest::Client,
    provider: Provider,
    api_key: String,
    model: &'static str,
}

// gemini wire format

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiSystem>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiConfig,
}

#[derive(Serialize)]
struct GeminiContent {
    role: &'static str,
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiSystem {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
struct GeminiConfig {
    temperature: f32,
    #[serde(rename = "topK")]
    top_k: u32,
    #[serde(rename = "topP")]
    top_p: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: GeminiReply,
}

#[derive(Deserialize, Default)]
struct GeminiReply {
    #[serde(default)]
    parts: Vec<GeminiReplyPart>,
}

#[derive(Deserialize)]
struct GeminiReplyPart {
    #[serde(default)]
    text: String,
}

// claude wire format

#[derive(Serialize)]
struct ClaudeRequest {
    model: &'static str,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<ClaudeMessage>,
}

#[derive(Serialize)]
struct ClaudeMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ClaudeResponse {
    content: Vec<ClaudeContent>,
}

#[derive(Deserialize)]
struct ClaudeContent {
    text: String,
}

impl Ai {
    /// An explicit key wins; otherwise the provider's usual env vars are
    /// tried in order.
    pub fn new(provider: Provider, api_key: Option<String>) -> Result<Self, Error> {
        let api_key = match api_key {
            Some(key) => key,
            None => provider
                .env_keys()
                .iter()
                .find_map(|var| std::env::var(var).ok())
                .ok_or(Error::MissingApiKey)?,
        };

        Ok(Self {
            client: reqwest::Client::new(),
            provider,
            api_key,
            model: provider.model(),
        })
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn model(&self) -> &'static str {
        self.model
    }

    /// Asks the model which starter template fits the request. The answer
    /// is supposed to be a single word; anything that normalizes to
    /// neither template is a `Template` error.
    pub async fn classify_template(&self, prompt: &str) -> Result<TemplateKind, Error> {
        let messages = [ChatMessage {
            role: Role::User,
            content: format!("{CLASSIFY_PROMPT}{prompt}"),
        }];
        let answer = self.complete(None, &messages).await?;
        TemplateKind::from_answer(&answer).ok_or_else(|| {
            Error::Template(format!("model picked neither react nor node: {answer:?}"))
        })
    }

    /// Sends the whole session and returns the raw reply text. The plan
    /// parser deals with whatever shape the artifact arrives in.
    pub async fn generate_plan(&self, messages: &[ChatMessage]) -> Result<String, Error> {
        self.complete(Some(prompts::system_prompt()), messages).await
    }

    async fn complete(
        &self,
        system: Option<&str>,
        messages: &[ChatMessage],
    ) -> Result<String, Error> {
        log::debug!("requesting {} ({} messages)", self.model, messages.len());
        match self.provider {
            Provider::Gemini => self.gemini_complete(system, messages).await,
            Provider::Claude => self.claude_complete(system, messages).await,
        }
    }

    async fn gemini_complete(
        &self,
        system: Option<&str>,
        messages: &[ChatMessage],
    ) -> Result<String, Error> {
        // gemini rejects non-alternating turns, so consecutive same-role
        // messages collapse into one content entry with several parts
        let mut contents: Vec<GeminiContent> = Vec::new();
        for message in messages {
            let role = match message.role {
                Role::User => "user",
                Role::Assistant => "model",
            };
            let part = GeminiPart {
                text: message.content.clone(),
            };
            match contents.last_mut() {
                Some(last) if last.role == role => last.parts.push(part),
                _ => contents.push(GeminiContent {
                    role,
                    parts: vec![part],
                }),
            }
        }

        let request = GeminiRequest {
            contents,
            system_instruction: system.map(|text| GeminiSystem {
                parts: vec![GeminiPart {
                    text: text.to_string(),
                }],
            }),
            generation_config: GeminiConfig {
                temperature: TEMPERATURE,
                top_k: 1,
                top_p: 1.0,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let url = format!(
            "{GEMINI_URL}/{}:generateContent?key={}",
            self.model, self.api_key
        );
        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let error = response.text().await?;
            return Err(Error::Api(error));
        }

        let response: GeminiResponse = response.json().await?;
        // a reply can arrive split over several parts
        let text: String = response
            .candidates
            .first()
            .map(|c| c.content.parts.iter().map(|p| p.text.as_str()).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(Error::Api("empty response from model".to_string()));
        }
        Ok(text)
    }

    async fn claude_complete(
        &self,
        system: Option<&str>,
        messages: &[ChatMessage],
    ) -> Result<String, Error> {
        let request = ClaudeRequest {
            model: self.model,
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
            system: system.map(str::to_string),
            messages: messages
                .iter()
                .map(|m| ClaudeMessage {
                    role: match m.role {
                        Role::User => "user",
                        Role::Assistant => "assistant",
                    },
                    content: m.content.clone(),
                })
                .collect(),
        };

        let response = self
            .client
            .post(CLAUDE_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let error = response.text().await?;
            return Err(Error::Api(error));
        }

        let response: ClaudeResponse = response.json().await?;
        let text = response
            .content
            .first()
            .map(|c| c.text.trim().to_string())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(Error::Api("empty response from model".to_string()));
        }
        Ok(text)
    }
}
