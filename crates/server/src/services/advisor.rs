//! Livestock advisory chat client.
//!
//! A thin client for a Gemini-style `generateContent` endpoint with a
//! fixed advisor persona. The upstream is an opaque black box: one
//! request, one response, no retries. Callers degrade to
//! [`FALLBACK_REPLY`] on any failure.

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::config::AdvisorConfig;

/// Canned reply returned to the customer when the upstream is unreachable.
pub const FALLBACK_REPLY: &str =
    "I'm having trouble connecting to my livestock knowledge base. Please try again later!";

/// Fixed persona for the advisor.
const SYSTEM_PROMPT: &str = "You are an expert Egyptian Livestock Advisor for \"Dabeeha\". \
Your goal is to help users in Cairo choose between different types of sheep (Rahmani, Barki, \
Saidi) and calves (Baladi, Friesian) specifically for Eid al-Adha. Advise them on: \
1. Sharia-compliant sacrifice requirements (age, health, etc.). \
2. Whether to buy Alive or Slaughtered based on their family size and logistical capacity. \
3. Expected meat yield and the best day of Eid to schedule delivery. \
Always be polite, professional, and culturally aware of Egyptian and Islamic traditions. \
Keep responses concise and in bullet points if possible.";

/// Sampling temperature for advice generation.
const TEMPERATURE: f32 = 0.7;

/// Errors that can occur when requesting advice.
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status}")]
    Api { status: u16 },

    /// The response carried no generated text.
    #[error("empty response from advisor upstream")]
    EmptyResponse,
}

/// Client for the advisory-chat upstream.
#[derive(Clone)]
pub struct AdvisorClient {
    client: reqwest::Client,
    config: AdvisorConfig,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl AdvisorClient {
    /// Create a new advisor client.
    #[must_use]
    pub fn new(config: &AdvisorConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config: config.clone(),
        }
    }

    /// Ask the advisor a free-text question and return its free-text reply.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the upstream responds with a
    /// non-success status, or the response carries no text.
    pub async fn advise(&self, query: &str) -> Result<String, AdvisorError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url,
            self.config.model,
            self.config.api_key.expose_secret(),
        );

        let request = GenerateRequest {
            system_instruction: Content {
                parts: vec![Part {
                    text: SYSTEM_PROMPT,
                }],
            },
            contents: vec![Content {
                parts: vec![Part { text: query }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
            },
        };

        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "advisor upstream error");
            return Err(AdvisorError::Api {
                status: status.as_u16(),
            });
        }

        let body: GenerateResponse = response.json().await?;
        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.is_empty())
            .ok_or(AdvisorError::EmptyResponse)?;

        Ok(text)
    }
}
