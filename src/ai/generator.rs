use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::GenerationRequest;

/// Returned when the API answers successfully but without any candidate text.
pub const NO_CONTENT_PLACEHOLDER: &str = "No content generated";

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|t| !t.is_empty())
    }
}

pub struct Generator {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl Generator {
    pub fn new(api_key: String, config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            config.api_base_url.trim_end_matches('/'),
            config.model
        );

        Ok(Self {
            client,
            api_key,
            endpoint,
            model: config.model.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        })
    }

    /// Send one `generateContent` call and return the first candidate's text.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(request.prompt()),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        };

        tracing::debug!(
            model = %self.model,
            tone = %request.tone,
            format = %request.format,
            "sending generation request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            return Err(AppError::GeminiApi(format!(
                "API error ({}): {}",
                status, error_text
            )));
        }

        let parsed: GenerateContentResponse = response.json().await?;

        Ok(parsed
            .first_text()
            .unwrap_or_else(|| NO_CONTENT_PLACEHOLDER.to_string()))
    }

    pub fn model_version(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Format, Tone};

    fn parse(json: &str) -> Option<String> {
        serde_json::from_str::<GenerateContentResponse>(json)
            .unwrap()
            .first_text()
    }

    #[test]
    fn extracts_first_candidate_text() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "first"}, {"text": "ignored"}], "role": "model"}},
                {"content": {"parts": [{"text": "second"}]}}
            ],
            "usageMetadata": {"totalTokenCount": 12}
        }"#;
        assert_eq!(parse(json).as_deref(), Some("first"));
    }

    #[test]
    fn missing_pieces_yield_none() {
        assert_eq!(parse(r#"{}"#), None);
        assert_eq!(parse(r#"{"candidates": []}"#), None);
        assert_eq!(parse(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#), None);
        assert_eq!(parse(r#"{"candidates": [{"content": {"parts": []}}]}"#), None);
        assert_eq!(parse(r#"{"candidates": [{"content": {"parts": [{"text": ""}]}}]}"#), None);
    }

    #[test]
    fn request_body_matches_wire_format() {
        let request =
            GenerationRequest::new("A\nB", Some(Tone::Formal), Some(Format::Email)).unwrap();
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(request.prompt()),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.5,
                max_output_tokens: 1000,
            },
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["generationConfig"]["temperature"], 0.5);
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 1000);
        assert_eq!(
            value["contents"][0]["parts"][0]["text"].as_str(),
            Some(request.prompt().as_str())
        );
    }

    #[test]
    fn endpoint_joins_base_and_model() {
        let config = Config {
            api_base_url: "http://127.0.0.1:9999/".to_string(),
            model: "gemini-test".to_string(),
            ..Config::default()
        };
        let generator = Generator::new("key".to_string(), &config).unwrap();
        assert_eq!(
            generator.endpoint,
            "http://127.0.0.1:9999/v1beta/models/gemini-test:generateContent"
        );
        assert_eq!(generator.model_version(), "gemini-test");
    }
}
